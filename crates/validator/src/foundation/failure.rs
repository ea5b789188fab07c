//! Failures raised while building or executing specifications.
//!
//! These are not validation outcomes. Invalid data is reported through
//! [`ErrorsCollection`](crate::foundation::ErrorsCollection); a [`SpecError`]
//! means the specification itself is misconfigured, or the traversal could
//! not complete.

/// Errors from specification construction and execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SpecError {
    /// A builder method was used in a way that is not allowed,
    /// e.g. a set-once option was set twice.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// An argument failed validation.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A builder callback returned a builder other than the one it received.
    #[error("builder callback must return the builder it was given")]
    InvalidProcessedReference,

    /// A nested rule needs a specification that was never registered.
    #[error("no specification registered for `{type_name}`")]
    SpecificationNotFound {
        /// Type whose specification was requested.
        type_name: &'static str,
    },

    /// Traversal went deeper than the configured maximum.
    #[error("maximum validation depth of {max_depth} exceeded")]
    MaxDepthExceeded {
        /// The configured limit.
        max_depth: usize,
    },

    /// The root model was absent and the null-root strategy forbids it.
    #[error("validated model is absent")]
    NullModel,
}

impl SpecError {
    pub(crate) fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }

    pub(crate) fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    /// Whether this error comes from misusing the builder API.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidOperation(_) | Self::InvalidArgument { .. } | Self::InvalidProcessedReference
        )
    }
}

/// Checks that a member name is usable as an error-collection key.
pub(crate) fn check_name(argument: &'static str, name: &str) -> Result<(), SpecError> {
    if name.trim().is_empty() {
        return Err(SpecError::invalid_argument(
            argument,
            "must not be empty or whitespace",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = SpecError::SpecificationNotFound {
            type_name: "app::Address",
        };
        assert_eq!(err.to_string(), "no specification registered for `app::Address`");
        assert!(!err.is_configuration());
    }

    #[test]
    fn configuration_errors() {
        assert!(SpecError::InvalidProcessedReference.is_configuration());
        assert!(SpecError::invalid_operation("twice").is_configuration());
        assert!(!SpecError::MaxDepthExceeded { max_depth: 3 }.is_configuration());
    }

    #[test]
    fn name_check_rejects_blank() {
        assert!(check_name("name", "Email").is_ok());
        assert!(matches!(
            check_name("name", "  \t"),
            Err(SpecError::InvalidArgument { argument: "name", .. })
        ));
        assert!(check_name("name", "").is_err());
    }
}
