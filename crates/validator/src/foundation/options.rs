//! Validation options and traversal strategies
//!
//! [`ValidationOptions`] is plain data: it derives serde with defaults for
//! every field, so a host can load it from its own configuration source and
//! override individual knobs per call with the `with_*` methods.

use serde::{Deserialize, Serialize};

use crate::foundation::failure::check_name;
use crate::foundation::{SpecError, ValidationError};

/// Traversal policy controlling short-circuiting and forced evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStrategy {
    /// Run every rule of every present member and collect all errors.
    ///
    /// A scope with a summary error switches to [`FailFast`](Self::FailFast):
    /// its details would be replaced anyway, so the first hit is enough.
    #[default]
    Complete,
    /// Stop at the first error found in the current scope.
    FailFast,
    /// Run every rule whether or not values exist, treating each predicate
    /// as failed. Enumerates every message a specification can produce.
    Force,
}

/// What to do when the root model itself is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullRootStrategy {
    /// An absent root is valid.
    NoErrors,
    /// An absent root yields the required error at the root level.
    #[default]
    RequiredError,
    /// An absent root fails with [`SpecError::NullModel`].
    ThrowOnNull,
}

/// Options for one validation call.
///
/// # Examples
///
/// ```rust,ignore
/// use verdict::foundation::{ValidationOptions, ValidationStrategy};
///
/// let options = ValidationOptions::default()
///     .with_strategy(ValidationStrategy::FailFast)
///     .with_max_depth(4);
///
/// let options: ValidationOptions =
///     serde_json::from_str(r#"{ "max_depth": 4, "strategy": "fail_fast" }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Error emitted for an absent, non-optional member.
    pub required_error: ValidationError,
    /// Error emitted by predicate rules that carry no error of their own.
    pub default_error: ValidationError,
    /// Deepest nesting level a traversal may reach.
    pub max_depth: usize,
    /// Member key for the synthetic item evaluated under `Force`.
    pub collection_force_key: String,
    /// Handling of an absent root model.
    pub null_root_strategy: NullRootStrategy,
    /// Translation used when rendering messages. `None` renders templates.
    pub translation_name: Option<String>,
    /// Traversal strategy.
    pub strategy: ValidationStrategy,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            required_error: ValidationError::new("Required"),
            default_error: ValidationError::new("Error"),
            max_depth: 10,
            collection_force_key: "#".to_owned(),
            null_root_strategy: NullRootStrategy::default(),
            translation_name: None,
            strategy: ValidationStrategy::default(),
        }
    }
}

impl ValidationOptions {
    /// Checks the options for values the engine cannot work with.
    pub fn check(&self) -> Result<(), SpecError> {
        check_name("collection_force_key", &self.collection_force_key)
    }

    /// Sets the traversal strategy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_strategy(mut self, strategy: ValidationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the maximum depth.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the required error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_required_error(mut self, error: impl Into<ValidationError>) -> Self {
        self.required_error = error.into();
        self
    }

    /// Sets the default error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_default_error(mut self, error: impl Into<ValidationError>) -> Self {
        self.default_error = error.into();
        self
    }

    /// Sets the key used for the synthetic collection item under `Force`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_collection_force_key(mut self, key: impl Into<String>) -> Self {
        self.collection_force_key = key.into();
        self
    }

    /// Sets how an absent root model is handled.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_null_root_strategy(mut self, strategy: NullRootStrategy) -> Self {
        self.null_root_strategy = strategy;
        self
    }

    /// Sets the translation used for rendering messages.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_translation(mut self, name: impl Into<String>) -> Self {
        self.translation_name = Some(name.into());
        self
    }
}
