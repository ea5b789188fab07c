//! Root specifications and their builder

use std::fmt;

use crate::engine::{Scope, Traversal, execute_member};
use crate::foundation::failure::check_name;
use crate::foundation::{ErrorsCollection, SpecError, SpecResult, ValidationError};
use crate::specification::{BuilderToken, MemberSpecBuilder, MemberSpecification, already_set};

// ============================================================================
// ENTRIES
// ============================================================================

/// One entry of a root specification, in declaration order.
pub(crate) enum SpecEntry<M> {
    /// A member bound to an accessor.
    Member(Box<dyn MemberEntry<M>>),
    /// A rule over the whole model; its errors land at the root level.
    Model(ModelRule<M>),
}

/// A member of `M` with its specification, with the value type erased.
pub(crate) trait MemberEntry<M>: Send + Sync {
    /// Key under which this member's errors are reported.
    fn name(&self) -> &str;

    fn execute(
        &self,
        model: Option<&M>,
        scope: &Scope<'_>,
        traversal: Traversal,
    ) -> SpecResult<ErrorsCollection>;
}

enum Accessor<M, T> {
    Present(Box<dyn Fn(&M) -> &T + Send + Sync>),
    Optional(Box<dyn Fn(&M) -> Option<&T> + Send + Sync>),
}

impl<M, T> Accessor<M, T> {
    fn read<'a>(&self, model: &'a M) -> Option<&'a T> {
        match self {
            Self::Present(read) => Some(read(model)),
            Self::Optional(read) => read(model),
        }
    }
}

struct BoundMember<M, T> {
    name: String,
    accessor: Accessor<M, T>,
    spec: MemberSpecification<M, T>,
}

impl<M: 'static, T: 'static> MemberEntry<M> for BoundMember<M, T> {
    fn name(&self) -> &str {
        self.spec.name().unwrap_or(self.name.as_str())
    }

    fn execute(
        &self,
        model: Option<&M>,
        scope: &Scope<'_>,
        traversal: Traversal,
    ) -> SpecResult<ErrorsCollection> {
        let value = model.and_then(|model| self.accessor.read(model));
        execute_member(&self.spec, model, value, scope, traversal)
    }
}

/// A predicate over the whole model.
pub(crate) struct ModelRule<M> {
    predicate: Box<dyn Fn(&M) -> bool + Send + Sync>,
    error: Option<ValidationError>,
}

impl<M> ModelRule<M> {
    pub(crate) fn check(&self, model: &M) -> bool {
        (self.predicate)(model)
    }

    pub(crate) const fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }
}

// ============================================================================
// SPECIFICATION
// ============================================================================

/// Validation rules for a model of type `M`.
///
/// Immutable once built and safe to share across threads.
///
/// # Examples
///
/// ```rust,ignore
/// use verdict::specification::Specification;
///
/// struct Signup { email: String, password: String, confirm: String }
///
/// let spec = Specification::<Signup>::build(|s| {
///     s.member("Email", |m| &m.email, |m| m.not_empty().contains("@"))
///         .member("Password", |m| &m.password, |m| m.min_length(8))
///         .rule(|m| m.password == m.confirm, "Passwords must match")
/// })?;
/// ```
pub struct Specification<M> {
    entries: Vec<SpecEntry<M>>,
    summary_error: Option<ValidationError>,
}

impl<M: 'static> Specification<M> {
    /// Builds a specification.
    ///
    /// `configure` must return the builder it received; returning any other
    /// builder fails with [`SpecError::InvalidProcessedReference`].
    pub fn build<F>(configure: F) -> SpecResult<Self>
    where
        F: FnOnce(SpecificationBuilder<M>) -> SpecificationBuilder<M>,
    {
        let builder = SpecificationBuilder::new();
        let token = builder.token;
        let processed = configure(builder);
        if processed.token != token {
            return Err(SpecError::InvalidProcessedReference);
        }
        processed.finish()
    }
}

impl<M> Specification<M> {
    pub(crate) fn entries(&self) -> &[SpecEntry<M>] {
        &self.entries
    }

    /// Error replacing every error of the model.
    #[must_use]
    pub const fn summary_error(&self) -> Option<&ValidationError> {
        self.summary_error.as_ref()
    }

    /// Names under which member errors are reported, in declaration order.
    #[must_use]
    pub fn member_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                SpecEntry::Member(member) => Some(member.name()),
                SpecEntry::Model(_) => None,
            })
            .collect()
    }

    /// Number of entries, members and model rules together.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the specification has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M> fmt::Debug for Specification<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("members", &self.member_names())
            .field("entries", &self.entries.len())
            .field("summary_error", &self.summary_error)
            .finish()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for a [`Specification`].
pub struct SpecificationBuilder<M> {
    token: BuilderToken,
    entries: Vec<SpecEntry<M>>,
    summary_error: Option<ValidationError>,
    failure: Option<SpecError>,
}

impl<M> fmt::Debug for SpecificationBuilder<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecificationBuilder")
            .field("entries", &self.entries.len())
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}

impl<M: 'static> SpecificationBuilder<M> {
    fn new() -> Self {
        Self {
            token: BuilderToken::next(),
            entries: Vec::new(),
            summary_error: None,
            failure: None,
        }
    }

    fn finish(self) -> SpecResult<Specification<M>> {
        if let Some(failure) = self.failure {
            return Err(failure);
        }
        Ok(Specification {
            entries: self.entries,
            summary_error: self.summary_error,
        })
    }

    fn fail(&mut self, failure: SpecError) {
        self.failure.get_or_insert(failure);
    }

    fn bind<T, F>(mut self, name: String, accessor: Accessor<M, T>, configure: F) -> Self
    where
        T: 'static,
        F: FnOnce(MemberSpecBuilder<M, T>) -> MemberSpecBuilder<M, T>,
    {
        if let Err(failure) = check_name("name", &name) {
            self.fail(failure);
            return self;
        }
        match MemberSpecification::build(configure) {
            Ok(spec) => self.entries.push(SpecEntry::Member(Box::new(BoundMember {
                name,
                accessor,
                spec,
            }))),
            Err(failure) => self.fail(failure),
        }
        self
    }

    /// Binds a member that is always present.
    #[must_use = "builder methods must be chained or built"]
    pub fn member<T, G, F>(self, name: impl Into<String>, read: G, configure: F) -> Self
    where
        T: 'static,
        G: Fn(&M) -> &T + Send + Sync + 'static,
        F: FnOnce(MemberSpecBuilder<M, T>) -> MemberSpecBuilder<M, T>,
    {
        self.bind(name.into(), Accessor::Present(Box::new(read)), configure)
    }

    /// Binds a member that may be absent.
    ///
    /// The member exists when `read` returns `Some`.
    #[must_use = "builder methods must be chained or built"]
    pub fn member_opt<T, G, F>(self, name: impl Into<String>, read: G, configure: F) -> Self
    where
        T: 'static,
        G: Fn(&M) -> Option<&T> + Send + Sync + 'static,
        F: FnOnce(MemberSpecBuilder<M, T>) -> MemberSpecBuilder<M, T>,
    {
        self.bind(name.into(), Accessor::Optional(Box::new(read)), configure)
    }

    /// Adds a rule over the whole model that uses the default error.
    #[must_use = "builder methods must be chained or built"]
    pub fn must<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&M) -> bool + Send + Sync + 'static,
    {
        self.entries.push(SpecEntry::Model(ModelRule {
            predicate: Box::new(predicate),
            error: None,
        }));
        self
    }

    /// Adds a rule over the whole model with its own error.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule<P>(mut self, predicate: P, error: impl Into<ValidationError>) -> Self
    where
        P: Fn(&M) -> bool + Send + Sync + 'static,
    {
        self.entries.push(SpecEntry::Model(ModelRule {
            predicate: Box::new(predicate),
            error: Some(error.into()),
        }));
        self
    }

    /// Replaces every error of the model with `error`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_summary_error(mut self, error: impl Into<ValidationError>) -> Self {
        if self.summary_error.is_some() {
            self.fail(already_set("with_summary_error"));
        } else {
            self.summary_error = Some(error.into());
        }
        self
    }
}
