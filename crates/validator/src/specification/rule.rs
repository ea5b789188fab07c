//! Rules attached to a member specification
//!
//! A [`Rule<M, T>`] checks a member value of type `T` that belongs to a model
//! of type `M`. Predicate rules carry a closure and an optional error; an
//! absent error means the engine's default error is used. Composite rules
//! (collection, nullable) own an inner specification and run it through the
//! executor.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;

use crate::engine::{Scope, Traversal};
use crate::foundation::{ErrorsCollection, SpecResult, ValidationError};
use crate::repository::SpecificationRepository;
use crate::specification::Specification;

/// Discriminant of a [`Rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Predicate over the member value.
    Member,
    /// Predicate over the whole model.
    Relative,
    /// Validation of the member value with another specification.
    Nested,
    /// Validation of every item of a collection member.
    Collection,
    /// Validation of the payload of an optional member.
    Nullable,
}

impl RuleKind {
    /// Whether this is one of the two predicate kinds.
    #[must_use]
    pub const fn is_predicate(self) -> bool {
        matches!(self, Self::Member | Self::Relative)
    }
}

/// One rule of a member specification.
pub enum Rule<M, T> {
    /// Predicate over the member value.
    Member(MemberPredicate<T>),
    /// Predicate over the whole model.
    Relative(RelativePredicate<M>),
    /// Validation with another specification.
    Nested(NestedModel<T>),
    /// Validation of every item of a collection.
    Collection(CollectionRule<M, T>),
    /// Validation of the payload of an optional value.
    Nullable(NullableRule<M, T>),
}

impl<M, T> Rule<M, T> {
    /// The kind of this rule.
    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        match self {
            Self::Member(_) => RuleKind::Member,
            Self::Relative(_) => RuleKind::Relative,
            Self::Nested(_) => RuleKind::Nested,
            Self::Collection(_) => RuleKind::Collection,
            Self::Nullable(_) => RuleKind::Nullable,
        }
    }
}

impl<M, T> fmt::Debug for Rule<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rule").field(&self.kind()).finish()
    }
}

// ============================================================================
// PREDICATES
// ============================================================================

/// A predicate over the member value.
pub struct MemberPredicate<T> {
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
    error: Option<ValidationError>,
}

impl<T> MemberPredicate<T> {
    pub(crate) fn new<P>(predicate: P, error: Option<ValidationError>) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            error,
        }
    }

    /// Runs the predicate.
    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }

    /// The rule's own error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }
}

/// A predicate over the whole model, attached to a member.
pub struct RelativePredicate<M> {
    predicate: Box<dyn Fn(&M) -> bool + Send + Sync>,
    error: Option<ValidationError>,
}

impl<M> RelativePredicate<M> {
    pub(crate) fn new<P>(predicate: P, error: Option<ValidationError>) -> Self
    where
        P: Fn(&M) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            error,
        }
    }

    /// Runs the predicate.
    pub fn check(&self, model: &M) -> bool {
        (self.predicate)(model)
    }

    /// The rule's own error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }
}

// ============================================================================
// NESTED
// ============================================================================

type Resolver<T> = fn(&SpecificationRepository) -> SpecResult<Arc<Specification<T>>>;

enum NestedTarget<T> {
    Inline(Arc<Specification<T>>),
    Registered(Resolver<T>),
}

/// Validation of the member value with a full specification.
///
/// The specification is either given inline or looked up in the repository
/// by the member's static type when the rule runs.
pub struct NestedModel<T> {
    target: NestedTarget<T>,
}

impl<T: 'static> NestedModel<T> {
    pub(crate) fn registered() -> Self {
        Self {
            target: NestedTarget::Registered(SpecificationRepository::get::<T>),
        }
    }

    pub(crate) const fn inline(spec: Arc<Specification<T>>) -> Self {
        Self {
            target: NestedTarget::Inline(spec),
        }
    }
}

impl<T> NestedModel<T> {
    /// Whether the specification comes from the repository.
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        matches!(self.target, NestedTarget::Registered(_))
    }

    pub(crate) fn resolve(
        &self,
        repository: &SpecificationRepository,
    ) -> SpecResult<Arc<Specification<T>>> {
        match &self.target {
            NestedTarget::Inline(spec) => Ok(Arc::clone(spec)),
            NestedTarget::Registered(resolve) => resolve(repository),
        }
    }
}

// ============================================================================
// COMPOSITES
// ============================================================================

/// Member types whose items can be validated one by one with
/// [`each`](crate::specification::MemberSpecBuilder::each).
pub trait Items {
    /// The item type.
    type Item;

    /// Items in iteration order; an item's position is its error key.
    fn items(&self) -> impl Iterator<Item = &Self::Item>;
}

impl<I> Items for Vec<I> {
    type Item = I;

    fn items(&self) -> impl Iterator<Item = &I> {
        self.iter()
    }
}

impl<I> Items for Box<[I]> {
    type Item = I;

    fn items(&self) -> impl Iterator<Item = &I> {
        self.iter()
    }
}

impl<I, const N: usize> Items for [I; N] {
    type Item = I;

    fn items(&self) -> impl Iterator<Item = &I> {
        self.iter()
    }
}

impl<I> Items for VecDeque<I> {
    type Item = I;

    fn items(&self) -> impl Iterator<Item = &I> {
        self.iter()
    }
}

impl<I> Items for BTreeSet<I> {
    type Item = I;

    fn items(&self) -> impl Iterator<Item = &I> {
        self.iter()
    }
}

impl<I, S> Items for HashSet<I, S> {
    type Item = I;

    fn items(&self) -> impl Iterator<Item = &I> {
        self.iter()
    }
}

impl<I, S> Items for IndexSet<I, S> {
    type Item = I;

    fn items(&self) -> impl Iterator<Item = &I> {
        self.iter()
    }
}

/// A rule that runs an inner specification through the executor.
pub(crate) trait ComposedRule<M, T>: Send + Sync {
    fn execute(
        &self,
        model: Option<&M>,
        value: Option<&T>,
        scope: &Scope<'_>,
        traversal: Traversal,
    ) -> SpecResult<ErrorsCollection>;
}

/// Validation of every item of a collection member.
///
/// Item errors are keyed by the item's zero-based index.
pub struct CollectionRule<M, T> {
    items: Box<dyn ComposedRule<M, T>>,
}

impl<M, T> CollectionRule<M, T> {
    pub(crate) fn new(items: Box<dyn ComposedRule<M, T>>) -> Self {
        Self { items }
    }

    pub(crate) fn execute(
        &self,
        model: Option<&M>,
        value: Option<&T>,
        scope: &Scope<'_>,
        traversal: Traversal,
    ) -> SpecResult<ErrorsCollection> {
        self.items.execute(model, value, scope, traversal)
    }
}

/// Validation of the payload of an `Option` member.
///
/// A present `None` passes unless the strategy is `Force`.
pub struct NullableRule<M, T> {
    payload: Box<dyn ComposedRule<M, T>>,
}

impl<M, T> NullableRule<M, T> {
    pub(crate) fn new(payload: Box<dyn ComposedRule<M, T>>) -> Self {
        Self { payload }
    }

    pub(crate) fn execute(
        &self,
        model: Option<&M>,
        value: Option<&T>,
        scope: &Scope<'_>,
        traversal: Traversal,
    ) -> SpecResult<ErrorsCollection> {
        self.payload.execute(model, value, scope, traversal)
    }
}
