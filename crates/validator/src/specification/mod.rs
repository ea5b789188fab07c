//! Declarative specifications
//!
//! A [`Specification<M>`] describes how to validate a model of type `M`: an
//! ordered list of member entries and model-level rules. Each member entry
//! carries a [`MemberSpecification<M, T>`] describing the rules for one value
//! of type `T` reached through an accessor bound at build time.
//!
//! Both are built through callbacks that receive a builder and must return it:
//!
//! ```rust,ignore
//! use verdict::specification::Specification;
//!
//! struct User { name: String, nickname: Option<String> }
//!
//! let spec = Specification::<User>::build(|s| {
//!     s.member("Name", |u| &u.name, |m| m.not_empty().max_length(64))
//!         .member_opt("Nickname", |u| u.nickname.as_ref(), |m| m.optional().min_length(3))
//! })?;
//! ```
//!
//! Builder misuse is recorded on the builder and surfaces as the
//! [`SpecError`](crate::foundation::SpecError) returned by `build`, so an
//! invalid specification never exists.

pub mod member;
pub mod root;
pub mod rule;

use std::sync::atomic::{AtomicU64, Ordering};

pub use member::{MemberSpecBuilder, MemberSpecification};
pub use root::{Specification, SpecificationBuilder};
pub use rule::{
    CollectionRule, Items, MemberPredicate, NestedModel, NullableRule, RelativePredicate, Rule,
    RuleKind,
};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identity of one builder instance, used to check that a build callback
/// hands back the builder it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BuilderToken(u64);

impl BuilderToken {
    pub(crate) fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// Error for a set-once builder option that was set again.
pub(crate) fn already_set(method: &str) -> crate::foundation::SpecError {
    crate::foundation::SpecError::invalid_operation(format!("`{method}` can only be called once"))
}
