//! Prelude module for convenient imports.
//!
//! Provides a single `use verdict::prelude::*;` import that brings in the
//! types needed to build specifications and run validations. The built-in
//! member rules are inherent methods and need no import.
//!
//! # Examples
//!
//! ```rust,ignore
//! use verdict::prelude::*;
//!
//! let spec = Specification::<Login>::build(|s| {
//!     s.member("User", |l| &l.user, |m| m.not_empty())
//! })?;
//! ```

// ============================================================================
// FOUNDATION: Errors, arguments, options
// ============================================================================

pub use crate::foundation::{
    ArgValue, ErrorsCollection, MessageArg, NullRootStrategy, SpecError, SpecResult,
    ValidationError, ValidationOptions, ValidationStrategy,
};

// ============================================================================
// SPECIFICATIONS
// ============================================================================

pub use crate::specification::{
    MemberSpecBuilder, MemberSpecification, Rule, RuleKind, Specification, SpecificationBuilder,
};

// ============================================================================
// EXECUTION
// ============================================================================

pub use crate::member;
pub use crate::repository::SpecificationRepository;
pub use crate::translation::{Translate, Translator};
pub use crate::validator::{ValidationResult, Validator, ValidatorBuilder};
