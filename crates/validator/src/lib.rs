//! # verdict
//!
//! A declarative model-validation engine: build a specification per model
//! type, register it, and validate instances into a hierarchical error
//! report.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verdict::prelude::*;
//!
//! struct Address { city: String }
//! struct User { name: String, age: u32, address: Address, tags: Vec<String> }
//!
//! let repository = SpecificationRepository::new();
//! repository.register(Specification::<Address>::build(|s| {
//!     s.member("City", |a| &a.city, |m| m.not_empty())
//! })?);
//! repository.register(Specification::<User>::build(|s| {
//!     s.member("Name", |u| &u.name, |m| m.length_between(1, 64))
//!         .member("Age", |u| &u.age, |m| m.between(18, 120))
//!         .member("Address", |u| &u.address, |m| m.nested())
//!         .member("Tags", |u| &u.tags, |m| m.each(|tag| tag.not_whitespace()))
//! })?);
//!
//! let validator = Validator::new(repository)?;
//! let result = validator.validate(&user)?;
//! if !result.is_valid() {
//!     println!("{result}");
//! }
//! ```
//!
//! ## Strategies
//!
//! - [`Complete`](ValidationStrategy::Complete) collects every error
//! - [`FailFast`](ValidationStrategy::FailFast) stops at the first error per scope
//! - [`Force`](ValidationStrategy::Force) reports every error a specification can produce
//!
//! ## Errors
//!
//! Invalid data is reported in an [`ErrorsCollection`]. A [`SpecError`] means
//! the specification is misconfigured or the traversal could not complete.

// Member accessors and rule predicates are boxed closures over generic
// model and value types.
#![allow(clippy::type_complexity)]

mod engine;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod repository;
pub mod specification;
pub mod translation;
pub mod validator;
pub mod validators;

pub use foundation::{
    ArgValue, ErrorsCollection, MessageArg, NullRootStrategy, SpecError, SpecResult,
    ValidationError, ValidationOptions, ValidationStrategy,
};
pub use repository::SpecificationRepository;
pub use specification::{MemberSpecBuilder, MemberSpecification, Specification, SpecificationBuilder};
pub use translation::{Translate, Translator};
pub use validator::{ValidationResult, Validator, ValidatorBuilder};
