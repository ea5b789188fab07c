//! Built-in member rules
//!
//! Typed shorthands on [`MemberSpecBuilder`](crate::specification::MemberSpecBuilder)
//! for common checks. Each adds an ordinary member rule whose error carries
//! its limits as message arguments, so translations can reorder or reformat
//! them.
//!
//! # Categories
//!
//! - **Text** (`String`): length and pattern checks
//! - **Numeric** (any `PartialOrd + Copy` number): range checks
//! - **Collection** (`Vec<T>`): item counts
//! - **Boolean**: `is_true`, `is_false`
//!
//! # Examples
//!
//! ```rust,ignore
//! use verdict::prelude::*;
//!
//! let spec = Specification::<Signup>::build(|s| {
//!     s.member("Username", |m| &m.username, |m| m.length_between(3, 20).matches(slug))
//!         .member("Age", |m| &m.age, |m| m.between(18, 120))
//!         .member("Tags", |m| &m.tags, |m| m.max_items(10))
//!         .member("Terms", |m| &m.terms, |m| m.is_true())
//! })?;
//! ```

pub mod boolean;
pub mod length;
pub mod pattern;
pub mod range;
pub mod size;
