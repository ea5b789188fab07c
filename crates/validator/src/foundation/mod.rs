//! Foundation types shared by every layer of the engine
//!
//! - **Messages**: [`MessageArg`], [`ArgValue`], [`format_message`]
//! - **Outcomes**: [`ValidationError`], [`ErrorsCollection`]
//! - **Failures**: [`SpecError`]
//! - **Options**: [`ValidationOptions`], [`ValidationStrategy`], [`NullRootStrategy`]
//!
//! # Examples
//!
//! ```rust,ignore
//! use verdict::foundation::{ErrorsCollection, ValidationError};
//!
//! let mut errors = ErrorsCollection::new();
//! errors.add_member("Email", ErrorsCollection::from_error(ValidationError::new("Required")))?;
//! assert_eq!(errors.error_count(), 1);
//! ```

pub mod args;
pub mod error;
pub mod failure;
pub mod format;
pub mod options;

pub use args::{ArgValue, MessageArg};
pub use error::{ErrorsCollection, ValidationError};
pub use failure::SpecError;
pub use format::format_message;
pub use options::{NullRootStrategy, ValidationOptions, ValidationStrategy};

/// A result whose error is a [`SpecError`].
pub type SpecResult<T> = Result<T, SpecError>;
