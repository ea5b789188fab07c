//! Macros for binding model members with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`member!`]: bind a struct field as a member, named after the field
//!
//! # Examples
//!
//! ```rust,ignore
//! use verdict::member;
//! use verdict::specification::Specification;
//!
//! struct User { name: String, email: Option<String> }
//!
//! let spec = Specification::<User>::build(|s| {
//!     let s = member!(s, name, |m| m.not_empty());
//!     member!(s, email?, |m| m.optional().contains("@"))
//! })?;
//! assert_eq!(spec.member_names(), ["name", "email"]);
//! ```

// ============================================================================
// MEMBER MACRO
// ============================================================================

/// Binds a struct field on a
/// [`SpecificationBuilder`](crate::specification::SpecificationBuilder).
///
/// The member name is the field name. A trailing `?` binds an `Option`
/// field through `member_opt`, so `None` counts as an absent member.
///
/// ```rust,ignore
/// member!(builder, name, |m| m.not_empty())
/// // builder.member("name", |model| &model.name, |m| m.not_empty())
///
/// member!(builder, email?, |m| m.optional())
/// // builder.member_opt("email", |model| model.email.as_ref(), |m| m.optional())
/// ```
#[macro_export]
macro_rules! member {
    ($builder:expr, $field:ident ?, $configure:expr $(,)?) => {
        $builder.member_opt(
            stringify!($field),
            |model| model.$field.as_ref(),
            $configure,
        )
    };
    ($builder:expr, $field:ident, $configure:expr $(,)?) => {
        $builder.member(stringify!($field), |model| &model.$field, $configure)
    };
}
