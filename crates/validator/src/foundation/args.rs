//! Typed message arguments
//!
//! A [`MessageArg`] is a named, typed value that can be substituted into a
//! message template such as `"Must be at least {min} characters"`. Each
//! argument kind accepts a small, fixed set of placeholder parameters
//! (`{min|format=hex}`), which the formatter checks before substituting.
//!
//! Arguments only ever affect how a message is rendered, never whether a
//! value is valid.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// ARGUMENT VALUE
// ============================================================================

/// The typed payload of a [`MessageArg`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ArgValue {
    /// Free text. Parameters: `case` (`upper` / `lower`).
    Text(String),
    /// Signed integer. Parameters: `format` (`hex` / `HEX` / `bin`).
    Integer(i64),
    /// Unsigned integer. Parameters: `format` (`hex` / `HEX` / `bin`).
    Unsigned(u64),
    /// Floating point number. Parameters: `precision` (fraction digits).
    Float(f64),
    /// Boolean. Parameters: `case` (`upper` / `lower`).
    Bool(bool),
    /// A Rust type. Parameters: `format` (`name` / `path`).
    Type {
        /// Short type name, e.g. `Address`.
        name: String,
        /// Full type path, e.g. `crate::model::Address`.
        path: String,
    },
}

impl ArgValue {
    /// Creates a type argument value for `T`.
    #[must_use]
    pub fn type_of<T: ?Sized>() -> Self {
        let path = std::any::type_name::<T>();
        Self::Type {
            name: short_type_name(path).to_owned(),
            path: path.to_owned(),
        }
    }

    /// Placeholder parameters this kind of value understands.
    #[must_use]
    pub fn allowed_parameters(&self) -> &'static [&'static str] {
        match self {
            Self::Text(_) | Self::Bool(_) => &["case"],
            Self::Integer(_) | Self::Unsigned(_) | Self::Type { .. } => &["format"],
            Self::Float(_) => &["precision"],
        }
    }

    /// Renders the value with the given placeholder parameters.
    ///
    /// Returns `None` when a parameter value is not understood; the caller
    /// then leaves the placeholder untouched.
    #[must_use]
    pub fn render(&self, parameters: &[(&str, &str)]) -> Option<String> {
        let mut rendered = self.to_string();

        for &(key, value) in parameters {
            rendered = match (self, key) {
                (Self::Text(_) | Self::Bool(_), "case") => match value {
                    "upper" => rendered.to_uppercase(),
                    "lower" => rendered.to_lowercase(),
                    _ => return None,
                },
                // Negative integers render as their two's complement bit pattern.
                (Self::Integer(n), "format") => render_radix(*n as u64, value)?,
                (Self::Unsigned(n), "format") => render_radix(*n, value)?,
                (Self::Float(f), "precision") => {
                    let digits: usize = value.parse().ok().filter(|d| *d <= MAX_PRECISION)?;
                    format!("{f:.digits$}")
                }
                (Self::Type { name, path }, "format") => match value {
                    "name" => name.clone(),
                    "path" => path.clone(),
                    _ => return None,
                },
                _ => return None,
            };
        }

        Some(rendered)
    }
}

/// Largest fraction digit count a `precision` parameter may ask for.
const MAX_PRECISION: usize = 17;

fn render_radix(bits: u64, format: &str) -> Option<String> {
    match format {
        "hex" => Some(format!("{bits:x}")),
        "HEX" => Some(format!("{bits:X}")),
        "bin" => Some(format!("{bits:b}")),
        _ => None,
    }
}

fn short_type_name(path: &str) -> &str {
    let base = path.split('<').next().unwrap_or(path);
    base.rsplit("::").next().unwrap_or(base)
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Unsigned(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Type { name, .. } => f.write_str(name),
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

macro_rules! arg_value_from {
    ($variant:ident($target:ty): $($source:ty),+) => {
        $(
            impl From<$source> for ArgValue {
                #[inline]
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

arg_value_from!(Integer(i64): i8, i16, i32, i64);
arg_value_from!(Unsigned(u64): u8, u16, u32, u64);
arg_value_from!(Float(f64): f32, f64);

impl From<isize> for ArgValue {
    fn from(value: isize) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<usize> for ArgValue {
    fn from(value: usize) -> Self {
        Self::Unsigned(value as u64)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

// ============================================================================
// MESSAGE ARGUMENT
// ============================================================================

/// A named, typed value substitutable into a message template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageArg {
    name: Cow<'static, str>,
    value: ArgValue,
}

impl MessageArg {
    /// Creates a new argument.
    pub fn new(name: impl Into<Cow<'static, str>>, value: impl Into<ArgValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a text argument.
    pub fn text(name: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        Self::new(name, ArgValue::Text(value.into()))
    }

    /// Creates a type argument describing `T`.
    pub fn type_of<T: ?Sized>(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, ArgValue::type_of::<T>())
    }

    /// The placeholder name this argument answers to.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The typed value.
    #[must_use]
    pub fn value(&self) -> &ArgValue {
        &self.value
    }

    /// Placeholder parameters this argument accepts.
    #[must_use]
    pub fn allowed_parameters(&self) -> &'static [&'static str] {
        self.value.allowed_parameters()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Address;

    #[rstest]
    #[case(ArgValue::from(255u32), &[("format", "hex")], Some("ff"))]
    #[case(ArgValue::from(255u32), &[("format", "HEX")], Some("FF"))]
    #[case(ArgValue::from(5i32), &[("format", "bin")], Some("101"))]
    #[case(ArgValue::from(5i32), &[("format", "octal")], None)]
    #[case(ArgValue::from(1.23456f64), &[("precision", "2")], Some("1.23"))]
    #[case(ArgValue::from(1.5f64), &[("precision", "x")], None)]
    #[case(ArgValue::from(0.5f64), &[("precision", "17")], Some("0.50000000000000000"))]
    #[case(ArgValue::from(0.5f64), &[("precision", "4000000000")], None)]
    #[case(ArgValue::from("Name"), &[("case", "upper")], Some("NAME"))]
    #[case(ArgValue::from(true), &[("case", "upper")], Some("TRUE"))]
    #[case(ArgValue::from("Name"), &[("precision", "2")], None)]
    #[case(ArgValue::from(42i64), &[], Some("42"))]
    fn render_with_parameters(
        #[case] value: ArgValue,
        #[case] parameters: &[(&str, &str)],
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(value.render(parameters).as_deref(), expected);
    }

    #[test]
    fn type_argument_formats() {
        let arg = MessageArg::type_of::<Address>("type");
        assert_eq!(arg.value().render(&[]).as_deref(), Some("Address"));
        let path = arg.value().render(&[("format", "path")]).unwrap();
        assert!(path.ends_with("tests::Address"));
    }

    #[test]
    fn short_name_strips_generics() {
        assert_eq!(short_type_name("alloc::vec::Vec<u8>"), "Vec");
        assert_eq!(short_type_name("u8"), "u8");
    }

    #[test]
    fn allowed_parameters_follow_kind() {
        assert_eq!(MessageArg::new("n", 1u8).allowed_parameters(), &["format"]);
        assert_eq!(MessageArg::new("f", 1.0f32).allowed_parameters(), &["precision"]);
        assert_eq!(MessageArg::text("t", "x").allowed_parameters(), &["case"]);
    }
}
