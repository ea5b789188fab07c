//! String pattern rules

use regex::Regex;

use crate::foundation::{MessageArg, SpecError, ValidationError};
use crate::specification::MemberSpecBuilder;

impl<M: 'static> MemberSpecBuilder<M, String> {
    /// The string must match `regex` somewhere; anchor it for a full match.
    #[must_use = "builder methods must be chained or built"]
    pub fn matches(self, regex: Regex) -> Self {
        let error = ValidationError::with_args(
            "Must match the pattern {pattern}",
            [MessageArg::text("pattern", regex.as_str())],
        );
        self.rule_with_error(move |value: &String| regex.is_match(value), error)
    }

    /// Like [`matches`](Self::matches), compiling `pattern` first.
    ///
    /// An invalid pattern is recorded as a builder failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn matches_pattern(mut self, pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(regex) => self.matches(regex),
            Err(error) => {
                self.fail(SpecError::invalid_argument("pattern", error.to_string()));
                self
            }
        }
    }

    /// The string must start with `prefix`.
    #[must_use = "builder methods must be chained or built"]
    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let error = ValidationError::with_args(
            "Must start with {value}",
            [MessageArg::text("value", prefix.as_str())],
        );
        self.rule_with_error(move |value: &String| value.starts_with(prefix.as_str()), error)
    }

    /// The string must end with `suffix`.
    #[must_use = "builder methods must be chained or built"]
    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        let error = ValidationError::with_args(
            "Must end with {value}",
            [MessageArg::text("value", suffix.as_str())],
        );
        self.rule_with_error(move |value: &String| value.ends_with(suffix.as_str()), error)
    }

    /// The string must contain `needle`.
    #[must_use = "builder methods must be chained or built"]
    pub fn contains(self, needle: impl Into<String>) -> Self {
        let needle = needle.into();
        let error = ValidationError::with_args(
            "Must contain {value}",
            [MessageArg::text("value", needle.as_str())],
        );
        self.rule_with_error(move |value: &String| value.contains(needle.as_str()), error)
    }
}
