//! String length rules
//!
//! Length is measured in Unicode scalar values (chars), so `"żółw"` has
//! length 4.

use crate::foundation::{MessageArg, SpecError, ValidationError};
use crate::specification::MemberSpecBuilder;

fn char_count(value: &str) -> usize {
    value.chars().count()
}

impl<M: 'static> MemberSpecBuilder<M, String> {
    /// The string must not be empty.
    #[must_use = "builder methods must be chained or built"]
    pub fn not_empty(self) -> Self {
        self.rule(|value: &String| !value.is_empty(), "Must not be empty")
    }

    /// The string must contain at least one non-whitespace character.
    #[must_use = "builder methods must be chained or built"]
    pub fn not_whitespace(self) -> Self {
        self.rule(
            |value: &String| !value.trim().is_empty(),
            "Must not consist only of whitespace characters",
        )
    }

    /// At least `min` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn min_length(self, min: usize) -> Self {
        self.rule_with_error(
            move |value: &String| char_count(value) >= min,
            ValidationError::with_args(
                "Must be at least {min} characters in length",
                [MessageArg::new("min", min)],
            ),
        )
    }

    /// At most `max` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_length(self, max: usize) -> Self {
        self.rule_with_error(
            move |value: &String| char_count(value) <= max,
            ValidationError::with_args(
                "Must be at most {max} characters in length",
                [MessageArg::new("max", max)],
            ),
        )
    }

    /// Exactly `length` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn exact_length(self, length: usize) -> Self {
        self.rule_with_error(
            move |value: &String| char_count(value) == length,
            ValidationError::with_args(
                "Must be exactly {length} characters in length",
                [MessageArg::new("length", length)],
            ),
        )
    }

    /// Between `min` and `max` characters, inclusive.
    #[must_use = "builder methods must be chained or built"]
    pub fn length_between(mut self, min: usize, max: usize) -> Self {
        if min > max {
            self.fail(SpecError::invalid_argument(
                "max",
                format!("must not be less than min ({max} < {min})"),
            ));
            return self;
        }
        self.rule_with_error(
            move |value: &String| (min..=max).contains(&char_count(value)),
            ValidationError::with_args(
                "Must be between {min} and {max} characters in length",
                [MessageArg::new("min", min), MessageArg::new("max", max)],
            ),
        )
    }
}
