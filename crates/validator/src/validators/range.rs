//! Numeric range rules
//!
//! Available for any member type that is `PartialOrd + Copy` and converts
//! into a message argument: every primitive integer and float.

use std::cmp::Ordering;

use crate::foundation::{ArgValue, MessageArg, SpecError, ValidationError};
use crate::specification::MemberSpecBuilder;

impl<M, T> MemberSpecBuilder<M, T>
where
    M: 'static,
    T: PartialOrd + Copy + Into<ArgValue> + Send + Sync + 'static,
{
    /// Strictly greater than `min`.
    #[must_use = "builder methods must be chained or built"]
    pub fn greater_than(self, min: T) -> Self {
        self.rule_with_error(
            move |value: &T| *value > min,
            ValidationError::with_args("Must be greater than {min}", [MessageArg::new("min", min)]),
        )
    }

    /// Greater than or equal to `min`.
    #[must_use = "builder methods must be chained or built"]
    pub fn greater_than_or_equal_to(self, min: T) -> Self {
        self.rule_with_error(
            move |value: &T| *value >= min,
            ValidationError::with_args(
                "Must be greater than or equal to {min}",
                [MessageArg::new("min", min)],
            ),
        )
    }

    /// Strictly less than `max`.
    #[must_use = "builder methods must be chained or built"]
    pub fn less_than(self, max: T) -> Self {
        self.rule_with_error(
            move |value: &T| *value < max,
            ValidationError::with_args("Must be less than {max}", [MessageArg::new("max", max)]),
        )
    }

    /// Less than or equal to `max`.
    #[must_use = "builder methods must be chained or built"]
    pub fn less_than_or_equal_to(self, max: T) -> Self {
        self.rule_with_error(
            move |value: &T| *value <= max,
            ValidationError::with_args(
                "Must be less than or equal to {max}",
                [MessageArg::new("max", max)],
            ),
        )
    }

    /// Between `min` and `max`, inclusive.
    ///
    /// `min` must not exceed `max`; incomparable bounds (NaN) are rejected.
    #[must_use = "builder methods must be chained or built"]
    pub fn between(mut self, min: T, max: T) -> Self {
        if matches!(min.partial_cmp(&max), Some(Ordering::Greater) | None) {
            self.fail(SpecError::invalid_argument(
                "max",
                "must be comparable to and not less than min",
            ));
            return self;
        }
        self.rule_with_error(
            move |value: &T| *value >= min && *value <= max,
            ValidationError::with_args(
                "Must be between {min} and {max} (inclusive)",
                [MessageArg::new("min", min), MessageArg::new("max", max)],
            ),
        )
    }

    /// Equal to `expected`.
    #[must_use = "builder methods must be chained or built"]
    pub fn equal_to(self, expected: T) -> Self {
        self.rule_with_error(
            move |value: &T| *value == expected,
            ValidationError::with_args(
                "Must be equal to {value}",
                [MessageArg::new("value", expected)],
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::MemberSpecification;
    use crate::validators::testing::messages;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(17, vec!["Must be between 18 and 120 (inclusive)"])]
    #[case(18, vec![])]
    #[case(120, vec![])]
    #[case(121, vec!["Must be between 18 and 120 (inclusive)"])]
    fn between(#[case] age: i32, #[case] expected: Vec<&str>) {
        assert_eq!(messages(&age, |m| m.between(18, 120)), expected);
    }

    #[rstest]
    #[case(0, vec!["Must be greater than 0", "Must be greater than or equal to 1"])]
    #[case(1, vec![])]
    fn lower_bounds(#[case] value: u64, #[case] expected: Vec<&str>) {
        assert_eq!(
            messages(&value, |m| m.greater_than(0).greater_than_or_equal_to(1)),
            expected
        );
    }

    #[test]
    fn upper_bounds_and_equality() {
        assert_eq!(
            messages(&2.5f64, |m| m.less_than(2.5).less_than_or_equal_to(2.5).equal_to(3.0)),
            vec!["Must be less than 2.5", "Must be equal to 3"]
        );
    }

    #[test]
    fn inverted_or_nan_bounds_are_rejected() {
        let inverted = MemberSpecification::<(), i32>::build(|m| m.between(5, 1));
        assert!(matches!(inverted, Err(SpecError::InvalidArgument { argument: "max", .. })));

        let nan = MemberSpecification::<(), f64>::build(|m| m.between(f64::NAN, 1.0));
        assert!(nan.is_err());
    }
}
