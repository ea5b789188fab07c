//! Collection size rules

use crate::foundation::{MessageArg, SpecError, ValidationError};
use crate::specification::MemberSpecBuilder;

impl<M: 'static, I: 'static> MemberSpecBuilder<M, Vec<I>> {
    /// At least one item.
    #[must_use = "builder methods must be chained or built"]
    pub fn not_empty_items(self) -> Self {
        self.rule(|items: &Vec<I>| !items.is_empty(), "Must not be empty")
    }

    /// At least `min` items.
    #[must_use = "builder methods must be chained or built"]
    pub fn min_items(self, min: usize) -> Self {
        self.rule_with_error(
            move |items: &Vec<I>| items.len() >= min,
            ValidationError::with_args(
                "Must contain at least {min} items",
                [MessageArg::new("min", min)],
            ),
        )
    }

    /// At most `max` items.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_items(self, max: usize) -> Self {
        self.rule_with_error(
            move |items: &Vec<I>| items.len() <= max,
            ValidationError::with_args(
                "Must contain at most {max} items",
                [MessageArg::new("max", max)],
            ),
        )
    }

    /// Exactly `count` items.
    #[must_use = "builder methods must be chained or built"]
    pub fn exact_items(self, count: usize) -> Self {
        self.rule_with_error(
            move |items: &Vec<I>| items.len() == count,
            ValidationError::with_args(
                "Must contain exactly {count} items",
                [MessageArg::new("count", count)],
            ),
        )
    }

    /// Between `min` and `max` items, inclusive.
    #[must_use = "builder methods must be chained or built"]
    pub fn items_between(mut self, min: usize, max: usize) -> Self {
        if min > max {
            self.fail(SpecError::invalid_argument(
                "max",
                format!("must not be less than min ({max} < {min})"),
            ));
            return self;
        }
        self.rule_with_error(
            move |items: &Vec<I>| (min..=max).contains(&items.len()),
            ValidationError::with_args(
                "Must contain between {min} and {max} items",
                [MessageArg::new("min", min), MessageArg::new("max", max)],
            ),
        )
    }
}
