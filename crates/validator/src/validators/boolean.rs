//! Boolean rules

use crate::specification::MemberSpecBuilder;

impl<M: 'static> MemberSpecBuilder<M, bool> {
    /// The value must be `true`.
    #[must_use = "builder methods must be chained or built"]
    pub fn is_true(self) -> Self {
        self.rule(|value: &bool| *value, "Must be true")
    }

    /// The value must be `false`.
    #[must_use = "builder methods must be chained or built"]
    pub fn is_false(self) -> Self {
        self.rule(|value: &bool| !*value, "Must be false")
    }
}
