//! Member specifications and their builder

use std::fmt;
use std::sync::Arc;

use crate::engine::{Scope, Traversal, execute_member};
use crate::foundation::failure::check_name;
use crate::foundation::{ErrorsCollection, SpecError, SpecResult, ValidationError};
use crate::specification::rule::ComposedRule;
use crate::specification::{
    BuilderToken, CollectionRule, Items, MemberPredicate, NestedModel, NullableRule,
    RelativePredicate, Rule, Specification, already_set,
};

// ============================================================================
// MEMBER SPECIFICATION
// ============================================================================

/// Rules for one value of type `T` inside a model of type `M`.
///
/// Built with [`MemberSpecification::build`]; immutable afterwards.
pub struct MemberSpecification<M, T> {
    rules: Vec<Rule<M, T>>,
    summary_error: Option<ValidationError>,
    name: Option<String>,
    required_error: Option<ValidationError>,
    optional: bool,
}

impl<M: 'static, T: 'static> MemberSpecification<M, T> {
    /// Builds a member specification.
    ///
    /// `configure` must return the builder it received; returning any other
    /// builder fails with [`SpecError::InvalidProcessedReference`]. Misuse
    /// recorded while configuring is returned here.
    pub fn build<F>(configure: F) -> SpecResult<Self>
    where
        F: FnOnce(MemberSpecBuilder<M, T>) -> MemberSpecBuilder<M, T>,
    {
        let builder = MemberSpecBuilder::new();
        let token = builder.token;
        let processed = configure(builder);
        if processed.token != token {
            return Err(SpecError::InvalidProcessedReference);
        }
        processed.finish()
    }
}

impl<M, T> MemberSpecification<M, T> {
    /// Rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule<M, T>] {
        &self.rules
    }

    /// Error replacing every detail error of this member.
    #[must_use]
    pub const fn summary_error(&self) -> Option<&ValidationError> {
        self.summary_error.as_ref()
    }

    /// Name overriding the bound member name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Error emitted when the member is absent.
    #[must_use]
    pub const fn required_error(&self) -> Option<&ValidationError> {
        self.required_error.as_ref()
    }

    /// Whether an absent value is acceptable.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }
}

impl<M, T> fmt::Debug for MemberSpecification<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberSpecification")
            .field("rules", &self.rules)
            .field("summary_error", &self.summary_error)
            .field("name", &self.name)
            .field("required_error", &self.required_error)
            .field("optional", &self.optional)
            .finish()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for a [`MemberSpecification`].
///
/// Methods chain by value. The first misuse is kept and reported by `build`;
/// later calls are still accepted so the chain reads naturally.
pub struct MemberSpecBuilder<M, T> {
    token: BuilderToken,
    rules: Vec<Rule<M, T>>,
    summary_error: Option<ValidationError>,
    name: Option<String>,
    required_error: Option<ValidationError>,
    optional: bool,
    failure: Option<SpecError>,
}

impl<M, T> fmt::Debug for MemberSpecBuilder<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberSpecBuilder")
            .field("rules", &self.rules.len())
            .field("name", &self.name)
            .field("optional", &self.optional)
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}

impl<M: 'static, T: 'static> MemberSpecBuilder<M, T> {
    fn new() -> Self {
        Self {
            token: BuilderToken::next(),
            rules: Vec::new(),
            summary_error: None,
            name: None,
            required_error: None,
            optional: false,
            failure: None,
        }
    }

    fn finish(self) -> SpecResult<MemberSpecification<M, T>> {
        if let Some(failure) = self.failure {
            return Err(failure);
        }
        Ok(MemberSpecification {
            rules: self.rules,
            summary_error: self.summary_error,
            name: self.name,
            required_error: self.required_error,
            optional: self.optional,
        })
    }

    pub(crate) fn fail(&mut self, failure: SpecError) {
        self.failure.get_or_insert(failure);
    }

    fn push(mut self, rule: Rule<M, T>) -> Self {
        self.rules.push(rule);
        self
    }

    // ------------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------------

    /// Adds a predicate over the value that uses the default error.
    #[must_use = "builder methods must be chained or built"]
    pub fn must<P>(self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.push(Rule::Member(MemberPredicate::new(predicate, None)))
    }

    /// Adds a predicate over the value with its own error.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule<P>(self, predicate: P, error: impl Into<ValidationError>) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.push(Rule::Member(MemberPredicate::new(
            predicate,
            Some(error.into()),
        )))
    }

    /// Adds a predicate whose error is built from a template and arguments.
    ///
    /// A failure building the error is recorded on the builder.
    pub(crate) fn rule_with_error<P>(
        mut self,
        predicate: P,
        error: SpecResult<ValidationError>,
    ) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        match error {
            Ok(error) => self.rule(predicate, error),
            Err(failure) => {
                self.fail(failure);
                self
            }
        }
    }

    /// Adds a predicate over the whole model that uses the default error.
    #[must_use = "builder methods must be chained or built"]
    pub fn must_relative<P>(self, predicate: P) -> Self
    where
        P: Fn(&M) -> bool + Send + Sync + 'static,
    {
        self.push(Rule::Relative(RelativePredicate::new(predicate, None)))
    }

    /// Adds a predicate over the whole model with its own error.
    ///
    /// Errors land on this member, which makes relative rules the way to
    /// express cross-member constraints such as a confirmation field.
    #[must_use = "builder methods must be chained or built"]
    pub fn relative<P>(self, predicate: P, error: impl Into<ValidationError>) -> Self
    where
        P: Fn(&M) -> bool + Send + Sync + 'static,
    {
        self.push(Rule::Relative(RelativePredicate::new(
            predicate,
            Some(error.into()),
        )))
    }

    // ------------------------------------------------------------------------
    // Composites
    // ------------------------------------------------------------------------

    /// Validates the value with the specification registered for `T`.
    ///
    /// The lookup happens when the rule runs, so the specification may be
    /// registered after this one is built. Recursive types are bounded by
    /// the configured maximum depth.
    #[must_use = "builder methods must be chained or built"]
    pub fn nested(self) -> Self {
        self.push(Rule::Nested(NestedModel::registered()))
    }

    /// Validates the value with the given specification.
    #[must_use = "builder methods must be chained or built"]
    pub fn nested_with(self, spec: impl Into<Arc<Specification<T>>>) -> Self {
        self.push(Rule::Nested(NestedModel::inline(spec.into())))
    }

    /// Validates every item of the collection with an item specification.
    ///
    /// Item errors are reported under the item's index. Items always exist,
    /// so item specifications never emit their required error outside of
    /// `Force`.
    #[must_use = "builder methods must be chained or built"]
    pub fn each<F>(mut self, configure: F) -> Self
    where
        T: Items,
        T::Item: 'static,
        F: FnOnce(MemberSpecBuilder<M, T::Item>) -> MemberSpecBuilder<M, T::Item>,
    {
        match MemberSpecification::build(configure) {
            Ok(items) => {
                let rule = CollectionRule::new(Box::new(EachItem { items }));
                self.push(Rule::Collection(rule))
            }
            Err(failure) => {
                self.fail(failure);
                self
            }
        }
    }

    // ------------------------------------------------------------------------
    // Options
    // ------------------------------------------------------------------------

    /// Replaces every detail error of this member with `error`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_summary_error(mut self, error: impl Into<ValidationError>) -> Self {
        if self.summary_error.is_some() {
            self.fail(already_set("with_summary_error"));
        } else {
            self.summary_error = Some(error.into());
        }
        self
    }

    /// Reports this member's errors under `name` instead of the bound name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if self.name.is_some() {
            self.fail(already_set("with_name"));
        } else if let Err(failure) = check_name("name", &name) {
            self.fail(failure);
        } else {
            self.name = Some(name);
        }
        self
    }

    /// Error emitted when the member is absent.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_required_error(mut self, error: impl Into<ValidationError>) -> Self {
        if self.required_error.is_some() {
            self.fail(already_set("with_required_error"));
        } else {
            self.required_error = Some(error.into());
        }
        self
    }

    /// Accepts an absent value without errors.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional(mut self) -> Self {
        if self.optional {
            self.fail(already_set("optional"));
        } else {
            self.optional = true;
        }
        self
    }
}

impl<M: 'static, I: 'static> MemberSpecBuilder<M, Option<I>> {
    /// Validates the payload of an `Option` value with predicate rules.
    ///
    /// A `None` value passes unless the strategy is `Force`. The inner
    /// specification may hold only predicate rules, and cannot rename the
    /// member or set a required error.
    #[must_use = "builder methods must be chained or built"]
    pub fn nullable<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(MemberSpecBuilder<M, I>) -> MemberSpecBuilder<M, I>,
    {
        match MemberSpecification::build(configure) {
            Ok(payload) if payload.name.is_some() => {
                self.fail(SpecError::invalid_operation(
                    "a nullable specification cannot set a custom name",
                ));
                self
            }
            Ok(payload) if payload.required_error.is_some() => {
                self.fail(SpecError::invalid_operation(
                    "a nullable specification cannot set a required error",
                ));
                self
            }
            Ok(payload) if payload.rules.iter().any(|r| !r.kind().is_predicate()) => {
                self.fail(SpecError::invalid_operation(
                    "a nullable specification can only hold member and relative rules",
                ));
                self
            }
            Ok(mut payload) => {
                payload.optional = true;
                let rule = NullableRule::new(Box::new(Payload { inner: payload }));
                self.push(Rule::Nullable(rule))
            }
            Err(failure) => {
                self.fail(failure);
                self
            }
        }
    }
}

// ============================================================================
// COMPOSED RULES
// ============================================================================

struct EachItem<M, I> {
    items: MemberSpecification<M, I>,
}

impl<M, I, C> ComposedRule<M, C> for EachItem<M, I>
where
    M: 'static,
    I: 'static,
    C: Items<Item = I>,
{
    fn execute(
        &self,
        model: Option<&M>,
        value: Option<&C>,
        scope: &Scope<'_>,
        traversal: Traversal,
    ) -> SpecResult<ErrorsCollection> {
        let item = traversal.deeper();

        if traversal.is_forced() {
            scope.check_depth(item.depth)?;
            let errors = execute_member(&self.items, model, None, scope, item)?;
            let mut collection = ErrorsCollection::new();
            collection.add_member(scope.options.collection_force_key.as_str(), errors)?;
            return Ok(collection);
        }

        let Some(value) = value else {
            return Ok(ErrorsCollection::new());
        };

        let values: Vec<&I> = value.items().collect();
        if values.is_empty() {
            return Ok(ErrorsCollection::new());
        }
        scope.check_depth(item.depth)?;

        let mut collection = ErrorsCollection::new();
        for (index, value) in values.into_iter().enumerate() {
            let errors = execute_member(&self.items, model, Some(value), scope, item)?;
            if errors.is_empty() {
                continue;
            }
            collection.add_member(index.to_string(), errors)?;
            if traversal.is_fail_fast() {
                break;
            }
        }
        Ok(collection)
    }
}

struct Payload<M, I> {
    inner: MemberSpecification<M, I>,
}

impl<M: 'static, I: 'static> ComposedRule<M, Option<I>> for Payload<M, I> {
    fn execute(
        &self,
        model: Option<&M>,
        value: Option<&Option<I>>,
        scope: &Scope<'_>,
        traversal: Traversal,
    ) -> SpecResult<ErrorsCollection> {
        execute_member(
            &self.inner,
            model,
            value.and_then(Option::as_ref),
            scope,
            traversal,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::RuleKind;
    use pretty_assertions::assert_eq;

    struct Account {
        tags: Vec<String>,
    }

    #[test]
    fn builds_rules_in_order() {
        let spec = MemberSpecification::<Account, String>::build(|m| {
            m.must(|v| !v.is_empty())
                .relative(|a| a.tags.len() < 5, "too many tags")
                .rule(|v| v.len() < 10, "too long")
        })
        .unwrap();

        let kinds: Vec<RuleKind> = spec.rules().iter().map(Rule::kind).collect();
        assert_eq!(kinds, vec![RuleKind::Member, RuleKind::Relative, RuleKind::Member]);
        assert!(!spec.is_optional());
        assert!(spec.summary_error().is_none());
    }

    #[test]
    fn foreign_builder_is_rejected() {
        let result = MemberSpecification::<Account, String>::build(|_| MemberSpecBuilder::new());
        assert!(matches!(result, Err(SpecError::InvalidProcessedReference)));
    }

    #[test]
    fn set_once_options() {
        let twice = MemberSpecification::<Account, String>::build(|m| {
            m.with_summary_error("a").with_summary_error("b")
        });
        assert!(matches!(twice, Err(SpecError::InvalidOperation(_))));

        let twice = MemberSpecification::<Account, String>::build(|m| m.optional().optional());
        assert!(matches!(twice, Err(SpecError::InvalidOperation(_))));

        let twice =
            MemberSpecification::<Account, String>::build(|m| m.with_name("A").with_name("B"));
        assert!(matches!(twice, Err(SpecError::InvalidOperation(_))));

        let twice = MemberSpecification::<Account, String>::build(|m| {
            m.with_required_error("a").with_required_error("b")
        });
        assert!(matches!(twice, Err(SpecError::InvalidOperation(_))));
    }

    #[test]
    fn blank_name_is_rejected() {
        let result = MemberSpecification::<Account, String>::build(|m| m.with_name(" "));
        assert!(matches!(result, Err(SpecError::InvalidArgument { argument: "name", .. })));
    }

    #[test]
    fn first_failure_wins() {
        let result = MemberSpecification::<Account, String>::build(|m| {
            m.with_name("").optional().optional()
        });
        assert!(matches!(result, Err(SpecError::InvalidArgument { .. })));
    }

    #[test]
    fn item_failures_surface_from_outer_build() {
        let result = MemberSpecification::<Account, Vec<String>>::build(|m| {
            m.each(|item| item.optional().optional())
        });
        assert!(matches!(result, Err(SpecError::InvalidOperation(_))));
    }

    #[test]
    fn nullable_accepts_predicates_only() {
        let ok = MemberSpecification::<Account, Option<String>>::build(|m| {
            m.nullable(|n| n.must(|v| v.len() > 2).must_relative(|a| !a.tags.is_empty()))
        })
        .unwrap();
        assert_eq!(ok.rules()[0].kind(), RuleKind::Nullable);

        let nested = MemberSpecification::<Account, Option<Vec<String>>>::build(|m| {
            m.nullable(|n| n.each(|item| item.must(|v| !v.is_empty())))
        });
        assert!(matches!(nested, Err(SpecError::InvalidOperation(_))));
    }

    #[test]
    fn nullable_rejects_required_error() {
        let result = MemberSpecification::<Account, Option<String>>::build(|m| {
            m.nullable(|n| n.with_required_error("missing"))
        });
        assert!(matches!(result, Err(SpecError::InvalidOperation(_))));
    }

    #[test]
    fn nullable_cannot_rename() {
        let result = MemberSpecification::<Account, Option<String>>::build(|m| {
            m.nullable(|n| n.with_name("Other"))
        });
        assert!(matches!(result, Err(SpecError::InvalidOperation(_))));
    }
}
