//! Rule executor
//!
//! Walks a [`Specification`] over a model and produces an
//! [`ErrorsCollection`]. All traversal state lives on the stack: the
//! [`Scope`] is shared by every level of one call, the [`Traversal`] is
//! copied and adjusted on the way down.

use crate::foundation::{
    ErrorsCollection, SpecError, SpecResult, ValidationError, ValidationOptions, ValidationStrategy,
};
use crate::repository::SpecificationRepository;
use crate::specification::root::SpecEntry;
use crate::specification::{MemberSpecification, Rule, Specification};

/// State shared by every level of one validation call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope<'a> {
    pub(crate) options: &'a ValidationOptions,
    pub(crate) repository: &'a SpecificationRepository,
}

impl<'a> Scope<'a> {
    pub(crate) const fn new(
        options: &'a ValidationOptions,
        repository: &'a SpecificationRepository,
    ) -> Self {
        Self {
            options,
            repository,
        }
    }

    pub(crate) fn check_depth(&self, depth: usize) -> SpecResult<()> {
        if depth > self.options.max_depth {
            tracing::warn!(
                depth,
                max_depth = self.options.max_depth,
                "validation depth limit exceeded"
            );
            return Err(SpecError::MaxDepthExceeded {
                max_depth: self.options.max_depth,
            });
        }
        Ok(())
    }
}

/// Position in the traversal: active strategy and nesting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Traversal {
    pub(crate) strategy: ValidationStrategy,
    pub(crate) depth: usize,
}

impl Traversal {
    pub(crate) const fn new(strategy: ValidationStrategy) -> Self {
        Self { strategy, depth: 0 }
    }

    /// One level down.
    pub(crate) const fn deeper(self) -> Self {
        Self {
            strategy: self.strategy,
            depth: self.depth + 1,
        }
    }

    /// A scope with a summary error only needs its first error.
    pub(crate) const fn narrowed(self, has_summary: bool) -> Self {
        match self.strategy {
            ValidationStrategy::Complete if has_summary => Self {
                strategy: ValidationStrategy::FailFast,
                depth: self.depth,
            },
            _ => self,
        }
    }

    pub(crate) const fn is_forced(self) -> bool {
        matches!(self.strategy, ValidationStrategy::Force)
    }

    pub(crate) const fn is_fail_fast(self) -> bool {
        matches!(self.strategy, ValidationStrategy::FailFast)
    }
}

// ============================================================================
// ROOT
// ============================================================================

/// Evaluates a root specification.
///
/// Member results are nested under their names; model rule errors land at
/// this level. A non-empty result collapses to the summary error when one is
/// set.
pub(crate) fn execute_root<M>(
    spec: &Specification<M>,
    model: Option<&M>,
    scope: &Scope<'_>,
    traversal: Traversal,
) -> SpecResult<ErrorsCollection> {
    scope.check_depth(traversal.depth)?;

    let traversal = traversal.narrowed(spec.summary_error().is_some());
    tracing::trace!(
        model = std::any::type_name::<M>(),
        depth = traversal.depth,
        strategy = ?traversal.strategy,
        "evaluating specification"
    );

    let mut errors = ErrorsCollection::new();
    for entry in spec.entries() {
        match entry {
            SpecEntry::Member(member) => {
                let result = member.execute(model, scope, traversal)?;
                errors.add_member(member.name(), result)?;
            }
            SpecEntry::Model(rule) => {
                let failed = traversal.is_forced() || model.is_some_and(|m| !rule.check(m));
                if failed {
                    errors.add_error(
                        rule.error()
                            .unwrap_or(&scope.options.default_error)
                            .clone(),
                    );
                }
            }
        }

        if traversal.is_fail_fast() && !errors.is_empty() {
            break;
        }
    }

    match spec.summary_error() {
        Some(summary) if !errors.is_empty() => Ok(ErrorsCollection::from_error(summary.clone())),
        _ => Ok(errors),
    }
}

// ============================================================================
// MEMBER
// ============================================================================

/// Evaluates one member specification against a value.
///
/// `value` is `None` when the member does not exist; under `Force` every
/// value is treated as absent and every rule as failed.
pub(crate) fn execute_member<M, T>(
    spec: &MemberSpecification<M, T>,
    model: Option<&M>,
    value: Option<&T>,
    scope: &Scope<'_>,
    traversal: Traversal,
) -> SpecResult<ErrorsCollection> {
    let forced = traversal.is_forced();
    let mut errors = ErrorsCollection::new();

    let required_added = !spec.is_optional() && (value.is_none() || forced);
    if required_added {
        errors.add_error(
            spec.required_error()
                .unwrap_or(&scope.options.required_error)
                .clone(),
        );
    }

    let traversal = traversal.narrowed(spec.summary_error().is_some());

    if required_added && traversal.is_fail_fast() {
        return Ok(errors);
    }
    if value.is_none() && !forced {
        return Ok(errors);
    }

    let mut details = ErrorsCollection::new();
    for rule in spec.rules() {
        details.include(execute_rule(rule, model, value, scope, traversal)?);
        if traversal.is_fail_fast() && !details.is_empty() {
            break;
        }
    }

    match spec.summary_error() {
        Some(summary) if !details.is_empty() => errors.add_error(summary.clone()),
        _ => errors.include(details),
    }
    Ok(errors)
}

fn execute_rule<M, T>(
    rule: &Rule<M, T>,
    model: Option<&M>,
    value: Option<&T>,
    scope: &Scope<'_>,
    traversal: Traversal,
) -> SpecResult<ErrorsCollection> {
    let forced = traversal.is_forced();
    let failure = |error: Option<&ValidationError>| {
        ErrorsCollection::from_error(error.unwrap_or(&scope.options.default_error).clone())
    };

    match rule {
        Rule::Member(predicate) => {
            if forced || value.is_some_and(|v| !predicate.check(v)) {
                return Ok(failure(predicate.error()));
            }
            Ok(ErrorsCollection::new())
        }
        Rule::Relative(predicate) => {
            if forced || model.is_some_and(|m| !predicate.check(m)) {
                return Ok(failure(predicate.error()));
            }
            Ok(ErrorsCollection::new())
        }
        Rule::Nested(nested) => {
            let spec = nested.resolve(scope.repository).inspect_err(|error| {
                tracing::warn!(%error, "nested specification lookup failed");
            })?;
            execute_root(&spec, value, scope, traversal.deeper())
        }
        Rule::Collection(items) => items.execute(model, value, scope, traversal),
        Rule::Nullable(payload) => payload.execute(model, value, scope, traversal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    struct Point {
        x: i32,
        label: Option<String>,
    }

    fn run<M: 'static>(
        spec: &Specification<M>,
        model: Option<&M>,
        options: &ValidationOptions,
    ) -> SpecResult<ErrorsCollection> {
        let repository = SpecificationRepository::new();
        let scope = Scope::new(options, &repository);
        execute_root(spec, model, &scope, Traversal::new(options.strategy))
    }

    fn messages(errors: &ErrorsCollection, member: &str) -> Vec<String> {
        errors
            .member(member)
            .map(|m| m.errors().iter().map(|e| e.message().to_owned()).collect())
            .unwrap_or_default()
    }

    #[rstest]
    #[case(ValidationStrategy::Complete, 0)]
    #[case(ValidationStrategy::Complete, 3)]
    #[case(ValidationStrategy::FailFast, 1)]
    fn narrowing(#[case] strategy: ValidationStrategy, #[case] depth: usize) {
        let traversal = Traversal { strategy, depth };
        let narrowed = traversal.narrowed(true);
        assert_eq!(narrowed.depth, depth);
        assert!(narrowed.is_fail_fast());
        assert_eq!(traversal.narrowed(false), traversal);
    }

    #[test]
    fn force_is_never_narrowed() {
        let traversal = Traversal::new(ValidationStrategy::Force);
        assert!(traversal.narrowed(true).is_forced());
        assert_eq!(traversal.deeper().depth, 1);
    }

    #[test]
    fn missing_member_yields_required_only() {
        let spec = Specification::<Point>::build(|s| {
            s.member_opt("Label", |p| p.label.as_ref(), |m| {
                m.rule(|v: &String| v.len() > 1, "short")
                    .with_summary_error("label summary")
            })
        })
        .unwrap();
        let point = Point { x: 0, label: None };

        let errors = run(&spec, Some(&point), &ValidationOptions::default()).unwrap();
        assert_eq!(messages(&errors, "Label"), vec!["Required"]);
    }

    #[test]
    fn optional_absent_member_is_valid() {
        let spec = Specification::<Point>::build(|s| {
            s.member_opt("Label", |p| p.label.as_ref(), |m| m.optional().must(|_| false))
        })
        .unwrap();
        let point = Point { x: 0, label: None };

        assert!(run(&spec, Some(&point), &ValidationOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn relative_rule_sees_model() {
        let spec = Specification::<Point>::build(|s| {
            s.member("X", |p| &p.x, |m| m.relative(|p: &Point| p.label.is_some(), "needs label"))
        })
        .unwrap();
        let point = Point { x: 3, label: None };

        let errors = run(&spec, Some(&point), &ValidationOptions::default()).unwrap();
        assert_eq!(messages(&errors, "X"), vec!["needs label"]);
    }

    #[test]
    fn default_error_for_bare_predicates() {
        let spec = Specification::<Point>::build(|s| {
            s.member("X", |p| &p.x, |m| m.must(|x| *x > 0))
                .must(|p| p.x > 10)
        })
        .unwrap();
        let point = Point { x: -1, label: None };
        let options = ValidationOptions::default().with_default_error("Invalid");

        let errors = run(&spec, Some(&point), &options).unwrap();
        assert_eq!(errors.errors(), &[ValidationError::new("Invalid")]);
        assert_eq!(messages(&errors, "X"), vec!["Invalid"]);
    }

    #[test]
    fn depth_zero_limit_still_runs_root() {
        let spec = Specification::<Point>::build(|s| s.member("X", |p| &p.x, |m| m)).unwrap();
        let point = Point { x: 0, label: None };
        let options = ValidationOptions::default().with_max_depth(0);

        assert!(run(&spec, Some(&point), &options).unwrap().is_empty());
    }
}
