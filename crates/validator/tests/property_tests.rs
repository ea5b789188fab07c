//! Property-based tests for verdict.

use proptest::prelude::*;
use verdict::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

fn error() -> impl Strategy<Value = ValidationError> {
    "[a-z]{1,6}".prop_map(ValidationError::from)
}

fn collection() -> impl Strategy<Value = ErrorsCollection> {
    let leaf = prop::collection::vec(error(), 0..3)
        .prop_map(|errors| errors.into_iter().collect::<ErrorsCollection>());

    leaf.prop_recursive(3, 24, 3, |inner| {
        (
            prop::collection::vec(error(), 0..3),
            prop::collection::vec(("[A-C]", inner), 0..3),
        )
            .prop_map(|(errors, members)| {
                let mut collection: ErrorsCollection = errors.into_iter().collect();
                for (name, member) in members {
                    collection.add_member(name, member).unwrap();
                }
                collection
            })
    })
}

// ============================================================================
// EMPTINESS
// ============================================================================

proptest! {
    #[test]
    fn empty_iff_no_errors_and_no_members(collection in collection()) {
        prop_assert_eq!(
            collection.is_empty(),
            collection.errors().is_empty() && collection.members().is_empty()
        );
        prop_assert_eq!(collection.is_empty(), collection.error_count() == 0);
    }

    #[test]
    fn adding_empty_member_changes_nothing(collection in collection(), name in "[A-Z][a-z]{0,5}") {
        let mut parent = collection.clone();
        parent.add_member(name.as_str(), ErrorsCollection::new()).unwrap();

        prop_assert_eq!(&parent, &collection);
        prop_assert_eq!(parent.member(&name).is_some(), collection.member(&name).is_some());
    }

    #[test]
    fn stored_members_are_never_empty(collection in collection()) {
        fn check(collection: &ErrorsCollection) -> bool {
            collection
                .members()
                .values()
                .all(|member| !member.is_empty() && check(member))
        }
        prop_assert!(check(&collection));
    }
}

// ============================================================================
// INCLUDE
// ============================================================================

proptest! {
    #[test]
    fn include_is_associative(a in collection(), b in collection(), c in collection()) {
        let mut left = a.clone();
        left.include(b.clone());
        left.include(c.clone());

        let mut merged = b;
        merged.include(c);
        let mut right = a;
        right.include(merged);

        prop_assert_eq!(left, right);
    }

    #[test]
    fn include_preserves_error_count(a in collection(), b in collection()) {
        let expected = a.error_count() + b.error_count();
        let mut merged = a;
        merged.include(b);
        prop_assert_eq!(merged.error_count(), expected);
    }

    #[test]
    fn include_keeps_existing_errors_first(a in collection(), b in collection()) {
        let mut merged = a.clone();
        merged.include(b.clone());

        let expected: Vec<ValidationError> =
            a.errors().iter().chain(b.errors()).cloned().collect();
        prop_assert_eq!(merged.errors(), expected.as_slice());
    }
}

// ============================================================================
// ENGINE
// ============================================================================

struct Sample {
    text: String,
    number: i64,
}

fn sample_validator() -> Validator {
    let repository = SpecificationRepository::new();
    repository.register(
        Specification::build(|s| {
            s.member("Text", |m: &Sample| &m.text, |m| m.min_length(3).max_length(10))
                .member("Number", |m: &Sample| &m.number, |m| m.between(0, 100))
        })
        .unwrap(),
    );
    Validator::new(repository).unwrap()
}

proptest! {
    #[test]
    fn validation_is_deterministic(text in ".{0,16}", number in any::<i64>()) {
        let validator = sample_validator();
        let sample = Sample { text, number };

        let first = validator.validate(&sample).unwrap().into_errors();
        let second = validator.validate(&sample).unwrap().into_errors();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn fail_fast_agrees_with_complete(text in ".{0,16}", number in -50i64..150) {
        let validator = sample_validator();
        let sample = Sample { text, number };

        let complete = validator.validate(&sample).unwrap();
        prop_assert_eq!(validator.is_valid(&sample).unwrap(), complete.is_valid());
    }

    #[test]
    fn force_reports_at_least_as_much(text in ".{0,16}", number in any::<i64>()) {
        let validator = sample_validator();
        let sample = Sample { text, number };
        let forced = ValidationOptions::default().with_strategy(ValidationStrategy::Force);

        let complete = validator.validate(&sample).unwrap().into_errors();
        let all = validator.validate_with(Some(&sample), &forced).unwrap().into_errors();
        prop_assert!(all.error_count() >= complete.error_count());
        prop_assert_eq!(all.error_count(), 5);
    }
}
