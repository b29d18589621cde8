//! Property-based tests for nebula-constraint.

use futures::executor::block_on;
use nebula_constraint::prelude::*;
use proptest::prelude::*;
use serde_json::{Value, json};

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z ]{0,8}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-c]", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn tree() -> Constraint {
    has_properties! {
        "a" => [Exists, Length::range(1, 4)],
        "b" => Constraint::each(OneOf::new([json!(null), json!(true), json!("x")])),
        "c" => Constraint::each(has_properties! { "a" => Length::max(2) }),
    }
    .into()
}

// ============================================================================
// DETERMINISM: validate(x) == validate(x)
// ============================================================================

proptest! {
    #[test]
    fn sync_is_deterministic(value in json_value()) {
        let validator = Validator::new();
        let tree = tree();
        let first = validator.validate_sync(&value, &tree).unwrap();
        let second = validator.validate_sync(&value, &tree).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn concurrent_matches_sync(value in json_value()) {
        let validator = Validator::new();
        let tree = tree();
        let sync = validator.validate_sync(&value, &tree).unwrap();
        let concurrent = block_on(validator.validate(&value, &tree)).unwrap();
        prop_assert_eq!(sync, concurrent);
    }
}

// ============================================================================
// EMPTINESS IFF CONFORMANCE
// ============================================================================

proptest! {
    #[test]
    fn length_range_empty_iff_in_range(s in "\\PC{0,12}", min in 0usize..6, extra in 0usize..6) {
        let max = min + extra;
        let tree = Constraint::from(Length::range(min, max));
        let violations = Validator::new().validate_sync(&json!(s), &tree).unwrap();

        let len = s.chars().count();
        prop_assert_eq!(violations.is_empty(), (min..=max).contains(&len));
    }

    #[test]
    fn each_reports_exactly_the_failing_elements(items in prop::collection::vec("[a-z]{0,6}", 0..8)) {
        let tree = Constraint::each(Length::min(3));
        let violations = Validator::new().validate_sync(&json!(items), &tree).unwrap();

        let failing: Vec<String> = items
            .iter()
            .enumerate()
            .filter(|(_, s)| s.len() < 3)
            .map(|(i, _)| format!("[{i}]"))
            .collect();
        let reported: Vec<String> = violations.iter().map(|v| v.path.to_string()).collect();
        prop_assert_eq!(reported, failing);
    }

    #[test]
    fn one_of_empty_iff_member(n in 0i64..10) {
        let tree = Constraint::from(OneOf::new([1, 3, 5]));
        let violations = Validator::new().validate_sync(&json!(n), &tree).unwrap();
        prop_assert_eq!(violations.is_empty(), [1, 3, 5].contains(&n));
    }

    #[test]
    fn every_violation_path_exists_in_the_tree_shape(value in json_value()) {
        let violations = Validator::new().validate_sync(&value, &tree()).unwrap();
        for violation in violations {
            let first = violation.path.segments().first().and_then(|s| s.as_key().map(str::to_owned));
            prop_assert!(first.is_none() || matches!(first.as_deref(), Some("a" | "b" | "c")));
        }
    }
}
