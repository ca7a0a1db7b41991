//! Property-based tests for merging, marker stripping and substitution.

use crate::merge::{marked_key, ConfigMerger};
use crate::normalize::{has_enforce_markers, strip_enforce_markers};
use crate::substitute::VariableSubstitutor;
use crate::value::{Mapping, Value};
use proptest::prelude::*;

// Strategy for generating arbitrary documents without marker keys
fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e6f64..1.0e6).prop_map(Value::Float),
        "[a-z0-9 ]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
            prop::collection::vec(("[a-z]{1,4}", inner), 0..4)
                .prop_map(|entries| Value::Mapping(entries.into_iter().collect())),
        ]
    })
}

fn mapping_strategy() -> impl Strategy<Value = Mapping> {
    prop::collection::vec(("[a-z]{1,4}", value_strategy()), 0..5)
        .prop_map(|entries| entries.into_iter().collect())
}

// Keys optionally carrying one or two markers
fn marked_mapping_strategy() -> impl Strategy<Value = Mapping> {
    prop::collection::vec(("[a-z]{1,4}!{0,2}", value_strategy()), 0..5)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Merging an empty update leaves the base untouched
    #[test]
    fn merge_empty_update_is_identity(base in mapping_strategy()) {
        let merged = ConfigMerger::new().merge(base.clone(), Mapping::new()).unwrap();
        prop_assert_eq!(merged, base);
    }

    // Merging into an empty base yields the update
    #[test]
    fn merge_into_empty_base_yields_update(update in mapping_strategy()) {
        let merged = ConfigMerger::new().merge(Mapping::new(), update.clone()).unwrap();
        prop_assert_eq!(merged, update);
    }

    // No key of the base is ever lost, and base keys keep their order
    #[test]
    fn merge_preserves_base_keys(base in mapping_strategy(), update in mapping_strategy()) {
        let merged = ConfigMerger::new().merge(base.clone(), update).unwrap();
        let merged_keys: Vec<&String> = merged.keys().take(base.len()).collect();
        let base_keys: Vec<&String> = base.keys().collect();
        prop_assert_eq!(merged_keys, base_keys);
    }

    // Sequences under the same key concatenate, base items first
    #[test]
    fn merge_concatenates_sequences(
        first in prop::collection::vec(value_strategy(), 0..5),
        second in prop::collection::vec(value_strategy(), 0..5),
    ) {
        let mut base = Mapping::new();
        base.insert("items".to_string(), Value::Sequence(first.clone()));
        let mut update = Mapping::new();
        update.insert("items".to_string(), Value::Sequence(second.clone()));

        let merged = ConfigMerger::new().merge(base, update).unwrap();
        let mut expected = first;
        expected.extend(second);
        prop_assert_eq!(&merged["items"], &Value::Sequence(expected));
    }

    // An enforced key always replaces whatever the base held
    #[test]
    fn enforced_key_replaces(old in value_strategy(), new in value_strategy()) {
        let mut base = Mapping::new();
        base.insert("k".to_string(), old);
        let mut update = Mapping::new();
        update.insert(marked_key("k"), new.clone());

        let merged = ConfigMerger::new().merge(base, update).unwrap();
        prop_assert_eq!(&merged["k"], &new);
        prop_assert!(!merged.contains_key("k!"));
    }

    // Stripping leaves no markers behind and is idempotent
    #[test]
    fn strip_markers_is_complete_and_idempotent(doc in marked_mapping_strategy()) {
        let mut value = Value::Mapping(doc);
        strip_enforce_markers(&mut value);
        prop_assert!(!has_enforce_markers(&value));

        let once = value.clone();
        strip_enforce_markers(&mut value);
        prop_assert_eq!(value, once);
    }

    // Text without tokens survives substitution unchanged
    #[test]
    fn substitution_ignores_plain_text(text in "[a-z0-9 ./{}$-]{0,20}", var in value_strategy()) {
        prop_assume!(!text.contains("${"));
        let mut vars = Mapping::new();
        vars.insert("name".to_string(), var);
        let subs = VariableSubstitutor::new(vars);
        prop_assert_eq!(subs.substitute_str(&text), Value::String(text.clone()));
    }

    // Substitution with token-free variables is idempotent
    #[test]
    fn substitution_is_idempotent(doc in mapping_strategy(), number in any::<i64>()) {
        let mut vars = Mapping::new();
        vars.insert("n".to_string(), Value::Int(number));
        let subs = VariableSubstitutor::new(vars);

        let mut value = Value::Mapping(doc);
        value.as_mapping_mut().unwrap().insert("a".to_string(), Value::from("x-${n}"));
        subs.apply(&mut value);
        let once = value.clone();
        subs.apply(&mut value);
        prop_assert_eq!(value, once);
    }
}
