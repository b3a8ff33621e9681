//! Structural diff of two JSON trees
//!
//! Objects are compared as unordered maps, arrays position by position.
//! The diff serializes to JSON using `$insert`, `$delete`, `$replace` and
//! `$array` markers, e.g.
//!
//! ```text
//! {"actions": {"$array": {"1": {"block_num": {"$replace": {"old": 7, "new": 8}}}}},
//!  "last_irreversible_block": {"$delete": 42}}
//! ```

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Number, Value};
use std::collections::BTreeMap;

/// Difference between a left (reference) and right (candidate) JSON value
#[derive(Clone, Debug, PartialEq)]
pub enum JsonDiff {
    /// Value present on the right only
    Insert(Value),
    /// Value present on the left only
    Delete(Value),
    /// Value differs, or the JSON types differ
    Replace { old: Value, new: Value },
    /// Per-key differences of two objects (never empty)
    Object(BTreeMap<String, JsonDiff>),
    /// Per-index differences of two arrays (never empty)
    Array(BTreeMap<usize, JsonDiff>),
}

impl JsonDiff {
    /// Number of leaf changes
    pub fn change_count(&self) -> usize {
        match self {
            JsonDiff::Insert(_) | JsonDiff::Delete(_) | JsonDiff::Replace { .. } => 1,
            JsonDiff::Object(entries) => entries.values().map(JsonDiff::change_count).sum(),
            JsonDiff::Array(entries) => entries.values().map(JsonDiff::change_count).sum(),
        }
    }

    /// Render the diff as a JSON value for the report
    pub fn to_value(&self) -> Value {
        match self {
            JsonDiff::Insert(value) => json!({ "$insert": value }),
            JsonDiff::Delete(value) => json!({ "$delete": value }),
            JsonDiff::Replace { old, new } => json!({ "$replace": { "old": old, "new": new } }),
            JsonDiff::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, d)| (key.clone(), d.to_value()))
                    .collect::<Map<_, _>>(),
            ),
            JsonDiff::Array(entries) => {
                let indices = entries
                    .iter()
                    .map(|(index, d)| (index.to_string(), d.to_value()))
                    .collect::<Map<_, _>>();
                json!({ "$array": indices })
            }
        }
    }
}

impl Serialize for JsonDiff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Compare two JSON values, `None` when they are deeply equal
pub fn diff(left: &Value, right: &Value) -> Option<JsonDiff> {
    match (left, right) {
        (Value::Object(l), Value::Object(r)) => diff_objects(l, r),
        (Value::Array(l), Value::Array(r)) => diff_arrays(l, r),
        (Value::Number(l), Value::Number(r)) if numbers_equal(l, r) => None,
        _ if left == right => None,
        _ => Some(JsonDiff::Replace {
            old: left.clone(),
            new: right.clone(),
        }),
    }
}

fn diff_objects(left: &Map<String, Value>, right: &Map<String, Value>) -> Option<JsonDiff> {
    let mut entries = BTreeMap::new();

    for (key, l) in left {
        match right.get(key) {
            Some(r) => {
                if let Some(d) = diff(l, r) {
                    entries.insert(key.clone(), d);
                }
            }
            None => {
                entries.insert(key.clone(), JsonDiff::Delete(l.clone()));
            }
        }
    }

    for (key, r) in right {
        if !left.contains_key(key) {
            entries.insert(key.clone(), JsonDiff::Insert(r.clone()));
        }
    }

    (!entries.is_empty()).then_some(JsonDiff::Object(entries))
}

fn diff_arrays(left: &[Value], right: &[Value]) -> Option<JsonDiff> {
    let mut entries = BTreeMap::new();

    for index in 0..left.len().max(right.len()) {
        let entry = match (left.get(index), right.get(index)) {
            (Some(l), Some(r)) => diff(l, r),
            (Some(l), None) => Some(JsonDiff::Delete(l.clone())),
            (None, Some(r)) => Some(JsonDiff::Insert(r.clone())),
            (None, None) => None,
        };
        if let Some(d) = entry {
            entries.insert(index, d);
        }
    }

    (!entries.is_empty()).then_some(JsonDiff::Array(entries))
}

// Integers compare exactly; an integer equals a float only if the float is
// that exact integer, so 1 == 1.0 but 2^53 + 1 != 2^53 as f64.
fn numbers_equal(left: &Number, right: &Number) -> bool {
    match (as_integer(left), as_integer(right)) {
        (Some(l), Some(r)) => l == r,
        (Some(i), None) => right.as_f64().is_some_and(|f| float_is_integer(f, i)),
        (None, Some(i)) => left.as_f64().is_some_and(|f| float_is_integer(f, i)),
        (None, None) => left.as_f64() == right.as_f64(),
    }
}

fn as_integer(number: &Number) -> Option<i128> {
    number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
}

fn float_is_integer(float: f64, integer: i128) -> bool {
    // Bounds of i128 as f64; outside them the cast would saturate.
    const MIN: f64 = -170_141_183_460_469_231_731_687_303_715_884_105_728.0;
    const MAX: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

    float.is_finite()
        && float.fract() == 0.0
        && (MIN..MAX).contains(&float)
        && float as i128 == integer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Value> {
        vec![
            Value::Null,
            json!(true),
            json!(0),
            json!(-17),
            json!(2.5),
            json!("eosio"),
            json!([]),
            json!({}),
            json!([1, [2, {"a": null}], "x"]),
            json!({
                "actions": [{"global_action_seq": 10, "block_num": 7}],
                "last_irreversible_block": 42,
                "trx": {"receipt": {"status": "executed"}}
            }),
        ]
    }

    #[test]
    fn test_reflexive() {
        for value in samples() {
            assert_eq!(diff(&value, &value), None, "{value}");
        }
    }

    #[test]
    fn test_distinct_values_always_differ() {
        let values = samples();
        for (i, a) in values.iter().enumerate() {
            for (j, b) in values.iter().enumerate() {
                if i != j {
                    assert!(diff(a, b).is_some(), "{a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn test_object_key_order_ignored() {
        let a: Value = serde_json::from_str(r#"{"x": 1, "y": 2}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"y": 2, "x": 1}"#).unwrap();
        assert_eq!(diff(&a, &b), None);
    }

    #[test]
    fn test_array_order_matters() {
        let d = diff(&json!([1, 2]), &json!([2, 1])).unwrap();
        assert_eq!(d.change_count(), 2);
        assert_eq!(
            d.to_value(),
            json!({"$array": {
                "0": {"$replace": {"old": 1, "new": 2}},
                "1": {"$replace": {"old": 2, "new": 1}}
            }})
        );
    }

    #[test]
    fn test_inserted_and_deleted_keys() {
        let d = diff(&json!({"id": 1, "old": true}), &json!({"id": 1, "name": "x"})).unwrap();
        assert_eq!(
            d.to_value(),
            json!({"name": {"$insert": "x"}, "old": {"$delete": true}})
        );
    }

    #[test]
    fn test_null_value_differs_from_missing_key() {
        let d = diff(&json!({"a": null}), &json!({})).unwrap();
        assert_eq!(d, JsonDiff::Object(BTreeMap::from([(
            "a".to_string(),
            JsonDiff::Delete(Value::Null)
        )])));
    }

    #[test]
    fn test_array_length_mismatch() {
        let d = diff(&json!([1, 2, 3]), &json!([1])).unwrap();
        assert_eq!(
            d.to_value(),
            json!({"$array": {"1": {"$delete": 2}, "2": {"$delete": 3}}})
        );

        let d = diff(&json!([]), &json!([{"a": 1}])).unwrap();
        assert_eq!(d.to_value(), json!({"$array": {"0": {"$insert": {"a": 1}}}}));
    }

    #[test]
    fn test_nested_change_is_located() {
        let left = json!({"actions": [{"block_num": 7}, {"block_num": 8}]});
        let right = json!({"actions": [{"block_num": 7}, {"block_num": 9}]});
        let d = diff(&left, &right).unwrap();

        assert_eq!(d.change_count(), 1);
        assert_eq!(
            d.to_value(),
            json!({"actions": {"$array": {"1": {"block_num": {"$replace": {"old": 8, "new": 9}}}}}})
        );
    }

    #[test]
    fn test_type_mismatch_is_replace() {
        let d = diff(&json!({"a": "1"}), &json!({"a": 1})).unwrap();
        assert_eq!(
            d.to_value(),
            json!({"a": {"$replace": {"old": "1", "new": 1}}})
        );
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert_eq!(diff(&json!(1), &json!(1.0)), None);
        assert!(diff(&json!(1), &json!(1.5)).is_some());
        assert!(diff(&json!(u64::MAX), &json!(u64::MAX - 1)).is_some());
        assert!(diff(&json!(-1), &json!(1)).is_some());
        assert_eq!(diff(&json!(-3), &json!(-3.0)), None);
        assert_eq!(diff(&json!(0.5), &json!(0.5)), None);
    }

    #[test]
    fn test_large_integer_not_equal_to_rounded_float() {
        let int: Value = serde_json::from_str("9007199254740993").unwrap();
        let float: Value = serde_json::from_str("9007199254740992.0").unwrap();
        assert!(diff(&int, &float).is_some());
        assert!(diff(&float, &int).is_some());

        let exact: Value = serde_json::from_str("9007199254740992").unwrap();
        assert_eq!(diff(&exact, &float), None);

        assert!(diff(&json!(u64::MAX), &json!(1e30)).is_some());
        assert!(diff(&json!(1), &json!(1.0000001)).is_some());
    }

    #[test]
    fn test_serialize_matches_to_value() {
        let d = diff(&json!({"a": [1]}), &json!({"a": [2]})).unwrap();
        assert_eq!(serde_json::to_value(&d).unwrap(), d.to_value());
    }
}
