#[cfg(test)]
mod test {
  use std::any::Any;
  use std::sync::Arc;

  use rstest::rstest;
  use serde_json::json;

  use crate::convert::{AccessorResult, ClassId, Convertible, EntryKey, Map, ValidationError, Value};

  #[derive(Debug)]
  struct Opaque;

  impl Convertible for Opaque {
    fn class_id(&self) -> ClassId {
      ClassId::from_static("test.Opaque")
    }

    fn call_accessor(&self, _method: &str) -> Option<AccessorResult> {
      None
    }

    fn as_any(&self) -> &(dyn Any + Send + Sync + 'static) {
      self
    }
  }

  #[test]
  fn test_from_entries_positional_keys_yield_list() {
    let value = Value::from_entries(vec![
      (EntryKey::Position(0), Value::from("a")),
      (EntryKey::Position(1), Value::from("b")),
    ])
    .unwrap();

    assert_eq!(value, Value::List(vec![Value::from("a"), Value::from("b")]));
  }

  #[test]
  fn test_from_entries_labels_yield_map_in_order() {
    let value = Value::from_entries(vec![("zeta", Value::from(1)), ("alpha", Value::from(2))]).unwrap();

    let map = value.as_map().expect("map");
    assert_eq!(map.keys().map(String::as_str).collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    assert_eq!(value.get("alpha"), Some(&Value::from(2)));
  }

  #[test]
  fn test_from_entries_empty_is_list() {
    let value = Value::from_entries(Vec::<(EntryKey, Value)>::new()).unwrap();
    assert_eq!(value, Value::List(vec![]));
  }

  #[test]
  fn test_from_entries_rejects_mixed_keys() {
    let err = Value::from_entries(vec![
      (EntryKey::Position(0), Value::from("a")),
      (EntryKey::from("label"), Value::from("b")),
    ])
    .unwrap_err();

    assert_eq!(
      err,
      ValidationError::InconsistentKeys {
        labeled: 1,
        positional: 1
      }
    );
    assert!(err.to_string().starts_with("inconsistent keys"));
  }

  #[rstest]
  #[case(vec![EntryKey::Position(0), EntryKey::Position(2)])]
  #[case(vec![EntryKey::Position(1), EntryKey::Position(1)])]
  #[case(vec![EntryKey::from("a"), EntryKey::Position(1)])]
  fn test_from_entries_position_off_its_index_counts_as_label(#[case] keys: Vec<EntryKey>) {
    let entries = keys.into_iter().map(|key| (key, Value::Null));
    let err = Value::from_entries(entries).unwrap_err();
    assert!(matches!(err, ValidationError::InconsistentKeys { .. }));
  }

  #[test]
  fn test_from_entries_all_shifted_positions_become_labels() {
    let value = Value::from_entries(vec![(5usize, Value::from("x")), (7usize, Value::from("y"))]).unwrap();

    assert_eq!(value.get("5"), Some(&Value::from("x")));
    assert_eq!(value.get("7"), Some(&Value::from("y")));
  }

  #[test]
  fn test_from_entries_rejects_duplicate_labels() {
    let err = Value::from_entries(vec![("a", Value::Null), ("a", Value::from(true))]).unwrap_err();
    assert_eq!(err, ValidationError::DuplicateLabel("a".to_string()));
  }

  #[test]
  fn test_from_entries_does_not_inspect_nested_collections() {
    let inner = Value::from_entries(vec![("inner", Value::from(1))]).unwrap();
    let outer = Value::from_entries(vec![("outer", inner.clone()), ("list", Value::List(vec![Value::Null]))]).unwrap();

    assert_eq!(outer.get("outer"), Some(&inner));
  }

  #[test]
  fn test_objects_compare_by_identity() {
    let shared: Arc<dyn Convertible> = Arc::new(Opaque);
    let a = Value::Object(shared.clone());
    let b = Value::Object(shared);
    let c = Value::object(Opaque);

    assert_eq!(a, b);
    assert_ne!(a, c);
  }

  #[test]
  fn test_to_json_renders_plain_values() {
    let mut map = Map::new();
    map.insert("list".to_string(), Value::List(vec![Value::from(1), Value::Null, Value::from("s")]));
    map.insert("flag".to_string(), Value::from(false));
    map.insert("ratio".to_string(), Value::from(0.5));

    assert_eq!(
      Value::Map(map).to_json().unwrap(),
      json!({ "list": [1, null, "s"], "flag": false, "ratio": 0.5 })
    );
  }

  #[test]
  fn test_to_json_fails_on_unconverted_object() {
    let err = Value::List(vec![Value::object(Opaque)]).to_json().unwrap_err();
    assert!(err.to_string().contains("test.Opaque"));
  }

  #[test]
  fn test_from_json_value() {
    let value = Value::from(json!({ "a": [1, 2.5, null], "b": { "c": "d" } }));

    assert_eq!(
      value.get("a"),
      Some(&Value::List(vec![Value::from(1), Value::from(2.5), Value::Null]))
    );
    assert_eq!(value.get("b").and_then(|b| b.get("c")), Some(&Value::from("d")));
  }

  #[rstest]
  #[case(Value::from(f64::NAN), Value::Null)]
  #[case(Value::from(None::<i64>), Value::Null)]
  #[case(Value::from(Some("x")), Value::String("x".to_string()))]
  fn test_from_conversions(#[case] actual: Value, #[case] expected: Value) {
    assert_eq!(actual, expected);
  }
}
