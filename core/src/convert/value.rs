use crate::convert::convertible::Convertible;
use crate::convert::error::ValidationError;
use indexmap::IndexMap;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Labeled mapping. Insertion order is preserved.
pub type Map = IndexMap<String, Value>;

/// A traversable value: scalars, ordered lists, labeled mappings and opaque objects.
#[derive(Debug, Clone, Default)]
pub enum Value {
  #[default]
  Null,
  Bool(bool),
  Number(serde_json::Number),
  String(String),
  List(Vec<Value>),
  Map(Map),
  Object(Arc<dyn Convertible>),
}

/// Key of an entry in an untyped collection, before it is classified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKey {
  Position(usize),
  Label(String),
}

impl EntryKey {
  fn is_default_for(&self, position: usize) -> bool {
    matches!(self, EntryKey::Position(p) if *p == position)
  }

  fn into_label(self) -> String {
    match self {
      EntryKey::Position(p) => p.to_string(),
      EntryKey::Label(label) => label,
    }
  }
}

impl Display for EntryKey {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      EntryKey::Position(p) => write!(f, "{}", p),
      EntryKey::Label(label) => f.write_str(label),
    }
  }
}

impl From<usize> for EntryKey {
  fn from(position: usize) -> Self {
    EntryKey::Position(position)
  }
}

impl From<&str> for EntryKey {
  fn from(label: &str) -> Self {
    EntryKey::Label(label.to_string())
  }
}

impl From<String> for EntryKey {
  fn from(label: String) -> Self {
    EntryKey::Label(label)
  }
}

impl Value {
  pub fn object<T: Convertible>(object: T) -> Self {
    Value::Object(Arc::new(object))
  }

  /// Classifies one level of untyped keyed input.
  ///
  /// Entry `i` is positional when its key is `Position(i)`; any other key is a caller-supplied
  /// label. All positional (or no entries) yields `List`, all labeled yields `Map`. Mixing the two
  /// is rejected. Nested values are not inspected.
  pub fn from_entries<I, K>(entries: I) -> Result<Value, ValidationError>
  where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<EntryKey>, {
    let entries = entries
      .into_iter()
      .map(|(key, value)| (key.into(), value))
      .collect::<Vec<_>>();
    let positional = entries
      .iter()
      .enumerate()
      .filter(|(position, (key, _))| key.is_default_for(*position))
      .count();
    let labeled = entries.len() - positional;

    if labeled == 0 {
      return Ok(Value::List(entries.into_iter().map(|(_, value)| value).collect()));
    }
    if positional > 0 {
      return Err(ValidationError::InconsistentKeys { labeled, positional });
    }

    let mut map = Map::with_capacity(entries.len());
    for (key, value) in entries {
      let label = key.into_label();
      if map.contains_key(&label) {
        return Err(ValidationError::DuplicateLabel(label));
      }
      map.insert(label, value);
    }
    Ok(Value::Map(map))
  }

  pub fn is_null(&self) -> bool {
    matches!(self, Value::Null)
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::String(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_list(&self) -> Option<&[Value]> {
    match self {
      Value::List(items) => Some(items),
      _ => None,
    }
  }

  pub fn as_map(&self) -> Option<&Map> {
    match self {
      Value::Map(map) => Some(map),
      _ => None,
    }
  }

  pub fn as_object(&self) -> Option<&Arc<dyn Convertible>> {
    match self {
      Value::Object(object) => Some(object),
      _ => None,
    }
  }

  pub fn get(&self, label: &str) -> Option<&Value> {
    self.as_map().and_then(|map| map.get(label))
  }

  /// Renders a plain value as JSON. Fails if an object is left unconverted.
  pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(self)
  }
}

impl PartialEq for Value {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Value::Null, Value::Null) => true,
      (Value::Bool(a), Value::Bool(b)) => a == b,
      (Value::Number(a), Value::Number(b)) => a == b,
      (Value::String(a), Value::String(b)) => a == b,
      (Value::List(a), Value::List(b)) => a == b,
      (Value::Map(a), Value::Map(b)) => a == b,
      (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
      _ => false,
    }
  }
}

impl Serialize for Value {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer, {
    match self {
      Value::Null => serializer.serialize_unit(),
      Value::Bool(b) => serializer.serialize_bool(*b),
      Value::Number(n) => n.serialize(serializer),
      Value::String(s) => serializer.serialize_str(s),
      Value::List(items) => {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
          seq.serialize_element(item)?;
        }
        seq.end()
      }
      Value::Map(map) => {
        let mut state = serializer.serialize_map(Some(map.len()))?;
        for (label, value) in map {
          state.serialize_entry(label, value)?;
        }
        state.end()
      }
      Value::Object(object) => Err(S::Error::custom(format!(
        "unconverted object of class {} cannot be serialized",
        object.class_id()
      ))),
    }
  }
}

impl From<serde_json::Value> for Value {
  fn from(value: serde_json::Value) -> Self {
    match value {
      serde_json::Value::Null => Value::Null,
      serde_json::Value::Bool(b) => Value::Bool(b),
      serde_json::Value::Number(n) => Value::Number(n),
      serde_json::Value::String(s) => Value::String(s),
      serde_json::Value::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
      serde_json::Value::Object(fields) => {
        Value::Map(fields.into_iter().map(|(label, value)| (label, Value::from(value))).collect())
      }
    }
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Bool(b)
  }
}

macro_rules! impl_from_integer {
  ($($ty:ty),*) => {
    $(
      impl From<$ty> for Value {
        fn from(n: $ty) -> Self {
          Value::Number(serde_json::Number::from(n))
        }
      }
    )*
  };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
  fn from(n: f64) -> Self {
    serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::String(s.to_string())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::String(s)
  }
}

impl From<Vec<Value>> for Value {
  fn from(items: Vec<Value>) -> Self {
    Value::List(items)
  }
}

impl From<Map> for Value {
  fn from(map: Map) -> Self {
    Value::Map(map)
  }
}

impl From<Arc<dyn Convertible>> for Value {
  fn from(object: Arc<dyn Convertible>) -> Self {
    Value::Object(object)
  }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(value: Option<T>) -> Self {
    value.map_or(Value::Null, Into::into)
  }
}
