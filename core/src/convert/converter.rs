use crate::config::Config;
use crate::convert::convertible::Convertible;
use crate::convert::error::{ConfigurationError, ConverterError};
use crate::convert::mapping_registry::MappingRegistry;
use crate::convert::value::{EntryKey, Map, Value};
use static_assertions::assert_impl_all;
use std::sync::Arc;

/// Collections nested deeper than this are rejected unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Recursively turns lists, labeled mappings and registered objects into plain values.
///
/// The registry is immutable once built, so a converter can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Converter {
  registry: Arc<MappingRegistry>,
  max_depth: usize,
}

assert_impl_all!(Converter: Send, Sync, Clone);
assert_impl_all!(MappingRegistry: Send, Sync);

impl Converter {
  /// Builds the registry from `config`, failing fast on a malformed class mapping.
  pub fn new(config: &Config) -> Result<Self, ConfigurationError> {
    let registry = MappingRegistry::from_config(config.classes())?;
    tracing::debug!(
      "Converter created: classes = {}, max_depth = {}",
      registry.len(),
      config.max_depth()
    );
    Ok(Self {
      registry: Arc::new(registry),
      max_depth: config.max_depth(),
    })
  }

  pub fn with_registry(registry: MappingRegistry) -> Self {
    Self {
      registry: Arc::new(registry),
      max_depth: DEFAULT_MAX_DEPTH,
    }
  }

  pub fn with_max_depth(mut self, max_depth: usize) -> Self {
    self.max_depth = max_depth;
    self
  }

  pub fn registry(&self) -> &MappingRegistry {
    &self.registry
  }

  pub fn max_depth(&self) -> usize {
    self.max_depth
  }

  /// Converts `value` into a new structure; the input is left untouched.
  ///
  /// Scalars and `Null` pass through. Lists and mappings keep their shape and order. A registered
  /// object becomes `{ rule.key: object.<rule.method>() }`; an unregistered one passes through.
  pub fn convert(&self, value: &Value) -> Result<Value, ConverterError> {
    self.convert_at(value, 0)
  }

  /// Classifies untyped keyed input, then converts it.
  pub fn convert_entries<I, K>(&self, entries: I) -> Result<Value, ConverterError>
  where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<EntryKey>, {
    let value = Value::from_entries(entries)?;
    self.convert(&value)
  }

  /// Converts `value` and renders the result as JSON.
  pub fn convert_to_json(&self, value: &Value) -> Result<serde_json::Value, ConverterError> {
    let converted = self.convert(value)?;
    Ok(converted.to_json()?)
  }

  fn convert_at(&self, value: &Value, depth: usize) -> Result<Value, ConverterError> {
    match value {
      Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(value.clone()),
      Value::List(items) => {
        let depth = self.descend(depth)?;
        items
          .iter()
          .map(|item| self.convert_at(item, depth))
          .collect::<Result<Vec<_>, _>>()
          .map(Value::List)
      }
      Value::Map(map) => {
        let depth = self.descend(depth)?;
        map
          .iter()
          .map(|(label, item)| Ok((label.clone(), self.convert_at(item, depth)?)))
          .collect::<Result<Map, ConverterError>>()
          .map(Value::Map)
      }
      Value::Object(object) => self.convert_object(object),
    }
  }

  fn descend(&self, depth: usize) -> Result<usize, ConverterError> {
    let next = depth + 1;
    if next > self.max_depth {
      return Err(ConverterError::DepthExceeded {
        max_depth: self.max_depth,
      });
    }
    Ok(next)
  }

  fn convert_object(&self, object: &Arc<dyn Convertible>) -> Result<Value, ConverterError> {
    let Some(rule) = self.registry.resolve(object.as_ref()) else {
      tracing::trace!("convert: passing through unregistered class = {}", object.class_id());
      return Ok(Value::Object(object.clone()));
    };
    let result = object
      .call_accessor(rule.method())
      .ok_or_else(|| ConverterError::UnknownAccessor {
        class: object.class_id(),
        method: rule.method().to_string(),
      })??;

    let mut converted = Map::with_capacity(1);
    converted.insert(rule.key().to_string(), Value::Map(result));
    Ok(Value::Map(converted))
  }
}
