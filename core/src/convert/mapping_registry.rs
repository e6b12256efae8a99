use crate::convert::class_id::ClassId;
use crate::convert::conversion_rule::ConversionRule;
use crate::convert::convertible::{Convertible, ConvertibleClass};
use crate::convert::error::ConfigurationError;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable class to [`ConversionRule`] table with nearest-ancestor fallback.
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
  rules: HashMap<ClassId, Arc<ConversionRule>>,
}

impl MappingRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn builder() -> MappingRegistryBuilder {
    MappingRegistryBuilder::default()
  }

  /// Builds the registry from the raw `classes` configuration value.
  ///
  /// Absent, `null` and an empty array give an empty registry. Any other non-object value fails.
  pub fn from_config(classes: Option<&serde_json::Value>) -> Result<Self, ConfigurationError> {
    let entries = match classes {
      None | Some(serde_json::Value::Null) => return Ok(Self::new()),
      Some(serde_json::Value::Array(items)) if items.is_empty() => return Ok(Self::new()),
      Some(serde_json::Value::Object(entries)) => entries,
      Some(serde_json::Value::Array(_)) => {
        return Err(ConfigurationError::NotAMapping {
          found: "non-empty list",
        })
      }
      Some(other) => {
        return Err(ConfigurationError::NotAMapping {
          found: json_kind(other),
        })
      }
    };

    let mut builder = Self::builder();
    for (class, descriptor) in entries {
      let class_id = ClassId::parse(class)?;
      let rule = ConversionRule::from_descriptor(class, descriptor)?;
      builder = builder.insert(class_id, rule);
    }
    let registry = builder.build();
    tracing::debug!("MappingRegistry built from configuration: classes = {}", registry.len());
    Ok(registry)
  }

  pub fn len(&self) -> usize {
    self.rules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }

  /// Exact lookup, without ancestor fallback.
  pub fn get(&self, class: &str) -> Option<&ConversionRule> {
    self.rules.get(class).map(Arc::as_ref)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&ClassId, &ConversionRule)> + '_ {
    self.rules.iter().map(|(class, rule)| (class, rule.as_ref()))
  }

  /// Rule for `object`'s exact class, else for its nearest registered ancestor.
  pub fn resolve(&self, object: &dyn Convertible) -> Option<Arc<ConversionRule>> {
    self.resolve_lineage(&object.class_id(), &object.ancestors())
  }

  /// Resolution over an explicit lineage. `ancestors` is ordered nearest first.
  pub fn resolve_lineage(&self, class: &ClassId, ancestors: &[ClassId]) -> Option<Arc<ConversionRule>> {
    if let Some(rule) = self.rules.get(class) {
      tracing::trace!("resolve: exact match for class = {}", class);
      return Some(rule.clone());
    }
    let found = ancestors
      .iter()
      .find_map(|ancestor| self.rules.get(ancestor).map(|rule| (ancestor, rule.clone())));
    match found {
      Some((ancestor, rule)) => {
        tracing::debug!("resolve: class = {} falls back to ancestor = {}", class, ancestor);
        Some(rule)
      }
      None => {
        tracing::trace!("resolve: no rule for class = {}", class);
        None
      }
    }
  }
}

#[derive(Debug, Default)]
pub struct MappingRegistryBuilder {
  rules: HashMap<ClassId, Arc<ConversionRule>>,
}

impl MappingRegistryBuilder {
  /// Adds or replaces the rule for `class`.
  pub fn insert(mut self, class: impl Into<ClassId>, rule: ConversionRule) -> Self {
    self.rules.insert(class.into(), Arc::new(rule));
    self
  }

  /// Registers `T`, checking that it can dispatch `method`.
  pub fn register<T: ConvertibleClass>(
    self,
    key: impl Into<String>,
    method: impl Into<String>,
  ) -> Result<Self, ConfigurationError> {
    let method = method.into();
    if !T::accessors().contains(&method.as_str()) {
      return Err(ConfigurationError::UnknownAccessor {
        class: T::class(),
        method,
      });
    }
    Ok(self.insert(T::class(), ConversionRule::new(key, method)))
  }

  pub fn build(self) -> MappingRegistry {
    MappingRegistry { rules: self.rules }
  }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
  match value {
    serde_json::Value::Null => "null",
    serde_json::Value::Bool(_) => "boolean",
    serde_json::Value::Number(_) => "number",
    serde_json::Value::String(_) => "string",
    serde_json::Value::Array(_) => "array",
    serde_json::Value::Object(_) => "object",
  }
}
