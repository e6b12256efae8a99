use crate::convert::error::ConfigurationError;

/// How a registered class converts: the output label and the accessor producing the nested mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversionRule {
  key: String,
  method: String,
}

impl ConversionRule {
  pub fn new(key: impl Into<String>, method: impl Into<String>) -> Self {
    Self {
      key: key.into(),
      method: method.into(),
    }
  }

  pub fn key(&self) -> &str {
    &self.key
  }

  pub fn method(&self) -> &str {
    &self.method
  }

  /// Parses a rule descriptor `{ "key": ..., "method": ... }` for `class`. Extra fields are ignored.
  pub fn from_descriptor(class: &str, descriptor: &serde_json::Value) -> Result<Self, ConfigurationError> {
    let fields = descriptor
      .as_object()
      .ok_or_else(|| ConfigurationError::EntryNotAMapping {
        class: class.to_string(),
      })?;
    let field = |name: &'static str| -> Result<String, ConfigurationError> {
      match fields.get(name).and_then(serde_json::Value::as_str) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ConfigurationError::MissingField {
          class: class.to_string(),
          field: name,
        }),
      }
    };
    Ok(Self::new(field("key")?, field("method")?))
  }
}
