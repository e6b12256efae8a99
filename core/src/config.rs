use crate::config_option::ConfigOption;
use crate::convert::{ConfigurationError, ConversionRule, DEFAULT_MAX_DEPTH};
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct Config {
  classes: Option<serde_json::Value>,
  max_depth: usize,
}

#[derive(Debug, Deserialize)]
struct ConfigDocument {
  #[serde(default)]
  classes: Option<serde_json::Value>,
  #[serde(default)]
  max_depth: Option<usize>,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      classes: None,
      max_depth: DEFAULT_MAX_DEPTH,
    }
  }
}

impl Config {
  pub fn from(options: impl IntoIterator<Item = ConfigOption>) -> Config {
    let mut config = Config::default();
    for option in options {
      option.apply(&mut config);
    }
    config
  }

  /// Reads a settings document of the form `{ "classes": { ... }, "max_depth": 64 }`.
  ///
  /// The shape of `classes` is not checked here; that happens when a converter is built.
  pub fn from_json(document: &serde_json::Value) -> Result<Config, ConfigurationError> {
    let document = ConfigDocument::deserialize(document)?;
    Ok(Config {
      classes: document.classes,
      max_depth: document.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
    })
  }

  pub fn from_json_str(document: &str) -> Result<Config, ConfigurationError> {
    let document = serde_json::from_str::<serde_json::Value>(document)?;
    Self::from_json(&document)
  }

  pub fn classes(&self) -> Option<&serde_json::Value> {
    self.classes.as_ref()
  }

  pub fn set_classes(&mut self, classes: serde_json::Value) {
    self.classes = Some(classes);
  }

  pub fn put_class(&mut self, class: &str, rule: &ConversionRule) {
    let descriptor = serde_json::json!({ "key": rule.key(), "method": rule.method() });
    let replaceable = match &self.classes {
      None | Some(serde_json::Value::Null) => true,
      Some(serde_json::Value::Array(items)) => items.is_empty(),
      _ => false,
    };
    if replaceable {
      self.classes = Some(serde_json::Value::Object(serde_json::Map::new()));
    }
    if let Some(serde_json::Value::Object(entries)) = self.classes.as_mut() {
      entries.insert(class.to_string(), descriptor);
    } else {
      tracing::warn!(
        "Config::put_class: ignoring class = {}, classes is not a mapping",
        class
      );
    }
  }

  pub fn max_depth(&self) -> usize {
    self.max_depth
  }

  pub fn set_max_depth(&mut self, max_depth: usize) {
    self.max_depth = max_depth;
  }
}
