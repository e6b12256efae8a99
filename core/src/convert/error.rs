use crate::convert::class_id::ClassId;
use thiserror::Error;

/// Raised while building a [`MappingRegistry`](crate::MappingRegistry) from configuration.
#[derive(Error, Debug)]
pub enum ConfigurationError {
  #[error("classes mapping must be an array (found {found})")]
  NotAMapping { found: &'static str },
  #[error("invalid class identifier: {0:?}")]
  InvalidClassId(String),
  #[error("class mapping entry for {class} must be an object")]
  EntryNotAMapping { class: String },
  #[error("class mapping entry for {class} is missing a non-empty `{field}`")]
  MissingField { class: String, field: &'static str },
  #[error("class {class} has no accessor named {method}")]
  UnknownAccessor { class: ClassId, method: String },
  #[error("failed to parse configuration: {0}")]
  Parse(#[from] serde_json::Error),
}

/// Raised when untyped input cannot be classified as an ordered list or a labeled mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
  #[error("inconsistent keys: either all items must be labeled or none ({labeled} labeled, {positional} positional)")]
  InconsistentKeys { labeled: usize, positional: usize },
  #[error("duplicate label: {0:?}")]
  DuplicateLabel(String),
}

#[derive(Error, Debug)]
pub enum ConverterError {
  #[error(transparent)]
  Validation(#[from] ValidationError),
  #[error("class {class} has no accessor named {method}")]
  UnknownAccessor { class: ClassId, method: String },
  #[error(transparent)]
  Accessor(#[from] anyhow::Error),
  #[error("maximum nesting depth of {max_depth} exceeded")]
  DepthExceeded { max_depth: usize },
  #[error("failed to render converted value: {0}")]
  Render(#[from] serde_json::Error),
}
