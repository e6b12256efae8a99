use crate::convert::error::ConfigurationError;
use std::borrow::{Borrow, Cow};
use std::fmt::{Display, Formatter};

/// Fully-qualified class identifier used as the registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(Cow<'static, str>);

impl ClassId {
  #[inline]
  #[must_use]
  pub const fn from_static(name: &'static str) -> Self {
    Self(Cow::Borrowed(name))
  }

  pub fn new(name: impl Into<String>) -> Self {
    Self(Cow::Owned(name.into()))
  }

  /// Validates `name` as a class identifier: non-empty, without whitespace or control characters.
  pub fn parse(name: &str) -> Result<Self, ConfigurationError> {
    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control()) {
      return Err(ConfigurationError::InvalidClassId(name.to_string()));
    }
    Ok(Self::new(name))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Display for ClassId {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl Borrow<str> for ClassId {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl From<&'static str> for ClassId {
  fn from(name: &'static str) -> Self {
    Self::from_static(name)
  }
}

impl From<String> for ClassId {
  fn from(name: String) -> Self {
    Self::new(name)
  }
}
