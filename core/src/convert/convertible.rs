use crate::convert::class_id::ClassId;
use crate::convert::value::Map;
use std::any::Any;
use std::fmt::Debug;

pub type AccessorError = anyhow::Error;
pub type AccessorResult = Result<Map, AccessorError>;

/// Capability of an object the [`Converter`](crate::Converter) can transform.
///
/// Rust has no class inheritance, so the ancestor chain is declared explicitly: `ancestors`
/// lists concrete parent classes, nearest first, excluding the class itself. Accessors are
/// dispatched by name; `call_accessor` returns `None` when the class has no such accessor.
///
/// Usually implemented through `#[derive(Convertible)]`.
pub trait Convertible: Debug + Send + Sync + 'static {
  fn class_id(&self) -> ClassId;

  fn ancestors(&self) -> Vec<ClassId> {
    Vec::new()
  }

  fn call_accessor(&self, method: &str) -> Option<AccessorResult>;

  fn as_any(&self) -> &(dyn Any + Send + Sync + 'static);
}

/// Static counterpart of [`Convertible`], available without an instance.
pub trait ConvertibleClass {
  fn class() -> ClassId;

  fn ancestry() -> Vec<ClassId> {
    Vec::new()
  }

  /// Names `call_accessor` can dispatch, including those forwarded to a delegate parent.
  fn accessors() -> Vec<&'static str>;
}

impl dyn Convertible {
  /// Exact class first, then ancestors nearest first.
  pub fn lineage(&self) -> Vec<ClassId> {
    let mut lineage = vec![self.class_id()];
    lineage.extend(self.ancestors());
    lineage
  }

  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    self.as_any().downcast_ref::<T>()
  }
}
