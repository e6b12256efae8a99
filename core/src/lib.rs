//! Registry driven conversion of domain objects into plain values.

extern crate self as plainify_core_rs;

pub mod config;
pub mod config_option;
pub mod convert;

pub use config::*;
pub use config_option::*;
pub use convert::*;

// Re-exports for derive macros
pub use plainify_convertible_derive_rs::Convertible;
