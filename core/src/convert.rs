mod class_id;
mod conversion_rule;
mod convertible;
mod converter;
mod error;
mod mapping_registry;
mod value;
mod value_test;

pub use {
  self::class_id::*, self::conversion_rule::*, self::convertible::*, self::converter::*, self::error::*,
  self::mapping_registry::*, self::value::*,
};
