use crate::config::Config;
use crate::convert::{ConversionRule, ConvertibleClass};

#[derive(Debug, Clone)]
pub enum ConfigOption {
  SetClasses(serde_json::Value),
  PutClass(String, ConversionRule),
  SetMaxDepth(usize),
}

impl ConfigOption {
  pub fn apply(&self, config: &mut Config) {
    match self {
      ConfigOption::SetClasses(classes) => {
        config.set_classes(classes.clone());
      }
      ConfigOption::PutClass(class, rule) => {
        config.put_class(class, rule);
      }
      ConfigOption::SetMaxDepth(max_depth) => {
        config.set_max_depth(*max_depth);
      }
    }
  }

  pub fn with_classes(classes: serde_json::Value) -> ConfigOption {
    ConfigOption::SetClasses(classes)
  }

  pub fn with_class(class: &str, key: &str, method: &str) -> ConfigOption {
    ConfigOption::PutClass(class.to_string(), ConversionRule::new(key, method))
  }

  pub fn with_convertible<T: ConvertibleClass>(key: &str, method: &str) -> ConfigOption {
    ConfigOption::PutClass(T::class().to_string(), ConversionRule::new(key, method))
  }

  pub fn with_max_depth(max_depth: usize) -> ConfigOption {
    ConfigOption::SetMaxDepth(max_depth)
  }
}
