use plainify_core_rs::{
  AccessorResult, Config, ConfigOption, Converter, Convertible, ConvertibleClass, EntryKey, Map, MappingRegistry, Value,
};
use serde_json::json;

#[derive(Debug, Clone, Convertible)]
#[convertible(methods(to_array, to_summary))]
struct Article {
  id: u64,
  title: String,
}

impl Article {
  fn to_array(&self) -> AccessorResult {
    let mut map = Map::new();
    map.insert("id".to_string(), Value::from(self.id));
    map.insert("title".to_string(), Value::from(self.title.as_str()));
    Ok(map)
  }

  fn to_summary(&self) -> AccessorResult {
    let mut map = Map::new();
    map.insert("id".to_string(), Value::from(self.id));
    Ok(map)
  }
}

#[derive(Debug, Clone, Convertible)]
#[convertible(extends = Article, delegate = article)]
struct FeaturedArticle {
  article: Article,
}

fn article(id: u64, title: &str) -> Article {
  Article {
    id,
    title: title.to_string(),
  }
}

#[test]
fn test_response_payload_from_settings_document() {
  let class = Article::class().to_string();
  let settings = json!({
    "classes": {
      class: { "key": "article", "method": "to_array" }
    }
  });
  let converter = Converter::new(&Config::from_json(&settings).unwrap()).unwrap();

  let payload = Value::from_entries(vec![
    (EntryKey::from("items"), Value::List(vec![
      Value::object(article(1, "first")),
      Value::object(FeaturedArticle {
        article: article(2, "second"),
      }),
      Value::Null,
    ])),
    (EntryKey::from("total"), Value::from(2)),
  ])
  .unwrap();

  assert_eq!(
    converter.convert_to_json(&payload).unwrap(),
    json!({
      "items": [
        { "article": { "id": 1, "title": "first" } },
        { "article": { "id": 2, "title": "second" } },
        null
      ],
      "total": 2
    })
  );
}

#[test]
fn test_registered_through_builder_with_alternate_accessor() {
  let registry = MappingRegistry::builder()
    .register::<Article>("summary", "to_summary")
    .unwrap()
    .build();
  let converter = Converter::with_registry(registry);

  let converted = converter.convert_to_json(&Value::object(article(9, "ignored"))).unwrap();

  assert_eq!(converted, json!({ "summary": { "id": 9 } }));
}

#[test]
fn test_derived_lineage_and_accessors() {
  assert_eq!(FeaturedArticle::ancestry(), vec![Article::class()]);
  assert_eq!(FeaturedArticle::accessors(), vec!["to_array", "to_summary"]);
  assert!(Article::class().as_str().ends_with("::Article"));

  let featured = FeaturedArticle {
    article: article(3, "third"),
  };
  let object: &dyn Convertible = &featured;
  assert_eq!(object.lineage(), vec![FeaturedArticle::class(), Article::class()]);
  assert!(object.downcast_ref::<FeaturedArticle>().is_some());
  assert!(object.call_accessor("to_xml").is_none());
}

#[test]
fn test_featured_article_resolves_own_rule_when_registered() {
  let converter = Converter::new(&Config::from([
    ConfigOption::with_convertible::<Article>("article", "to_array"),
    ConfigOption::with_convertible::<FeaturedArticle>("featured", "to_summary"),
  ]))
  .unwrap();

  let converted = converter
    .convert_to_json(&Value::object(FeaturedArticle {
      article: article(4, "fourth"),
    }))
    .unwrap();

  assert_eq!(converted, json!({ "featured": { "id": 4 } }));
}
