use serde_json::{Map, Value};
use strum::Display;

use crate::utils::refs::ref_target;

pub(crate) const COMPOSITION_KEYWORDS: [&str; 3] = ["anyOf", "allOf", "oneOf"];

/// Runtime kind of a JSON value, as used to classify `enum` members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum JsonKind {
  Null,
  Boolean,
  Number,
  String,
  Array,
  Object,
}

impl JsonKind {
  pub(crate) fn of(value: &Value) -> Self {
    match value {
      Value::Null => Self::Null,
      Value::Bool(_) => Self::Boolean,
      Value::Number(_) => Self::Number,
      Value::String(_) => Self::String,
      Value::Array(_) => Self::Array,
      Value::Object(_) => Self::Object,
    }
  }
}

/// Keyword accessors over a raw JSON Schema / OpenAPI object.
///
/// Every accessor answers `None`/`false`/empty for boolean schemas and other non-object
/// values, so callers never need to check the shape first.
pub(crate) trait SchemaExt {
  fn keyword(&self, name: &str) -> Option<&Value>;

  fn title(&self) -> Option<&str> {
    self.keyword("title").and_then(Value::as_str)
  }

  /// Target of `$ref`, when the value is a reference object.
  fn schema_ref(&self) -> Option<&str>;

  fn declared_type(&self) -> Option<&Value> {
    self.keyword("type")
  }

  /// Entries of an object-valued keyword (`properties`, `patternProperties`, `content`…),
  /// in document order.
  fn entries(&self, name: &str) -> Option<&Map<String, Value>> {
    self.keyword(name).and_then(Value::as_object)
  }

  fn items_of(&self, name: &str) -> Option<&Vec<Value>> {
    self.keyword(name).and_then(Value::as_array)
  }

  /// Names listed in the `required` array of an object schema.
  fn required_names(&self) -> Vec<&str> {
    self
      .items_of("required")
      .map(|names| names.iter().filter_map(Value::as_str).collect())
      .unwrap_or_default()
  }

  /// `required: true` on a parameter, header or request body.
  fn is_required(&self) -> bool {
    self.keyword("required").and_then(Value::as_bool).unwrap_or(false)
  }

  fn is_read_only(&self) -> bool {
    self.keyword("readOnly").and_then(Value::as_bool).unwrap_or(false)
  }

  fn number_keyword(&self, name: &str) -> Option<f64> {
    self.keyword(name).and_then(Value::as_f64)
  }

  fn has_composition(&self) -> bool {
    COMPOSITION_KEYWORDS.iter().any(|name| self.keyword(name).is_some())
  }
}

impl SchemaExt for Value {
  fn keyword(&self, name: &str) -> Option<&Value> {
    self.as_object()?.get(name)
  }

  fn schema_ref(&self) -> Option<&str> {
    ref_target(self)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_accessors_on_object_schemas() {
    let schema = json!({
      "title": "Pet",
      "type": "object",
      "required": ["id", 3, "name"],
      "readOnly": true,
      "maxItems": 4,
      "properties": { "id": {}, "name": {} },
      "oneOf": []
    });

    assert_eq!(schema.title(), Some("Pet"));
    assert_eq!(schema.declared_type(), Some(&json!("object")));
    assert_eq!(schema.required_names(), vec!["id", "name"]);
    assert!(schema.is_read_only());
    assert_eq!(schema.number_keyword("maxItems"), Some(4.0));
    assert_eq!(schema.entries("properties").map(Map::len), Some(2));
    assert!(schema.has_composition());
    assert_eq!(schema.schema_ref(), None);
  }

  #[test]
  fn test_accessors_on_boolean_schemas() {
    let schema = json!(true);

    assert_eq!(schema.title(), None);
    assert!(schema.required_names().is_empty());
    assert!(!schema.is_required());
    assert!(!schema.has_composition());
  }

  #[test]
  fn test_reference_objects() {
    let reference = json!({ "$ref": "#/components/schemas/Pet" });
    assert_eq!(reference.schema_ref(), Some("#/components/schemas/Pet"));
  }

  #[test]
  fn test_json_kinds() {
    assert_eq!(JsonKind::of(&json!(null)), JsonKind::Null);
    assert_eq!(JsonKind::of(&json!(1.5)), JsonKind::Number);
    assert_eq!(JsonKind::of(&json!("a")), JsonKind::String);
    assert_eq!(JsonKind::of(&json!([1])).to_string(), "array");
  }
}
