use serde_json::json;

use super::support::{reference, single_type, translate, translate_with};
use crate::generator::{
  ast::{ObjectType, PropertySignature, TypeExpr},
  error::TranslationError,
  fragments::Fragment,
  metrics::GenerationWarning,
  options::{BrandPolicy, GeneratorOptions},
};

#[test]
fn test_boolean_schemas() {
  assert_eq!(single_type(&json!(true)), TypeExpr::Unknown);
  assert_eq!(single_type(&json!(false)), TypeExpr::Never);
}

#[test]
fn test_null_type() {
  assert_eq!(single_type(&json!({ "type": "null" })), TypeExpr::Null);
}

#[test]
fn test_primitives_are_non_nullable() {
  assert_eq!(
    single_type(&json!({ "type": "number" })),
    TypeExpr::non_nullable(TypeExpr::Number)
  );
  assert_eq!(
    single_type(&json!({ "type": "integer" })),
    TypeExpr::non_nullable(TypeExpr::Number)
  );
  assert_eq!(
    single_type(&json!({ "type": "string" })),
    TypeExpr::non_nullable(TypeExpr::String)
  );
  assert_eq!(
    single_type(&json!({ "type": "boolean" })),
    TypeExpr::non_nullable(TypeExpr::Boolean)
  );
}

#[test]
fn test_nullable_number() {
  let translation = translate(&json!({ "type": ["number", "null"] }));
  assert_eq!(translation.types, vec![TypeExpr::Number, TypeExpr::Null]);
}

#[test]
fn test_openapi_nullable_keyword() {
  let translation = translate(&json!({ "type": "string", "nullable": true }));
  assert_eq!(translation.types, vec![TypeExpr::String, TypeExpr::Null]);
}

#[test]
fn test_type_array_unions_primitives() {
  assert_eq!(
    single_type(&json!({ "type": ["string", "boolean"] })),
    TypeExpr::Union(vec![
      TypeExpr::non_nullable(TypeExpr::String),
      TypeExpr::non_nullable(TypeExpr::Boolean),
    ])
  );
}

#[test]
fn test_reference_emits_assumed_fragment() {
  let translation = translate(&json!({ "$ref": "#/definitions/Pet", "type": "string" }));

  assert_eq!(translation.types, vec![reference(&["Definitions", "Pet"])]);
  assert_eq!(translation.emitted.fragments, vec![Fragment::assumed("#/definitions/Pet")]);
}

#[test]
fn test_reference_preempts_const_and_enum() {
  let translation = translate(&json!({ "$ref": "#/$defs/Color", "const": 1, "enum": [1, 2] }));
  assert_eq!(translation.types, vec![reference(&["Defs", "Color"])]);
}

#[test]
fn test_implicit_object() {
  assert_eq!(
    single_type(&json!({ "properties": { "id": { "type": "string" } }, "required": ["id"] })),
    TypeExpr::Object(
      ObjectType::empty().with_property(PropertySignature::required("id", TypeExpr::non_nullable(TypeExpr::String)))
    )
  );
}

#[test]
fn test_unknown_primitive_fails() {
  let error = translate_with(&json!({ "type": "file" }), &GeneratorOptions::default(), &[]).unwrap_err();

  assert_eq!(error.code(), "E_BAD_TYPE");
  assert_eq!(
    error,
    TranslationError::BadType {
      type_name: "file".to_string(),
      reference: "#".to_string(),
    }
  );
}

#[test]
fn test_unsupported_schema_degrades() {
  let translation = translate(&json!({ "description": "anything goes" }));

  assert_eq!(translation.types, vec![TypeExpr::Unknown]);
  assert_eq!(
    translation.emitted.warnings,
    vec![GenerationWarning::SchemaDegraded {
      reference: "#".to_string()
    }]
  );
}

#[test]
fn test_unsupported_schema_fails_in_strict_mode() {
  let options = GeneratorOptions::builder().strict(true).build();
  let error = translate_with(&json!({ "not": { "type": "string" } }), &options, &[]).unwrap_err();

  assert_eq!(error.code(), "E_UNSUPPORTED_SCHEMA");
}

#[test]
fn test_branding_by_title() {
  let options = GeneratorOptions::builder()
    .brands(BrandPolicy::Names(vec!["UserId".to_string()]))
    .build();
  let translation = translate_with(&json!({ "title": "user id", "type": "string" }), &options, &[]).unwrap();

  assert_eq!(
    translation.union_type(),
    TypeExpr::Intersection(vec![
      TypeExpr::non_nullable(TypeExpr::String),
      TypeExpr::Object(
        ObjectType::empty().with_property(PropertySignature::optional("_type", TypeExpr::string_literal("UserId")))
      ),
    ])
  );
}

#[test]
fn test_branding_keeps_null_outside_intersection() {
  let options = GeneratorOptions::builder().brands(BrandPolicy::All).build();
  let translation = translate_with(&json!({ "title": "Code", "type": ["string", "null"] }), &options, &[]).unwrap();

  assert_eq!(translation.types.len(), 2);
  assert!(matches!(translation.types[0], TypeExpr::Intersection(_)));
  assert_eq!(translation.types[1], TypeExpr::Null);
}

#[test]
fn test_schemas_brand_policy_uses_schema_names() {
  let options = GeneratorOptions::builder().brands(BrandPolicy::Schemas).build();
  let schema = json!({ "title": "Pet", "type": "string" });

  let unbranded = translate_with(&schema, &options, &[]).unwrap();
  assert_eq!(unbranded.union_type(), TypeExpr::non_nullable(TypeExpr::String));

  let branded = translate_with(&schema, &options, &["Pet".to_string()]).unwrap();
  assert!(matches!(branded.union_type(), TypeExpr::Intersection(_)));
}
