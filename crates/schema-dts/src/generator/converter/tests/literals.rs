use serde_json::json;

use super::support::{reference, single_type, translate, translate_with};
use crate::generator::{
  ast::{EnumDecl, EnumMember, Literal, ObjectType, PropertySignature, TupleType, TypeExpr},
  fragments::{DeclarationPayload, Fragment},
  metrics::GenerationWarning,
  options::GeneratorOptions,
};

#[test]
fn test_const_literals() {
  assert_eq!(single_type(&json!({ "const": "on" })), TypeExpr::string_literal("on"));
  assert_eq!(single_type(&json!({ "const": 42 })), TypeExpr::number_literal(42));
  assert_eq!(
    single_type(&json!({ "const": false })),
    TypeExpr::Literal(Literal::Boolean(false))
  );
  assert_eq!(single_type(&json!({ "const": null })), TypeExpr::Null);
}

#[test]
fn test_nested_const_literals() {
  assert_eq!(
    single_type(&json!({ "const": { "kind": "point", "at": [1, 2] } })),
    TypeExpr::Object(
      ObjectType::empty()
        .with_property(PropertySignature::required("kind", TypeExpr::string_literal("point")))
        .with_property(PropertySignature::required(
          "at",
          TypeExpr::Tuple(TupleType {
            elements: vec![TypeExpr::number_literal(1), TypeExpr::number_literal(2)],
            rest: None,
          })
        ))
    )
  );
}

#[test]
fn test_mixed_enum_collapses_to_literals() {
  let translation = translate(&json!({
    "type": ["number", "string", "null"],
    "enum": [1, 2, "hop", "lol", null]
  }));

  assert_eq!(
    translation.union_type(),
    TypeExpr::Union(vec![
      TypeExpr::number_literal(1),
      TypeExpr::number_literal(2),
      TypeExpr::string_literal("hop"),
      TypeExpr::string_literal("lol"),
      TypeExpr::Null,
    ])
  );
}

#[test]
fn test_enum_duplicates_dropped_by_value() {
  let translation = translate(&json!({ "enum": ["a", 1, "a", "1", 1] }));

  assert_eq!(
    translation.types,
    vec![
      TypeExpr::string_literal("a"),
      TypeExpr::number_literal(1),
      TypeExpr::string_literal("1"),
    ]
  );
}

#[test]
fn test_empty_enum_is_never() {
  assert_eq!(single_type(&json!({ "enum": [] })), TypeExpr::Never);
}

#[test]
fn test_real_enum_declaration() {
  let options = GeneratorOptions::builder().generate_real_enums(true).build();
  let translation = translate_with(&json!({ "enum": ["in-stock", "sold_out", "in-stock"] }), &options, &[]).unwrap();

  assert_eq!(translation.types, vec![reference(&["Enums", "Unknown"])]);
  assert_eq!(
    translation.emitted.fragments,
    vec![Fragment::declaration(
      "#/enums/Unknown",
      vec!["Enums".to_string(), "Unknown".to_string()],
      DeclarationPayload::Enum(EnumDecl {
        name: "Unknown".to_string(),
        members: vec![
          EnumMember {
            name: "InStock".to_string(),
            value: "in-stock".to_string(),
          },
          EnumMember {
            name: "SoldOut".to_string(),
            value: "sold_out".to_string(),
          },
        ],
      })
    )]
  );
}

#[test]
fn test_real_enum_named_after_property() {
  let options = GeneratorOptions::builder().generate_real_enums(true).build();
  let schema = json!({
    "type": "object",
    "properties": { "status": { "type": "string", "enum": ["active", "banned"] } }
  });
  let translation = translate_with(&schema, &options, &[]).unwrap();

  assert_eq!(
    translation.union_type(),
    TypeExpr::Object(ObjectType::empty().with_property(PropertySignature::optional(
      "status",
      reference(&["Enums", "Status"])
    )))
  );
  assert_eq!(translation.emitted.fragments.len(), 1);
}

#[test]
fn test_real_enums_sharing_a_name_stay_distinct() {
  let options = GeneratorOptions::builder().generate_real_enums(true).build();
  let status = |values: serde_json::Value| {
    json!({ "type": "object", "properties": { "status": { "type": "string", "enum": values } } })
  };
  let schema = json!({
    "type": "object",
    "properties": {
      "a": status(json!(["on", "off"])),
      "b": status(json!(["open", "closed"])),
      "c": status(json!(["on", "off"]))
    }
  });
  let translation = translate_with(&schema, &options, &[]).unwrap();

  let TypeExpr::Object(object) = translation.union_type() else {
    panic!("expected object type");
  };
  let status_types = object
    .properties
    .iter()
    .map(|property| match &property.ty {
      TypeExpr::Object(inner) => inner.properties[0].ty.clone(),
      other => panic!("expected nested object, got {other:?}"),
    })
    .collect::<Vec<_>>();
  assert_eq!(
    status_types,
    vec![
      reference(&["Enums", "Status"]),
      reference(&["Enums", "Status2"]),
      reference(&["Enums", "Status"]),
    ]
  );

  let mut declared = translation
    .emitted
    .fragments
    .iter()
    .map(|fragment| match fragment {
      Fragment::DeclarationMember(member) => match &member.payload {
        DeclarationPayload::Enum(decl) => (
          fragment.reference().to_string(),
          decl.members.iter().map(|member| member.value.clone()).collect::<Vec<_>>(),
        ),
        other => panic!("expected enum payload, got {other:?}"),
      },
      other => panic!("expected declaration, got {other:?}"),
    })
    .collect::<Vec<_>>();
  declared.sort();
  assert_eq!(
    declared,
    vec![
      ("#/enums/Status".to_string(), vec!["on".to_string(), "off".to_string()]),
      ("#/enums/Status2".to_string(), vec!["open".to_string(), "closed".to_string()]),
    ]
  );
}

#[test]
fn test_real_enum_keeps_values_with_colliding_member_names() {
  let options = GeneratorOptions::builder().generate_real_enums(true).build();
  let schema = json!({ "title": "Mode", "type": "string", "enum": ["a-b", "aB", "c"] });
  let translation = translate_with(&schema, &options, &[]).unwrap();

  let [Fragment::DeclarationMember(member)] = translation.emitted.fragments.as_slice() else {
    panic!("expected one enum declaration");
  };
  let DeclarationPayload::Enum(decl) = &member.payload else {
    panic!("expected enum payload");
  };
  assert_eq!(
    decl.members,
    vec![
      EnumMember {
        name: "AB".to_string(),
        value: "a-b".to_string(),
      },
      EnumMember {
        name: "AB2".to_string(),
        value: "aB".to_string(),
      },
      EnumMember {
        name: "C".to_string(),
        value: "c".to_string(),
      },
    ]
  );
}

#[test]
fn test_real_enum_skipped_for_single_or_mixed_values() {
  let options = GeneratorOptions::builder().generate_real_enums(true).build();

  let single = translate_with(&json!({ "enum": ["only"] }), &options, &[]).unwrap();
  assert_eq!(single.types, vec![TypeExpr::string_literal("only")]);
  assert!(single.emitted.fragments.is_empty());

  let mixed = translate_with(&json!({ "enum": ["a", 2] }), &options, &[]).unwrap();
  assert_eq!(mixed.types.len(), 2);
  assert!(mixed.emitted.fragments.is_empty());
}

#[test]
fn test_malformed_enum() {
  let translation = translate(&json!({ "enum": "red" }));
  assert_eq!(translation.types, vec![TypeExpr::Unknown]);
  assert_eq!(
    translation.emitted.warnings,
    vec![GenerationWarning::EnumDegraded {
      reference: "#".to_string()
    }]
  );

  let options = GeneratorOptions::builder().strict(true).build();
  let error = translate_with(&json!({ "enum": "red" }), &options, &[]).unwrap_err();
  assert_eq!(error.code(), "E_UNSUPPORTED_ENUM");
}
