use serde_json::Value;

use super::{TranslationContext, schema_to_types};
use crate::{
  generator::{
    ast::{IndexSignature, ObjectType, PropertySignature, TypeExpr},
    error::TranslationResult,
    fragments::Translation,
  },
  utils::SchemaExt,
};

/// One contributor to the object's single string index signature.
struct IndexSource {
  ty: TypeExpr,
  readonly: bool,
  optional: bool,
}

pub(super) fn object_to_type(ctx: &TranslationContext<'_>, schema: &Value) -> TranslationResult<Translation> {
  let mut translation = Translation::default();
  let required = schema.required_names();
  let mut object = ObjectType::empty();

  if let Some(properties) = schema.entries("properties") {
    let properties_ctx = ctx.descend("properties");
    for (name, property) in properties {
      let property_ctx = properties_ctx.descend(name).named(name.as_str());
      let types = translation.absorb(schema_to_types(&property_ctx, property, None)?);
      object.properties.push(PropertySignature {
        name: name.clone(),
        ty: TypeExpr::union_of(types),
        optional: !required.contains(&name.as_str()),
        readonly: property.is_read_only(),
      });
    }
  }

  // Required pattern keys only tighten the index signature below.
  let patterns = schema.entries("patternProperties");
  for name in required.iter().copied() {
    let declared = object.properties.iter().any(|property| property.name == name);
    let pattern = patterns.is_some_and(|patterns| patterns.contains_key(name));
    if !declared && !pattern {
      object.properties.push(PropertySignature::required(name, TypeExpr::Unknown));
    }
  }

  let mut sources = Vec::new();

  if let Some(patterns) = patterns {
    let patterns_ctx = ctx.descend("patternProperties");
    for (pattern, property) in patterns {
      let types = translation.absorb(schema_to_types(&patterns_ctx.descend(pattern), property, None)?);
      sources.push(IndexSource {
        ty: TypeExpr::union_of(types),
        readonly: property.is_read_only(),
        optional: !required.contains(&pattern.as_str()),
      });
    }
  }

  // Any schema other than `false` admits extra members; their type stays `unknown` so
  // declared properties always fit the index signature.
  if let Some(additional) = schema.keyword("additionalProperties")
    && additional != &Value::Bool(false)
  {
    sources.push(IndexSource {
      ty: TypeExpr::Unknown,
      readonly: additional.is_read_only(),
      optional: true,
    });
  }

  if !sources.is_empty() {
    object.index = Some(Box::new(IndexSignature {
      readonly: sources.iter().all(|source| source.readonly),
      optional: sources.iter().all(|source| source.optional),
      ty: TypeExpr::union_of(sources.into_iter().map(|source| source.ty)),
    }));
  }

  translation.types.push(TypeExpr::Object(object));
  Ok(translation)
}
