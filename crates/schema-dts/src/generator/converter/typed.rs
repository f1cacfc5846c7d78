use itertools::Itertools;
use serde_json::Value;

use super::{NULL_TYPE, OBJECT_TYPE, TranslationContext, arrays, composed, objects};
use crate::{
  generator::{
    ast::{ObjectType, PropertySignature, TypeExpr},
    error::{TranslationError, TranslationResult},
    fragments::Translation,
  },
  naming::identifiers::build_identifier,
  utils::SchemaExt,
};

const BRAND_PROPERTY: &str = "_type";

/// Translates a schema carrying `type` (or an inherited or implied one).
///
/// `null` only toggles nullability: non-null alternatives are combined first, then
/// intersected with any composition and brand, and `null` is appended last so it
/// never ends up inside an intersection.
pub(super) fn typed_schema_to_types(
  ctx: &TranslationContext<'_>,
  schema: &Value,
  type_names: &[&str],
) -> TranslationResult<Translation> {
  let nullable = type_names.contains(&NULL_TYPE) || schema.keyword("nullable").and_then(Value::as_bool) == Some(true);
  let wrap = |ty: TypeExpr| if nullable { ty } else { TypeExpr::non_nullable(ty) };

  let mut translation = Translation::default();
  let mut alternatives = Vec::new();

  for type_name in type_names.iter().copied().filter(|name| *name != NULL_TYPE).unique() {
    let ty = match type_name {
      "boolean" => wrap(TypeExpr::Boolean),
      "integer" | "number" => wrap(TypeExpr::Number),
      "string" => wrap(TypeExpr::String),
      "object" => {
        let object = objects::object_to_type(ctx, schema)?;
        TypeExpr::union_of(translation.absorb(object))
      }
      "array" => {
        let array = arrays::array_to_type(ctx, schema)?;
        TypeExpr::union_of(translation.absorb(array))
      }
      other => {
        return Err(TranslationError::BadType {
          type_name: other.to_string(),
          reference: ctx.location.clone(),
        });
      }
    };
    alternatives.push(ty);
  }

  if !alternatives.is_empty() {
    let mut parts = vec![TypeExpr::union_of(alternatives)];

    if schema.has_composition() {
      let implied = Value::from(OBJECT_TYPE);
      let parent_type = schema.declared_type().unwrap_or(&implied);
      let composed = composed::composed_schema_to_type(ctx, schema, Some(parent_type))?;
      parts.extend(translation.absorb(composed));
    }

    if let Some(brand) = brand_of(ctx, schema) {
      parts.push(brand);
    }

    translation.types.push(TypeExpr::intersection_of(parts));
  }

  if nullable {
    translation.types.push(TypeExpr::Null);
  }

  Ok(translation)
}

/// The `{ _type?: "Name" }` marker, when the brand policy covers this schema's name.
fn brand_of(ctx: &TranslationContext<'_>, schema: &Value) -> Option<TypeExpr> {
  let candidate = ctx.brand.as_deref().or_else(|| schema.title())?;
  let name = build_identifier(candidate);

  ctx.options.is_branded(&name, ctx.schema_names).then(|| {
    TypeExpr::Object(
      ObjectType::empty().with_property(PropertySignature::optional(BRAND_PROPERTY, TypeExpr::string_literal(name))),
    )
  })
}
