use std::iter;

use serde_json::Value;

use super::{TranslationContext, schema_to_type};
use crate::{
  generator::{
    ast::{TupleType, TypeExpr},
    error::TranslationResult,
    fragments::Translation,
  },
  utils::SchemaExt,
};

pub(super) fn array_to_type(ctx: &TranslationContext<'_>, schema: &Value) -> TranslationResult<Translation> {
  if schema.number_keyword("maxItems").is_some_and(|max| max <= 0.0) {
    return Ok(Translation::of(TypeExpr::array_of(TypeExpr::Never)));
  }

  let positional = schema
    .items_of("prefixItems")
    .map(|items| ("prefixItems", items))
    .or_else(|| schema.items_of("items").map(|items| ("items", items)));

  match positional {
    Some((keyword, items)) => tuple_to_type(ctx, schema, keyword, items),
    None => uniform_array_to_type(ctx, schema),
  }
}

/// `prefixItems` or array-valued `items`, with `items`/`additionalItems` as rest element.
fn tuple_to_type(
  ctx: &TranslationContext<'_>,
  schema: &Value,
  keyword: &str,
  items: &[Value],
) -> TranslationResult<Translation> {
  let mut translation = Translation::default();
  let items_ctx = ctx.descend(keyword);

  let mut elements = Vec::with_capacity(items.len());
  for (index, item) in items.iter().enumerate() {
    let element = schema_to_type(&items_ctx.descend(&index.to_string()), item, None)?;
    elements.extend(translation.absorb(element));
  }

  let rest_keyword = ["items", "additionalItems"]
    .into_iter()
    .filter(|rest| *rest != keyword)
    .find(|rest| schema.keyword(rest).is_some_and(|rest_schema| !rest_schema.is_array()));

  let mut rest = None;
  if let Some(rest_keyword) = rest_keyword
    && let Some(rest_schema) = schema.keyword(rest_keyword)
    && rest_schema != &Value::Bool(false)
  {
    let translated = schema_to_type(&ctx.descend(rest_keyword), rest_schema, None)?;
    rest = Some(Box::new(TypeExpr::union_of(translation.absorb(translated))));
  }

  translation.types.push(TypeExpr::Tuple(TupleType { elements, rest }));
  Ok(translation)
}

/// A single item schema, refined into a tuple for short fixed or minimum lengths.
fn uniform_array_to_type(ctx: &TranslationContext<'_>, schema: &Value) -> TranslationResult<Translation> {
  let mut translation = Translation::default();

  let element = match schema.keyword("items") {
    Some(items) => TypeExpr::union_of(translation.absorb(schema_to_type(&ctx.descend("items"), items, None)?)),
    None => TypeExpr::Unknown,
  };

  let limit = ctx.options.tuple_from_fixed_array_length as f64;
  let min_items = schema.number_keyword("minItems");
  let max_items = schema.number_keyword("maxItems");
  let repeated = |count: f64| iter::repeat_n(element.clone(), count as usize).collect::<Vec<_>>();

  let ty = match (min_items, max_items) {
    (Some(min), Some(max)) if min == max && min < limit => TypeExpr::Tuple(TupleType {
      elements: repeated(min),
      rest: None,
    }),
    (Some(min), _) if min > 0.0 && min < limit => TypeExpr::Tuple(TupleType {
      elements: repeated(min),
      rest: Some(Box::new(element.clone())),
    }),
    _ => TypeExpr::array_of(element.clone()),
  };

  translation.types.push(ty);
  Ok(translation)
}
