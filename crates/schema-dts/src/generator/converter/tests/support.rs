use serde_json::Value;

use crate::generator::{
  ast::TypeExpr,
  converter::{TranslationContext, schema_to_types},
  error::TranslationResult,
  fragments::Translation,
  names::RefNameResolver,
  options::GeneratorOptions,
};

/// Translates `schema` standalone, against an empty document.
pub(super) fn translate(schema: &Value) -> Translation {
  translate_with(schema, &GeneratorOptions::default(), &[]).expect("translation should succeed")
}

pub(super) fn translate_with(
  schema: &Value,
  options: &GeneratorOptions,
  schema_names: &[String],
) -> TranslationResult<Translation> {
  let root = Value::Null;
  let names = RefNameResolver::new("Main");
  let ctx = TranslationContext::new(&root, options, &names, schema_names);
  schema_to_types(&ctx, schema, None)
}

pub(super) fn single_type(schema: &Value) -> TypeExpr {
  translate(schema).union_type()
}

pub(super) fn reference(path: &[&str]) -> TypeExpr {
  TypeExpr::Reference(path.iter().map(ToString::to_string).collect())
}
