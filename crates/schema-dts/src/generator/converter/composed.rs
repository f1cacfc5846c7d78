use serde_json::Value;

use super::{TranslationContext, schema_to_types};
use crate::{
  generator::{
    ast::TypeExpr,
    error::{TranslationError, TranslationResult},
    fragments::Translation,
  },
  utils::{SchemaExt, schema_ext::COMPOSITION_KEYWORDS},
};

/// Combines the branches of `anyOf`/`oneOf` into a union and `allOf` into an
/// intersection. When several of the keywords are present, their results are
/// intersected. `oneOf` exclusivity is not expressed.
pub(super) fn composed_schema_to_type(
  ctx: &TranslationContext<'_>,
  schema: &Value,
  parent_type: Option<&Value>,
) -> TranslationResult<Translation> {
  let mut translation = Translation::default();
  let mut combined = Vec::new();

  for keyword in COMPOSITION_KEYWORDS {
    let Some(branches) = schema.items_of(keyword) else {
      continue;
    };

    let keyword_ctx = ctx.descend(keyword);
    let mut branch_types = Vec::with_capacity(branches.len());
    for (index, branch) in branches.iter().enumerate() {
      let branch_translation = schema_to_types(&keyword_ctx.descend(&index.to_string()), branch, parent_type)?;
      branch_types.push(TypeExpr::union_of(translation.absorb(branch_translation)));
    }

    combined.push(if keyword == "allOf" {
      TypeExpr::intersection_of(branch_types)
    } else {
      TypeExpr::union_of(branch_types)
    });
  }

  if combined.is_empty() {
    return Err(TranslationError::ComposedSchemaUnsupported {
      reference: ctx.location.clone(),
    });
  }

  translation.types.push(TypeExpr::intersection_of(combined));
  Ok(translation)
}
