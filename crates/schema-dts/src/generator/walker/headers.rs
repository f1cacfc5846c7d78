use serde_json::Value;

use super::{DocumentWalker, Site};
use crate::{
  generator::{
    ast::TypeExpr,
    error::{TranslationError, TranslationResult},
    fragments::{DeclarationPayload, Fragment, FragmentSet},
  },
  utils::{SchemaExt, refs::child_ref},
};

impl DocumentWalker<'_> {
  pub(super) fn visit_header(&self, site: &Site, header: &Value) -> TranslationResult<FragmentSet> {
    if let Some(reference) = header.schema_ref() {
      return self.redirect_declaration(site, reference);
    }

    let mut set = FragmentSet::default();
    let ty = self.header_type(&site.reference, site.name(), header, &mut set)?;
    set.push(Fragment::declaration(
      &site.reference,
      site.namespace.clone(),
      DeclarationPayload::Type(ty),
    ));
    Ok(set)
  }

  /// Only the `schema` form is supported; `content`-described headers are rejected.
  pub(super) fn header_type(
    &self,
    location: &str,
    hint: &str,
    header: &Value,
    set: &mut FragmentSet,
  ) -> TranslationResult<TypeExpr> {
    if header.keyword("content").is_some() {
      return Err(TranslationError::UnsupportedHeader {
        reference: location.to_string(),
      });
    }

    match header.keyword("schema") {
      Some(schema) => self.schema_type(&child_ref(location, "schema"), hint, schema, set),
      None => Ok(TypeExpr::Unknown),
    }
  }
}
