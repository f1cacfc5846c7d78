use serde_json::Value;

use super::{DocumentWalker, Site};
use crate::{
  generator::{
    ast::TypeExpr,
    error::TranslationResult,
    fragments::{DeclarationPayload, Fragment, FragmentSet},
  },
  utils::{SchemaExt, refs::child_ref},
};

impl DocumentWalker<'_> {
  pub(super) fn visit_request_body(&self, site: &Site, body: &Value) -> TranslationResult<FragmentSet> {
    self.request_body_declaration(site, &site.reference, body)
  }

  /// The union of the body's media-type schemas.
  pub(super) fn request_body_declaration(&self, site: &Site, location: &str, body: &Value) -> TranslationResult<FragmentSet> {
    if let Some(reference) = body.schema_ref() {
      return self.redirect_declaration(site, reference);
    }

    let mut set = FragmentSet::default();
    let ty = match body.entries("content").filter(|content| !content.is_empty()) {
      Some(content) => self.content_type(&child_ref(location, "content"), site.name(), Some(content), &mut set)?,
      None => TypeExpr::Unknown,
    };

    set.push(Fragment::declaration(
      &site.reference,
      site.namespace.clone(),
      DeclarationPayload::Type(ty),
    ));
    Ok(set)
  }
}
