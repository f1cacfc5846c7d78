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
  pub(super) fn visit_parameter(&self, site: &Site, parameter: &Value) -> TranslationResult<FragmentSet> {
    self.parameter_declaration(site, &site.reference, parameter)
  }

  /// The parameter's value type: its `schema`, else the schema of its first media type.
  pub(super) fn parameter_declaration(
    &self,
    site: &Site,
    location: &str,
    parameter: &Value,
  ) -> TranslationResult<FragmentSet> {
    if let Some(reference) = parameter.schema_ref() {
      return self.redirect_declaration(site, reference);
    }

    let mut set = FragmentSet::default();
    let media_schema = parameter
      .entries("content")
      .and_then(|content| content.iter().next())
      .and_then(|(media_type, media)| media.keyword("schema").map(|schema| (media_type, schema)));

    let ty = if let Some(schema) = parameter.keyword("schema") {
      self.schema_type(&child_ref(location, "schema"), site.name(), schema, &mut set)?
    } else if let Some((media_type, schema)) = media_schema {
      let schema_location = child_ref(&child_ref(&child_ref(location, "content"), media_type), "schema");
      self.schema_type(&schema_location, site.name(), schema, &mut set)?
    } else {
      TypeExpr::Unknown
    };

    set.push(Fragment::declaration(
      &site.reference,
      site.namespace.clone(),
      DeclarationPayload::Type(ty),
    ));
    Ok(set)
  }
}
