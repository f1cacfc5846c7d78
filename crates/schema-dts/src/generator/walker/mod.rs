//! API-document traversal and the fixed-point expansion of assumed references.
//!
//! Visitors never follow a `$ref`: they emit an assumed fragment plus a redirect, and
//! [`DocumentWalker::expand_fixed_point`] later resolves each assumed reference once,
//! translating it with the visitor matching its component bucket.

mod headers;
mod operations;
mod parameters;
mod request_bodies;
mod responses;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use serde_json::{Map, Value};

pub(crate) use self::operations::{OperationEntry, list_operations};
use crate::{
  generator::{
    ast::TypeExpr,
    converter::{TranslationContext, referenced_schema_to_fragments, schema_to_type},
    error::TranslationResult,
    fragments::{DeclarationPayload, Fragment, FragmentSet, Redirect},
    metrics::GenerationStats,
    options::DocumentKind,
  },
  naming::identifiers::build_identifier,
  utils::{
    SchemaExt,
    refs::{child_ref, join_ref, resolve, split_ref},
  },
};

const COMPONENTS: &str = "components";
pub(crate) const COMPONENT_BUCKETS: [&str; 7] = [
  "schemas",
  "requestBodies",
  "parameters",
  "responses",
  "headers",
  "callbacks",
  "pathItems",
];
/// Keywords holding named schemas in bare schema documents.
const DEFINITION_KEYWORDS: [&str; 2] = ["$defs", "definitions"];

/// Where a visitor emits: the fragment reference and the namespace path of the
/// declaration it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Site {
  pub reference: String,
  pub namespace: Vec<String>,
}

impl Site {
  pub(crate) fn new(reference: impl Into<String>, namespace: Vec<String>) -> Self {
    Self {
      reference: reference.into(),
      namespace,
    }
  }

  /// A nested site: `segment` extends the reference, `name` the namespace.
  pub(crate) fn child(&self, segment: &str, name: impl Into<String>) -> Self {
    let mut namespace = self.namespace.clone();
    namespace.push(name.into());
    Self {
      reference: child_ref(&self.reference, segment),
      namespace,
    }
  }

  pub(crate) fn name(&self) -> &str {
    self.namespace.last().map_or("", String::as_str)
  }
}

/// Ensures every component bucket exists so later lookups never miss on a bucket.
pub(crate) fn normalize_document(mut document: Value) -> Value {
  let Some(root) = document.as_object_mut() else {
    return document;
  };

  let components = root
    .entry(COMPONENTS)
    .or_insert_with(|| Value::Object(Map::new()));
  if !components.is_object() {
    *components = Value::Object(Map::new());
  }

  if let Some(components) = components.as_object_mut() {
    for bucket in COMPONENT_BUCKETS {
      let entry = components
        .entry(bucket)
        .or_insert_with(|| Value::Object(Map::new()));
      if !entry.is_object() {
        *entry = Value::Object(Map::new());
      }
    }
  }

  document
}

/// Pointers to every named schema the document declares, in document order.
pub(crate) fn declared_schema_refs(document: &Value, kind: DocumentKind) -> Vec<String> {
  let buckets: Vec<Vec<&str>> = match kind {
    DocumentKind::Api => vec![vec![COMPONENTS, "schemas"]],
    DocumentKind::Schema => DEFINITION_KEYWORDS.iter().map(|keyword| vec![*keyword]).collect(),
  };

  buckets
    .into_iter()
    .filter_map(|path| {
      let entries = resolve(document, &path).ok()?.as_object()?;
      Some(entries.keys().map(move |name| {
        let mut segments = path.clone();
        segments.push(name.as_str());
        join_ref(&segments)
      }))
    })
    .flatten()
    .collect()
}

/// Identifier names of the declared schemas, as the `Schemas` brand policy sees them.
pub(crate) fn declared_schema_names(document: &Value, kind: DocumentKind) -> Vec<String> {
  declared_schema_refs(document, kind)
    .iter()
    .filter_map(|reference| split_ref(reference).last().map(|name| build_identifier(name)))
    .collect()
}

#[derive(Debug)]
pub(crate) struct DocumentWalker<'a> {
  ctx: TranslationContext<'a>,
  /// Identifier of the root namespace that operations are grouped under.
  base_name: String,
}

impl<'a> DocumentWalker<'a> {
  pub(crate) fn new(ctx: TranslationContext<'a>, base_name: &str) -> Self {
    Self {
      ctx,
      base_name: build_identifier(base_name),
    }
  }

  /// Visits every path item under `paths` and `webhooks` and, when enabled, seeds an
  /// assumed fragment per declared schema.
  pub(crate) fn document_to_fragments(&self) -> TranslationResult<FragmentSet> {
    let mut set = FragmentSet::default();

    for collection in ["paths", "webhooks"] {
      let Some(items) = self.ctx.root.entries(collection) else {
        continue;
      };
      for (path, item) in items {
        let location = join_ref(&[collection, path.as_str()]);
        set.extend(self.visit_path_item(&location, path, item)?);
      }
    }

    if self.ctx.options.generate_unused_schemas {
      set.extend(seed_declared_schemas(self.ctx.root, DocumentKind::Api));
    }

    Ok(set)
  }

  /// Expands assumed references until a pass finds nothing left to expand.
  ///
  /// Each reference is expanded at most once; references that produce no concrete
  /// fragment of their own (path items, callbacks) stay assumed without being retried.
  pub(crate) fn expand_fixed_point(
    &self,
    mut set: FragmentSet,
    stats: &mut GenerationStats,
  ) -> TranslationResult<FragmentSet> {
    let mut expanded = BTreeSet::new();

    loop {
      let pending = set
        .assumed_refs()
        .filter(|reference| !expanded.contains(*reference))
        .map(ToString::to_string)
        .collect::<Vec<_>>();
      if pending.is_empty() {
        return Ok(set);
      }

      for reference in &pending {
        set.extend(self.expand_reference(reference)?);
        expanded.insert(reference.clone());
      }
      stats.record_pass(pending.len());
    }
  }

  fn expand_reference(&self, reference: &str) -> TranslationResult<FragmentSet> {
    let path = split_ref(reference);
    let value = resolve(self.ctx.root, &path)?;
    let site = Site::new(reference, self.ctx.names.resolve(reference)?);

    let bucket = match path.as_slice() {
      [components, bucket, _] if components == COMPONENTS => bucket.as_str(),
      _ => "schemas",
    };

    match bucket {
      "requestBodies" => self.visit_request_body(&site, value),
      "parameters" => self.visit_parameter(&site, value),
      "responses" => self.visit_response(&site, value),
      "headers" => self.visit_header(&site, value),
      "callbacks" => self.visit_callback(reference, value),
      "pathItems" => {
        let name = path.last().map_or("", String::as_str);
        self.visit_path_item(reference, name, value)
      }
      _ => referenced_schema_to_fragments(&self.ctx, reference, site.namespace, value),
    }
  }

  /// A declaration at `site` aliasing whatever `reference` resolves to.
  fn redirect_declaration(&self, site: &Site, reference: &str) -> TranslationResult<FragmentSet> {
    let mut set = FragmentSet::default();
    set.push(Fragment::assumed(reference));
    set.push(Fragment::declaration(
      &site.reference,
      site.namespace.clone(),
      DeclarationPayload::Redirect(Redirect::new(reference, self.ctx.names.resolve(reference)?)),
    ));
    Ok(set)
  }

  /// Translates a schema found at `location`, suggesting `hint` as its name.
  fn schema_type(
    &self,
    location: &str,
    hint: &str,
    schema: &Value,
    set: &mut FragmentSet,
  ) -> TranslationResult<TypeExpr> {
    let ctx = self.ctx.at(location).named(hint);
    let translation = schema_to_type(&ctx, schema, None)?;
    Ok(TypeExpr::union_of(set.absorb(translation)))
  }

  /// Union of the schemas of every media type in a `content` map.
  fn content_type(
    &self,
    location: &str,
    hint: &str,
    content: Option<&Map<String, Value>>,
    set: &mut FragmentSet,
  ) -> TranslationResult<TypeExpr> {
    let mut alternatives = Vec::new();
    for (media_type, media) in content.into_iter().flatten() {
      let schema_location = child_ref(&child_ref(location, media_type), "schema");
      let ty = match media.keyword("schema") {
        Some(schema) => self.schema_type(&schema_location, hint, schema, set)?,
        None => TypeExpr::Unknown,
      };
      alternatives.push(ty);
    }
    Ok(TypeExpr::union_of(alternatives))
  }
}

/// One assumed fragment per declared schema, so unreferenced schemas are emitted too.
pub(crate) fn seed_declared_schemas(document: &Value, kind: DocumentKind) -> FragmentSet {
  let mut set = FragmentSet::default();
  for reference in declared_schema_refs(document, kind) {
    set.push(Fragment::assumed(reference));
  }
  set
}
