use std::fmt::Debug;

use crate::{
  generator::error::TranslationResult,
  naming::identifiers::build_identifier,
  utils::refs::split_ref,
};

/// Maps a reference to the namespace path its declaration is emitted under.
pub(crate) trait NameResolver: Debug {
  fn resolve(&self, reference: &str) -> TranslationResult<Vec<String>>;
}

/// Identifier-maps every pointer segment; the document root maps to the base name.
#[derive(Debug, Clone)]
pub(crate) struct RefNameResolver {
  base_name: String,
}

impl RefNameResolver {
  pub(crate) fn new(base_name: impl Into<String>) -> Self {
    Self {
      base_name: base_name.into(),
    }
  }
}

impl NameResolver for RefNameResolver {
  fn resolve(&self, reference: &str) -> TranslationResult<Vec<String>> {
    let segments = split_ref(reference);
    if segments.is_empty() {
      return Ok(vec![build_identifier(&self.base_name)]);
    }
    Ok(segments.iter().map(|segment| build_identifier(segment)).collect())
  }
}
