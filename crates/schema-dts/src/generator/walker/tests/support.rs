use serde_json::Value;

use crate::generator::{
  converter::TranslationContext,
  error::TranslationResult,
  fragments::{Fragment, FragmentSet},
  metrics::GenerationStats,
  names::RefNameResolver,
  options::GeneratorOptions,
  walker::{DocumentWalker, normalize_document},
};

pub(super) fn walk(document: Value) -> (FragmentSet, GenerationStats) {
  walk_with(document, &GeneratorOptions::default()).expect("walk should succeed")
}

pub(super) fn walk_with(document: Value, options: &GeneratorOptions) -> TranslationResult<(FragmentSet, GenerationStats)> {
  let document = normalize_document(document);
  let names = RefNameResolver::new("API");
  let ctx = TranslationContext::new(&document, options, &names, &[]);
  let walker = DocumentWalker::new(ctx, "API");

  let mut stats = GenerationStats::default();
  let set = walker.document_to_fragments()?;
  let set = walker.expand_fixed_point(set, &mut stats)?;
  Ok((set, stats))
}

pub(super) fn find<'a>(set: &'a FragmentSet, reference: &str) -> &'a Fragment {
  set
    .fragments
    .iter()
    .find(|fragment| fragment.reference() == reference)
    .unwrap_or_else(|| panic!("no fragment for {reference}"))
}

pub(super) fn path(segments: &[&str]) -> Vec<String> {
  segments.iter().map(ToString::to_string).collect()
}
