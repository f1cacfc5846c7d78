use std::collections::BTreeSet;

use serde_json::Value;

use crate::generator::error::{TranslationError, TranslationResult};

const REF_KEYWORD: &str = "$ref";

/// Splits a document-relative `$ref` into its path segments.
///
/// A leading `#/` (or bare `#`) is stripped, the remainder is split on `/`, empty
/// segments are dropped and the JSON Pointer escapes `~1` and `~0` are decoded.
pub(crate) fn split_ref(reference: &str) -> Vec<String> {
  let pointer = reference
    .strip_prefix("#/")
    .or_else(|| reference.strip_prefix('#'))
    .unwrap_or(reference);

  pointer
    .split('/')
    .filter(|segment| !segment.is_empty())
    .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
    .collect()
}

/// Escapes one pointer segment (`~` → `~0`, `/` → `~1`).
pub(crate) fn escape_segment(segment: &str) -> String {
  segment.replace('~', "~0").replace('/', "~1")
}

/// Appends an escaped segment to an existing pointer.
pub(crate) fn child_ref(reference: &str, segment: &str) -> String {
  format!("{}/{}", reference.trim_end_matches('/'), escape_segment(segment))
}

/// Builds a `#/`-prefixed pointer from path segments, escaping them as JSON Pointer
/// requires. Inverse of [`split_ref`] for non-empty segments.
pub(crate) fn join_ref<S: AsRef<str>>(segments: &[S]) -> String {
  let escaped = segments
    .iter()
    .map(|segment| escape_segment(segment.as_ref()))
    .collect::<Vec<_>>();
  format!("#/{}", escaped.join("/"))
}

/// Walks `root` along `path`, failing on the first segment that is not present.
///
/// A `null` root counts as undefined and fails before any indexing happens.
pub(crate) fn resolve<'a, S: AsRef<str>>(root: &'a Value, path: &[S]) -> TranslationResult<&'a Value> {
  let owned_path = || path.iter().map(|segment| segment.as_ref().to_string()).collect::<Vec<_>>();

  if root.is_null() {
    return Err(TranslationError::Resolve {
      path: owned_path(),
      segment: None,
    });
  }

  path.iter().try_fold(root, |current, segment| {
    let segment = segment.as_ref();
    let next = match current {
      Value::Object(map) => map.get(segment),
      Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
      _ => None,
    };
    next.ok_or_else(|| TranslationError::Resolve {
      path: owned_path(),
      segment: Some(segment.to_string()),
    })
  })
}

/// Returns the `$ref` target of a reference object, if `value` is one.
pub(crate) fn ref_target(value: &Value) -> Option<&str> {
  value.as_object()?.get(REF_KEYWORD)?.as_str()
}

/// Follows `value` through chains of reference objects until a concrete value is found.
///
/// A chain that loops back onto an already visited reference fails like a missing
/// segment, naming the reference that closed the loop.
pub(crate) fn ensure_resolved<'a>(root: &'a Value, value: &'a Value) -> TranslationResult<&'a Value> {
  let mut current = value;
  let mut visited = BTreeSet::new();

  while let Some(reference) = ref_target(current) {
    if !visited.insert(reference.to_string()) {
      return Err(TranslationError::Resolve {
        path: split_ref(reference),
        segment: Some(reference.to_string()),
      });
    }
    current = resolve(root, &split_ref(reference))?;
  }

  Ok(current)
}
