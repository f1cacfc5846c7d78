use std::sync::LazyLock;

use inflections::Inflect;
use regex::{Captures, Regex};

pub(crate) const UNKNOWN_IDENTIFIER: &str = "Unknown";

// Compile static regexes only once for sanitization.
static DISALLOWED_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9\-_ ]").unwrap());
static WORD_BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|[^A-Za-z0-9]+)([A-Za-z])").unwrap());
static SEPARATORS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]").unwrap());
static PLAIN_PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Converts an arbitrary string into a valid declaration identifier (`PascalCase`).
///
/// # Rules:
/// 1. Characters outside `[A-Za-z0-9-_ ]` are dropped.
/// 2. A letter following the string start or a run of separators is upper-cased.
/// 3. Remaining separators (`-`, `_`, space) are dropped.
/// 4. A leading digit is prefixed with `_`.
/// 5. An empty result becomes `Unknown`.
///
/// The mapping is idempotent and makes no attempt to avoid collisions.
pub(crate) fn build_identifier(part: &str) -> String {
  let kept = DISALLOWED_CHARS_RE.replace_all(part, "");
  let capitalized = WORD_BOUNDARY_RE.replace_all(&kept, |caps: &Captures<'_>| caps[1].to_uppercase());
  let mut ident = SEPARATORS_RE.replace_all(&capitalized, "").into_owned();

  if ident.is_empty() {
    return UNKNOWN_IDENTIFIER.to_string();
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, '_');
  }

  ident
}

/// Converts an operation input name (`X-Rate-Limit`, `page_size`) into `camelCase`.
///
/// Falls back to the untouched name when the conversion would leave nothing usable.
pub(crate) fn to_input_field_name(name: &str) -> String {
  let camel = name.to_camel_case();
  if camel.is_empty() { name.to_string() } else { camel }
}

/// Returns the property key as it must appear in a type literal, quoting it when it
/// is not a plain identifier.
pub(crate) fn property_key(name: &str) -> String {
  if PLAIN_PROPERTY_RE.is_match(name) {
    name.to_string()
  } else {
    serde_json::Value::String(name.to_string()).to_string()
  }
}
