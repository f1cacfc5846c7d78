use strum::{AsRefStr, EnumString};

pub(crate) const DEFAULT_API_BASE_NAME: &str = "API";
pub(crate) const DEFAULT_SCHEMA_BASE_NAME: &str = "Main";
pub(crate) const DEFAULT_TUPLE_LENGTH_LIMIT: usize = 5;

/// Which declarations get a nominal brand (`T & { _type?: "Name" }`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BrandPolicy {
  #[default]
  None,
  /// Brand only the listed names.
  Names(Vec<String>),
  /// Brand every named schema.
  All,
  /// Brand the names declared under `components.schemas`.
  Schemas,
}

/// Kind of input document, detected from its top-level keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum DocumentKind {
  Api,
  Schema,
}

impl DocumentKind {
  pub fn detect(document: &serde_json::Value) -> Self {
    let is_api = document
      .as_object()
      .is_some_and(|map| map.contains_key("openapi") || map.contains_key("swagger"));
    if is_api { Self::Api } else { Self::Schema }
  }
}

/// Options read for a whole translation run.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
#[allow(clippy::struct_excessive_bools)]
pub struct GeneratorOptions {
  /// Root declaration (bare schemas) or root namespace (API documents) name.
  #[builder(into)]
  pub base_name: Option<String>,
  #[builder(default)]
  pub brands: BrandPolicy,
  #[builder(default)]
  pub generate_real_enums: bool,
  /// Allow-list of response status codes; empty keeps every response.
  #[builder(default)]
  pub filter_statuses: Vec<String>,
  #[builder(default)]
  pub generate_unused_schemas: bool,
  #[builder(default = true)]
  pub camelize_inputs: bool,
  #[builder(default = DEFAULT_TUPLE_LENGTH_LIMIT)]
  pub tuple_from_fixed_array_length: usize,
  #[builder(default)]
  pub export_namespaces: bool,
  #[builder(default)]
  pub strict: bool,
  #[builder(default)]
  pub require_clean_api: bool,
}

impl Default for GeneratorOptions {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl GeneratorOptions {
  pub fn base_name_for(&self, kind: DocumentKind) -> String {
    self.base_name.clone().unwrap_or_else(|| {
      match kind {
        DocumentKind::Api => DEFAULT_API_BASE_NAME,
        DocumentKind::Schema => DEFAULT_SCHEMA_BASE_NAME,
      }
      .to_string()
    })
  }

  /// Whether a declaration called `name` is branded. Names declared under
  /// `components.schemas` are passed in `schema_names` for the `Schemas` policy.
  pub(crate) fn is_branded(&self, name: &str, schema_names: &[String]) -> bool {
    match &self.brands {
      BrandPolicy::None => false,
      BrandPolicy::All => true,
      BrandPolicy::Names(names) => names.iter().any(|branded| branded == name),
      BrandPolicy::Schemas => schema_names.iter().any(|schema| schema == name),
    }
  }

  /// Whether a response with `status` survives the status allow-list.
  pub(crate) fn keeps_status(&self, status: &str) -> bool {
    self.filter_statuses.is_empty()
      || self
        .filter_statuses
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(status))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_defaults() {
    let options = GeneratorOptions::default();
    assert_eq!(options.tuple_from_fixed_array_length, 5);
    assert!(options.camelize_inputs);
    assert!(!options.strict);
    assert_eq!(options.brands, BrandPolicy::None);
    assert_eq!(options.base_name_for(DocumentKind::Api), "API");
    assert_eq!(options.base_name_for(DocumentKind::Schema), "Main");
  }

  #[test]
  fn test_base_name_override() {
    let options = GeneratorOptions::builder().base_name("Petstore").build();
    assert_eq!(options.base_name_for(DocumentKind::Api), "Petstore");
  }

  #[test]
  fn test_brand_policies() {
    let schema_names = vec!["UserId".to_string()];

    assert!(!GeneratorOptions::default().is_branded("UserId", &schema_names));
    assert!(
      GeneratorOptions::builder()
        .brands(BrandPolicy::All)
        .build()
        .is_branded("Anything", &schema_names)
    );
    let listed = GeneratorOptions::builder()
      .brands(BrandPolicy::Names(vec!["Email".into()]))
      .build();
    assert!(listed.is_branded("Email", &schema_names));
    assert!(!listed.is_branded("UserId", &schema_names));
    let from_schemas = GeneratorOptions::builder().brands(BrandPolicy::Schemas).build();
    assert!(from_schemas.is_branded("UserId", &schema_names));
    assert!(!from_schemas.is_branded("Email", &schema_names));
  }

  #[test]
  fn test_status_filter() {
    assert!(GeneratorOptions::default().keeps_status("418"));

    let options = GeneratorOptions::builder()
      .filter_statuses(vec!["200".into(), "default".into()])
      .build();
    assert!(options.keeps_status("200"));
    assert!(options.keeps_status("Default"));
    assert!(!options.keeps_status("404"));
  }

  #[test]
  fn test_document_kind_detection() {
    assert_eq!(DocumentKind::detect(&json!({ "openapi": "3.1.0" })), DocumentKind::Api);
    assert_eq!(DocumentKind::detect(&json!({ "type": "object" })), DocumentKind::Schema);
    assert_eq!(DocumentKind::detect(&json!(true)), DocumentKind::Schema);
    assert_eq!("api".parse::<DocumentKind>().unwrap(), DocumentKind::Api);
  }
}
