use thiserror::Error;

pub type TranslationResult<T> = Result<T, TranslationError>;

/// Hard translation failures. A single error aborts the whole run and no declaration
/// is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
  #[error("cannot resolve `#/{}`: {}", .path.join("/"), describe_missing(.segment.as_deref()))]
  Resolve { path: Vec<String>, segment: Option<String> },

  #[error("operation `{method} {path}` has no operationId")]
  OperationIdRequired { method: String, path: String },

  #[error("unsupported enum at `{reference}`")]
  UnsupportedEnum { reference: String },

  #[error("unsupported schema at `{reference}`")]
  UnsupportedSchema { reference: String },

  #[error("unknown type `{type_name}` at `{reference}`")]
  BadType { type_name: String, reference: String },

  #[error("schema at `{reference}` has none of oneOf/anyOf/allOf")]
  ComposedSchemaUnsupported { reference: String },

  #[error("header at `{reference}` is declared through `content`, only `schema` is supported")]
  UnsupportedHeader { reference: String },
}

impl TranslationError {
  /// Stable diagnostic code for the error kind.
  pub fn code(&self) -> &'static str {
    match self {
      Self::Resolve { .. } => "E_RESOLVE",
      Self::OperationIdRequired { .. } => "E_OPERATION_ID_REQUIRED",
      Self::UnsupportedEnum { .. } => "E_UNSUPPORTED_ENUM",
      Self::UnsupportedSchema { .. } => "E_UNSUPPORTED_SCHEMA",
      Self::BadType { .. } => "E_BAD_TYPE",
      Self::ComposedSchemaUnsupported { .. } => "E_COMPOSED_SCHEMA_UNSUPPORTED",
      Self::UnsupportedHeader { .. } => "E_UNSUPPORTED_HEADER",
    }
  }
}

fn describe_missing(segment: Option<&str>) -> String {
  match segment {
    Some(segment) => format!("segment `{segment}` is missing"),
    None => "the document root is undefined".to_string(),
  }
}
