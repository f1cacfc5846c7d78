pub mod document;
pub mod refs;
pub mod schema_ext;

pub(crate) use schema_ext::SchemaExt;
