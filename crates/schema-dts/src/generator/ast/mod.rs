mod types;

#[cfg(test)]
mod tests;

pub(crate) use types::{EnumDecl, EnumMember, IndexSignature, Literal, ObjectType, PropertySignature, TupleType, TypeExpr};
