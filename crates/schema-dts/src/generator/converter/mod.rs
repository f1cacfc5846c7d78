//! Recursive schema → type-expression translation.
//!
//! [`schema_to_types`] classifies a schema into exactly one [`SchemaShape`] in a fixed
//! priority order and hands it to the matching translator. References are never
//! followed here: each `$ref` yields an assumed fragment that the fixed-point loop
//! expands later.

mod arrays;
mod composed;
mod literals;
mod objects;
mod typed;

#[cfg(test)]
mod tests;

use std::rc::Rc;

use serde_json::Value;

use self::literals::EnumNames;
use crate::{
  generator::{
    ast::TypeExpr,
    error::{TranslationError, TranslationResult},
    fragments::{DeclarationPayload, Fragment, FragmentSet, StatementFragment, Translation},
    metrics::GenerationWarning,
    names::NameResolver,
    options::GeneratorOptions,
  },
  utils::{SchemaExt, refs::child_ref},
};

const ROOT_REF: &str = "#";
const OBJECT_TYPE: &str = "object";
const NULL_TYPE: &str = "null";

/// Read-only state threaded through every recursive call.
#[derive(Debug, Clone)]
pub(crate) struct TranslationContext<'a> {
  pub(crate) root: &'a Value,
  pub(crate) options: &'a GeneratorOptions,
  pub(crate) names: &'a dyn NameResolver,
  /// Names declared under `components.schemas`, for the schema branding policy.
  pub(crate) schema_names: &'a [String],
  /// Pointer of the schema being translated, for diagnostics and child references.
  pub(crate) location: String,
  /// Name suggested by the enclosing construct (property name, component name).
  pub(crate) hint: Option<String>,
  /// Declaration name the current schema is translated for, if any.
  pub(crate) brand: Option<String>,
  /// Real enum names handed out so far in this run, shared by every derived context.
  enums: Rc<EnumNames>,
}

impl<'a> TranslationContext<'a> {
  pub(crate) fn new(
    root: &'a Value,
    options: &'a GeneratorOptions,
    names: &'a dyn NameResolver,
    schema_names: &'a [String],
  ) -> Self {
    Self {
      root,
      options,
      names,
      schema_names,
      location: ROOT_REF.to_string(),
      hint: None,
      brand: None,
      enums: Rc::default(),
    }
  }

  /// Moves to an absolute document location, forgetting hint and brand.
  pub(crate) fn at(&self, location: impl Into<String>) -> Self {
    Self {
      location: location.into(),
      hint: None,
      brand: None,
      ..self.clone()
    }
  }

  /// Moves to a child location; the naming hint carries over, the brand does not.
  pub(crate) fn descend(&self, segment: &str) -> Self {
    Self {
      location: child_ref(&self.location, segment),
      brand: None,
      ..self.clone()
    }
  }

  pub(crate) fn named(mut self, hint: impl Into<String>) -> Self {
    self.hint = Some(hint.into());
    self
  }

  pub(crate) fn branded(mut self, brand: impl Into<String>) -> Self {
    self.brand = Some(brand.into());
    self
  }

  /// Fails in strict mode, otherwise degrades to the universal type with a warning.
  fn unsupported(&self) -> TranslationResult<Translation> {
    if self.options.strict {
      return Err(TranslationError::UnsupportedSchema {
        reference: self.location.clone(),
      });
    }
    Ok(Translation::of(TypeExpr::Unknown).with_warning(GenerationWarning::SchemaDegraded {
      reference: self.location.clone(),
    }))
  }
}

/// The closed set of schema forms, in dispatch priority order.
#[derive(Debug, Clone, PartialEq)]
enum SchemaShape<'s> {
  Boolean(bool),
  Null,
  Reference(&'s str),
  Const(&'s Value),
  Enum(&'s Value),
  Typed(Vec<&'s str>),
  Composed,
  Unsupported,
}

impl<'s> SchemaShape<'s> {
  fn classify(ctx: &TranslationContext<'_>, schema: &'s Value, parent_type: Option<&'s Value>) -> TranslationResult<Self> {
    if let Value::Bool(allowed) = schema {
      return Ok(Self::Boolean(*allowed));
    }
    if !schema.is_object() {
      return Ok(Self::Unsupported);
    }
    if schema.declared_type().and_then(Value::as_str) == Some(NULL_TYPE) {
      return Ok(Self::Null);
    }

    if let Some(reference) = schema.schema_ref() {
      return Ok(Self::Reference(reference));
    }
    if let Some(value) = schema.keyword("const") {
      return Ok(Self::Const(value));
    }
    if let Some(values) = schema.keyword("enum") {
      return Ok(Self::Enum(values));
    }
    if let Some(declared) = schema.declared_type() {
      return Ok(Self::Typed(type_names(ctx, declared)?));
    }
    if schema.keyword("properties").is_some() {
      return Ok(Self::Typed(vec![OBJECT_TYPE]));
    }
    if schema.has_composition() {
      return Ok(Self::Composed);
    }
    if let Some(parent) = parent_type {
      return Ok(Self::Typed(type_names(ctx, parent)?));
    }
    Ok(Self::Unsupported)
  }
}

/// Reads a `type` keyword, single or array valued.
fn type_names<'s>(ctx: &TranslationContext<'_>, declared: &'s Value) -> TranslationResult<Vec<&'s str>> {
  let bad_type = || TranslationError::BadType {
    type_name: declared.to_string(),
    reference: ctx.location.clone(),
  };

  match declared {
    Value::String(name) => Ok(vec![name.as_str()]),
    Value::Array(names) => names.iter().map(|name| name.as_str().ok_or_else(bad_type)).collect(),
    _ => Err(bad_type()),
  }
}

/// Translates one schema into the alternative types it denotes.
///
/// `parent_type` is the `type` of a composing schema, inherited by branches that declare
/// none of their own.
pub(crate) fn schema_to_types(
  ctx: &TranslationContext<'_>,
  schema: &Value,
  parent_type: Option<&Value>,
) -> TranslationResult<Translation> {
  match SchemaShape::classify(ctx, schema, parent_type)? {
    SchemaShape::Boolean(true) => Ok(Translation::of(TypeExpr::Unknown)),
    SchemaShape::Boolean(false) => Ok(Translation::of(TypeExpr::Never)),
    SchemaShape::Null => Ok(Translation::of(TypeExpr::Null)),
    SchemaShape::Reference(reference) => reference_to_types(ctx, reference),
    SchemaShape::Const(value) => Ok(Translation::of(literals::const_to_type(value))),
    SchemaShape::Enum(values) => literals::enum_to_types(ctx, schema, values),
    SchemaShape::Typed(names) => typed::typed_schema_to_types(ctx, schema, &names),
    SchemaShape::Composed => composed::composed_schema_to_type(ctx, schema, schema.declared_type()),
    SchemaShape::Unsupported => ctx.unsupported(),
  }
}

/// Same as [`schema_to_types`], folding the alternatives into a single type.
pub(crate) fn schema_to_type(
  ctx: &TranslationContext<'_>,
  schema: &Value,
  parent_type: Option<&Value>,
) -> TranslationResult<Translation> {
  let mut translation = schema_to_types(ctx, schema, parent_type)?;
  translation.types = vec![translation.union_type()];
  Ok(translation)
}

fn reference_to_types(ctx: &TranslationContext<'_>, reference: &str) -> TranslationResult<Translation> {
  let target = ctx.names.resolve(reference)?;
  Ok(Translation::of(TypeExpr::Reference(target)).with_fragment(Fragment::assumed(reference)))
}

/// Translates a bare schema document into its root statement plus side fragments.
pub(crate) fn root_schema_to_fragments(ctx: &TranslationContext<'_>, base_name: &str) -> TranslationResult<FragmentSet> {
  let ctx = ctx.at(ROOT_REF).named(base_name).branded(base_name);
  let translation = schema_to_type(&ctx, ctx.root, None)?;

  let mut set = FragmentSet::default();
  let ty = TypeExpr::union_of(set.absorb(translation));
  set.push(Fragment::Statement(StatementFragment {
    reference: ROOT_REF.to_string(),
    name: base_name.to_string(),
    ty,
  }));
  Ok(set)
}

/// Translates the schema stored at `reference` into a declaration at `namespace`.
///
/// The last namespace segment names the declaration, so it doubles as naming hint and
/// brand candidate.
pub(crate) fn referenced_schema_to_fragments(
  ctx: &TranslationContext<'_>,
  reference: &str,
  namespace: Vec<String>,
  schema: &Value,
) -> TranslationResult<FragmentSet> {
  let mut ctx = ctx.at(reference);
  if let Some(name) = namespace.last() {
    ctx = ctx.named(name.clone()).branded(name.clone());
  }

  let mut set = FragmentSet::default();
  let translation = schema_to_type(&ctx, schema, None)?;
  let ty = TypeExpr::union_of(set.absorb(translation));
  set.push(Fragment::declaration(reference, namespace, DeclarationPayload::Type(ty)));
  Ok(set)
}
