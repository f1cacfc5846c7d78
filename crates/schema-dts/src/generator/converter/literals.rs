use std::{
  cell::RefCell,
  collections::{HashMap, HashSet},
};

use itertools::Itertools;
use serde_json::Value;

use super::TranslationContext;
use crate::{
  generator::{
    ast::{EnumDecl, EnumMember, Literal, ObjectType, PropertySignature, TupleType, TypeExpr},
    error::{TranslationError, TranslationResult},
    fragments::{DeclarationPayload, Fragment, Translation},
    metrics::GenerationWarning,
  },
  naming::identifiers::{UNKNOWN_IDENTIFIER, build_identifier},
  utils::{
    SchemaExt,
    refs::join_ref,
    schema_ext::JsonKind,
  },
};

const ENUMS_NAMESPACE: &str = "Enums";

/// The literal type denoting exactly `value`.
pub(super) fn const_to_type(value: &Value) -> TypeExpr {
  match value {
    Value::Null => TypeExpr::Null,
    Value::Bool(flag) => TypeExpr::Literal(Literal::Boolean(*flag)),
    Value::Number(number) => TypeExpr::Literal(Literal::Number(number.clone())),
    Value::String(text) => TypeExpr::string_literal(text.as_str()),
    Value::Array(items) => TypeExpr::Tuple(TupleType {
      elements: items.iter().map(const_to_type).collect(),
      rest: None,
    }),
    Value::Object(entries) => TypeExpr::Object(ObjectType {
      properties: entries
        .iter()
        .map(|(name, value)| PropertySignature::required(name.as_str(), const_to_type(value)))
        .collect(),
      index: None,
    }),
  }
}

/// One literal type per distinct `enum` value, or a reference to a generated enum
/// declaration when every value is a string and real enums are enabled.
pub(super) fn enum_to_types(ctx: &TranslationContext<'_>, schema: &Value, values: &Value) -> TranslationResult<Translation> {
  let Value::Array(values) = values else {
    if ctx.options.strict {
      return Err(TranslationError::UnsupportedEnum {
        reference: ctx.location.clone(),
      });
    }
    return Ok(Translation::of(TypeExpr::Unknown).with_warning(GenerationWarning::EnumDegraded {
      reference: ctx.location.clone(),
    }));
  };

  let values = values.iter().unique_by(|value| value.to_string()).collect::<Vec<_>>();
  let kinds = values.iter().map(|value| JsonKind::of(value)).unique().collect::<Vec<_>>();

  if ctx.options.generate_real_enums && values.len() >= 2 && kinds == [JsonKind::String] {
    return Ok(real_enum(ctx, schema, &values));
  }

  Ok(Translation::many(values.into_iter().map(const_to_type).collect()))
}

/// Real enum names claimed during one run, each with the values it stands for.
#[derive(Debug, Default)]
pub(super) struct EnumNames {
  claimed: RefCell<HashMap<String, Vec<String>>>,
}

impl EnumNames {
  /// Returns `base`, or `base` with the first free numeric suffix, so one name always
  /// denotes one list of values. Enums with identical values share a name.
  fn claim(&self, base: &str, values: &[String]) -> String {
    let mut claimed = self.claimed.borrow_mut();
    let mut suffix = 1;
    loop {
      let candidate = if suffix == 1 { base.to_string() } else { format!("{base}{suffix}") };
      match claimed.get(&candidate) {
        Some(existing) if existing.as_slice() == values => return candidate,
        Some(_) => suffix += 1,
        None => {
          claimed.insert(candidate.clone(), values.to_vec());
          return candidate;
        }
      }
    }
  }
}

fn real_enum(ctx: &TranslationContext<'_>, schema: &Value, values: &[&Value]) -> Translation {
  let values = values.iter().filter_map(|value| value.as_str()).map(ToString::to_string).collect::<Vec<_>>();
  let base = build_identifier(schema.title().or(ctx.hint.as_deref()).unwrap_or(UNKNOWN_IDENTIFIER));
  let name = ctx.enums.claim(&base, &values);
  let namespace = vec![ENUMS_NAMESPACE.to_string(), name.clone()];

  let mut used = HashSet::new();
  let members = values
    .into_iter()
    .map(|value| {
      let base = build_identifier(&value);
      let mut member_name = base.clone();
      let mut suffix = 1;
      while !used.insert(member_name.clone()) {
        suffix += 1;
        member_name = format!("{base}{suffix}");
      }
      EnumMember {
        name: member_name,
        value,
      }
    })
    .collect();

  let reference = join_ref(&[ENUMS_NAMESPACE.to_lowercase(), name.clone()]);
  let fragment = Fragment::declaration(
    reference,
    namespace.clone(),
    DeclarationPayload::Enum(EnumDecl { name, members }),
  );

  Translation::of(TypeExpr::Reference(namespace)).with_fragment(fragment)
}
