use std::collections::HashSet;

use itertools::Itertools;
use serde_json::Value;

use super::{DocumentWalker, Site};
use crate::{
  generator::{
    ast::{ObjectType, PropertySignature, TypeExpr},
    error::{TranslationError, TranslationResult},
    fragments::{DeclarationPayload, Fragment, FragmentSet, MemberPayload, Redirect},
    metrics::GenerationWarning,
  },
  naming::identifiers::{build_identifier, to_input_field_name},
  utils::{
    SchemaExt,
    refs::{child_ref, ensure_resolved, join_ref},
  },
};

pub(crate) const HTTP_METHODS: [&str; 8] = ["get", "put", "post", "delete", "options", "head", "patch", "trace"];

const OPERATIONS_ROOT: &str = "operations";
const PATH_LOCATION: &str = "path";
const STATUS_MEMBER: &str = "status";
const BODY_MEMBER: &str = "body";

/// Parameters declared on a path item, shared by each of its operations.
struct PathParameters<'v> {
  location: String,
  items: &'v [Value],
}

/// One operation of a path item, as listed by `list operations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationEntry {
  pub operation_id: String,
  pub method: String,
  pub path: String,
  /// The document carries no `operationId`; the id was derived from method and path.
  pub synthesized: bool,
}

/// Operations declared inline under `paths` and `webhooks`, in document order.
pub(crate) fn list_operations(document: &Value) -> Vec<OperationEntry> {
  ["paths", "webhooks"]
    .into_iter()
    .filter_map(|collection| document.entries(collection))
    .flatten()
    .flat_map(|(path, item)| {
      path_item_operations(item).map(move |(method, operation)| {
        let declared = declared_operation_id(operation);
        OperationEntry {
          operation_id: declared
            .clone()
            .unwrap_or_else(|| synthesize_operation_id(method, path)),
          method: method.to_uppercase(),
          path: path.clone(),
          synthesized: declared.is_none(),
        }
      })
    })
    .collect()
}

fn path_item_operations(item: &Value) -> impl Iterator<Item = (&'static str, &Value)> {
  HTTP_METHODS
    .into_iter()
    .filter_map(move |method| item.keyword(method).map(|operation| (method, operation)))
}

fn declared_operation_id(operation: &Value) -> Option<String> {
  operation
    .keyword("operationId")
    .and_then(Value::as_str)
    .filter(|id| !id.trim().is_empty())
    .map(ToString::to_string)
}

/// Derives an operation id from the identifier forms of the method and path segments.
pub(crate) fn synthesize_operation_id(method: &str, path: &str) -> String {
  std::iter::once(method)
    .chain(path.split('/').filter(|segment| !segment.is_empty()))
    .map(build_identifier)
    .join("")
}

/// Claims `field` as an `Input` member name. A clash is resolved with the parameter
/// location (`pageSizeHeader`), then with a numeric suffix.
fn unique_field(fields: &mut HashSet<String>, field: String, location_kind: &str) -> String {
  if fields.insert(field.clone()) {
    return field;
  }

  let located = format!("{field}{}", build_identifier(location_kind));
  let mut candidate = located.clone();
  let mut suffix = 1;
  while !fields.insert(candidate.clone()) {
    suffix += 1;
    candidate = format!("{located}{suffix}");
  }
  candidate
}

/// Parameter identity within an operation.
fn parameter_key(parameter: &Value) -> (String, String) {
  let field = |name: &str| {
    parameter
      .keyword(name)
      .and_then(Value::as_str)
      .unwrap_or_default()
      .to_string()
  };
  (field("name"), field("in"))
}

impl<'a> DocumentWalker<'a> {
  pub(super) fn visit_path_item(&self, location: &str, path: &str, item: &Value) -> TranslationResult<FragmentSet> {
    let mut set = FragmentSet::default();
    if let Some(reference) = item.schema_ref() {
      set.push(Fragment::assumed(reference));
      return Ok(set);
    }

    let shared = PathParameters {
      location: child_ref(location, "parameters"),
      items: item.items_of("parameters").map(Vec::as_slice).unwrap_or_default(),
    };
    for (method, operation) in path_item_operations(item) {
      let operation_location = child_ref(location, method);
      set.extend(self.visit_operation(&operation_location, method, path, operation, &shared)?);
    }
    Ok(set)
  }

  /// Visits every path item of a callback object.
  pub(super) fn visit_callback(&self, location: &str, callback: &Value) -> TranslationResult<FragmentSet> {
    let mut set = FragmentSet::default();
    if let Some(reference) = callback.schema_ref() {
      set.push(Fragment::assumed(reference));
      return Ok(set);
    }

    for (expression, item) in callback.as_object().into_iter().flatten() {
      set.extend(self.visit_path_item(&child_ref(location, expression), expression, item)?);
    }
    Ok(set)
  }

  fn visit_operation(
    &self,
    location: &str,
    method: &str,
    path: &str,
    operation: &Value,
    shared: &PathParameters<'_>,
  ) -> TranslationResult<FragmentSet> {
    let mut set = FragmentSet::default();

    let operation_id = match declared_operation_id(operation) {
      Some(id) => id,
      None if self.ctx.options.require_clean_api => {
        return Err(TranslationError::OperationIdRequired {
          method: method.to_uppercase(),
          path: path.to_string(),
        });
      }
      None => {
        let operation_id = synthesize_operation_id(method, path);
        set.warn(GenerationWarning::OperationIdSynthesized {
          method: method.to_uppercase(),
          path: path.to_string(),
          operation_id: operation_id.clone(),
        });
        operation_id
      }
    };
    set.operations.push(operation_id.clone());

    let site = Site::new(
      join_ref(&[OPERATIONS_ROOT, operation_id.as_str()]),
      vec![self.base_name.clone(), build_identifier(&operation_id)],
    );

    set.extend(self.visit_operation_input(&site, location, operation, shared)?);
    set.extend(self.visit_operation_output(&site, location, &operation_id, operation)?);

    for (name, callback) in operation.entries("callbacks").into_iter().flatten() {
      let callback_location = child_ref(&child_ref(location, "callbacks"), name);
      set.extend(self.visit_callback(&callback_location, callback)?);
    }

    Ok(set)
  }

  /// `Input`: one member per parameter plus `body`, each redirecting to its declaration.
  fn visit_operation_input(
    &self,
    operation: &Site,
    location: &str,
    value: &Value,
    shared: &PathParameters<'_>,
  ) -> TranslationResult<FragmentSet> {
    let mut set = FragmentSet::default();
    let input = operation.child("input", "Input");
    set.push(Fragment::declaration(
      &input.reference,
      input.namespace.clone(),
      DeclarationPayload::Alias,
    ));

    let own_location = child_ref(location, "parameters");
    let own_parameters = value.items_of("parameters").map(Vec::as_slice).unwrap_or_default();
    let own_keys = own_parameters
      .iter()
      .map(|parameter| parameter_key(self.resolved(parameter)))
      .collect::<Vec<_>>();
    let parameters = shared
      .items
      .iter()
      .enumerate()
      .map(|(index, parameter)| (child_ref(&shared.location, &index.to_string()), parameter))
      .filter(|(_, parameter)| !own_keys.contains(&parameter_key(self.resolved(parameter))))
      .chain(
        own_parameters
          .iter()
          .enumerate()
          .map(|(index, parameter)| (child_ref(&own_location, &index.to_string()), parameter)),
      );

    let mut fields = HashSet::new();
    if value.keyword("requestBody").is_some() {
      fields.insert(BODY_MEMBER.to_string());
    }

    let parameters_site = operation.child("parameters", "Parameters");
    for (parameter_location, parameter) in parameters {
      let resolved = ensure_resolved(self.ctx.root, parameter)?;
      let (name, location_kind) = parameter_key(resolved);
      let field = if self.ctx.options.camelize_inputs {
        to_input_field_name(&name)
      } else {
        name.clone()
      };
      let field = unique_field(&mut fields, field, &location_kind);
      let optional = !(resolved.is_required() || location_kind == PATH_LOCATION);

      let target = match parameter.schema_ref() {
        Some(reference) => {
          set.push(Fragment::assumed(reference));
          Redirect::new(reference, self.ctx.names.resolve(reference)?)
        }
        None => {
          let declaration = parameters_site.child(&format!("{location_kind}.{name}"), build_identifier(&name));
          set.extend(self.parameter_declaration(&declaration, &parameter_location, parameter)?);
          Redirect::new(declaration.reference, declaration.namespace)
        }
      };

      let member = input.child(&field, field.as_str());
      set.push(Fragment::member(
        member.reference,
        member.namespace,
        optional,
        MemberPayload::Redirect(target),
      ));
    }

    if let Some(body) = value.keyword("requestBody") {
      let optional = !ensure_resolved(self.ctx.root, body)?.is_required();
      let target = match body.schema_ref() {
        Some(reference) => {
          set.push(Fragment::assumed(reference));
          Redirect::new(reference, self.ctx.names.resolve(reference)?)
        }
        None => {
          let declaration = operation.child("requestBody", "Body");
          set.extend(self.request_body_declaration(&declaration, &child_ref(location, "requestBody"), body)?);
          Redirect::new(declaration.reference, declaration.namespace)
        }
      };

      let member = input.child(BODY_MEMBER, BODY_MEMBER);
      set.push(Fragment::member(
        member.reference,
        member.namespace,
        optional,
        MemberPayload::Redirect(target),
      ));
    }

    Ok(set)
  }

  /// `Responses.<Status>` per kept status and `Output`, their union.
  fn visit_operation_output(
    &self,
    operation: &Site,
    location: &str,
    operation_id: &str,
    value: &Value,
  ) -> TranslationResult<FragmentSet> {
    let mut set = FragmentSet::default();
    let responses_location = child_ref(location, "responses");
    let responses_site = operation.child("responses", "Responses");
    let mut outputs = Vec::new();

    for (status, response) in value.entries("responses").into_iter().flatten() {
      if !self.ctx.options.keeps_status(status) {
        set.warn(GenerationWarning::ResponseFiltered {
          operation_id: operation_id.to_string(),
          status: status.clone(),
        });
        continue;
      }

      let site = responses_site.child(status, build_identifier(status));
      let status_type = status
        .parse::<u64>()
        .map_or(TypeExpr::Number, TypeExpr::number_literal);

      match response.schema_ref() {
        Some(reference) => {
          set.push(Fragment::assumed(reference));
          let status_object =
            TypeExpr::Object(ObjectType::empty().with_property(PropertySignature::required(STATUS_MEMBER, status_type)));
          let ty = TypeExpr::intersection_of([status_object, TypeExpr::Reference(self.ctx.names.resolve(reference)?)]);
          set.push(Fragment::declaration(
            &site.reference,
            site.namespace.clone(),
            DeclarationPayload::Type(ty),
          ));
        }
        None => {
          set.extend(self.response_declaration(&site, &child_ref(&responses_location, status), response)?);
          let member = site.child(STATUS_MEMBER, STATUS_MEMBER);
          set.push(Fragment::member(
            member.reference,
            member.namespace,
            false,
            MemberPayload::Type(status_type),
          ));
        }
      }

      outputs.push(TypeExpr::Reference(site.namespace));
    }

    let output = operation.child("output", "Output");
    set.push(Fragment::declaration(
      output.reference,
      output.namespace,
      DeclarationPayload::Type(TypeExpr::union_of(outputs)),
    ));
    Ok(set)
  }

  /// Follows reference chains for reading parameter keys; unresolvable values read as-is.
  fn resolved<'v>(&self, value: &'v Value) -> &'v Value
  where
    'a: 'v,
  {
    ensure_resolved(self.ctx.root, value).unwrap_or(value)
  }
}
