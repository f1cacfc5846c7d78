//! TypeScript declaration text for a [`NamespaceNode`] tree.

use itertools::Itertools;

use crate::{
  generator::{
    ast::{EnumDecl, IndexSignature, Literal, ObjectType, PropertySignature, TupleType, TypeExpr},
    fragments::{DeclarationPayload, Fragment, MemberPayload},
    namespace_tree::NamespaceNode,
  },
  naming::identifiers::property_key,
};

const INDENT: &str = "  ";

/// Serialises type expressions and namespace trees as TypeScript declarations.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TypeScriptPrinter {
  /// Top-level namespaces are `export namespace` instead of `declare namespace`.
  export_namespaces: bool,
}

impl TypeScriptPrinter {
  pub(crate) fn new(export_namespaces: bool) -> Self {
    Self { export_namespaces }
  }

  pub(crate) fn print(&self, root: &NamespaceNode) -> String {
    let mut lines = Vec::new();
    self.print_node(root, 0, &mut lines);
    let mut output = lines.join("\n");
    output.push('\n');
    output
  }

  fn print_node(&self, node: &NamespaceNode, depth: usize, lines: &mut Vec<String>) {
    let prefix = INDENT.repeat(depth);

    for member in &node.members {
      let declaration = match member {
        Fragment::Statement(statement) => Some(format!("export type {} = {};", statement.name, print_type(&statement.ty))),
        Fragment::DeclarationMember(declaration) => {
          let name = declaration.namespace.last().map_or("", String::as_str);
          Some(print_declaration(node, name, &declaration.payload, depth))
        }
        Fragment::InterfaceMember(_) | Fragment::Assumed(_) => None,
      };
      if let Some(declaration) = declaration {
        lines.push(format!("{prefix}{declaration}"));
      }
    }

    for child in node.children.values().filter(|child| child.has_declarations()) {
      let keyword = if depth == 0 && !self.export_namespaces {
        "declare namespace"
      } else {
        "export namespace"
      };
      lines.push(format!("{prefix}{keyword} {} {{", child.name));
      self.print_node(child, depth + 1, lines);
      lines.push(format!("{prefix}}}"));
    }
  }
}

fn print_declaration(node: &NamespaceNode, name: &str, payload: &DeclarationPayload, depth: usize) -> String {
  match payload {
    DeclarationPayload::Type(ty) => format!("export type {name} = {};", print_type(ty)),
    DeclarationPayload::Enum(decl) => print_enum(decl, depth),
    DeclarationPayload::Redirect(redirect) => format!("export type {name} = {};", print_type(&redirect.to_type())),
    DeclarationPayload::Alias => format!("export type {name} = {};", print_alias(node.child(name), depth)),
  }
}

fn print_enum(decl: &EnumDecl, depth: usize) -> String {
  let prefix = INDENT.repeat(depth + 1);
  let members = decl
    .members
    .iter()
    .map(|member| format!("{prefix}{} = {},", member.name, print_literal(&Literal::String(member.value.clone()))))
    .join("\n");
  format!("export enum {} {{\n{members}\n{}}}", decl.name, INDENT.repeat(depth))
}

/// The object formed by the interface members stored on `node`, one per line.
fn print_alias(node: Option<&NamespaceNode>, depth: usize) -> String {
  let members = node
    .into_iter()
    .flat_map(|node| node.members.iter().map(move |member| (node, member)))
    .filter_map(|(node, member)| match member {
      Fragment::InterfaceMember(member) => {
        let name = member.namespace.last().map_or("", String::as_str);
        let ty = match &member.payload {
          MemberPayload::Type(ty) => print_type(ty),
          MemberPayload::Redirect(redirect) => print_type(&redirect.to_type()),
          MemberPayload::Alias => print_alias(node.child(name), depth + 1),
        };
        let optional = if member.optional { "?" } else { "" };
        Some(format!("{}{}{optional}: {ty};", INDENT.repeat(depth + 1), property_key(name)))
      }
      _ => None,
    })
    .collect::<Vec<_>>();

  if members.is_empty() {
    "{}".to_string()
  } else {
    format!("{{\n{}\n{}}}", members.join("\n"), INDENT.repeat(depth))
  }
}

pub(crate) fn print_type(ty: &TypeExpr) -> String {
  match ty {
    TypeExpr::Unknown => "unknown".to_string(),
    TypeExpr::Never => "never".to_string(),
    TypeExpr::Null => "null".to_string(),
    TypeExpr::Boolean => "boolean".to_string(),
    TypeExpr::Number => "number".to_string(),
    TypeExpr::String => "string".to_string(),
    TypeExpr::Literal(literal) => print_literal(literal),
    TypeExpr::Reference(path) => path.iter().join("."),
    TypeExpr::NonNullable(inner) => format!("NonNullable<{}>", print_type(inner)),
    TypeExpr::Union(members) => members.iter().map(print_type).join(" | "),
    TypeExpr::Intersection(members) => members
      .iter()
      .map(|member| match member {
        TypeExpr::Union(_) => format!("({})", print_type(member)),
        _ => print_type(member),
      })
      .join(" & "),
    TypeExpr::Array(element) => print_array(element),
    TypeExpr::Tuple(tuple) => print_tuple(tuple),
    TypeExpr::Object(object) => print_object(object),
  }
}

fn print_literal(literal: &Literal) -> String {
  match literal {
    Literal::Boolean(flag) => flag.to_string(),
    Literal::Number(number) => number.to_string(),
    Literal::String(text) => serde_json::Value::String(text.clone()).to_string(),
  }
}

fn print_array(element: &TypeExpr) -> String {
  match element {
    TypeExpr::Union(_) | TypeExpr::Intersection(_) => format!("({})[]", print_type(element)),
    _ => format!("{}[]", print_type(element)),
  }
}

fn print_tuple(tuple: &TupleType) -> String {
  let elements = tuple
    .elements
    .iter()
    .map(print_type)
    .chain(tuple.rest.iter().map(|rest| format!("...{}", print_array(rest))))
    .join(", ");
  format!("[{elements}]")
}

fn print_object(object: &ObjectType) -> String {
  if object.is_empty() {
    return "{}".to_string();
  }

  let members = object
    .properties
    .iter()
    .map(print_property)
    .chain(object.index.as_deref().map(print_index))
    .join("; ");
  format!("{{ {members} }}")
}

fn print_property(property: &PropertySignature) -> String {
  let readonly = if property.readonly { "readonly " } else { "" };
  let optional = if property.optional { "?" } else { "" };
  format!("{readonly}{}{optional}: {}", property_key(&property.name), print_type(&property.ty))
}

fn print_index(index: &IndexSignature) -> String {
  let readonly = if index.readonly { "readonly " } else { "" };
  let ty = if index.optional && index.ty != TypeExpr::Unknown {
    format!("{} | undefined", print_type(&index.ty))
  } else {
    print_type(&index.ty)
  };
  format!("{readonly}[key: string]: {ty}")
}
