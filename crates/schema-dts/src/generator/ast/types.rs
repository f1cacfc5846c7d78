use serde_json::Number;

/// A literal type: a single value of a primitive kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Literal {
  Boolean(bool),
  Number(Number),
  String(String),
}

/// Type-expression tree produced by schema translation and consumed by the printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeExpr {
  /// The universal type, inhabited by every value.
  Unknown,
  /// The uninhabited type.
  Never,
  Null,
  Boolean,
  Number,
  String,
  Literal(Literal),
  /// A qualified reference to a declaration, one identifier per namespace level.
  Reference(Vec<String>),
  /// A primitive constrained to exclude `null`.
  NonNullable(Box<TypeExpr>),
  Union(Vec<TypeExpr>),
  Intersection(Vec<TypeExpr>),
  Array(Box<TypeExpr>),
  Tuple(TupleType),
  Object(ObjectType),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct TupleType {
  pub elements: Vec<TypeExpr>,
  /// Element type of the trailing rest array, if any.
  pub rest: Option<Box<TypeExpr>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ObjectType {
  pub properties: Vec<PropertySignature>,
  pub index: Option<Box<IndexSignature>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PropertySignature {
  pub name: String,
  pub ty: TypeExpr,
  pub optional: bool,
  pub readonly: bool,
}

/// The single string index signature an object may carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexSignature {
  pub ty: TypeExpr,
  pub optional: bool,
  pub readonly: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EnumDecl {
  pub name: String,
  pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EnumMember {
  pub name: String,
  pub value: String,
}

impl TypeExpr {
  pub(crate) fn string_literal(value: impl Into<String>) -> Self {
    Self::Literal(Literal::String(value.into()))
  }

  pub(crate) fn number_literal(value: impl Into<Number>) -> Self {
    Self::Literal(Literal::Number(value.into()))
  }

  pub(crate) fn non_nullable(inner: TypeExpr) -> Self {
    Self::NonNullable(Box::new(inner))
  }

  pub(crate) fn array_of(element: TypeExpr) -> Self {
    Self::Array(Box::new(element))
  }

  /// Builds a union, flattening nested unions and dropping duplicates while keeping the
  /// first occurrence order. An empty union is `never`, a single member stands alone.
  pub(crate) fn union_of(types: impl IntoIterator<Item = TypeExpr>) -> Self {
    let mut members = types
      .into_iter()
      .flat_map(|ty| match ty {
        Self::Union(inner) => inner,
        other => vec![other],
      })
      .fold(Vec::new(), |mut acc, ty| {
        if !acc.contains(&ty) {
          acc.push(ty);
        }
        acc
      });

    match members.len() {
      0 => Self::Never,
      1 => members.remove(0),
      _ => Self::Union(members),
    }
  }

  /// Builds an intersection with the same flattening rules as [`TypeExpr::union_of`].
  /// An empty intersection is `unknown`.
  pub(crate) fn intersection_of(types: impl IntoIterator<Item = TypeExpr>) -> Self {
    let mut members = types
      .into_iter()
      .flat_map(|ty| match ty {
        Self::Intersection(inner) => inner,
        other => vec![other],
      })
      .collect::<Vec<_>>();

    match members.len() {
      0 => Self::Unknown,
      1 => members.remove(0),
      _ => Self::Intersection(members),
    }
  }
}

impl ObjectType {
  pub(crate) fn empty() -> Self {
    Self::default()
  }

  pub(crate) fn with_property(mut self, property: PropertySignature) -> Self {
    self.properties.push(property);
    self
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.properties.is_empty() && self.index.is_none()
  }
}

impl PropertySignature {
  pub(crate) fn required(name: impl Into<String>, ty: TypeExpr) -> Self {
    Self {
      name: name.into(),
      ty,
      optional: false,
      readonly: false,
    }
  }

  pub(crate) fn optional(name: impl Into<String>, ty: TypeExpr) -> Self {
    Self {
      optional: true,
      ..Self::required(name, ty)
    }
  }
}
