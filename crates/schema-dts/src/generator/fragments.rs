//! Fragments are the unit of generated output.
//!
//! Every fragment is keyed by a reference string. Concrete fragments supersede
//! [`Fragment::Assumed`] placeholders sharing their reference, and placeholders for the
//! same reference collapse to one, so merging is idempotent whatever the arrival order.

use std::mem;

use strum::EnumDiscriminants;

use crate::generator::{
  ast::{EnumDecl, TypeExpr},
  metrics::GenerationWarning,
};

#[derive(Debug, Clone, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(FragmentKind), derive(Hash))]
pub(crate) enum Fragment {
  /// A complete, self-contained declaration.
  Statement(StatementFragment),
  /// A declaration inside a namespace bucket.
  DeclarationMember(DeclarationMemberFragment),
  /// A member of the object type named after its enclosing namespace.
  InterfaceMember(InterfaceMemberFragment),
  /// A reference that must eventually be translated.
  Assumed(AssumedFragment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatementFragment {
  pub reference: String,
  pub name: String,
  pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DeclarationMemberFragment {
  pub reference: String,
  pub namespace: Vec<String>,
  pub payload: DeclarationPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InterfaceMemberFragment {
  pub reference: String,
  pub namespace: Vec<String>,
  pub optional: bool,
  pub payload: MemberPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AssumedFragment {
  pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DeclarationPayload {
  Type(TypeExpr),
  Enum(EnumDecl),
  Redirect(Redirect),
  /// The declaration is the object type formed by the interface members stored
  /// under its own namespace path.
  Alias,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MemberPayload {
  Type(TypeExpr),
  Redirect(Redirect),
  /// The member is a nested object formed by the interface members stored under the
  /// member's own namespace path.
  Alias,
}

/// Points at another fragment's reference and carries the namespace path it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Redirect {
  pub reference: String,
  pub target: Vec<String>,
}

impl Redirect {
  pub(crate) fn new(reference: impl Into<String>, target: Vec<String>) -> Self {
    Self {
      reference: reference.into(),
      target,
    }
  }

  pub(crate) fn to_type(&self) -> TypeExpr {
    TypeExpr::Reference(self.target.clone())
  }
}

impl Fragment {
  pub(crate) fn assumed(reference: impl Into<String>) -> Self {
    Self::Assumed(AssumedFragment {
      reference: reference.into(),
    })
  }

  pub(crate) fn declaration(reference: impl Into<String>, namespace: Vec<String>, payload: DeclarationPayload) -> Self {
    Self::DeclarationMember(DeclarationMemberFragment {
      reference: reference.into(),
      namespace,
      payload,
    })
  }

  pub(crate) fn member(
    reference: impl Into<String>,
    namespace: Vec<String>,
    optional: bool,
    payload: MemberPayload,
  ) -> Self {
    Self::InterfaceMember(InterfaceMemberFragment {
      reference: reference.into(),
      namespace,
      optional,
      payload,
    })
  }

  pub(crate) fn reference(&self) -> &str {
    match self {
      Self::Statement(fragment) => &fragment.reference,
      Self::DeclarationMember(fragment) => &fragment.reference,
      Self::InterfaceMember(fragment) => &fragment.reference,
      Self::Assumed(fragment) => &fragment.reference,
    }
  }

  pub(crate) fn kind(&self) -> FragmentKind {
    FragmentKind::from(self)
  }

  pub(crate) fn is_assumed(&self) -> bool {
    matches!(self, Self::Assumed(_))
  }

  /// Namespace path the fragment is grouped under; statements live at the root.
  pub(crate) fn namespace(&self) -> &[String] {
    match self {
      Self::DeclarationMember(fragment) => &fragment.namespace,
      Self::InterfaceMember(fragment) => &fragment.namespace,
      Self::Statement(_) | Self::Assumed(_) => &[],
    }
  }
}

/// Merges `incoming` into `existing`.
///
/// A concrete fragment replaces any fragment already stored under its reference and is
/// appended; an assumed fragment is appended only when nothing is stored under its
/// reference yet.
pub(crate) fn combine_fragments(existing: Vec<Fragment>, incoming: impl IntoIterator<Item = Fragment>) -> Vec<Fragment> {
  incoming.into_iter().fold(existing, |mut store, fragment| {
    if fragment.is_assumed() {
      if !assume_ref(&store, fragment.reference()) {
        store.push(fragment);
      }
    } else {
      store.retain(|stored| stored.reference() != fragment.reference());
      store.push(fragment);
    }
    store
  })
}

/// Whether any fragment, concrete or assumed, is stored under `reference`.
pub(crate) fn assume_ref(store: &[Fragment], reference: &str) -> bool {
  store.iter().any(|fragment| fragment.reference() == reference)
}

pub(crate) fn find_fragments(kind: FragmentKind, store: &[Fragment]) -> impl Iterator<Item = &Fragment> {
  store.iter().filter(move |fragment| fragment.kind() == kind)
}

/// Fragments accumulated by a translation step, with the warnings raised along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FragmentSet {
  pub fragments: Vec<Fragment>,
  pub warnings: Vec<GenerationWarning>,
  /// Operation ids visited while producing the fragments.
  pub operations: Vec<String>,
}

impl FragmentSet {
  pub(crate) fn push(&mut self, fragment: Fragment) {
    self.fragments = combine_fragments(mem::take(&mut self.fragments), [fragment]);
  }

  pub(crate) fn warn(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }

  pub(crate) fn extend(&mut self, other: FragmentSet) {
    self.fragments = combine_fragments(mem::take(&mut self.fragments), other.fragments);
    self.warnings.extend(other.warnings);
    for operation in other.operations {
      if !self.operations.contains(&operation) {
        self.operations.push(operation);
      }
    }
  }

  /// Moves the fragments and warnings of a schema translation in and hands back its types.
  pub(crate) fn absorb(&mut self, translation: Translation) -> Vec<TypeExpr> {
    self.extend(translation.emitted);
    translation.types
  }

  pub(crate) fn assumed_refs(&self) -> impl Iterator<Item = &str> {
    find_fragments(FragmentKind::Assumed, &self.fragments).map(Fragment::reference)
  }
}

/// Result of translating one schema: the alternative types it denotes plus whatever
/// side fragments the translation produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Translation {
  pub types: Vec<TypeExpr>,
  pub emitted: FragmentSet,
}

impl Translation {
  pub(crate) fn of(ty: TypeExpr) -> Self {
    Self {
      types: vec![ty],
      emitted: FragmentSet::default(),
    }
  }

  pub(crate) fn many(types: Vec<TypeExpr>) -> Self {
    Self {
      types,
      emitted: FragmentSet::default(),
    }
  }

  pub(crate) fn with_fragment(mut self, fragment: Fragment) -> Self {
    self.emitted.push(fragment);
    self
  }

  pub(crate) fn with_warning(mut self, warning: GenerationWarning) -> Self {
    self.emitted.warn(warning);
    self
  }

  /// Moves the fragments and warnings of `other` in and hands back its types.
  pub(crate) fn absorb(&mut self, other: Translation) -> Vec<TypeExpr> {
    self.emitted.absorb(other)
  }

  /// All alternatives of the translation as one type.
  pub(crate) fn union_type(&self) -> TypeExpr {
    TypeExpr::union_of(self.types.iter().cloned())
  }
}
