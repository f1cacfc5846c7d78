use indexmap::IndexMap;

use crate::generator::fragments::Fragment;

/// Fragments grouped by namespace path.
///
/// A fragment with namespace `[A, B, C]` is stored as member `C` of node `A.B`;
/// statements sit on the root node. Assumed fragments are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct NamespaceNode {
  pub name: String,
  pub children: IndexMap<String, NamespaceNode>,
  pub members: Vec<Fragment>,
}

impl NamespaceNode {
  fn named(name: &str) -> Self {
    Self {
      name: name.to_string(),
      ..Self::default()
    }
  }

  pub(crate) fn build<'f>(fragments: impl IntoIterator<Item = &'f Fragment>) -> Self {
    let mut root = Self::default();
    for fragment in fragments.into_iter().filter(|fragment| !fragment.is_assumed()) {
      let namespace = fragment.namespace();
      let parent = namespace.split_last().map_or(&[][..], |(_, parent)| parent);
      root.node_mut(parent).members.push(fragment.clone());
    }
    root
  }

  /// The node at `path`, created along with its ancestors when missing.
  fn node_mut(&mut self, path: &[String]) -> &mut Self {
    path.iter().fold(self, |node, segment| {
      node
        .children
        .entry(segment.clone())
        .or_insert_with(|| Self::named(segment))
    })
  }

  pub(crate) fn child(&self, name: &str) -> Option<&Self> {
    self.children.get(name)
  }

  pub(crate) fn find(&self, path: &[String]) -> Option<&Self> {
    path.iter().try_fold(self, |node, segment| node.child(segment))
  }

  /// Whether this subtree holds anything besides interface members, which only
  /// ever print inside the object of their owning alias.
  pub(crate) fn has_declarations(&self) -> bool {
    self
      .members
      .iter()
      .any(|member| !matches!(member, Fragment::InterfaceMember(_)))
      || self.children.values().any(Self::has_declarations)
  }
}
