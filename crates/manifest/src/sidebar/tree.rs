//! Navigation tree types and read-only queries.
//!
//! Trees are built once by [`super::load`] and never mutated afterwards.
//! Renderers walk them with [`NavigationTree::iter`] or use the derived
//! queries (document order, previous/next, breadcrumbs).

use indexmap::IndexMap;
use serde::Serialize;

/// A single navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavigationNode {
    /// Reference to a content document by id (e.g. "getting-started/index").
    Leaf(String),
    /// Labelled, ordered set of child entries.
    Group(Group),
}

impl NavigationNode {
    pub fn leaf(doc_id: impl Into<String>) -> Self {
        Self::Leaf(doc_id.into())
    }

    pub fn group(label: impl Into<String>, items: Vec<NavigationNode>) -> Self {
        Self::Group(Group {
            label: label.into(),
            items,
            collapsed: None,
        })
    }

    /// The document id if this is a leaf.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(id) => Some(id),
            Self::Group(_) => None,
        }
    }

    /// The group if this is a group.
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Leaf(_) => None,
            Self::Group(group) => Some(group),
        }
    }
}

/// A labelled group of navigation entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    label: String,
    items: Vec<NavigationNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    collapsed: Option<bool>,
}

impl Group {
    pub(crate) fn new(label: String, items: Vec<NavigationNode>, collapsed: Option<bool>) -> Self {
        Self {
            label,
            items,
            collapsed,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn items(&self) -> &[NavigationNode] {
        &self.items
    }

    /// Collapse hint for the renderer; `None` leaves the choice to it.
    pub fn collapsed(&self) -> Option<bool> {
        self.collapsed
    }

    /// Copy of this group with an explicit collapse hint.
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }
}

/// Documents adjacent to a given document in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors<'a> {
    pub previous: Option<&'a str>,
    pub next: Option<&'a str>,
}

/// An ordered, validated navigation tree.
///
/// Declared order is rendered order; nothing here sorts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct NavigationTree {
    nodes: Vec<NavigationNode>,
}

impl NavigationTree {
    pub(crate) fn new(nodes: Vec<NavigationNode>) -> Self {
        Self { nodes }
    }

    /// Top-level entries in declared order.
    pub fn nodes(&self) -> &[NavigationNode] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = &NavigationNode> {
        self.nodes.iter()
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Document ids in depth-first declared order (reading order).
    pub fn doc_ids(&self) -> Vec<&str> {
        self.leaves().into_iter().map(|(id, _)| id).collect()
    }

    /// Total number of documents referenced, at any depth.
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    pub fn contains(&self, doc_id: &str) -> bool {
        self.leaves().iter().any(|(id, _)| *id == doc_id)
    }

    /// Previous and next documents in reading order.
    ///
    /// Returns `None` if the document is not in this tree.
    pub fn neighbors(&self, doc_id: &str) -> Option<Neighbors<'_>> {
        let ids = self.doc_ids();
        let pos = ids.iter().position(|id| *id == doc_id)?;

        Some(Neighbors {
            previous: pos.checked_sub(1).map(|i| ids[i]),
            next: ids.get(pos + 1).copied(),
        })
    }

    /// Labels of the groups enclosing a document, outermost first.
    ///
    /// A top-level document has an empty trail. Returns `None` if the
    /// document is not in this tree.
    pub fn breadcrumbs(&self, doc_id: &str) -> Option<Vec<&str>> {
        self.leaves()
            .into_iter()
            .find(|(id, _)| *id == doc_id)
            .map(|(_, trail)| trail)
    }

    /// Every leaf with the labels of its enclosing groups.
    fn leaves(&self) -> Vec<(&str, Vec<&str>)> {
        let mut out = Vec::new();
        let mut trail = Vec::new();
        collect_leaves(&self.nodes, &mut trail, &mut out);
        out
    }
}

fn collect_leaves<'a>(
    nodes: &'a [NavigationNode],
    trail: &mut Vec<&'a str>,
    out: &mut Vec<(&'a str, Vec<&'a str>)>,
) {
    for node in nodes {
        match node {
            NavigationNode::Leaf(id) => out.push((id.as_str(), trail.clone())),
            NavigationNode::Group(group) => {
                trail.push(group.label.as_str());
                collect_leaves(&group.items, trail, out);
                trail.pop();
            }
        }
    }
}

/// Named navigation trees declared together in one manifest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct SidebarSet {
    sidebars: IndexMap<String, NavigationTree>,
}

impl SidebarSet {
    pub(crate) fn new(sidebars: IndexMap<String, NavigationTree>) -> Self {
        Self { sidebars }
    }

    /// Get a sidebar by name.
    pub fn get(&self, name: &str) -> Option<&NavigationTree> {
        self.sidebars.get(name)
    }

    /// Sidebar names in declared order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sidebars.keys().map(String::as_str)
    }

    /// Sidebars in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NavigationTree)> {
        self.sidebars.iter().map(|(name, tree)| (name.as_str(), tree))
    }

    /// Sidebar containing the given document, first match in declared order.
    pub fn sidebar_of(&self, doc_id: &str) -> Option<&str> {
        self.iter()
            .find(|(_, tree)| tree.contains(doc_id))
            .map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }
}
