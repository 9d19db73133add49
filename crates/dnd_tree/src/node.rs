use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// Key of a node in the tree.
///
/// Cloning is cheap, so ids can be handed to drag payloads and drop targets freely.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Arc<str>);

impl NodeId {
    pub fn new(id: impl Into<NodeId>) -> Self {
        id.into()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(Arc::from(id))
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(Arc::from(id.to_string()))
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// A leaf of the tree (child/item). Leaves never have children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    pub id: NodeId,
    #[serde(default)]
    pub label: String,
}

impl Leaf {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A top-level container (parent/category) with an ordered sequence of leaves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parent {
    pub id: NodeId,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub children: Vec<Leaf>,
}

impl Parent {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: Leaf) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl Into<Vec<Leaf>>) -> Self {
        self.children.extend(children.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.children.iter().map(|child| &child.id)
    }
}

/// Identity of an ephemeral drop-target container.
///
/// Allocated per drag and meaningless once the drag ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceholderId(pub u32);

/// An entry of the top-level sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopLevel {
    Real(Parent),
    Placeholder { id: PlaceholderId },
}

impl TopLevel {
    pub fn as_parent(&self) -> Option<&Parent> {
        match self {
            TopLevel::Real(parent) => Some(parent),
            TopLevel::Placeholder { .. } => None,
        }
    }

    pub(crate) fn as_parent_mut(&mut self) -> Option<&mut Parent> {
        match self {
            TopLevel::Real(parent) => Some(parent),
            TopLevel::Placeholder { .. } => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, TopLevel::Placeholder { .. })
    }

    pub fn placeholder_id(&self) -> Option<PlaceholderId> {
        match self {
            TopLevel::Placeholder { id } => Some(*id),
            TopLevel::Real(_) => None,
        }
    }
}

impl From<Parent> for TopLevel {
    fn from(parent: Parent) -> Self {
        TopLevel::Real(parent)
    }
}
