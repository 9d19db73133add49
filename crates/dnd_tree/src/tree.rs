use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::{ReorderPolicy, ReparentPolicy};
use crate::drop_index::{insertion_index, target_index};
use crate::error::{Result, TreeError};
use crate::node::{Leaf, NodeId, Parent, PlaceholderId, TopLevel};

/// A two-level ordered tree: top-level containers holding ordered leaves.
///
/// Every operation validates before it mutates, so an `Err` always leaves the tree as
/// it was. Placeholder entries only exist while a leaf drag is in progress.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TopLevel>", into = "Vec<TopLevel>")]
pub struct Tree {
    entries: Vec<TopLevel>,
}

impl TryFrom<Vec<TopLevel>> for Tree {
    type Error = TreeError;

    fn try_from(entries: Vec<TopLevel>) -> Result<Self> {
        // Placeholders never outlive a drag, so they are not restored.
        Self::from_parents(entries.into_iter().filter_map(|entry| match entry {
            TopLevel::Real(parent) => Some(parent),
            TopLevel::Placeholder { .. } => None,
        }))
    }
}

impl From<Tree> for Vec<TopLevel> {
    fn from(tree: Tree) -> Self {
        tree.entries
    }
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree, rejecting any id used more than once across parents and leaves.
    pub fn from_parents(parents: impl IntoIterator<Item = Parent>) -> Result<Self> {
        let entries: Vec<TopLevel> = parents.into_iter().map(TopLevel::Real).collect();
        let mut seen = HashSet::new();
        for parent in entries.iter().filter_map(TopLevel::as_parent) {
            for id in std::iter::once(&parent.id).chain(parent.child_ids()) {
                if !seen.insert(id.clone()) {
                    return Err(TreeError::DuplicateId(id.clone()));
                }
            }
        }
        Ok(Self { entries })
    }

    /// The data the tree is seeded with when nothing else is provided.
    pub fn sample() -> Self {
        Self {
            entries: vec![
                Parent::new(1u64, "Parent 1")
                    .child(Leaf::new(2u64, "Child 1"))
                    .child(Leaf::new(3u64, "Child 2"))
                    .into(),
                Parent::new(4u64, "Parent 4")
                    .child(Leaf::new(5u64, "Child 3"))
                    .child(Leaf::new(6u64, "Child 4"))
                    .into(),
                Parent::new(7u64, "Parent 7").into(),
            ],
        }
    }

    pub fn entries(&self) -> &[TopLevel] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn parents(&self) -> impl Iterator<Item = &Parent> {
        self.entries.iter().filter_map(TopLevel::as_parent)
    }

    pub fn parent(&self, id: &NodeId) -> Option<&Parent> {
        self.parents().find(|parent| parent.id == *id)
    }

    /// Position of a real parent in the top-level sequence.
    pub fn parent_index(&self, id: &NodeId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.as_parent().is_some_and(|parent| parent.id == *id))
    }

    /// Locate a leaf, returning its parent's id and its index among that parent's children.
    pub fn find_leaf(&self, id: &NodeId) -> Option<(NodeId, usize)> {
        self.parents().find_map(|parent| {
            parent
                .children
                .iter()
                .position(|child| child.id == *id)
                .map(|index| (parent.id.clone(), index))
        })
    }

    pub fn leaf_count(&self) -> usize {
        self.parents().map(|parent| parent.children.len()).sum()
    }

    pub fn has_placeholders(&self) -> bool {
        self.entries.iter().any(TopLevel::is_placeholder)
    }

    pub fn placeholder_index(&self, id: PlaceholderId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.placeholder_id() == Some(id))
    }

    fn resolve_parent(&self, id: &NodeId) -> Result<usize> {
        self.parent_index(id)
            .ok_or_else(|| TreeError::ParentNotFound(id.clone()))
    }

    fn parent_at_mut(&mut self, ix: usize, id: &NodeId) -> Result<&mut Parent> {
        self.entries
            .get_mut(ix)
            .and_then(TopLevel::as_parent_mut)
            .ok_or_else(|| TreeError::ParentNotFound(id.clone()))
    }

    /// Reorder the top-level sequence. `to_index` is clamped into range.
    pub fn move_parent(
        &mut self,
        from_index: usize,
        to_index: usize,
        policy: ReorderPolicy,
    ) -> Result<()> {
        let len = self.entries.len();
        if from_index >= len {
            return Err(TreeError::InvalidIndex {
                index: from_index,
                len,
            });
        }
        let to_index = target_index(to_index, len);
        if self.entries[from_index].is_placeholder() || self.entries[to_index].is_placeholder() {
            return Err(TreeError::PlaceholderTarget);
        }
        if from_index == to_index {
            return Ok(());
        }

        match policy {
            ReorderPolicy::Shift => {
                let entry = self.entries.remove(from_index);
                self.entries.insert(to_index, entry);
            }
            ReorderPolicy::Swap => self.entries.swap(from_index, to_index),
        }
        Ok(())
    }

    /// Move a leaf within its parent or into another parent.
    ///
    /// `to_index` is read against the target sequence after the leaf has been removed,
    /// and indices past the end append.
    pub fn move_child(
        &mut self,
        from_parent: &NodeId,
        to_parent: &NodeId,
        from_index: usize,
        to_index: usize,
        policy: ReorderPolicy,
    ) -> Result<()> {
        let from_ix = self.resolve_parent(from_parent)?;
        let to_ix = self.resolve_parent(to_parent)?;

        let source = self.parent_at_mut(from_ix, from_parent)?;
        let len = source.children.len();
        if from_index >= len {
            return Err(TreeError::InvalidIndex {
                index: from_index,
                len,
            });
        }

        if from_ix == to_ix {
            let children = &mut source.children;
            match policy {
                ReorderPolicy::Shift => {
                    let leaf = children.remove(from_index);
                    let to_index = insertion_index(to_index, children.len());
                    children.insert(to_index, leaf);
                }
                ReorderPolicy::Swap => {
                    let to_index = target_index(to_index, children.len());
                    children.swap(from_index, to_index);
                }
            }
            return Ok(());
        }

        let leaf = source.children.remove(from_index);
        let target = self.parent_at_mut(to_ix, to_parent)?;
        let to_index = insertion_index(to_index, target.children.len());
        target.children.insert(to_index, leaf);
        Ok(())
    }

    /// Demote a childless top-level node into a leaf of `to_parent`.
    pub fn move_parent_to_child(
        &mut self,
        from_parent: &NodeId,
        to_parent: &NodeId,
        policy: ReparentPolicy,
        label: &str,
    ) -> Result<()> {
        if from_parent == to_parent {
            return Err(TreeError::InvalidTarget);
        }
        let from_ix = self.resolve_parent(from_parent)?;
        let to_ix = self.resolve_parent(to_parent)?;

        if !self.parent_at_mut(from_ix, from_parent)?.is_empty() {
            return Err(TreeError::ParentNotEmpty(from_parent.clone()));
        }
        if policy == ReparentPolicy::Replace && !self.parent_at_mut(to_ix, to_parent)?.is_empty() {
            return Err(TreeError::ParentNotEmpty(to_parent.clone()));
        }

        let TopLevel::Real(source) = self.entries.remove(from_ix) else {
            return Err(TreeError::ParentNotFound(from_parent.clone()));
        };
        let leaf = Leaf::new(source.id, label);

        let to_ix = if to_ix > from_ix { to_ix - 1 } else { to_ix };
        let target = self.parent_at_mut(to_ix, to_parent)?;
        match policy {
            ReparentPolicy::Append => target.children.push(leaf),
            ReparentPolicy::Replace => target.children = vec![leaf],
        }
        Ok(())
    }

    /// Promote a leaf into a new, empty top-level node at a placeholder's position.
    ///
    /// The new node takes the leaf's id and label. Returns that id.
    pub fn move_child_to_placeholder(
        &mut self,
        from_parent: &NodeId,
        from_index: usize,
        placeholder: PlaceholderId,
    ) -> Result<NodeId> {
        let from_ix = self.resolve_parent(from_parent)?;
        let placeholder_ix = self
            .placeholder_index(placeholder)
            .ok_or(TreeError::PlaceholderTarget)?;

        let source = self.parent_at_mut(from_ix, from_parent)?;
        let len = source.children.len();
        if from_index >= len {
            return Err(TreeError::InvalidIndex {
                index: from_index,
                len,
            });
        }

        let leaf = source.children.remove(from_index);
        let id = leaf.id.clone();
        self.entries[placeholder_ix] = TopLevel::Real(Parent::new(leaf.id, leaf.label));
        Ok(id)
    }

    /// Interleave placeholders: one before the first parent and one after every parent.
    pub(crate) fn insert_placeholders(&mut self) {
        self.remove_placeholders();
        let mut next = 0;
        let mut placeholder = || {
            let id = PlaceholderId(next);
            next += 1;
            TopLevel::Placeholder { id }
        };

        let mut entries = Vec::with_capacity(self.entries.len() * 2 + 1);
        entries.push(placeholder());
        for entry in self.entries.drain(..) {
            entries.push(entry);
            entries.push(placeholder());
        }
        self.entries = entries;
    }

    pub(crate) fn remove_placeholders(&mut self) {
        self.entries.retain(|entry| !entry.is_placeholder());
    }
}
