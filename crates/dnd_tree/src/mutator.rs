use std::sync::Arc;

use crate::config::{CommitMode, MutatorConfig};
use crate::drag::{DragKind, DragPayload, DragState, DropTarget, NodeRef};
use crate::drop_index::drop_index_from_offset;
use crate::error::{Result, TreeError};
use crate::node::{NodeId, PlaceholderId};
use crate::tree::Tree;

fn refused<T>(op: &'static str, err: TreeError) -> Result<T> {
    tracing::warn!(op, %err, "tree operation refused");
    Err(err)
}

/// Owns the tree and applies moves to it, either directly or from drag events.
///
/// Each successful transition replaces the snapshot wholesale, so an `Arc<Tree>`
/// handed out by [`TreeMutator::snapshot`] never changes underneath its holder.
pub struct TreeMutator {
    tree: Arc<Tree>,
    config: MutatorConfig,
    drag: DragState,
    before_drag: Option<Arc<Tree>>,
}

impl Default for TreeMutator {
    fn default() -> Self {
        Self::new(Tree::sample())
    }
}

impl TreeMutator {
    pub fn new(tree: Tree) -> Self {
        Self {
            tree: Arc::new(tree),
            config: MutatorConfig::default(),
            drag: DragState::Idle,
            before_drag: None,
        }
    }

    pub fn with_config(mut self, config: MutatorConfig) -> Self {
        self.config = config.with_defaults();
        self
    }

    pub fn config(&self) -> &MutatorConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Arc<Tree> {
        self.tree.clone()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Child index for a pointer offset inside a container, using the configured row height.
    pub fn drop_index(&self, offset_y: f32) -> usize {
        drop_index_from_offset(offset_y, self.config.row_height)
    }

    fn commit<T>(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut Tree) -> Result<T>,
    ) -> Result<T> {
        let mut next = Tree::clone(&self.tree);
        match f(&mut next) {
            Ok(value) => {
                self.tree = Arc::new(next);
                Ok(value)
            }
            Err(err) => refused(op, err),
        }
    }

    fn ensure_idle(&self, op: &'static str) -> Result<()> {
        if self.drag.is_idle() {
            Ok(())
        } else {
            refused(op, TreeError::DragInProgress)
        }
    }

    /// Reorder the top-level sequence. Refused while a drag is in progress.
    pub fn move_parent(&mut self, from_index: usize, to_index: usize) -> Result<()> {
        self.ensure_idle("move_parent")?;
        self.apply_move_parent(from_index, to_index)
    }

    /// Move a leaf within or across parents. Refused while a drag is in progress.
    pub fn move_child(
        &mut self,
        from_parent: &NodeId,
        to_parent: &NodeId,
        from_index: usize,
        to_index: usize,
    ) -> Result<()> {
        self.ensure_idle("move_child")?;
        self.apply_move_child(from_parent, to_parent, from_index, to_index)
    }

    /// Demote a childless parent into a leaf. Refused while a drag is in progress.
    pub fn move_parent_to_child(&mut self, from_parent: &NodeId, to_parent: &NodeId) -> Result<()> {
        self.ensure_idle("move_parent_to_child")?;
        self.apply_move_parent_to_child(from_parent, to_parent)
    }

    /// Promote a leaf into a new parent at a placeholder.
    ///
    /// Placeholders only exist during a leaf drag, so this is reached through [`Self::drop`].
    fn apply_move_child_to_placeholder(
        &mut self,
        from_parent: &NodeId,
        from_index: usize,
        placeholder: PlaceholderId,
    ) -> Result<NodeId> {
        let id = self.commit("move_child_to_placeholder", |tree| {
            tree.move_child_to_placeholder(from_parent, from_index, placeholder)
        })?;
        tracing::debug!(%from_parent, from_index, %id, "promoted child into parent");
        Ok(id)
    }

    fn apply_move_parent(&mut self, from_index: usize, to_index: usize) -> Result<()> {
        let policy = self.config.reorder;
        self.commit("move_parent", |tree| tree.move_parent(from_index, to_index, policy))?;
        tracing::debug!(from_index, to_index, ?policy, "moved parent");
        Ok(())
    }

    fn apply_move_child(
        &mut self,
        from_parent: &NodeId,
        to_parent: &NodeId,
        from_index: usize,
        to_index: usize,
    ) -> Result<()> {
        let policy = self.config.reorder;
        self.commit("move_child", |tree| {
            tree.move_child(from_parent, to_parent, from_index, to_index, policy)
        })?;
        tracing::debug!(
            %from_parent,
            %to_parent,
            from_index,
            to_index,
            "moved child"
        );
        Ok(())
    }

    fn apply_move_parent_to_child(
        &mut self,
        from_parent: &NodeId,
        to_parent: &NodeId,
    ) -> Result<()> {
        let policy = self.config.reparent;
        let label = self.config.placeholder_label.clone();
        self.commit("move_parent_to_child", |tree| {
            tree.move_parent_to_child(from_parent, to_parent, policy, &label)
        })?;
        tracing::debug!(%from_parent, %to_parent, ?policy, "demoted parent into child");
        Ok(())
    }

    /// Begin a drag on `node`. Leaf drags materialise placeholder containers.
    pub fn drag_start(&mut self, node: NodeRef) -> Result<DragPayload> {
        if !self.drag.is_idle() {
            return refused("drag_start", TreeError::DragInProgress);
        }

        let payload = match node {
            NodeRef::Parent(id) => {
                let Some(index) = self.tree.parent_index(&id) else {
                    return refused("drag_start", TreeError::ParentNotFound(id));
                };
                DragPayload {
                    kind: DragKind::Parent,
                    id,
                    index,
                    parent_id: None,
                }
            }
            NodeRef::Child(id) => {
                let Some((parent_id, index)) = self.tree.find_leaf(&id) else {
                    return refused("drag_start", TreeError::LeafNotFound(id));
                };
                DragPayload {
                    kind: DragKind::Child,
                    id,
                    index,
                    parent_id: Some(parent_id),
                }
            }
        };

        self.before_drag = Some(self.tree.clone());
        if payload.kind == DragKind::Child && self.config.placeholders {
            let mut next = Tree::clone(&self.tree);
            next.insert_placeholders();
            self.tree = Arc::new(next);
        }

        tracing::debug!(
            id = %payload.id,
            kind = ?payload.kind,
            index = payload.index,
            "drag started"
        );
        self.drag = DragState::dragging(payload.clone());
        Ok(payload)
    }

    /// Record the hovered target. With [`CommitMode::OnHover`] the move is applied live.
    pub fn hover(&mut self, target: DropTarget) -> Result<()> {
        let Some(payload) = self.drag.payload().cloned() else {
            return refused("hover", TreeError::NoActiveDrag);
        };
        tracing::trace!(id = %payload.id, ?target, "hover");
        self.drag.set_hover(target.clone());

        if self.config.commit != CommitMode::OnHover {
            return Ok(());
        }

        match (payload.kind, &target) {
            (DragKind::Child, DropTarget::Child(target_id)) if *target_id != payload.id => {
                let Some((to_parent, to_index)) = self.tree.find_leaf(target_id) else {
                    return refused("hover", TreeError::LeafNotFound(target_id.clone()));
                };
                let Some(from_parent) = payload.parent_id.as_ref() else {
                    return refused("hover", TreeError::ParentNotFound(payload.id.clone()));
                };
                self.apply_move_child(from_parent, &to_parent, payload.index, to_index)?;
            }
            (DragKind::Parent, DropTarget::Parent(target_id)) if *target_id != payload.id => {
                let Some(to_index) = self.tree.parent_index(target_id) else {
                    return refused("hover", TreeError::ParentNotFound(target_id.clone()));
                };
                self.apply_move_parent(payload.index, to_index)?;
            }
            _ => return Ok(()),
        }

        self.drag.set_committed(target);
        self.track_dragged_node();
        Ok(())
    }

    fn track_dragged_node(&mut self) {
        let Some(payload) = self.drag.payload_mut() else {
            return;
        };
        match payload.kind {
            DragKind::Child => {
                if let Some((parent_id, index)) = self.tree.find_leaf(&payload.id) {
                    payload.parent_id = Some(parent_id);
                    payload.index = index;
                }
            }
            DragKind::Parent => {
                if let Some(index) = self.tree.parent_index(&payload.id) {
                    payload.index = index;
                }
            }
        }
    }

    /// Finish the drag on `target`. Placeholders are removed whether or not the drop applies.
    ///
    /// `offset_y` is the pointer's offset inside a parent container; without it a leaf
    /// dropped on a parent is appended.
    pub fn drop(&mut self, target: DropTarget, offset_y: Option<f32>) -> Result<()> {
        let Some(payload) = self.drag.payload().cloned() else {
            return refused("drop", TreeError::NoActiveDrag);
        };
        // A move hover already applied for this exact target is not applied twice.
        let result = if self.drag.committed() == Some(&target) {
            Ok(())
        } else {
            self.apply_drop(&payload, &target, offset_y)
        };
        self.end_drag();
        tracing::debug!(id = %payload.id, ?target, ok = result.is_ok(), "drag ended with drop");
        result
    }

    fn apply_drop(
        &mut self,
        payload: &DragPayload,
        target: &DropTarget,
        offset_y: Option<f32>,
    ) -> Result<()> {
        match (payload.kind, target) {
            (DragKind::Child, DropTarget::Child(target_id)) => {
                if *target_id == payload.id {
                    return Ok(());
                }
                let Some((to_parent, to_index)) = self.tree.find_leaf(target_id) else {
                    return refused("drop", TreeError::LeafNotFound(target_id.clone()));
                };
                let from_parent = self.payload_parent(payload)?;
                self.apply_move_child(&from_parent, &to_parent, payload.index, to_index)
            }
            (DragKind::Child, DropTarget::Parent(to_parent)) => {
                let to_index = match offset_y {
                    Some(offset_y) => self.drop_index(offset_y),
                    None => self
                        .tree
                        .parent(to_parent)
                        .map_or(0, |parent| parent.children.len()),
                };
                let from_parent = self.payload_parent(payload)?;
                self.apply_move_child(&from_parent, to_parent, payload.index, to_index)
            }
            (DragKind::Child, DropTarget::Placeholder(placeholder)) => {
                let from_parent = self.payload_parent(payload)?;
                self.apply_move_child_to_placeholder(&from_parent, payload.index, *placeholder)
                    .map(|_| ())
            }
            (DragKind::Parent, DropTarget::Parent(target_id)) => {
                if *target_id == payload.id {
                    return Ok(());
                }
                let Some(to_index) = self.tree.parent_index(target_id) else {
                    return refused("drop", TreeError::ParentNotFound(target_id.clone()));
                };
                self.apply_move_parent(payload.index, to_index)
            }
            (DragKind::Parent, DropTarget::Child(target_id)) => {
                let Some((to_parent, _)) = self.tree.find_leaf(target_id) else {
                    return refused("drop", TreeError::LeafNotFound(target_id.clone()));
                };
                self.apply_move_parent_to_child(&payload.id, &to_parent)
            }
            (DragKind::Parent, DropTarget::Placeholder(_)) => {
                refused("drop", TreeError::PlaceholderTarget)
            }
        }
    }

    fn payload_parent(&self, payload: &DragPayload) -> Result<NodeId> {
        match &payload.parent_id {
            Some(parent_id) => Ok(parent_id.clone()),
            None => refused("drop", TreeError::ParentNotFound(payload.id.clone())),
        }
    }

    /// Abandon the drag, restoring the tree as it was when the drag started.
    pub fn cancel(&mut self) -> Result<()> {
        if self.drag.is_idle() {
            return refused("cancel", TreeError::NoActiveDrag);
        }
        if let Some(tree) = self.before_drag.take() {
            self.tree = tree;
        }
        self.end_drag();
        tracing::debug!("drag cancelled");
        Ok(())
    }

    fn end_drag(&mut self) {
        self.drag = DragState::Idle;
        self.before_drag = None;
        if self.tree.has_placeholders() {
            let mut next = Tree::clone(&self.tree);
            next.remove_placeholders();
            self.tree = Arc::new(next);
        }
    }
}
