use serde::{Deserialize, Serialize};

use crate::node::{NodeId, PlaceholderId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragKind {
    Parent,
    Child,
}

/// The node a gesture started on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum NodeRef {
    Parent(NodeId),
    Child(NodeId),
}

/// What the gesture layer carries while a node is dragged.
///
/// `index` and `parent_id` describe where the node currently is; with hover commits
/// they follow the node as it moves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    pub kind: DragKind,
    pub id: NodeId,
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
}

/// Where a dragged node is hovering or being dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DropTarget {
    Parent(NodeId),
    Child(NodeId),
    Placeholder(PlaceholderId),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    DraggingLeaf {
        payload: DragPayload,
        hover: Option<DropTarget>,
        committed: Option<DropTarget>,
    },
    DraggingParent {
        payload: DragPayload,
        hover: Option<DropTarget>,
        committed: Option<DropTarget>,
    },
}

impl DragState {
    pub(crate) fn dragging(payload: DragPayload) -> Self {
        match payload.kind {
            DragKind::Child => DragState::DraggingLeaf {
                payload,
                hover: None,
                committed: None,
            },
            DragKind::Parent => DragState::DraggingParent {
                payload,
                hover: None,
                committed: None,
            },
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    pub fn payload(&self) -> Option<&DragPayload> {
        match self {
            DragState::Idle => None,
            DragState::DraggingLeaf { payload, .. } | DragState::DraggingParent { payload, .. } => {
                Some(payload)
            }
        }
    }

    pub(crate) fn payload_mut(&mut self) -> Option<&mut DragPayload> {
        match self {
            DragState::Idle => None,
            DragState::DraggingLeaf { payload, .. } | DragState::DraggingParent { payload, .. } => {
                Some(payload)
            }
        }
    }

    /// The last target hovered during the current drag.
    pub fn hover(&self) -> Option<&DropTarget> {
        match self {
            DragState::Idle => None,
            DragState::DraggingLeaf { hover, .. } | DragState::DraggingParent { hover, .. } => {
                hover.as_ref()
            }
        }
    }

    pub(crate) fn set_hover(&mut self, target: DropTarget) {
        match self {
            DragState::Idle => {}
            DragState::DraggingLeaf { hover, .. } | DragState::DraggingParent { hover, .. } => {
                *hover = Some(target);
            }
        }
    }

    /// The target whose move was last applied live by a hover commit.
    pub fn committed(&self) -> Option<&DropTarget> {
        match self {
            DragState::Idle => None,
            DragState::DraggingLeaf { committed, .. }
            | DragState::DraggingParent { committed, .. } => committed.as_ref(),
        }
    }

    pub(crate) fn set_committed(&mut self, target: DropTarget) {
        match self {
            DragState::Idle => {}
            DragState::DraggingLeaf { committed, .. }
            | DragState::DraggingParent { committed, .. } => {
                *committed = Some(target);
            }
        }
    }
}
