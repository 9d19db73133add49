use thiserror::Error;

use crate::node::NodeId;

/// A refused tree operation. The tree is left unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("parent not found: {0}")]
    ParentNotFound(NodeId),

    #[error("leaf not found: {0}")]
    LeafNotFound(NodeId),

    #[error("invalid index {index} for a sequence of length {len}")]
    InvalidIndex { index: usize, len: usize },

    #[error("parent {0} still has children")]
    ParentNotEmpty(NodeId),

    #[error("placeholders cannot be reordered or used as this drop target")]
    PlaceholderTarget,

    #[error("node cannot be moved into itself")]
    InvalidTarget,

    #[error("duplicate node id: {0}")]
    DuplicateId(NodeId),

    #[error("a drag is already in progress")]
    DragInProgress,

    #[error("no drag in progress")]
    NoActiveDrag,
}

pub type Result<T, E = TreeError> = std::result::Result<T, E>;
