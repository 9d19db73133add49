mod config;
mod drag;
mod drop_index;
mod error;
mod mutator;
mod node;
mod tree;
mod value;

pub use crate::config::*;
pub use crate::drag::*;
pub use crate::drop_index::drop_index_from_offset;
pub use crate::error::*;
pub use crate::mutator::*;
pub use crate::node::*;
pub use crate::tree::*;
pub use crate::value::*;
