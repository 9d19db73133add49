use serde::{Deserialize, Serialize};

use crate::tree::Tree;

const DEFAULT_SCHEMA: &str = "dnd-tree";
const DEFAULT_VERSION: u32 = 1;

fn default_schema() -> String {
    DEFAULT_SCHEMA.to_string()
}

fn default_version() -> u32 {
    DEFAULT_VERSION
}

/// JSON interchange form of a tree snapshot, used to seed or inspect a mutator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeValue {
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default = "default_version")]
    pub version: u32,
    pub tree: Tree,
}

impl TreeValue {
    pub fn from_tree(tree: Tree) -> Self {
        Self {
            schema: default_schema(),
            version: default_version(),
            tree,
        }
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
