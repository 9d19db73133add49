use serde::{Deserialize, Serialize};

const DEFAULT_ROW_HEIGHT: f32 = 30.;
const DEFAULT_PLACEHOLDER_LABEL: &str = "child";

fn default_row_height() -> f32 {
    DEFAULT_ROW_HEIGHT
}

fn default_placeholder_label() -> String {
    DEFAULT_PLACEHOLDER_LABEL.to_string()
}

fn default_placeholders() -> bool {
    true
}

/// How a node is repositioned within its own sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderPolicy {
    /// Remove and reinsert, shifting the nodes in between.
    #[default]
    Shift,
    /// Exchange the two addressed positions.
    Swap,
}

/// How a demoted parent lands in its new container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReparentPolicy {
    #[default]
    Append,
    /// Become the container's only child. Refused while the container has children.
    Replace,
}

/// When a drag mutates the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitMode {
    #[default]
    OnDrop,
    /// Apply moves while hovering and track the dragged node as it moves.
    OnHover,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MutatorConfig {
    #[serde(default)]
    pub reorder: ReorderPolicy,
    #[serde(default)]
    pub reparent: ReparentPolicy,
    #[serde(default)]
    pub commit: CommitMode,
    /// Row height used to turn a pointer offset inside a container into an index.
    #[serde(default = "default_row_height")]
    pub row_height: f32,
    /// Materialise placeholder containers while a leaf is dragged.
    #[serde(default = "default_placeholders")]
    pub placeholders: bool,
    /// Label given to a parent demoted into a leaf.
    #[serde(default = "default_placeholder_label")]
    pub placeholder_label: String,
}

impl Default for MutatorConfig {
    fn default() -> Self {
        Self {
            reorder: ReorderPolicy::default(),
            reparent: ReparentPolicy::default(),
            commit: CommitMode::default(),
            row_height: default_row_height(),
            placeholders: default_placeholders(),
            placeholder_label: default_placeholder_label(),
        }
    }
}

impl MutatorConfig {
    pub fn reorder(mut self, reorder: ReorderPolicy) -> Self {
        self.reorder = reorder;
        self
    }

    pub fn reparent(mut self, reparent: ReparentPolicy) -> Self {
        self.reparent = reparent;
        self
    }

    pub fn commit(mut self, commit: CommitMode) -> Self {
        self.commit = commit;
        self
    }

    pub fn row_height(mut self, row_height: f32) -> Self {
        self.row_height = row_height;
        self.with_defaults()
    }

    pub fn placeholders(mut self, placeholders: bool) -> Self {
        self.placeholders = placeholders;
        self
    }

    pub fn placeholder_label(mut self, label: impl Into<String>) -> Self {
        self.placeholder_label = label.into();
        self.with_defaults()
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(s).map(Self::with_defaults)
    }

    pub(crate) fn with_defaults(mut self) -> Self {
        if !self.row_height.is_finite() || self.row_height <= 0. {
            self.row_height = DEFAULT_ROW_HEIGHT;
        }
        if self.placeholder_label.is_empty() {
            self.placeholder_label = default_placeholder_label();
        }
        self
    }
}
