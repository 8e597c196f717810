//! Configuration options for the tree editor.

use serde::{Deserialize, Serialize};

/// Configuration options for a [`TreeEditor`](crate::TreeEditor).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Suffix appended to the label of a duplicated element.
    pub copy_suffix: String,

    /// How many times the id generator is asked for an unused id before a
    /// numeric suffix is appended instead.
    pub max_id_attempts: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            copy_suffix: " Copy".to_string(),
            max_id_attempts: 8,
        }
    }
}

impl EditorOptions {
    /// Create new editor options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the suffix appended to duplicated labels.
    pub fn copy_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.copy_suffix = suffix.into();
        self
    }

    /// Set the number of id generator attempts (at least 1).
    pub fn max_id_attempts(mut self, attempts: usize) -> Self {
        self.max_id_attempts = attempts.max(1);
        self
    }
}
