use serde::{Deserialize, Serialize};

/// Priority label assigned when the user leaves the field empty.
pub const DEFAULT_PRIORITY: &str = "Todo";

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Raw user-entered date+time string; parsed lazily by the filter.
    pub scheduled_at: String,
    pub deadline: String,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default)]
    pub completed: bool,
}

/// Pending creation input. Callers clear the draft after a successful
/// add; on failure the draft keeps its fields for correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub scheduled_at: String,
    pub deadline: String,
    pub priority: String,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            scheduled_at: String::new(),
            deadline: String::new(),
            priority: DEFAULT_PRIORITY.to_string(),
        }
    }
}

impl TaskDraft {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
