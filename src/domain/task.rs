use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

/// Body of a create request. The store takes `text` as given; rejecting
/// blank labels is left to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub message: String,
}

impl DeleteConfirmation {
    pub const DELETED: &'static str = "Task deleted successfully";

    pub fn deleted() -> Self { Self { message: Self::DELETED.to_string() } }
}
