use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A single task record. `due_date` travels as an RFC 3339 string on the wire;
/// `created_at`/`updated_at` are server-assigned unix seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub task: String,
    #[serde(with = "time::serde::rfc3339")]
    pub due_date: OffsetDateTime,
    pub is_done: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Inputs arrive loosely typed (`dueDate` as a string) and are validated by the
/// procedure layer, which reports each failure cause as its own error variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTodoRequest {
    pub task: String,
    pub due_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub id: String,
    pub task: String,
    pub due_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkTodoAsDoneRequest {
    pub id: String,
    pub is_done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTodoRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedTodo {
    pub id: String,
}
