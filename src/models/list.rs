use serde::{Deserialize, Serialize};

/// A todo list as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoList {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Server-assigned ISO-8601 timestamp; never sent by the client.
    pub created_at: String,
    pub updated_at: String,
}

/// Fields accepted when creating a list. The title is required; the server
/// assigns everything else.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateTodoList {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update for a list. Unset fields are omitted from the payload so
/// the server leaves them unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTodoList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
