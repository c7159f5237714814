//! CRUD operations for the `/todo_lists` resource.

use serde::Serialize;
use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::models::{CreateTodoList, TodoList, UpdateTodoList};

/// Payload envelope the backend expects for list mutations.
#[derive(Debug, Serialize)]
struct ListEnvelope<T: Serialize> {
    todo_list: T,
}

/// Service for todo list endpoints.
#[derive(Debug, Clone)]
pub struct ListService {
    api: ApiClient,
}

impl ListService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch all todo lists.
    pub async fn list(&self) -> Result<Vec<TodoList>, ApiError> {
        self.api.get("/todo_lists").await
    }

    /// Fetch a single list by id.
    pub async fn get(&self, id: i64) -> Result<TodoList, ApiError> {
        self.api.get(&format!("/todo_lists/{}", id)).await
    }

    /// Create a new list. The title must be non-empty; the server is
    /// authoritative for everything else.
    pub async fn create(&self, params: &CreateTodoList) -> Result<TodoList, ApiError> {
        if params.title.trim().is_empty() {
            return Err(ApiError::Validation(
                "list title must not be empty".to_string(),
            ));
        }

        debug!(title = %params.title, "Creating todo list");
        self.api
            .post("/todo_lists", &ListEnvelope { todo_list: params })
            .await
    }

    /// Apply a partial update to a list.
    pub async fn update(&self, id: i64, params: &UpdateTodoList) -> Result<TodoList, ApiError> {
        self.api
            .patch(
                &format!("/todo_lists/{}", id),
                &ListEnvelope { todo_list: params },
            )
            .await
    }

    /// Delete a list. The server cascades the delete to its items.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&format!("/todo_lists/{}", id)).await
    }
}
