//! CRUD operations for the `/todo_items` resource.
//!
//! Items are listed and created under their owning list's path; reads,
//! updates, and deletes of a single item address it by item id alone.

use serde::Serialize;
use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::models::{CreateTodoItem, TodoItem, UpdateTodoItem};

/// Payload envelope the backend expects for item mutations.
#[derive(Debug, Serialize)]
struct ItemEnvelope<T: Serialize> {
    todo_item: T,
}

/// Service for todo item endpoints.
#[derive(Debug, Clone)]
pub struct ItemService {
    api: ApiClient,
}

impl ItemService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch all items belonging to a list.
    pub async fn list_by_list(&self, list_id: i64) -> Result<Vec<TodoItem>, ApiError> {
        self.api
            .get(&format!("/todo_lists/{}/todo_items", list_id))
            .await
    }

    /// Fetch a single item by id.
    pub async fn get(&self, item_id: i64) -> Result<TodoItem, ApiError> {
        self.api.get(&format!("/todo_items/{}", item_id)).await
    }

    /// Create a new item under a list. The title must be non-empty; the
    /// server defaults priority to Medium and completed to false.
    pub async fn create(&self, list_id: i64, params: &CreateTodoItem) -> Result<TodoItem, ApiError> {
        if params.title.trim().is_empty() {
            return Err(ApiError::Validation(
                "item title must not be empty".to_string(),
            ));
        }

        debug!(list_id, title = %params.title, "Creating todo item");
        self.api
            .post(
                &format!("/todo_lists/{}/todo_items", list_id),
                &ItemEnvelope { todo_item: params },
            )
            .await
    }

    /// Apply a partial update to an item. Also used to toggle `completed`.
    pub async fn update(&self, item_id: i64, params: &UpdateTodoItem) -> Result<TodoItem, ApiError> {
        self.api
            .patch(
                &format!("/todo_items/{}", item_id),
                &ItemEnvelope { todo_item: params },
            )
            .await
    }

    /// Delete an item by id.
    pub async fn delete(&self, item_id: i64) -> Result<(), ApiError> {
        self.api.delete(&format!("/todo_items/{}", item_id)).await
    }
}
