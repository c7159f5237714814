//! Synchronization for the todo list collection.

use tracing::warn;

use crate::api::ApiError;
use crate::cache::{QueryCache, QueryResult};
use crate::models::{CreateTodoList, TodoList, UpdateTodoList};
use crate::services::ListService;

/// Cached reads and invalidating mutations for the list collection.
///
/// The collection has a single cache key; every successful mutation
/// invalidates it, so the next `lists()` call refetches from the server.
#[derive(Clone)]
pub struct TodoListSync {
    service: ListService,
    cache: QueryCache<(), Vec<TodoList>>,
}

impl TodoListSync {
    pub fn new(service: ListService) -> Self {
        Self {
            service,
            cache: QueryCache::new(),
        }
    }

    /// All todo lists, served from cache while fresh.
    pub async fn lists(&self) -> QueryResult<Vec<TodoList>> {
        let service = self.service.clone();
        self.cache
            .fetch((), move || async move { service.list().await })
            .await
    }

    /// Last-known state of the collection without triggering a fetch.
    pub async fn snapshot(&self) -> QueryResult<Vec<TodoList>> {
        self.cache.snapshot(&()).await
    }

    /// Mark the collection stale so the next read refetches.
    pub async fn refresh(&self) {
        self.cache.invalidate(&()).await;
    }

    /// Create a list, then invalidate the collection.
    pub async fn create(&self, params: CreateTodoList) -> Result<TodoList, ApiError> {
        let created = self.service.create(&params).await.map_err(|e| {
            warn!(error = %e, "Failed to create todo list");
            e
        })?;
        self.cache.invalidate(&()).await;
        Ok(created)
    }

    /// Apply a partial update to a list, then invalidate the collection.
    pub async fn update(&self, id: i64, params: UpdateTodoList) -> Result<TodoList, ApiError> {
        let updated = self.service.update(id, &params).await.map_err(|e| {
            warn!(list_id = id, error = %e, "Failed to update todo list");
            e
        })?;
        self.cache.invalidate(&()).await;
        Ok(updated)
    }

    /// Delete a list (the server cascades to its items), then invalidate
    /// the collection.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.service.delete(id).await.map_err(|e| {
            warn!(list_id = id, error = %e, "Failed to delete todo list");
            e
        })?;
        self.cache.invalidate(&()).await;
        Ok(())
    }
}
