//! Synchronization for the items of a todo list.

use tracing::warn;

use crate::api::ApiError;
use crate::cache::{QueryCache, QueryResult};
use crate::models::{CreateTodoItem, TodoItem, UpdateTodoItem};
use crate::services::ItemService;

/// Cached reads and invalidating mutations for item collections, keyed by
/// the owning list id.
///
/// The selected list is optional: with no list selected the read is
/// disabled and returns an empty idle snapshot without touching the
/// network. Mutations that address an item by id still take the owning
/// list id, which names the cache key to invalidate.
#[derive(Clone)]
pub struct TodoItemSync {
    service: ItemService,
    cache: QueryCache<i64, Vec<TodoItem>>,
}

impl TodoItemSync {
    pub fn new(service: ItemService) -> Self {
        Self {
            service,
            cache: QueryCache::new(),
        }
    }

    /// Items of the selected list, served from cache while fresh. With no
    /// list selected, returns an empty idle snapshot and issues no request.
    pub async fn items(&self, list_id: Option<i64>) -> QueryResult<Vec<TodoItem>> {
        let Some(list_id) = list_id else {
            return QueryResult::idle();
        };

        let service = self.service.clone();
        self.cache
            .fetch(list_id, move || async move {
                service.list_by_list(list_id).await
            })
            .await
    }

    /// Last-known state for a list's items without triggering a fetch.
    pub async fn snapshot(&self, list_id: i64) -> QueryResult<Vec<TodoItem>> {
        self.cache.snapshot(&list_id).await
    }

    /// Mark a list's items stale so the next read refetches.
    pub async fn refresh(&self, list_id: i64) {
        self.cache.invalidate(&list_id).await;
    }

    /// Create an item under the selected list, then invalidate that list's
    /// items. Fails fast when no list is selected.
    pub async fn create(
        &self,
        list_id: Option<i64>,
        params: CreateTodoItem,
    ) -> Result<TodoItem, ApiError> {
        let list_id = list_id.ok_or_else(|| {
            ApiError::Validation("a list must be selected to create an item".to_string())
        })?;

        let created = self.service.create(list_id, &params).await.map_err(|e| {
            warn!(list_id, error = %e, "Failed to create todo item");
            e
        })?;
        self.cache.invalidate(&list_id).await;
        Ok(created)
    }

    /// Apply a partial update to an item, then invalidate its list's items.
    pub async fn update(
        &self,
        list_id: i64,
        item_id: i64,
        params: UpdateTodoItem,
    ) -> Result<TodoItem, ApiError> {
        let updated = self.service.update(item_id, &params).await.map_err(|e| {
            warn!(item_id, error = %e, "Failed to update todo item");
            e
        })?;
        self.cache.invalidate(&list_id).await;
        Ok(updated)
    }

    /// Delete an item, then invalidate its list's items.
    pub async fn delete(&self, list_id: i64, item_id: i64) -> Result<(), ApiError> {
        self.service.delete(item_id).await.map_err(|e| {
            warn!(item_id, error = %e, "Failed to delete todo item");
            e
        })?;
        self.cache.invalidate(&list_id).await;
        Ok(())
    }

    /// Flip an item's completed flag with a partial update carrying only
    /// the new value, then invalidate its list's items.
    ///
    /// The baseline is the caller-held item, not server state: a
    /// concurrent edit elsewhere is overwritten until the invalidation
    /// refetch reconciles the collection with the server.
    pub async fn toggle_completed(&self, item: &TodoItem) -> Result<TodoItem, ApiError> {
        let params = UpdateTodoItem::completed(!item.completed);
        let updated = self.service.update(item.id, &params).await.map_err(|e| {
            warn!(item_id = item.id, error = %e, "Failed to toggle todo item");
            e
        })?;
        self.cache.invalidate(&item.todo_list_id).await;
        Ok(updated)
    }
}
