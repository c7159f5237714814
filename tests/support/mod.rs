//! In-process mock of the todo REST backend for integration tests.
//!
//! Serves the same wire protocol as the real backend over an in-memory
//! store, with request counters and failure switches so tests can observe
//! cache behavior and error paths. Payload types are defined independently
//! from the crate's models; the integration tests catch schema drift.

// Allow dead code: not every test binary uses every helper
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Deserialize a field so that an absent key and an explicit `null` are
/// distinguishable: absent yields `None` (via `#[serde(default)]`), while a
/// present value — including `null` — yields `Some(..)`. A plain
/// `Option<Value>` cannot express this, since serde collapses `null` to
/// `None`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Ok(Some(Option::deserialize(de)?))
}
use tokio::net::TcpListener;
use tokio::sync::RwLock;

#[derive(Clone, Serialize)]
pub struct MockList {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Serialize)]
pub struct MockItem {
    pub id: i64,
    pub todo_list_id: i64,
    pub title: String,
    pub content: Option<String>,
    pub completed: bool,
    pub priority: u8,
    pub due_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Deserialize)]
struct ListEnvelope {
    todo_list: ListPayload,
}

#[derive(Deserialize)]
struct ListPayload {
    title: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct CreateItemEnvelope {
    todo_item: CreateItemPayload,
}

#[derive(Deserialize)]
struct CreateItemPayload {
    title: String,
    content: Option<String>,
    priority: Option<u8>,
    due_date: Option<String>,
}

#[derive(Deserialize)]
struct UpdateItemEnvelope {
    todo_item: UpdateItemPayload,
}

#[derive(Deserialize)]
struct UpdateItemPayload {
    title: Option<String>,
    content: Option<String>,
    priority: Option<u8>,
    /// Kept as raw JSON so an explicit null (clear the date) is
    /// distinguishable from an absent field (leave unchanged). The outer
    /// `Option` marks presence; the inner carries the value (`null` -> inner
    /// `None`).
    #[serde(default, deserialize_with = "double_option")]
    due_date: Option<Option<Value>>,
    completed: Option<bool>,
}

#[derive(Default)]
pub struct MockState {
    lists: RwLock<HashMap<i64, MockList>>,
    items: RwLock<HashMap<i64, MockItem>>,
    next_id: AtomicI64,
    requests: AtomicUsize,
    item_list_requests: AtomicUsize,
    fail_mutations: AtomicBool,
    fail_reads: AtomicBool,
}

pub type SharedState = Arc<MockState>;

impl MockState {
    fn alloc_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn count_request(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    /// Total requests served, across every route.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// GET requests for a list's items.
    pub fn item_list_request_count(&self) -> usize {
        self.item_list_requests.load(Ordering::SeqCst)
    }

    /// When set, every mutating route answers 500.
    pub fn set_fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    /// When set, collection reads answer 500.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_mutation(&self) -> Result<(), StatusCode> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            Ok(())
        }
    }

    fn check_read(&self) -> Result<(), StatusCode> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            Ok(())
        }
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/todo_lists", get(list_lists).post(create_list))
        .route(
            "/todo_lists/{id}",
            get(get_list).patch(update_list).delete(delete_list),
        )
        .route(
            "/todo_lists/{id}/todo_items",
            get(list_items).post(create_item),
        )
        .route(
            "/todo_items/{id}",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .with_state(state)
}

/// Start the mock backend on a random port; returns the shared state (for
/// counters and failure switches) and the base URL to point a client at.
pub async fn spawn() -> (SharedState, String) {
    let state: SharedState = Arc::new(MockState::default());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(Arc::clone(&state));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (state, format!("http://{}", addr))
}

async fn list_lists(
    State(state): State<SharedState>,
) -> Result<Json<Vec<MockList>>, StatusCode> {
    state.count_request();
    state.check_read()?;

    let lists = state.lists.read().await;
    let mut all: Vec<MockList> = lists.values().cloned().collect();
    all.sort_by_key(|l| l.id);
    Ok(Json(all))
}

async fn create_list(
    State(state): State<SharedState>,
    Json(env): Json<ListEnvelope>,
) -> Result<(StatusCode, Json<MockList>), StatusCode> {
    state.count_request();
    state.check_mutation()?;

    let title = env
        .todo_list
        .title
        .filter(|t| !t.is_empty())
        .ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;

    let list = MockList {
        id: state.alloc_id(),
        title,
        description: env.todo_list.description,
        created_at: now(),
        updated_at: now(),
    };
    state.lists.write().await.insert(list.id, list.clone());
    Ok((StatusCode::CREATED, Json(list)))
}

async fn get_list(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<MockList>, StatusCode> {
    state.count_request();
    let lists = state.lists.read().await;
    lists.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_list(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(env): Json<ListEnvelope>,
) -> Result<Json<MockList>, StatusCode> {
    state.count_request();
    state.check_mutation()?;

    let mut lists = state.lists.write().await;
    let list = lists.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = env.todo_list.title {
        list.title = title;
    }
    if let Some(description) = env.todo_list.description {
        list.description = Some(description);
    }
    list.updated_at = now();
    Ok(Json(list.clone()))
}

async fn delete_list(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    state.count_request();
    state.check_mutation()?;

    state
        .lists
        .write()
        .await
        .remove(&id)
        .ok_or(StatusCode::NOT_FOUND)?;
    // Cascade the delete to the list's items, like the real backend.
    state
        .items
        .write()
        .await
        .retain(|_, item| item.todo_list_id != id);
    Ok(StatusCode::NO_CONTENT)
}

async fn list_items(
    State(state): State<SharedState>,
    Path(list_id): Path<i64>,
) -> Result<Json<Vec<MockItem>>, StatusCode> {
    state.count_request();
    state.item_list_requests.fetch_add(1, Ordering::SeqCst);
    state.check_read()?;

    let items = state.items.read().await;
    let mut scoped: Vec<MockItem> = items
        .values()
        .filter(|item| item.todo_list_id == list_id)
        .cloned()
        .collect();
    scoped.sort_by_key(|i| i.id);
    Ok(Json(scoped))
}

async fn create_item(
    State(state): State<SharedState>,
    Path(list_id): Path<i64>,
    Json(env): Json<CreateItemEnvelope>,
) -> Result<(StatusCode, Json<MockItem>), StatusCode> {
    state.count_request();
    state.check_mutation()?;

    if !state.lists.read().await.contains_key(&list_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    if env.todo_item.title.is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let item = MockItem {
        id: state.alloc_id(),
        todo_list_id: list_id,
        title: env.todo_item.title,
        content: env.todo_item.content,
        completed: false,
        priority: env.todo_item.priority.unwrap_or(2),
        due_date: env.todo_item.due_date,
        created_at: now(),
        updated_at: now(),
    };
    state.items.write().await.insert(item.id, item.clone());
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<MockItem>, StatusCode> {
    state.count_request();
    let items = state.items.read().await;
    items.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_item(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(env): Json<UpdateItemEnvelope>,
) -> Result<Json<MockItem>, StatusCode> {
    state.count_request();
    state.check_mutation()?;

    let mut items = state.items.write().await;
    let item = items.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    let payload = env.todo_item;
    if let Some(title) = payload.title {
        item.title = title;
    }
    if let Some(content) = payload.content {
        item.content = Some(content);
    }
    if let Some(priority) = payload.priority {
        item.priority = priority;
    }
    if let Some(completed) = payload.completed {
        item.completed = completed;
    }
    if let Some(due_date) = payload.due_date {
        item.due_date = match due_date {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            _ => return Err(StatusCode::UNPROCESSABLE_ENTITY),
        };
    }
    item.updated_at = now();
    Ok(Json(item.clone()))
}

async fn delete_item(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    state.count_request();
    state.check_mutation()?;

    state
        .items
        .write()
        .await
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
