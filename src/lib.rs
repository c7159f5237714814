//! Client-side data synchronization core for a todo REST backend.
//!
//! This crate is the data layer of a todo application: a typed HTTP client,
//! thin per-resource services for todo lists and todo items, and a query
//! cache that keeps collection reads fresh and coherent across mutations.
//!
//! View layers (GUI, TUI, web) sit on top of [`sync::TodoListSync`] and
//! [`sync::TodoItemSync`]: reads return a [`cache::QueryResult`] snapshot
//! (data plus loading/error state) and mutations are async operations that
//! invalidate the affected collection on success, forcing the next read to
//! refetch from the server. There are no optimistic cache updates; the
//! server is authoritative and invalidation is the sole write/read
//! synchronization mechanism.

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod services;
pub mod sync;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use cache::{QueryCache, QueryResult, QueryState};
pub use config::Config;
pub use models::{
    CreateTodoItem, CreateTodoList, Priority, TodoItem, TodoList, UpdateTodoItem, UpdateTodoList,
};
pub use services::{ItemService, ListService};
pub use sync::{TodoItemSync, TodoListSync};
