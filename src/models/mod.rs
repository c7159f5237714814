//! Domain models for todo lists and their items.
//!
//! Field names match the backend's wire format, so the structs double as
//! the JSON schema. Timestamps arrive as ISO-8601 strings and are kept as
//! strings; `utils::format` handles display parsing.

pub mod item;
pub mod list;

pub use item::{CreateTodoItem, Priority, TodoItem, UpdateTodoItem};
pub use list::{CreateTodoList, TodoList, UpdateTodoList};
