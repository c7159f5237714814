//! Per-resource service wrappers over the API client.
//!
//! Each service translates domain CRUD operations into HTTP calls with
//! fixed path templates and the payload envelopes the backend expects
//! (`{"todo_list": ...}`, `{"todo_item": ...}`). Services are stateless;
//! they own no data between calls.

pub mod items;
pub mod lists;

pub use items::ItemService;
pub use lists::ListService;
