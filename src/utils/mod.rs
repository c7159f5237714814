//! Shared helpers for the crate and its consumers.

pub mod format;

pub use format::{format_date, format_optional, is_overdue};
