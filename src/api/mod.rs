//! HTTP client module for the todo REST backend.
//!
//! This module provides the `ApiClient` for issuing typed JSON requests
//! against the configured base URL, and the `ApiError` taxonomy shared by
//! every layer above it.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
