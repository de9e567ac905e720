//! HTTP transport for the dashboard API.

mod client;

pub use client::{API_BASE_PATH, ApiClient, ApiError};
