//! Headless posts dashboard: filtered post listings, comments and author
//! metadata over a REST API, mediated by a normalized query cache.

pub mod cache;
pub mod config;
pub mod dashboard;
pub mod dialogs;
pub mod filter;
pub mod forms;
pub mod infra;
pub mod mutations;
pub mod presentation;
pub mod queries;
pub mod services;
pub mod util;
