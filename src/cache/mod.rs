//! Client-side query cache.
//!
//! Entries are keyed by [`QueryKey`]. Post lists hold ids only; the posts
//! themselves live in detail entries written by the same fetch, so a row can
//! always be resolved (and re-rendered) from its detail entry.
//!
//! ```toml
//! [cache]
//! post_list_limit = 50
//! list_stale_seconds = 60
//! # ... see config.rs for all options
//! ```

mod config;
mod events;
mod keys;
mod lock;
mod store;

pub use config::CacheConfig;
pub use events::{CacheEvent, EventKind, PostWatch};
pub use keys::{PostListKey, QueryKey, QueryScope, SortKey};
pub use store::{Entry, PostIdPage, QueryCache};
