//! Resource services: one function per REST endpoint.
//!
//! Services only shape requests and decode payloads; caching and cache
//! patching happen in `queries` and `mutations`.

pub mod comments;
pub mod posts;
pub mod tags;
pub mod users;
