//! Infrastructure adapters: HTTP transport, telemetry bootstrap.

pub mod error;
pub mod http;
pub mod telemetry;
