//! Server module exposing the record core over HTTP
//!
//! The `ServerBuilder` wires a [`RecordStore`](crate::core::RecordStore) and a
//! validator configured from [`RecordsConfig`](crate::config::RecordsConfig)
//! into an Axum router:
//! - Health check routes
//! - Record routes (create, filtered list, fetch by id)

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{AppState, ListRecordsResponse};
