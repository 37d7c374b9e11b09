//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `postgres` - sqlx repositories for the gym tables
//! - `memory` - In-memory store for tests and local runs
//! - `notify` - Staff notifications (tracing, recording)
//! - `http` - axum REST API

pub mod http;
pub mod memory;
pub mod notify;
pub mod postgres;

pub use memory::InMemoryGymStore;
pub use notify::{RecordingNotifier, TracingNotifier};
