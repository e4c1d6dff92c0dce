//! Background worker thread that owns the favorites storage.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic
//! - `store`: The async [`FavoritesStore`] contract and its thread-backed handle

pub mod handler;
pub mod messages;
pub mod store;

pub use handler::FavoritesWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
pub use store::{FavoritesHandle, FavoritesStore};
