//! shoutbox-store: message persistence over SQLite
//!
//! Owns the schema bootstrap and the data operations (save, list-recent,
//! clear) plus the health and diagnostic probes, behind a pooled
//! connection.

pub mod error;
pub mod message;
pub mod store;

pub use error::{StoreError, StoreResult, ValidationError};
pub use message::{Message, MessageBody};
pub use store::{HealthStatus, MessageStore, StoreDiagnostics, DEFAULT_LIST_LIMIT};
