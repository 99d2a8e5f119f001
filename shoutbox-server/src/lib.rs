//! shoutbox-server: HTTP front end for the message store
//!
//! Maps URL verbs onto the store operations and serializes results as
//! structured JSON records. The store is injected through shared state;
//! an unreachable datastore degrades the data routes but never takes the
//! health route down.

pub mod error;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use server::{create_router, run_server, ServerArgs};
pub use state::AppState;
