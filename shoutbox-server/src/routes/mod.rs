//! HTTP route modules
//!
//! Each module exposes a `router()` merged in `server::create_router`.

pub mod diag;
pub mod health;
pub mod messages;
