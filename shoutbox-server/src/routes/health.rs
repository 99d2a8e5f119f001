//! Health check endpoint
//!
//! Always answers 200: an unreachable datastore is reported in the body,
//! not as a failure.

use axum::{extract::State, routing::get, Json, Router};

use crate::models::HealthResponse;
use crate::state::AppState;

/// GET /
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db_connected, db_initialized) = match state.store() {
        Some(store) => {
            let health = store.health_check().await;
            (health.connected, health.initialized)
        }
        None => (false, false),
    };

    Json(HealthResponse {
        status: "ok",
        db_connected,
        db_initialized,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health))
}
