//! Datastore diagnostics endpoint

use axum::{extract::State, routing::get, Json, Router};

use crate::error::{ApiError, ApiResult};
use crate::models::DiagnosticsResponse;
use crate::state::AppState;

/// GET /test-db
async fn test_db(State(state): State<AppState>) -> ApiResult<Json<DiagnosticsResponse>> {
    let store = state.store().ok_or(ApiError::NotConfigured)?;
    let diag = store.diagnostics().await?;

    Ok(Json(DiagnosticsResponse {
        status: "success",
        engine_version: diag.engine_version,
        table_exists: diag.table_exists,
        message_count: diag.message_count,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/test-db", get(test_db))
}
