//! Message endpoints: save, list recent, clear

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use shoutbox_store::{MessageStore, DEFAULT_LIST_LIMIT};

use crate::error::{ApiError, ApiResult};
use crate::models::{ClearResponse, MessageView, MessagesResponse, SaveRequest, SaveResponse};
use crate::state::AppState;

fn store(state: &AppState) -> ApiResult<&MessageStore> {
    state.store().ok_or(ApiError::NotConfigured)
}

/// POST /save
async fn save_message(
    State(state): State<AppState>,
    Json(req): Json<SaveRequest>,
) -> ApiResult<Json<SaveResponse>> {
    let message = store(&state)?.save(&req.message).await?;

    Ok(Json(SaveResponse {
        status: "saved",
        message: message.content,
        timestamp: message.created_at,
    }))
}

/// GET /messages
async fn list_messages(State(state): State<AppState>) -> ApiResult<Json<MessagesResponse>> {
    let messages = store(&state)?.list_recent(DEFAULT_LIST_LIMIT).await?;

    Ok(Json(MessagesResponse {
        status: "success",
        count: messages.len(),
        messages: messages.into_iter().map(MessageView::from).collect(),
    }))
}

/// POST /clear
async fn clear_messages(State(state): State<AppState>) -> ApiResult<Json<ClearResponse>> {
    let removed = store(&state)?.clear().await?;
    tracing::info!(removed, "cleared message table");

    Ok(Json(ClearResponse { status: "cleared" }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/save", post(save_message))
        .route("/messages", get(list_messages))
        .route("/clear", post(clear_messages))
}
