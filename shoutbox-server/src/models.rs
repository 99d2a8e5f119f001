//! Request and response models for shoutbox-server

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoutbox_store::Message;

// ============================================================================
// Save
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SaveRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveResponse {
    pub status: &'static str,
    /// The stored (trimmed) content
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Listing
// ============================================================================

/// A message as rendered on the wire
#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub id: i64,
    pub text: String,
    pub time: DateTime<Utc>,
}

impl From<Message> for MessageView {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            text: m.content,
            time: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessagesResponse {
    pub status: &'static str,
    pub count: usize,
    pub messages: Vec<MessageView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub status: &'static str,
}

// ============================================================================
// Health and diagnostics
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub db_connected: bool,
    pub db_initialized: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsResponse {
    pub status: &'static str,
    pub engine_version: String,
    pub table_exists: bool,
    pub message_count: i64,
}
