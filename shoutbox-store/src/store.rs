//! SQLite-backed message store
//!
//! A bounded sqlx pool with schema bootstrap on connect. Connections are
//! checked out per operation and returned on every exit path by the pool.

use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::{StoreError, StoreResult};
use crate::message::{Message, MessageBody};

/// Maximum pooled connections. Kept low for single-user tooling.
const MAX_CONNECTIONS: u32 = 5;

/// Default number of messages returned by `list_recent`.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Connectivity probe result.
///
/// Never an error: an unreachable store is reported as `connected: false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub connected: bool,
    pub initialized: bool,
}

/// Diagnostic snapshot of the datastore
#[derive(Debug, Clone)]
pub struct StoreDiagnostics {
    pub engine_version: String,
    pub table_exists: bool,
    pub message_count: i64,
}

/// Message store over a pooled SQLite database
#[derive(Clone)]
pub struct MessageStore {
    pool: SqlitePool,
}

impl MessageStore {
    /// Open (or create) the database at `url` and bootstrap the schema.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(StoreError::Unavailable)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(StoreError::Unavailable)?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Open an in-memory database (for testing).
    ///
    /// Single-connection pool: every checkout must see the same database.
    pub async fn connect_in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(StoreError::Unavailable)?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Create the `messages` table and its index if absent.
    ///
    /// Safe to call on every process start. AUTOINCREMENT keeps the row id
    /// sequence in `sqlite_sequence`, so ids are never reused even after a
    /// full-table clear.
    pub async fn initialize(&self) -> StoreResult<()> {
        tracing::debug!("bootstrapping messages schema");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(StoreError::schema)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_messages_created ON messages(created_at)")
            .execute(&self.pool)
            .await
            .map_err(StoreError::schema)?;

        Ok(())
    }

    /// Persist a message, returning the stored row.
    ///
    /// Content is trimmed before validation; empty content is rejected.
    pub async fn save(&self, content: &str) -> StoreResult<Message> {
        let body = MessageBody::new(content)?;

        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (content, created_at)
            VALUES (?, ?)
            RETURNING id, content, created_at
            "#,
        )
        .bind(body.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::write)?;

        Ok(message)
    }

    /// Return up to `limit` messages, newest first.
    ///
    /// Ordered by `created_at` descending with `id` breaking ties, so two
    /// messages stored in the same instant still list newest-insert-first.
    /// An empty table yields an empty vec, not an error.
    pub async fn list_recent(&self, limit: i64) -> StoreResult<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, content, created_at
            FROM messages
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::read)?;

        Ok(messages)
    }

    /// Delete every message, returning how many rows were removed.
    ///
    /// The id sequence is not reset; ids assigned after a clear keep
    /// increasing.
    pub async fn clear(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM messages")
            .execute(&self.pool)
            .await
            .map_err(StoreError::write)?;

        Ok(result.rows_affected())
    }

    /// Probe connectivity and schema presence without mutating state.
    pub async fn health_check(&self) -> HealthStatus {
        let connected = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok();

        let initialized = connected && self.table_exists().await.unwrap_or(false);

        HealthStatus {
            connected,
            initialized,
        }
    }

    /// Engine version, table presence, and row count.
    pub async fn diagnostics(&self) -> StoreResult<StoreDiagnostics> {
        let engine_version = sqlx::query_scalar::<_, String>("SELECT sqlite_version()")
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::read)?;

        let table_exists = self.table_exists().await?;

        let message_count = if table_exists {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages")
                .fetch_one(&self.pool)
                .await
                .map_err(StoreError::read)?
        } else {
            0
        };

        Ok(StoreDiagnostics {
            engine_version,
            table_exists,
            message_count,
        })
    }

    async fn table_exists(&self) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'messages')",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::read)?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[tokio::test]
    async fn save_and_list() {
        let store = MessageStore::connect_in_memory().await.unwrap();

        let saved = store.save("  hello  ").await.unwrap();
        assert_eq!(saved.content, "hello");
        assert!(saved.id > 0);

        let messages = store.list_recent(DEFAULT_LIST_LIMIT).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[0].id, saved.id);
        assert_eq!(messages[0].created_at, saved.created_at);
    }

    #[tokio::test]
    async fn ids_increase_monotonically() {
        let store = MessageStore::connect_in_memory().await.unwrap();

        let first = store.save("first").await.unwrap();
        let second = store.save("second").await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_capped() {
        let store = MessageStore::connect_in_memory().await.unwrap();

        for i in 0..15 {
            store.save(&format!("message {i}")).await.unwrap();
        }

        let messages = store.list_recent(DEFAULT_LIST_LIMIT).await.unwrap();
        assert_eq!(messages.len(), 10);
        assert_eq!(messages[0].content, "message 14");
        assert_eq!(messages[9].content, "message 5");

        for pair in messages.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
            assert!(pair[0].id > pair[1].id);
        }
    }

    #[tokio::test]
    async fn empty_list_is_not_an_error() {
        let store = MessageStore::connect_in_memory().await.unwrap();

        let messages = store.list_recent(DEFAULT_LIST_LIMIT).await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn empty_content_rejected() {
        let store = MessageStore::connect_in_memory().await.unwrap();

        let err = store.save("   ").await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidInput(ValidationError::Empty { .. })
        ));

        // Nothing was written
        let messages = store.list_recent(DEFAULT_LIST_LIMIT).await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn initialize_twice_is_idempotent() {
        let store = MessageStore::connect_in_memory().await.unwrap();

        store.initialize().await.unwrap();
        store.initialize().await.unwrap();

        store.save("still works").await.unwrap();
        let messages = store.list_recent(DEFAULT_LIST_LIMIT).await.unwrap();
        assert_eq!(messages.len(), 1);
    }

    #[tokio::test]
    async fn clear_keeps_id_sequence() {
        let store = MessageStore::connect_in_memory().await.unwrap();

        store.save("one").await.unwrap();
        let before = store.save("two").await.unwrap();

        let removed = store.clear().await.unwrap();
        assert_eq!(removed, 2);
        assert!(store
            .list_recent(DEFAULT_LIST_LIMIT)
            .await
            .unwrap()
            .is_empty());

        let after = store.save("three").await.unwrap();
        assert!(after.id > before.id);
    }

    #[tokio::test]
    async fn health_check_reports_ready_store() {
        let store = MessageStore::connect_in_memory().await.unwrap();

        let health = store.health_check().await;
        assert!(health.connected);
        assert!(health.initialized);
    }

    #[tokio::test]
    async fn diagnostics_counts_rows() {
        let store = MessageStore::connect_in_memory().await.unwrap();

        store.save("one").await.unwrap();
        store.save("two").await.unwrap();

        let diag = store.diagnostics().await.unwrap();
        assert!(diag.table_exists);
        assert_eq!(diag.message_count, 2);
        assert!(!diag.engine_version.is_empty());
    }

    #[tokio::test]
    async fn file_backed_store_persists_across_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("messages.db").display());

        {
            let store = MessageStore::connect(&url).await.unwrap();
            store.save("durable").await.unwrap();
        }

        let store = MessageStore::connect(&url).await.unwrap();
        let messages = store.list_recent(DEFAULT_LIST_LIMIT).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "durable");
    }
}
