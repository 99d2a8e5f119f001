//! Error types for the message store

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Validation error for message content
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is empty after trimming
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field exceeds maximum length
    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Store error taxonomy
///
/// Connection-level failures surface as `Unavailable` no matter which
/// operation hit them; `Write`/`Read` mean the datastore was reached but
/// the statement failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("message store unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    #[error("schema bootstrap failed: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("write failed: {0}")]
    Write(#[source] sqlx::Error),

    #[error("read failed: {0}")]
    Read(#[source] sqlx::Error),
}

impl StoreError {
    pub(crate) fn schema(err: sqlx::Error) -> Self {
        if is_unavailable(&err) {
            Self::Unavailable(err)
        } else {
            Self::Schema(err)
        }
    }

    pub(crate) fn write(err: sqlx::Error) -> Self {
        if is_unavailable(&err) {
            Self::Unavailable(err)
        } else {
            Self::Write(err)
        }
    }

    pub(crate) fn read(err: sqlx::Error) -> Self {
        if is_unavailable(&err) {
            Self::Unavailable(err)
        } else {
            Self::Read(err)
        }
    }
}

fn is_unavailable(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "message",
            max: 65536,
        };
        assert_eq!(
            err.to_string(),
            "message exceeds maximum length of 65536 characters"
        );
    }

    #[test]
    fn pool_errors_classify_as_unavailable() {
        let err = StoreError::write(sqlx::Error::PoolClosed);
        assert!(matches!(err, StoreError::Unavailable(_)));

        let err = StoreError::read(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn statement_errors_keep_their_kind() {
        let err = StoreError::write(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Write(_)));

        let err = StoreError::read(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Read(_)));
    }
}
