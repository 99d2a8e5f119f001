//! Message record and content validation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::ValidationError;

/// Maximum length for message content (64KB)
const MAX_CONTENT_LEN: usize = 65536;

/// A persisted message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Store-assigned, monotonically increasing, never reused
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Validated message content
///
/// Construction trims surrounding whitespace; what is stored is the
/// trimmed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    /// Trim and validate message content.
    ///
    /// # Rules
    /// - Surrounding whitespace is stripped before the checks
    /// - Empty content is rejected
    /// - Max 64KB (65536 bytes)
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "message" });
        }

        if trimmed.len() > MAX_CONTENT_LEN {
            return Err(ValidationError::TooLong {
                field: "message",
                max: MAX_CONTENT_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for MessageBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_content() {
        let body = MessageBody::new("hello world").unwrap();
        assert_eq!(body.as_str(), "hello world");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let body = MessageBody::new("  hello\n").unwrap();
        assert_eq!(body.as_str(), "hello");
    }

    #[test]
    fn empty_rejected() {
        let err = MessageBody::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "message" }));
    }

    #[test]
    fn whitespace_only_rejected() {
        let err = MessageBody::new(" \t\n ").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn max_length() {
        // 64KB should work
        let content_64k = "a".repeat(65536);
        assert!(MessageBody::new(&content_64k).is_ok());

        // 64KB + 1 should fail
        let content_over = "a".repeat(65537);
        let err = MessageBody::new(&content_over).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 65536, .. }));
    }
}
