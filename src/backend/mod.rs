//! Backend collaborator: the bank record service
//!
//! [`Backend`] is the port the editor talks to; [`http::HttpBackend`] is the
//! reqwest adapter used by the binary. Tests substitute in-memory or mocked
//! implementations.

pub mod http;

use crate::record::{Record, RecordDraft, RecordId};
use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpBackend;

/// Transport-level failures talking to the record service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The request never produced a response
    #[error("request failed: {message}")]
    Transport { message: String },

    /// The service answered with a non-success status
    #[error("service returned status {status}{}", body_suffix(.body))]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON
    #[error("unexpected response body: {message}")]
    Decode { message: String },

    /// The request URL could not be built from the configured base
    #[error("invalid endpoint: {message}")]
    InvalidEndpoint { message: String },
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}

/// CRUD operations offered by the record service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch every record, in server order
    async fn list(&self) -> Result<Vec<Record>, BackendError>;

    /// Create a record and return it with its assigned id
    async fn create(&self, draft: &RecordDraft) -> Result<Record, BackendError>;

    /// Replace the record with `record.id`
    async fn update(&self, record: &Record) -> Result<Record, BackendError>;

    /// Remove the record with `id`
    async fn delete(&self, id: &RecordId) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let with_body = BackendError::Status {
            status: 404,
            body: "no such record".to_string(),
        };
        let without_body = BackendError::Status {
            status: 500,
            body: String::new(),
        };

        assert_eq!(
            with_body.to_string(),
            "service returned status 404: no such record"
        );
        assert_eq!(without_body.to_string(), "service returned status 500");
    }
}
