//! Reqwest-backed record service adapter.
//!
//! Owns transport details only: URL construction, JSON encoding and
//! decoding, and mapping of HTTP failures onto [`BackendError`].

use super::{Backend, BackendError};
use crate::record::{Record, RecordDraft, RecordId};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

const BODY_PREVIEW_CHARS: usize = 160;

/// Record service reached over HTTP under a base URL such as
/// `http://localhost:8888/bank`
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client, base_url })
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::InvalidEndpoint {
                message: format!("'{}' cannot be used as a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list(&self) -> Result<Vec<Record>, BackendError> {
        let url = self.endpoint(&["read"])?;
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_json(response).await
    }

    async fn create(&self, draft: &RecordDraft) -> Result<Record, BackendError> {
        let url = self.endpoint(&["add"])?;
        debug!(%url, "POST");
        let response = self
            .client
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_json(response).await
    }

    async fn update(&self, record: &Record) -> Result<Record, BackendError> {
        let id = record.id.to_string();
        let url = self.endpoint(&["update", id.as_str()])?;
        debug!(%url, "PUT");
        let response = self
            .client
            .put(url)
            .json(record)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = ensure_success(response).await?;
        let body = response.bytes().await.map_err(map_transport_error)?;
        // Callers re-fetch the list; fall back to what was sent when the
        // service answers with an empty or partial body.
        Ok(serde_json::from_slice(&body).unwrap_or_else(|_| record.clone()))
    }

    async fn delete(&self, id: &RecordId) -> Result<(), BackendError> {
        let id = id.to_string();
        let url = self.endpoint(&["delete", id.as_str()])?;
        debug!(%url, "DELETE");
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        body: body_preview(&body),
    })
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let response = ensure_success(response).await?;
    let body = response.bytes().await.map_err(map_transport_error)?;
    serde_json::from_slice(&body).map_err(|e| BackendError::Decode {
        message: e.to_string(),
    })
}

fn map_transport_error(error: reqwest::Error) -> BackendError {
    BackendError::Transport {
        message: error.to_string(),
    }
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(BODY_PREVIEW_CHARS).collect();
    if compact.chars().count() > BODY_PREVIEW_CHARS {
        format!("{}...", preview)
    } else {
        preview
    }
}
