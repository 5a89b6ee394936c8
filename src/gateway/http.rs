//! HTTP implementation of the gateway against the document QA backend.
//!
//! Endpoints (relative to the configured base URL):
//! - `GET /files`
//! - `POST /ingest` (multipart, field `file`)
//! - `POST /ask` (JSON `{ "question": ... }`)
//! - `DELETE /reset`
//!
//! No timeouts are set on the client: a stalled request blocks its caller
//! until the transport gives up.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{StatusCode, Url, multipart};
use serde::de::DeserializeOwned;

use super::types::{AskRequest, ErrorBody, FileListResponse};
use super::{Answer, FileEntry, Gateway, GatewayError, UploadFile, UploadReceipt};

pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Resolves a server-relative link (e.g. `/raw_files/a.pdf`) against the base URL.
    fn absolute_link(&self, link: &str) -> String {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(link))
            .map(|url| url.to_string())
            .unwrap_or_else(|_| link.to_string())
    }
}

/// Turns a non-success response into a `Server` failure, preferring the
/// backend's `{ "detail": ... }` payload.
async fn server_failure(response: reqwest::Response) -> GatewayError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = failure_detail(status, &body);
    warn!("Backend returned HTTP {}: {}", status.as_u16(), detail);
    GatewayError::Server {
        status: status.as_u16(),
        detail,
    }
}

fn failure_detail(status: StatusCode, body: &str) -> String {
    if let Ok(ErrorBody { detail }) = serde_json::from_str::<ErrorBody>(body) {
        match detail {
            serde_json::Value::String(s) => return s,
            serde_json::Value::Null => {}
            other => return other.to_string(),
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

fn transport(e: reqwest::Error) -> GatewayError {
    warn!("Transport failure: {}", e);
    GatewayError::Transport(e.to_string())
}

/// Checks the status and decodes a success body.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
    if !response.status().is_success() {
        return Err(server_failure(response).await);
    }
    response.json::<T>().await.map_err(transport)
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list_files(&self) -> Result<Vec<FileEntry>, GatewayError> {
        info!("Listing files from {}", self.base_url);
        let response = self
            .client
            .get(self.endpoint("/files"))
            .send()
            .await
            .map_err(transport)?;

        let listing: FileListResponse = decode(response).await?;
        let entries = listing
            .files
            .into_iter()
            .map(FileEntry::from)
            .map(|mut entry| {
                entry.url = entry.url.map(|link| self.absolute_link(&link));
                entry
            })
            .collect::<Vec<_>>();
        debug!("Listed {} files", entries.len());
        Ok(entries)
    }

    async fn upload_file(&self, file: UploadFile) -> Result<UploadReceipt, GatewayError> {
        info!("Uploading {} ({} bytes)", file.name, file.bytes.len());
        let mime = file.mime_type();
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(mime)
            .map_err(transport)?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("/ingest"))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        decode(response).await
    }

    async fn ask(&self, question: &str) -> Result<Answer, GatewayError> {
        info!("Asking question (len={})", question.len());
        let response = self
            .client
            .post(self.endpoint("/ask"))
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(transport)?;

        let answer: Answer = decode(response).await?;
        debug!(
            "Answer received (len={}, citations={})",
            answer.answer.len(),
            answer.citations.as_ref().map_or(0, Vec::len)
        );
        Ok(answer)
    }

    async fn reset_all(&self) -> Result<(), GatewayError> {
        info!("Resetting backend");
        let response = self
            .client
            .delete(self.endpoint("/reset"))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(server_failure(response).await);
        }
        Ok(())
    }
}
