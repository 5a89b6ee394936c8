//! # Backend Gateway
//!
//! Typed wrapper around the four backend operations. Every failure comes back
//! as a `GatewayError` value; nothing here panics or retries.

pub mod http;
pub mod types;

use std::fmt;

use async_trait::async_trait;

pub use http::HttpGateway;
pub use types::{Answer, Citation, FileEntry, UploadFile, UploadReceipt};

/// Why a gateway call did not produce a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never got a usable response (unreachable, aborted, undecodable body).
    Transport(String),
    /// The backend answered with a non-success status.
    Server { status: u16, detail: String },
}

impl GatewayError {
    /// The human-readable part, without the error class prefix.
    pub fn detail(&self) -> &str {
        match self {
            GatewayError::Transport(msg) => msg,
            GatewayError::Server { detail, .. } => detail,
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Transport(msg) => write!(f, "transport error: {msg}"),
            GatewayError::Server { status, detail } => {
                write!(f, "server error (HTTP {status}): {detail}")
            }
        }
    }
}

impl std::error::Error for GatewayError {}

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Fetches the authoritative document snapshot.
    async fn list_files(&self) -> Result<Vec<FileEntry>, GatewayError>;

    /// Uploads one document. Name, size and link only come back via `list_files`.
    async fn upload_file(&self, file: UploadFile) -> Result<UploadReceipt, GatewayError>;

    async fn ask(&self, question: &str) -> Result<Answer, GatewayError>;

    /// Deletes every document on the backend.
    async fn reset_all(&self) -> Result<(), GatewayError>;
}
