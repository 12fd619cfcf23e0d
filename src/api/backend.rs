use std::fmt;

use async_trait::async_trait;

use super::types::{HealthReport, QueryRequest, UploadReceipt};
use crate::core::upload::PendingFile;

/// Errors that can occur while talking to the backend.
///
/// None of these are retried. The variant only decides how the failure is
/// worded for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Backend answered with a non-2xx status. `detail` is the server's own text.
    Server { status: u16, detail: String },
    /// The request never completed (DNS, connection refused, reset, ...).
    Transport(String),
    /// The request completed but the body was not what we expected.
    Parse(String),
}

impl ApiError {
    /// The text shown to the user: server detail verbatim, otherwise the error text.
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Server { detail, .. } => detail,
            ApiError::Transport(msg) | ApiError::Parse(msg) => msg,
        }
    }

    pub fn is_server(&self) -> bool {
        matches!(self, ApiError::Server { .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Server { status, detail } => write!(f, "server error (HTTP {status}): {detail}"),
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The outbound seam. `HttpBackend` talks to a real server; tests substitute
/// a scripted fake.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Base URL requests are sent to, for display and logging.
    fn base_url(&self) -> &str;

    /// Sends `file` as multipart field `file` to `/upload`.
    async fn upload(&self, file: &PendingFile) -> Result<UploadReceipt, ApiError>;

    /// Posts `request` to `/query` and returns `data.answer`.
    async fn query(&self, request: &QueryRequest) -> Result<String, ApiError>;

    /// Calls `/health`.
    async fn health(&self) -> Result<HealthReport, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_verbatim_detail() {
        let err = ApiError::Server {
            status: 400,
            detail: "只支持PDF文件".to_string(),
        };
        assert_eq!(err.user_message(), "只支持PDF文件");
        assert!(err.is_server());
    }

    #[test]
    fn test_user_message_for_transport() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.user_message(), "connection refused");
        assert!(!err.is_server());
        assert_eq!(err.to_string(), "transport error: connection refused");
    }
}
