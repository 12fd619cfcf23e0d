//! HTTP implementation of [`Backend`] on top of `reqwest`.
//!
//! No timeouts and no retries: a request runs until the server answers or
//! the connection fails.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use super::backend::{ApiError, Backend};
use super::types::{
    AnswerData, Envelope, ErrorBody, HealthData, HealthReport, QueryRequest, UploadReceipt,
};
use crate::core::upload::PendingFile;

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn upload(&self, file: &PendingFile) -> Result<UploadReceipt, ApiError> {
        info!(
            "Uploading {} ({} bytes, {}) to {}",
            file.name,
            file.size(),
            file.mime_type,
            self.endpoint("upload")
        );

        let part = Part::bytes(file.content.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!("Upload response status: {}", response.status());
        // Any 2xx JSON is a success; the envelope and `data` are only read
        // when they have the expected shape
        let body: serde_json::Value = read_json(response).await?;
        let Ok(envelope) = serde_json::from_value::<Envelope<serde_json::Value>>(body) else {
            debug!("Upload response is not an envelope; using an empty receipt");
            return Ok(UploadReceipt::default());
        };

        let mut receipt: UploadReceipt = envelope
            .data
            .and_then(|data| serde_json::from_value(data).ok())
            .unwrap_or_default();
        receipt.message = envelope.message;
        Ok(receipt)
    }

    async fn query(&self, request: &QueryRequest) -> Result<String, ApiError> {
        info!(
            "Querying {}: question_len={}, top_k={}",
            self.endpoint("query"),
            request.question.chars().count(),
            request.top_k
        );

        let response = self
            .client
            .post(self.endpoint("query"))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!("Query response status: {}", response.status());
        let envelope: Envelope<AnswerData> = read_json(response).await?;

        envelope
            .data
            .map(|data| data.answer)
            .ok_or_else(|| ApiError::Parse("response has no data.answer".to_string()))
    }

    async fn health(&self) -> Result<HealthReport, ApiError> {
        let response = self
            .client
            .get(self.endpoint("health"))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let envelope: Envelope<HealthData> = read_json(response).await?;
        Ok(HealthReport {
            status: envelope.status.unwrap_or_default(),
            message: envelope.message.unwrap_or_default(),
            data: envelope.data.unwrap_or_default(),
        })
    }
}

/// Reads the body and either decodes a 2xx body as `T` or turns a non-2xx
/// status into `ApiError::Server`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    if !status.is_success() {
        let detail = error_detail(status, &body);
        warn!("Backend error: {} - {}", status.as_u16(), detail);
        return Err(ApiError::Server {
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        warn!("Unparseable success body ({} bytes): {}", body.len(), e);
        ApiError::Parse(e.to_string())
    })
}

/// Pulls the `detail` string out of an error body.
///
/// FastAPI validation errors carry a structured `detail`; those are shown as
/// compact JSON. Bodies without `detail` fall back to the raw text, then to
/// the status reason.
fn error_detail(status: StatusCode, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ErrorBody>(body) {
        return match err.detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .map(|r| r.to_string())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:8000/");
        assert_eq!(backend.base_url(), "http://localhost:8000");
        assert_eq!(backend.endpoint("upload"), "http://localhost:8000/upload");
    }

    #[test]
    fn test_error_detail_string() {
        let detail = error_detail(StatusCode::BAD_REQUEST, r#"{"detail":"bad file"}"#);
        assert_eq!(detail, "bad file");
    }

    #[test]
    fn test_error_detail_structured() {
        let body = r#"{"detail":[{"loc":["body","question"],"msg":"field required"}]}"#;
        let detail = error_detail(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert!(detail.contains("field required"));
    }

    #[test]
    fn test_error_detail_falls_back_to_body_then_reason() {
        assert_eq!(
            error_detail(StatusCode::BAD_GATEWAY, "upstream down\n"),
            "upstream down"
        );
        assert_eq!(
            error_detail(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Internal Server Error"
        );
    }
}
