//! Wire types for the paper QA backend.
//!
//! Every successful response shares one envelope:
//!
//! ```json
//! { "status": "success", "message": "...", "data": { ... } }
//! ```
//!
//! Errors carry a FastAPI-style `{ "detail": "..." }` body.

use serde::{Deserialize, Serialize};

/// Number of retrieved chunks the backend should answer from. Not user-configurable.
pub const TOP_K: u32 = 3;

/// Body of `POST /query`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub question: String,
    pub top_k: u32,
}

impl QueryRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            top_k: TOP_K,
        }
    }
}

/// The common success envelope. `data` is endpoint-specific.
#[derive(Deserialize, Debug, Clone)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AnswerData {
    pub answer: String,
}

/// What the backend reports after ingesting a PDF.
///
/// Both counts are optional. Any 2xx JSON response counts as success,
/// whatever shape its `data` has.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReceipt {
    #[serde(default)]
    pub pages: Option<u64>,
    #[serde(default)]
    pub chunks: Option<u64>,
    #[serde(skip)]
    pub message: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthData {
    #[serde(default)]
    pub vectorstore_status: Option<String>,
    #[serde(default)]
    pub llm_status: Option<String>,
}

/// Result of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthReport {
    pub status: String,
    pub message: String,
    pub data: HealthData,
}

/// FastAPI error body.
#[derive(Deserialize, Debug, Clone)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}
