//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{ApiError, Backend, HealthReport, QueryRequest, UploadReceipt};
use crate::core::state::App;
use crate::core::upload::PendingFile;

/// A scripted backend. Replies are popped in order; calls are recorded.
///
/// With nothing scripted, uploads and health succeed and queries echo the
/// question back.
#[derive(Default)]
pub struct FakeBackend {
    upload_replies: Mutex<VecDeque<Result<UploadReceipt, ApiError>>>,
    query_replies: Mutex<VecDeque<Result<String, ApiError>>>,
    pub uploads: Mutex<Vec<PendingFile>>,
    pub queries: Mutex<Vec<QueryRequest>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_upload(self, reply: Result<UploadReceipt, ApiError>) -> Self {
        self.upload_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn reply_query(self, reply: Result<String, ApiError>) -> Self {
        self.query_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    fn base_url(&self) -> &str {
        "http://fake.test"
    }

    async fn upload(&self, file: &PendingFile) -> Result<UploadReceipt, ApiError> {
        self.uploads.lock().unwrap().push(file.clone());
        self.upload_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(UploadReceipt::default()))
    }

    async fn query(&self, request: &QueryRequest) -> Result<String, ApiError> {
        self.queries.lock().unwrap().push(request.clone());
        self.query_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(request.question.clone()))
    }

    async fn health(&self) -> Result<HealthReport, ApiError> {
        Ok(HealthReport::default())
    }
}

/// Creates a test App with a default FakeBackend.
pub fn test_app() -> App {
    App::new(Arc::new(FakeBackend::new()))
}

/// Creates a test App around the given backend, keeping a handle for assertions.
pub fn test_app_with(backend: FakeBackend) -> (App, Arc<FakeBackend>) {
    let backend = Arc::new(backend);
    (App::new(backend.clone()), backend)
}
