pub mod backend;
pub mod http;
pub mod types;

pub use backend::{ApiError, Backend};
pub use http::HttpBackend;
pub use types::{HealthReport, QueryRequest, TOP_K, UploadReceipt};
