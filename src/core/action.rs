//! # Actions
//!
//! Everything that can happen in paperqa becomes an `Action`.
//! User drops a file? That's `Action::FileDropped(file)`.
//! Backend answers? That's `Action::AnswerReceived { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an [`Effect`] describing the I/O the adapter must
//! perform next. No network calls happen here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: feed actions, assert on state and effect.

use std::path::Path;

use log::{debug, info, warn};
use uuid::Uuid;

use crate::api::{ApiError, HealthReport, QueryRequest, UploadReceipt};
use crate::core::state::{App, BackendHealth};
use crate::core::status::Severity;
use crate::core::transcript::{Role, SYSTEM_SENDER, USER_SENDER};
use crate::core::upload::{FileOrigin, PendingFile};

pub const MSG_REJECT_NON_PDF: &str = "请上传PDF文件";
pub const MSG_UPLOADING: &str = "正在上传文件...";
pub const MSG_READY_FOR_QUESTIONS: &str = "论文已成功上传，现在您可以开始提问了。";

#[derive(Debug)]
pub enum Action {
    /// A file was dropped onto the upload zone.
    FileDropped(PendingFile),
    /// A file was chosen in the picker.
    FilePicked(PendingFile),
    /// A dropped or picked path could not be read.
    FileUnreadable(String),
    DragEnter,
    DragLeave,
    /// Enter pressed in the chat input, with the raw input text.
    SubmitQuestion(String),
    UploadFinished {
        file_name: String,
        result: Result<UploadReceipt, ApiError>,
    },
    AnswerReceived {
        request_id: Uuid,
        result: Result<String, ApiError>,
    },
    HealthChecked(Result<HealthReport, ApiError>),
    Quit,
}

/// A described side effect for the adapter to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Upload(PendingFile),
    Query {
        request_id: Uuid,
        request: QueryRequest,
    },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::FileDropped(file) => accept_file(app, file, FileOrigin::Dropped),
        Action::FilePicked(file) => accept_file(app, file, FileOrigin::Picked),
        Action::FileUnreadable(reason) => {
            app.drop_zone_active = false;
            warn!("Rejected unreadable file: {}", reason);
            app.show_status(format!("无法读取文件：{reason}"), Severity::Error);
            Effect::None
        }
        Action::DragEnter => {
            app.drop_zone_active = true;
            Effect::None
        }
        Action::DragLeave => {
            app.drop_zone_active = false;
            Effect::None
        }
        Action::SubmitQuestion(raw) => {
            let question = raw.trim();
            if question.is_empty() {
                return Effect::None;
            }
            app.add_message(USER_SENDER, question, Role::User);
            app.pending_queries += 1;

            let request_id = Uuid::new_v4();
            info!(
                "Question submitted (request_id={}, in_flight={})",
                request_id, app.pending_queries
            );
            Effect::Query {
                request_id,
                request: QueryRequest::new(question),
            }
        }
        Action::UploadFinished { file_name, result } => {
            app.uploading = false;
            match result {
                Ok(receipt) => {
                    info!(
                        "Upload of {} succeeded: pages={:?}, chunks={:?}, message={:?}",
                        file_name, receipt.pages, receipt.chunks, receipt.message
                    );
                    app.show_status(format!("文件上传成功：{file_name}"), Severity::Success);
                    app.add_message(SYSTEM_SENDER, MSG_READY_FOR_QUESTIONS, Role::Assistant);
                }
                Err(e) => {
                    warn!("Upload of {} failed: {}", file_name, e);
                    let text = if e.is_server() {
                        format!("上传失败：{}", e.user_message())
                    } else {
                        format!("上传出错：{}", e.user_message())
                    };
                    app.show_status(text, Severity::Error);
                }
            }
            Effect::None
        }
        Action::AnswerReceived { request_id, result } => {
            app.pending_queries = app.pending_queries.saturating_sub(1);
            let content = match result {
                Ok(answer) => {
                    debug!("Answer received (request_id={}, len={})", request_id, answer.len());
                    answer
                }
                Err(e) => {
                    warn!("Query failed (request_id={}): {}", request_id, e);
                    if e.is_server() {
                        format!("抱歉，处理问题时出错：{}", e.user_message())
                    } else {
                        format!("网络错误：{}", e.user_message())
                    }
                }
            };
            app.add_message(SYSTEM_SENDER, &content, Role::Assistant);
            Effect::None
        }
        Action::HealthChecked(result) => {
            app.health = match result {
                Ok(report) => {
                    info!("Backend healthy: {} {:?}", report.message, report.data);
                    BackendHealth::Online
                }
                Err(e) => {
                    warn!("Backend health check failed: {}", e);
                    BackendHealth::Offline(e.user_message().to_string())
                }
            };
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Shared by both entry paths: drop and picker are validated the same way.
fn accept_file(app: &mut App, file: PendingFile, origin: FileOrigin) -> Effect {
    app.drop_zone_active = false;

    if !file.is_pdf() {
        info!(
            "Rejected {:?} file {} with declared type {}",
            origin, file.name, file.mime_type
        );
        app.show_status(MSG_REJECT_NON_PDF, Severity::Error);
        return Effect::None;
    }

    info!("Accepted {:?} file {} ({} bytes)", origin, file.name, file.size());
    app.show_status(MSG_UPLOADING, Severity::Info);
    app.uploading = true;
    Effect::Upload(file)
}

/// Turns a path from the drop zone or picker into the action for `update`.
///
/// Reading happens here, on the adapter side, so `update` only ever sees
/// files that are already in memory.
pub fn file_action(path: &Path, origin: FileOrigin) -> Action {
    match PendingFile::from_path(path) {
        Ok(file) => match origin {
            FileOrigin::Dropped => Action::FileDropped(file),
            FileOrigin::Picked => Action::FilePicked(file),
        },
        Err(e) => {
            warn!("Could not read {}: {}", path.display(), e);
            Action::FileUnreadable(e.to_string())
        }
    }
}
