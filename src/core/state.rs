//! # Application State
//!
//! Core business state for paperqa. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn Backend>        // where uploads and queries go
//! ├── transcript: Transcript           // append-only chat log
//! ├── status: Option<StatusNotice>     // latest upload notice (at most one)
//! ├── drop_zone_active: bool           // hover feedback on the upload zone
//! ├── health: BackendHealth            // result of the startup /health probe
//! ├── pending_queries: usize           // queries sent, not yet answered
//! └── uploading: bool                  // an upload is in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use log::debug;

use crate::api::Backend;
use crate::core::status::{Severity, StatusNotice};
use crate::core::transcript::{Message, Role, Transcript, sanitize};

/// What the startup health probe found out about the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendHealth {
    Unknown,
    Online,
    Offline(String),
}

impl BackendHealth {
    pub fn label(&self) -> String {
        match self {
            BackendHealth::Unknown => "checking...".to_string(),
            BackendHealth::Online => "online".to_string(),
            BackendHealth::Offline(reason) => format!("offline: {reason}"),
        }
    }
}

pub struct App {
    pub backend: Arc<dyn Backend>,
    pub transcript: Transcript,
    pub status: Option<StatusNotice>,
    pub drop_zone_active: bool,
    pub health: BackendHealth,
    pub pending_queries: usize,
    pub uploading: bool,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            transcript: Transcript::new(),
            status: None,
            drop_zone_active: false,
            health: BackendHealth::Unknown,
            pending_queries: 0,
            uploading: false,
        }
    }

    pub fn base_url(&self) -> &str {
        self.backend.base_url()
    }

    /// Overwrites the single status notice. Control sequences in server
    /// details and file names are stripped.
    pub fn show_status(&mut self, message: impl Into<String>, severity: Severity) {
        let notice = StatusNotice::new(sanitize(&message.into()), severity);
        debug!("Status notice [{}]: {}", notice.severity.label(), notice.message);
        self.status = Some(notice);
    }

    /// Appends a labeled message to the transcript.
    pub fn add_message(&mut self, sender: &str, content: &str, role: Role) -> &Message {
        self.transcript.push(Message::new(sender, content, role))
    }

    pub fn is_busy(&self) -> bool {
        self.uploading || self.pending_queries > 0
    }
}
