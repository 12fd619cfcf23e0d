//! # Status Notice
//!
//! The single feedback line for upload operations. There is never more than
//! one: every upload event overwrites whatever was there before, and nothing
//! clears it on a timer.

/// Severity of a status notice. Drives the color in the upload panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNotice {
    pub message: String,
    pub severity: Severity,
}

impl StatusNotice {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}
