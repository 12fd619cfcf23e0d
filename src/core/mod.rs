//! # Core Application Logic
//!
//! This module contains paperqa's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Effect (I/O to do)   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                    ┌───────────┴─────────────┐
//!                    ▼                         ▼
//!             ┌────────────┐            ┌────────────┐
//!             │    TUI     │            │  Backend   │
//!             │  Adapter   │ ─────────▶ │ (api mod)  │
//!             │ (ratatui)  │  spawns    │  reqwest   │
//!             └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum, `Effect` enum and the `update()` reducer
//! - [`transcript`]: Chat messages and text sanitizing
//! - [`status`]: The upload status notice
//! - [`upload`]: Pending files, declared types and dropped-path parsing
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod state;
pub mod status;
pub mod transcript;
pub mod upload;
