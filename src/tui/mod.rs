//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates terminal events into core::Action values and carries out the
//! Effects that `update` returns.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Dropping Files
//!
//! Terminals have no drag-and-drop API. Dropping a file onto most terminal
//! windows types or pastes its path, so a bracketed paste that parses as a
//! path to an existing file is treated as a drop. Anything else pasted goes
//! into the input box. Mouse movement over the upload zone stands in for
//! drag-over highlighting.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (upload or queries in flight): draws every ~80ms for the spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on events, background
//!   results or terminal resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::layout::Rect;
use tokio::task::JoinHandle;

use crate::api::{Backend, HttpBackend};
use crate::core::action::{Action, Effect, file_action, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::core::upload::{FileOrigin, parse_dropped_path};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    FilePickerEvent, FilePickerState, InputBox, InputEvent, MessageListState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub input_box: InputBox,
    // File picker overlay (None = hidden)
    pub file_picker: Option<FilePickerState>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            file_picker: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig, initial_upload: Option<PathBuf>) -> std::io::Result<()> {
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(config.base_url.clone()));
    info!("Using backend at {}", backend.base_url());
    let mut app = App::new(backend);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    spawn_health_check(app.backend.clone(), tx.clone());
    if let Some(path) = initial_upload {
        apply(&mut app, file_action(&path, FileOrigin::Picked), &tx);
    }

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_busy();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let frame_area = terminal.get_frame().area();
            if handle_tui_event(&mut app, &mut tui, event, frame_area, &tx) {
                should_quit = true;
            }
        }

        // Results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply(&mut app, action, &tx) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Routes one terminal event. Returns true when the app should quit.
fn handle_tui_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    frame_area: Rect,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match event {
        // Resize just needs a redraw
        TuiEvent::Resize => false,
        // Ctrl+C always quits, even with the picker open
        TuiEvent::ForceQuit => apply(app, Action::Quit, tx),
        _ if tui.file_picker.is_some() => {
            let picked = tui
                .file_picker
                .as_mut()
                .and_then(|picker| picker.handle_event(&event));
            match picked {
                Some(FilePickerEvent::Pick(path)) => {
                    tui.file_picker = None;
                    apply(app, file_action(&path, FileOrigin::Picked), tx)
                }
                Some(FilePickerEvent::Dismiss) => {
                    tui.file_picker = None;
                    false
                }
                None => false,
            }
        }
        TuiEvent::OpenFilePicker => {
            let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            tui.file_picker = Some(FilePickerState::open(dir));
            false
        }
        TuiEvent::MouseMove(column, row) => {
            let input_height = tui.input_box.calculate_height(frame_area.width);
            let hovering = ui::over_upload_zone(frame_area, input_height, column, row);
            match (hovering, app.drop_zone_active) {
                (true, false) => apply(app, Action::DragEnter, tx),
                (false, true) => apply(app, Action::DragLeave, tx),
                _ => false,
            }
        }
        TuiEvent::Paste(ref text) => match dropped_file(text) {
            Some(path) => apply(app, file_action(&path, FileOrigin::Dropped), tx),
            None => {
                tui.input_box.handle_event(&event);
                false
            }
        },
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom
        | TuiEvent::CursorUp
        | TuiEvent::CursorDown => {
            tui.message_list.handle_event(&event);
            false
        }
        _ => match tui.input_box.handle_event(&event) {
            Some(InputEvent::Submit(text)) => apply(app, Action::SubmitQuestion(text), tx),
            Some(InputEvent::ContentChanged) | None => false,
        },
    }
}

/// A paste counts as a drop when every non-blank line names an existing
/// file. Dropping several files pastes one path per line; only the first
/// one is uploaded.
fn dropped_file(text: &str) -> Option<PathBuf> {
    let paths: Vec<PathBuf> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_dropped_path)
        .collect::<Option<_>>()?;
    if !paths.iter().all(|path| path.is_file()) {
        return None;
    }
    paths.into_iter().next()
}

/// Runs `action` through `update` and carries out the resulting effect.
/// Returns true when the app should quit.
fn apply(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        effect => {
            execute_effect(&app.backend, effect, tx);
            false
        }
    }
}

/// Spawns the network call for `effect`. The result comes back as an Action
/// on `tx`.
fn execute_effect(
    backend: &Arc<dyn Backend>,
    effect: Effect,
    tx: &mpsc::Sender<Action>,
) -> Option<JoinHandle<()>> {
    match effect {
        Effect::None | Effect::Quit => None,
        Effect::Upload(file) => {
            let backend = backend.clone();
            let tx = tx.clone();
            Some(tokio::spawn(async move {
                let result = backend.upload(&file).await;
                send(
                    &tx,
                    Action::UploadFinished {
                        file_name: file.name,
                        result,
                    },
                );
            }))
        }
        Effect::Query {
            request_id,
            request,
        } => {
            info!("Sending query {} (top_k={})", request_id, request.top_k);
            let backend = backend.clone();
            let tx = tx.clone();
            Some(tokio::spawn(async move {
                let result = backend.query(&request).await;
                send(&tx, Action::AnswerReceived { request_id, result });
            }))
        }
    }
}

fn spawn_health_check(backend: Arc<dyn Backend>, tx: mpsc::Sender<Action>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = backend.health().await;
        send(&tx, Action::HealthChecked(result));
    })
}

fn send(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to deliver background result: receiver dropped");
    }
}

/// Used by `--upload` to report a bad path before the terminal is taken over.
pub fn check_upload_path(path: &Path) -> Result<(), String> {
    if path.is_file() {
        Ok(())
    } else {
        Err(format!("not a file: {}", path.display()))
    }
}
