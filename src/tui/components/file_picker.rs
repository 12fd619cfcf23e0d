//! # File Picker Component
//!
//! Overlay for choosing a file from disk. Opened with Ctrl+O.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FilePickerState` lives in `TuiState` while the overlay is open
//! - `FilePicker` is created each frame with borrowed state
//!
//! The picker lists every file, not just PDFs. Whatever gets picked goes
//! through the same type check as a dropped file.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::core::upload::{PDF_MIME, declared_type};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Persistent state for the file picker overlay.
pub struct FilePickerState {
    pub dir: PathBuf,
    pub entries: Vec<PickerEntry>,
    pub selected: usize,
    pub list_state: ListState,
    /// Set when the current directory could not be listed
    pub error: Option<String>,
}

/// Events emitted by the file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePickerEvent {
    Pick(PathBuf),
    Dismiss,
}

impl FilePickerState {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let mut state = Self {
            dir: PathBuf::new(),
            entries: Vec::new(),
            selected: 0,
            list_state: ListState::default(),
            error: None,
        };
        state.change_dir(dir.into());
        state
    }

    fn change_dir(&mut self, dir: PathBuf) {
        match list_dir(&dir) {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(e) => {
                warn!("Failed to list {}: {}", dir.display(), e);
                self.entries = parent_entry(&dir).into_iter().collect();
                self.error = Some(e.to_string());
            }
        }
        self.dir = dir;
        self.selected = 0;
        self.list_state
            .select(if self.entries.is_empty() { None } else { Some(0) });
    }

    fn go_up(&mut self) {
        if let Some(parent) = self.dir.parent() {
            let parent = parent.to_path_buf();
            self.change_dir(parent);
        }
    }

    /// Handle a key event, returning a FilePickerEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<FilePickerEvent> {
        match event {
            TuiEvent::Escape => Some(FilePickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.entries.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.entries.is_empty() {
                    self.selected = (self.selected + 1).min(self.entries.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Backspace => {
                self.go_up();
                None
            }
            TuiEvent::Submit => {
                let entry = self.entries.get(self.selected)?.clone();
                if entry.is_dir {
                    self.change_dir(entry.path);
                    None
                } else {
                    Some(FilePickerEvent::Pick(entry.path))
                }
            }
            _ => None,
        }
    }
}

fn parent_entry(dir: &Path) -> Option<PickerEntry> {
    dir.parent().map(|parent| PickerEntry {
        name: "..".to_string(),
        path: parent.to_path_buf(),
        is_dir: true,
    })
}

/// Lists `dir`: `..` first, then directories, then files, each sorted by
/// name. Dotfiles are skipped.
fn list_dir(dir: &Path) -> std::io::Result<Vec<PickerEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        let is_dir = path.is_dir();
        let item = PickerEntry { name, path, is_dir };
        if is_dir {
            dirs.push(item);
        } else {
            files.push(item);
        }
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let mut entries: Vec<PickerEntry> = parent_entry(dir).into_iter().collect();
    entries.extend(dirs);
    entries.extend(files);
    Ok(entries)
}

/// Transient render wrapper for the file picker overlay.
pub struct FilePicker<'a> {
    state: &'a mut FilePickerState,
}

impl<'a> FilePicker<'a> {
    pub fn new(state: &'a mut FilePickerState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 70, area);

        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.state.dir.display()))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Open  Backspace Up  Esc Cancel ").centered())
            .padding(Padding::horizontal(1));

        if let Some(error) = &self.state.error
            && self.state.entries.len() <= 1
        {
            let message = Paragraph::new(format!("Cannot read directory: {error}"))
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, overlay);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let label = if entry.is_dir {
                    format!("{}/", entry.name)
                } else {
                    entry.name.clone()
                };
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if entry.is_dir {
                    Style::default().fg(Color::Cyan)
                } else if declared_type(&entry.name) == PDF_MIME {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(Line::from(Span::styled(label, style)))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
