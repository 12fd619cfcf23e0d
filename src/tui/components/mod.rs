//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top status bar showing backend URL, health and activity
//! - `UploadZone`: Drop target with the upload status line
//! - `Message`: A single transcript entry
//! - `LandingPage`: Hint shown while the transcript is empty
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: Question input field
//! - `MessageList`: Scrollable transcript view with layout caching
//! - `FilePicker`: Directory browser overlay
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── upload_zone.rs   (Drop target + status notice)
//! ├── file_picker.rs   (Ctrl+O overlay)
//! ├── message.rs       (Single message renderer)
//! ├── message_list.rs  (Scrollable message container)
//! ├── landing.rs       (Empty transcript hint)
//! └── input_box/       (Text input)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod file_picker;
pub mod input_box;
pub mod landing;
pub mod message;
pub mod message_list;
pub mod upload_zone;

pub use file_picker::{FilePicker, FilePickerEvent, FilePickerState};
pub use input_box::{InputBox, InputEvent};
pub use landing::LandingPage;
pub use message_list::{MessageList, MessageListState};
pub use upload_zone::UploadZone;
