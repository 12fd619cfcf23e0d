//! # Transcript
//!
//! Append-only, creation-ordered list of chat messages.
//!
//! ```text
//! Transcript
//! └── messages: Vec<Message>
//!     ├── sender: String        // "您" or "系统"
//!     ├── content: String       // sanitized text, never markup
//!     ├── role: Role            // User | Assistant
//!     └── created_at: DateTime  // local time of insertion
//! ```
//!
//! Messages are plain text. Anything coming from the server or the user
//! passes through [`sanitize`] before it is stored, so nothing in the
//! transcript can drive the terminal (cursor moves, color changes, title
//! rewrites and the like).

use chrono::{DateTime, Local};

/// Sender label for messages typed by the user.
pub const USER_SENDER: &str = "您";
/// Sender label for backend answers and client notices.
pub const SYSTEM_SENDER: &str = "系统";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub sender: String,
    pub content: String,
    pub role: Role,
    pub created_at: DateTime<Local>,
}

impl Message {
    pub fn new(sender: &str, content: &str, role: Role) -> Self {
        Self {
            sender: sanitize(sender),
            content: sanitize(content),
            role,
            created_at: Local::now(),
        }
    }

    /// The labeled form shown in the transcript, e.g. `您：What is X?`.
    pub fn display_text(&self) -> String {
        format!("{}：{}", self.sender, self.content)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        self.messages
            .last()
            .expect("just pushed a message so the transcript is non-empty")
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Strips terminal control sequences and control characters from `text`.
///
/// Keeps `\n` and `\t`. `\r\n` collapses to `\n`. ANSI CSI (`ESC [ ... final`)
/// and OSC (`ESC ] ... BEL` or `ESC ] ... ESC \`) sequences are removed whole,
/// other escapes drop the ESC and the byte after it.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\u{1b}' => match chars.next() {
                Some('[') => {
                    // CSI: parameters and intermediates in 0x20..=0x3F, then one
                    // final byte in @..~. Anything else ends a malformed sequence.
                    while let Some(&c) = chars.peek() {
                        if (' '..='?').contains(&c) {
                            chars.next();
                            continue;
                        }
                        if ('@'..='~').contains(&c) {
                            chars.next();
                        }
                        break;
                    }
                }
                Some(']') => {
                    while let Some(c) = chars.next() {
                        if c == '\u{7}' {
                            break;
                        }
                        if c == '\u{1b}' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            '\n' | '\t' => out.push(c),
            '\r' if chars.peek() == Some(&'\n') => {}
            c if c.is_control() => {}
            c => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_uses_fullwidth_colon() {
        let msg = Message::new(USER_SENDER, "What is X?", Role::User);
        assert_eq!(msg.display_text(), "您：What is X?");
    }

    #[test]
    fn test_transcript_is_append_only_and_ordered() {
        let mut transcript = Transcript::new();
        transcript.push(Message::new(USER_SENDER, "first", Role::User));
        transcript.push(Message::new(SYSTEM_SENDER, "second", Role::Assistant));

        let messages = transcript.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "first");
        assert_eq!(messages[1].content, "second");
        assert!(messages[0].created_at <= messages[1].created_at);
    }

    #[test]
    fn test_markup_is_kept_as_text() {
        let msg = Message::new(SYSTEM_SENDER, "<script>alert(1)</script>", Role::Assistant);
        assert_eq!(msg.content, "<script>alert(1)</script>");
    }

    #[test]
    fn test_sanitize_strips_csi_sequences() {
        assert_eq!(sanitize("\u{1b}[31mred\u{1b}[0m text"), "red text");
        assert_eq!(sanitize("\u{1b}[2J\u{1b}[Hcleared"), "cleared");
    }

    #[test]
    fn test_sanitize_malformed_csi_keeps_following_text() {
        assert_eq!(sanitize("\u{1b}[论文已上传abc"), "论文已上传abc");
        assert_eq!(sanitize("\u{1b}[12;论文"), "论文");
        assert_eq!(sanitize("\u{1b}[12\n下一行"), "\n下一行");
    }

    #[test]
    fn test_sanitize_strips_osc_sequences() {
        assert_eq!(sanitize("\u{1b}]0;pwned\u{7}title"), "title");
        assert_eq!(sanitize("\u{1b}]8;;http://x\u{1b}\\link"), "link");
    }

    #[test]
    fn test_sanitize_keeps_newlines_and_tabs() {
        assert_eq!(sanitize("a\r\nb\tc\u{0}d\u{8}"), "a\nb\tcd");
    }

    #[test]
    fn test_sanitize_keeps_cjk() {
        assert_eq!(sanitize("论文已成功上传"), "论文已成功上传");
    }
}
