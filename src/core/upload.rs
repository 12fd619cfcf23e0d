//! # Upload Zone
//!
//! Turns a dropped or picked path into a [`PendingFile`] and decides whether
//! it may be sent. The only check is the declared type: the file has to
//! claim `application/pdf`. Content is never inspected.
//!
//! In a terminal, "drop" means the emulator pasted the path of the dragged
//! file. [`parse_dropped_path`] recognises that shape of paste.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const PDF_MIME: &str = "application/pdf";
const FALLBACK_MIME: &str = "application/octet-stream";

/// Extension → declared MIME type. Lookup is case-insensitive.
const KNOWN_TYPES: &[(&str, &str)] = &[
    ("pdf", PDF_MIME),
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("json", "application/json"),
    ("doc", "application/msword"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("zip", "application/zip"),
];

/// How a file reached the upload zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOrigin {
    Dropped,
    Picked,
}

/// A user-selected file, read fully into memory and consumed by one upload.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

// Actions are logged with {:?}; never dump the file bytes.
impl fmt::Debug for PendingFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.content.len())
            .finish()
    }
}

impl PendingFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }

    /// Reads `path` from disk, deriving the name and declared type from it.
    pub fn from_path(path: &Path) -> Result<Self, FileError> {
        if !path.is_file() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        let content = fs::read(path).map_err(FileError::Unreadable)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            mime_type: declared_type(&name).to_string(),
            name,
            content,
        })
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// The MIME type a file name claims through its extension.
pub fn declared_type(name: &str) -> &'static str {
    let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) else {
        return FALLBACK_MIME;
    };
    let ext = ext.to_ascii_lowercase();
    KNOWN_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK_MIME)
}

#[derive(Debug)]
pub enum FileError {
    NotAFile(PathBuf),
    Unreadable(std::io::Error),
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotAFile(path) => write!(f, "not a file: {}", path.display()),
            FileError::Unreadable(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for FileError {}

/// Interprets pasted text as a dropped file path.
///
/// Terminals paste dragged files in a handful of shapes: a bare path, a path
/// wrapped in single or double quotes, a `file://` URI, or a path with
/// backslash-escaped spaces. Multi-line pastes and blank pastes are never
/// paths. This does not touch the filesystem; the caller checks existence.
pub fn parse_dropped_path(text: &str) -> Option<PathBuf> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains('\n') {
        return None;
    }

    let unquoted = strip_quotes(trimmed);
    let raw = unquoted.strip_prefix("file://").unwrap_or(unquoted);
    if raw.is_empty() {
        return None;
    }

    let path = if raw.contains('\\') && !looks_like_windows_path(raw) {
        unescape_backslashes(raw)
    } else {
        raw.replace("%20", " ")
    };

    Some(PathBuf::from(path))
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

fn looks_like_windows_path(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'\\'
}

fn unescape_backslashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_declared_type_pdf_any_case() {
        assert_eq!(declared_type("paper.pdf"), PDF_MIME);
        assert_eq!(declared_type("PAPER.PDF"), PDF_MIME);
    }

    #[test]
    fn test_declared_type_other_and_unknown() {
        assert_eq!(declared_type("notes.txt"), "text/plain");
        assert_eq!(declared_type("archive.tar.xyz"), FALLBACK_MIME);
        assert_eq!(declared_type("Makefile"), FALLBACK_MIME);
    }

    #[test]
    fn test_from_path_reads_content_and_type() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("paper.pdf");
        fs::write(&path, b"%PDF-1.4 test").unwrap();

        let file = PendingFile::from_path(&path).unwrap();
        assert_eq!(file.name, "paper.pdf");
        assert!(file.is_pdf());
        assert_eq!(file.content, b"%PDF-1.4 test");
        assert_eq!(file.size(), 13);
    }

    #[test]
    fn test_from_path_rejects_directories_and_missing() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            PendingFile::from_path(dir.path()),
            Err(FileError::NotAFile(_))
        ));
        assert!(matches!(
            PendingFile::from_path(&dir.path().join("missing.pdf")),
            Err(FileError::NotAFile(_))
        ));
    }

    #[test]
    fn test_type_is_claimed_not_sniffed() {
        // A PDF renamed to .txt is not a PDF as far as the zone is concerned
        let file = PendingFile::new("paper.txt", declared_type("paper.txt"), b"%PDF-1.7".to_vec());
        assert!(!file.is_pdf());
    }

    #[test]
    fn test_debug_omits_content() {
        let file = PendingFile::new("paper.pdf", PDF_MIME, vec![0u8; 4096]);
        let debug = format!("{file:?}");
        assert!(debug.contains("size: 4096"));
        assert!(!debug.contains("content"));
    }

    #[test]
    fn test_parse_dropped_path_shapes() {
        assert_eq!(
            parse_dropped_path("/home/u/paper.pdf"),
            Some(PathBuf::from("/home/u/paper.pdf"))
        );
        assert_eq!(
            parse_dropped_path("'/home/u/my paper.pdf' "),
            Some(PathBuf::from("/home/u/my paper.pdf"))
        );
        assert_eq!(
            parse_dropped_path("\"/home/u/my paper.pdf\""),
            Some(PathBuf::from("/home/u/my paper.pdf"))
        );
        assert_eq!(
            parse_dropped_path("/home/u/my\\ paper.pdf"),
            Some(PathBuf::from("/home/u/my paper.pdf"))
        );
        assert_eq!(
            parse_dropped_path("file:///home/u/my%20paper.pdf"),
            Some(PathBuf::from("/home/u/my paper.pdf"))
        );
    }

    #[test]
    fn test_parse_dropped_path_keeps_windows_separators() {
        assert_eq!(
            parse_dropped_path("C:\\Users\\u\\paper.pdf"),
            Some(PathBuf::from("C:\\Users\\u\\paper.pdf"))
        );
    }

    #[test]
    fn test_parse_dropped_path_rejects_text() {
        assert_eq!(parse_dropped_path("   "), None);
        assert_eq!(parse_dropped_path("line one\nline two"), None);
        assert_eq!(parse_dropped_path("''"), None);
    }
}
