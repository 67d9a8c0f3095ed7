//! Transcript line types and per-session shell state enums.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Text styling for listing entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    /// Folder entries
    Directory,
    /// Regular file entries
    File,
    /// Launchable programs
    Executable,
}

/// A single transcript line with a unique ID and the time it was produced.
#[derive(Clone, Debug, Serialize)]
pub struct OutputLine {
    /// Unique ID for keying in UI lists
    pub id: usize,
    pub timestamp: DateTime<Utc>,
    pub data: OutputLineData,
}

/// The content of a transcript line.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputLineData {
    /// Echo of a submitted line with its prompt
    Command { prompt: String, input: String },
    /// Plain text output
    Text { text: String },
    /// Error message (exactly one per failure)
    Error { text: String },
    /// Success confirmation
    Success { text: String },
    /// Informational message
    Info { text: String },
    /// Empty line
    Empty,
    /// Listing entry (ls, dir)
    ListEntry {
        name: String,
        description: String,
        style: TextStyle,
    },
}

// Global counter for generating unique IDs
static OUTPUT_LINE_COUNTER: AtomicUsize = AtomicUsize::new(0);

impl OutputLine {
    fn new(data: OutputLineData) -> Self {
        Self {
            id: OUTPUT_LINE_COUNTER.fetch_add(1, Ordering::Relaxed),
            timestamp: Utc::now(),
            data,
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::new(OutputLineData::Text { text: s.into() })
    }

    pub fn error(s: impl Into<String>) -> Self {
        Self::new(OutputLineData::Error { text: s.into() })
    }

    pub fn success(s: impl Into<String>) -> Self {
        Self::new(OutputLineData::Success { text: s.into() })
    }

    pub fn info(s: impl Into<String>) -> Self {
        Self::new(OutputLineData::Info { text: s.into() })
    }

    pub fn command(prompt: impl Into<String>, input: impl Into<String>) -> Self {
        Self::new(OutputLineData::Command {
            prompt: prompt.into(),
            input: input.into(),
        })
    }

    pub fn dir_entry(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(OutputLineData::ListEntry {
            name: name.into(),
            description: description.into(),
            style: TextStyle::Directory,
        })
    }

    pub fn file_entry(name: impl Into<String>, description: impl Into<String>, style: TextStyle) -> Self {
        Self::new(OutputLineData::ListEntry {
            name: name.into(),
            description: description.into(),
            style,
        })
    }

    pub fn empty() -> Self {
        Self::new(OutputLineData::Empty)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.data, OutputLineData::Error { .. })
    }

    /// The visible text of the line, without styling.
    pub fn plain_text(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for OutputLine {
    fn eq(&self, other: &Self) -> bool {
        // Only compare data, not ID or timestamp
        self.data == other.data
    }
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            OutputLineData::Command { prompt, input } => write!(f, "{}{}", prompt, input),
            OutputLineData::Text { text }
            | OutputLineData::Error { text }
            | OutputLineData::Success { text }
            | OutputLineData::Info { text } => f.write_str(text),
            OutputLineData::Empty => Ok(()),
            OutputLineData::ListEntry {
                name, description, ..
            } => write!(f, "{:<8} {}", description, name),
        }
    }
}

// =============================================================================
// Shell Mode
// =============================================================================

/// Interpreter mode of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellMode {
    #[default]
    Normal,
    /// Easter-egg "mainframe" sub-mode
    Hack,
}

impl fmt::Display for ShellMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::Hack => f.write_str("hack"),
        }
    }
}

// =============================================================================
// Visual Effects
// =============================================================================

/// Full-screen visual effect the host renders over the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// Falling green glyphs
    Matrix,
    /// Screen shake and red flash
    Alarm,
    /// Scrolling trace lines
    Trace,
}

/// Effect change requested by a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectRequest {
    Set(Effect),
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_line_constructors() {
        assert_eq!(
            OutputLine::text("hello").data,
            OutputLineData::Text {
                text: "hello".to_string()
            }
        );
        assert!(OutputLine::error("boom").is_error());
        assert!(!OutputLine::info("fyi").is_error());
    }

    #[test]
    fn test_unique_ids() {
        let line1 = OutputLine::text("first");
        let line2 = OutputLine::text("second");
        let line3 = OutputLine::text("first");

        assert_ne!(line1.id, line2.id);
        assert_ne!(line1.id, line3.id);
        // Content equality ignores the id
        assert_eq!(line1, line3);
    }

    #[test]
    fn test_display() {
        assert_eq!(OutputLine::command("C:\\>", "dir").to_string(), "C:\\>dir");
        assert_eq!(OutputLine::dir_entry("Users", "<DIR>").to_string(), "<DIR>    Users");
        assert_eq!(OutputLine::empty().to_string(), "");
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let json = serde_json::to_value(OutputLine::error("nope").data).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["text"], "nope");
    }

    #[test]
    fn test_default_mode_is_normal() {
        assert_eq!(ShellMode::default(), ShellMode::Normal);
        assert_eq!(ShellMode::Hack.to_string(), "hack");
    }
}
