//! Error types for the shell core.
//!
//! - [`ShellError`] - command failures, rendered as one error line each
//! - [`ConfigError`] - configuration parsing and validation
//! - [`SnapshotError`] - VFS snapshot (de)serialization
//!
//! The VFS store and path resolver never produce these; they report failure
//! through `Option`/`bool` and the calling handler picks the message.

use thiserror::Error;

/// Command execution errors.
///
/// `command` is the name the user typed the command under, so messages read
/// like `del: notes.txt: No such file or directory`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    /// Missing path, file or launch target.
    #[error("{command}: {target}: No such file or directory")]
    NotFound { command: String, target: String },
    /// A folder was required.
    #[error("{command}: {target}: Not a directory")]
    NotADirectory { command: String, target: String },
    /// A file was required.
    #[error("{command}: {target}: Is a directory")]
    IsADirectory { command: String, target: String },
    /// Name collision on create.
    #[error("{command}: {target}: Already exists")]
    AlreadyExists { command: String, target: String },
    /// Deleting a protected item.
    #[error("{command}: {target}: Access denied")]
    PermissionDenied { command: String, target: String },
    /// Viewing a file that is not plain text.
    #[error("{command}: {target}: Unsupported file format")]
    UnsupportedFormat { command: String, target: String },
    /// Missing, extra or malformed arguments.
    #[error("{command}: {message}")]
    InvalidArgument { command: String, message: String },
    /// No command registered under this name or alias.
    #[error("'{0}' is not recognized as an internal or external command. Type 'help' for available commands.")]
    UnknownCommand(String),
    /// The host did not attach a window manager.
    #[error("{command}: no window manager available")]
    NoWindowManager { command: String },
    /// A handler failed unexpectedly (panicked).
    #[error("{command}: command failed unexpectedly")]
    Internal { command: String },
}

impl ShellError {
    pub fn not_found(command: &str, target: impl Into<String>) -> Self {
        Self::NotFound {
            command: command.to_string(),
            target: target.into(),
        }
    }

    pub fn not_a_directory(command: &str, target: impl Into<String>) -> Self {
        Self::NotADirectory {
            command: command.to_string(),
            target: target.into(),
        }
    }

    pub fn is_a_directory(command: &str, target: impl Into<String>) -> Self {
        Self::IsADirectory {
            command: command.to_string(),
            target: target.into(),
        }
    }

    pub fn already_exists(command: &str, target: impl Into<String>) -> Self {
        Self::AlreadyExists {
            command: command.to_string(),
            target: target.into(),
        }
    }

    pub fn permission_denied(command: &str, target: impl Into<String>) -> Self {
        Self::PermissionDenied {
            command: command.to_string(),
            target: target.into(),
        }
    }

    pub fn unsupported_format(command: &str, target: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            command: command.to_string(),
            target: target.into(),
        }
    }

    pub fn invalid_argument(command: &str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            command: command.to_string(),
            message: message.into(),
        }
    }

    /// Standard "missing operand" error with the command's usage.
    pub fn missing_operand(command: &str, usage: &str) -> Self {
        Self::invalid_argument(command, format!("missing operand (usage: {})", usage))
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML syntax or type mismatch.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value failed validation.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// VFS snapshot errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// JSON could not be produced or parsed.
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Parsed tree breaks a structural invariant.
    #[error("malformed snapshot: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_command_and_target() {
        assert_eq!(
            ShellError::not_found("rm", "ghost.txt").to_string(),
            "rm: ghost.txt: No such file or directory"
        );
        assert_eq!(
            ShellError::permission_denied("del", "Windows").to_string(),
            "del: Windows: Access denied"
        );
        assert_eq!(
            ShellError::invalid_argument("hack", "not connected").to_string(),
            "hack: not connected"
        );
    }

    #[test]
    fn test_unknown_command_message() {
        let msg = ShellError::UnknownCommand("frobnicate".into()).to_string();
        assert!(msg.starts_with("'frobnicate' is not recognized"));
    }

    #[test]
    fn test_missing_operand_includes_usage() {
        let err = ShellError::missing_operand("cat", "cat <file>");
        assert_eq!(err.to_string(), "cat: missing operand (usage: cat <file>)");
    }
}
