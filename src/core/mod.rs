//! Core logic of the shell.
//!
//! This module provides:
//! - [`VfsStore`]: the copy-on-write virtual filesystem
//! - [`path`]: normalization, resolution and shortcuts
//! - [`parse_input`]: tokenizer and flag parser
//! - [`CommandRegistry`]: the built-in commands
//! - [`ShellRuntime`]: per-session interpreter state

pub mod apps;
pub mod commands;
pub mod error;
pub mod filesystem;
pub mod history;
pub mod parser;
pub mod path;
pub mod runtime;
mod seed;

pub use commands::{Command, CommandCategory, CommandContext, CommandOutcome, CommandRegistry};
pub use error::{ConfigError, ShellError, SnapshotError};
pub use filesystem::{DesktopLayer, VfsStore};
pub use history::CommandHistory;
pub use parser::{FlagValue, ParsedCommand, parse_input};
pub use runtime::{ShellRuntime, TranscriptEvent, TranscriptListener};
