//! Data models shared by the shell core and its host.
//!
//! Contains domain types for:
//! - [`FileSystemItem`], [`ItemKind`], [`ItemId`] - Virtual filesystem nodes
//! - [`OutputLine`] - Transcript lines
//! - [`ShellMode`], [`Effect`] - Per-session interpreter state
//! - [`WindowConfig`], [`AppContent`], [`WindowManager`] - Application launching

mod filesystem;
mod terminal;
mod window;

pub use filesystem::{FileSystemItem, ItemId, ItemKind, extension_of};
pub use terminal::{Effect, EffectRequest, OutputLine, OutputLineData, ShellMode, TextStyle};
pub use window::{AppContent, AppType, Position, Size, WindowConfig, WindowId, WindowManager};
