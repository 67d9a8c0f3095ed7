//! Virtual filesystem and command shell for a retro desktop simulation.
//!
//! The crate has no UI. A host (the `retrosh` binary, or a desktop front end)
//! owns a [`ShellRuntime`] per terminal session, feeds it input lines and
//! renders the transcript it produces. Windows and desktop icons are reached
//! through the [`WindowManager`] and [`DesktopLayer`] traits.

pub mod config;
pub mod core;
pub mod models;
pub mod utils;

pub use crate::config::ShellConfig;
pub use crate::core::{CommandRegistry, DesktopLayer, ShellError, ShellRuntime, TranscriptEvent, VfsStore};
pub use crate::models::{OutputLine, WindowConfig, WindowId, WindowManager};
