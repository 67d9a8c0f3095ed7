//! Window-manager collaborator types.
//!
//! The shell never draws windows. It builds a [`WindowConfig`] and hands it
//! to whatever [`WindowManager`] the host attached.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Opaque handle returned by the window manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Desktop coordinates in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Window dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// Application kinds the desktop knows how to host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppType {
    Notepad,
    Explorer,
    Terminal,
    ImageViewer,
    Paint,
    Minesweeper,
    Snake,
    Chat,
}

/// Initial content of a window, one strongly typed variant per application.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "app", rename_all = "kebab-case")]
pub enum AppContent {
    Notepad {
        /// Backing file, if the window edits an existing one.
        file_path: Option<String>,
        file_name: Option<String>,
        text: String,
        read_only: bool,
    },
    Explorer {
        path: String,
    },
    Terminal {
        working_dir: String,
    },
    ImageViewer {
        path: String,
        name: String,
        #[serde(skip)]
        payload: Option<Arc<[u8]>>,
    },
    Paint,
    Minesweeper {
        rows: u8,
        cols: u8,
        mines: u16,
    },
    Snake,
    Chat {
        greeting: String,
    },
}

impl AppContent {
    /// The application this content belongs to.
    pub fn app_type(&self) -> AppType {
        match self {
            Self::Notepad { .. } => AppType::Notepad,
            Self::Explorer { .. } => AppType::Explorer,
            Self::Terminal { .. } => AppType::Terminal,
            Self::ImageViewer { .. } => AppType::ImageViewer,
            Self::Paint => AppType::Paint,
            Self::Minesweeper { .. } => AppType::Minesweeper,
            Self::Snake => AppType::Snake,
            Self::Chat { .. } => AppType::Chat,
        }
    }
}

/// Launch request passed to [`WindowManager::open_window`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WindowConfig {
    pub title: String,
    pub app_type: AppType,
    pub position: Position,
    pub size: Size,
    pub icon: String,
    pub content: AppContent,
}

/// External window manager.
///
/// Fire-and-forget from the shell's point of view: the returned id is only
/// reported back to the user.
pub trait WindowManager: Send + Sync {
    fn open_window(&self, config: WindowConfig) -> WindowId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_app_type() {
        let content = AppContent::Notepad {
            file_path: None,
            file_name: None,
            text: String::new(),
            read_only: false,
        };
        assert_eq!(content.app_type(), AppType::Notepad);
        assert_eq!(AppContent::Snake.app_type(), AppType::Snake);
    }

    #[test]
    fn test_content_serializes_with_app_tag() {
        let json = serde_json::to_value(AppContent::Explorer {
            path: "/C:".to_string(),
        })
        .unwrap();
        assert_eq!(json["app"], "explorer");
        assert_eq!(json["path"], "/C:");
    }
}
