//! Static application table.
//!
//! One entry per application the desktop can host: default window title,
//! geometry, icon and the names `run` accepts for it. The same table backs
//! desktop launch points outside the shell.

use crate::models::{AppContent, AppType, Position, Size, WindowConfig};

/// Launch defaults for one application.
#[derive(Clone, Copy, Debug)]
pub struct AppDefinition {
    pub app_type: AppType,
    /// Primary name accepted by `run`
    pub key: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub size: Size,
    pub position: Position,
    pub aliases: &'static [&'static str],
}

const fn geometry(x: i32, y: i32, width: u32, height: u32) -> (Position, Size) {
    (Position { x, y }, Size { width, height })
}

const NOTEPAD: (Position, Size) = geometry(120, 80, 520, 380);
const EXPLORER: (Position, Size) = geometry(80, 60, 640, 440);
const TERMINAL: (Position, Size) = geometry(100, 100, 600, 400);
const VIEWER: (Position, Size) = geometry(140, 90, 480, 400);
const PAINT: (Position, Size) = geometry(60, 40, 700, 500);
const MINES: (Position, Size) = geometry(200, 120, 260, 330);
const SNAKE: (Position, Size) = geometry(180, 110, 420, 460);
const CHAT: (Position, Size) = geometry(160, 70, 400, 520);

/// Every application, keyed by [`AppType`].
pub static APPLICATIONS: &[AppDefinition] = &[
    AppDefinition {
        app_type: AppType::Notepad,
        key: "notepad",
        title: "Notepad",
        icon: "notepad.ico",
        position: NOTEPAD.0,
        size: NOTEPAD.1,
        aliases: &["edit", "text"],
    },
    AppDefinition {
        app_type: AppType::Explorer,
        key: "explorer",
        title: "My Computer",
        icon: "computer.ico",
        position: EXPLORER.0,
        size: EXPLORER.1,
        aliases: &["files", "mycomputer"],
    },
    AppDefinition {
        app_type: AppType::Terminal,
        key: "terminal",
        title: "MS-DOS Prompt",
        icon: "dos.ico",
        position: TERMINAL.0,
        size: TERMINAL.1,
        aliases: &["cmd", "command", "dos"],
    },
    AppDefinition {
        app_type: AppType::ImageViewer,
        key: "imageviewer",
        title: "Image Viewer",
        icon: "image.ico",
        position: VIEWER.0,
        size: VIEWER.1,
        aliases: &["viewer", "pictures"],
    },
    AppDefinition {
        app_type: AppType::Paint,
        key: "paint",
        title: "Paint",
        icon: "paint.ico",
        position: PAINT.0,
        size: PAINT.1,
        aliases: &["mspaint", "pbrush"],
    },
    AppDefinition {
        app_type: AppType::Minesweeper,
        key: "minesweeper",
        title: "Minesweeper",
        icon: "mine.ico",
        position: MINES.0,
        size: MINES.1,
        aliases: &["winmine", "mines"],
    },
    AppDefinition {
        app_type: AppType::Snake,
        key: "snake",
        title: "Snake",
        icon: "snake.ico",
        position: SNAKE.0,
        size: SNAKE.1,
        aliases: &["nibbles"],
    },
    AppDefinition {
        app_type: AppType::Chat,
        key: "chat",
        title: "Assistant",
        icon: "assistant.ico",
        position: CHAT.0,
        size: CHAT.1,
        aliases: &["assistant", "clippy"],
    },
];

/// Find an application by key or alias, ignoring ASCII case.
pub fn find_app(name: &str) -> Option<&'static AppDefinition> {
    APPLICATIONS.iter().find(|app| {
        app.key.eq_ignore_ascii_case(name) || app.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    })
}

/// Table entry for an application type.
pub fn app_for_type(app_type: AppType) -> Option<&'static AppDefinition> {
    APPLICATIONS.iter().find(|app| app.app_type == app_type)
}

impl AppDefinition {
    /// Initial content when launched without a document.
    pub fn default_content(&self, working_dir: &str) -> AppContent {
        match self.app_type {
            AppType::Notepad => AppContent::Notepad {
                file_path: None,
                file_name: None,
                text: String::new(),
                read_only: false,
            },
            AppType::Explorer => AppContent::Explorer {
                path: working_dir.to_string(),
            },
            AppType::Terminal => AppContent::Terminal {
                working_dir: working_dir.to_string(),
            },
            AppType::ImageViewer => AppContent::ImageViewer {
                path: String::new(),
                name: String::new(),
                payload: None,
            },
            AppType::Paint => AppContent::Paint,
            AppType::Minesweeper => AppContent::Minesweeper {
                rows: 9,
                cols: 9,
                mines: 10,
            },
            AppType::Snake => AppContent::Snake,
            AppType::Chat => AppContent::Chat {
                greeting: "Hi! It looks like you're using a computer. Need help?".to_string(),
            },
        }
    }

    /// Launch request for this application with the given content.
    ///
    /// Documents get their name in the title, as in `notes.txt - Notepad`.
    pub fn window_config(&self, content: AppContent) -> WindowConfig {
        let title = match &content {
            AppContent::Notepad {
                file_name: Some(name),
                ..
            } => format!("{} - {}", name, self.title),
            AppContent::ImageViewer { name, .. } if !name.is_empty() => {
                format!("{} - {}", name, self.title)
            }
            _ => self.title.to_string(),
        };

        WindowConfig {
            title,
            app_type: self.app_type,
            position: self.position,
            size: self.size,
            icon: self.icon.to_string(),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_app_type_has_one_entry() {
        for app in APPLICATIONS {
            let matching = APPLICATIONS.iter().filter(|a| a.app_type == app.app_type).count();
            assert_eq!(matching, 1, "{:?}", app.app_type);
            assert_eq!(app.default_content("/").app_type(), app.app_type);
        }
    }

    #[test]
    fn test_find_by_key_and_alias() {
        assert_eq!(find_app("notepad").map(|a| a.app_type), Some(AppType::Notepad));
        assert_eq!(find_app("MSPAINT").map(|a| a.app_type), Some(AppType::Paint));
        assert_eq!(find_app("winmine").map(|a| a.app_type), Some(AppType::Minesweeper));
        assert!(find_app("doom").is_none());
    }

    #[test]
    fn test_window_config_title() {
        let notepad = app_for_type(AppType::Notepad).unwrap();
        let config = notepad.window_config(AppContent::Notepad {
            file_path: Some("/C:/notes.txt".to_string()),
            file_name: Some("notes.txt".to_string()),
            text: String::new(),
            read_only: false,
        });
        assert_eq!(config.title, "notes.txt - Notepad");
        assert_eq!(config.size, notepad.size);

        let blank = notepad.window_config(notepad.default_content("/"));
        assert_eq!(blank.title, "Notepad");
    }
}
