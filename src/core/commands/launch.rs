//! Application launching: `run`, `start`, `open`.

use crate::core::apps::{self, AppDefinition};
use crate::core::error::ShellError;
use crate::core::path;
use crate::models::{AppContent, FileSystemItem, OutputLine, WindowConfig};

use super::{Command, CommandCategory, CommandContext, CommandOutcome};

pub(super) fn commands() -> Vec<Command> {
    vec![Command {
        name: "run",
        aliases: &["start", "open"],
        category: CommandCategory::Applications,
        usage: "run <program|file>",
        description: "Launch an application or open a file",
        hidden: false,
        handler: execute_run,
    }]
}

/// Execute `run` command.
///
/// Resolution order:
/// 1. an application name or alias from the application table
/// 2. a path relative to the current folder (documents open in their viewer)
/// 3. the first executable anywhere on the drive named `<name>` or `<name>.exe`
fn execute_run(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    let target = ctx.required_arg("run <program|file>")?;
    let config = resolve_target(ctx, target)?;

    let Some(windows) = ctx.windows else {
        return Err(ShellError::NoWindowManager {
            command: ctx.name().to_string(),
        });
    };

    let title = config.title.clone();
    log::debug!("{}: opening {:?} window for {}", ctx.name(), config.app_type, target);
    let id = windows.open_window(config);

    Ok(CommandOutcome::line(OutputLine::success(format!(
        "Started {} (window {})",
        title, id
    ))))
}

fn resolve_target(ctx: &CommandContext<'_>, target: &str) -> Result<WindowConfig, ShellError> {
    let working_dir = ctx.runtime.current_path();

    if let Some(app) = apps::find_app(target) {
        return Ok(app.window_config(app.default_content(working_dir)));
    }

    if let Some(item) = ctx.lookup(target) {
        return open_item(ctx.name(), target, &item);
    }

    let wanted = format!("{}.exe", target);
    let found = ctx.vfs.find_first(|item| {
        item.is_executable()
            && (item.name.eq_ignore_ascii_case(target) || item.name.eq_ignore_ascii_case(&wanted))
    });
    match found {
        Some(item) => open_item(ctx.name(), target, &item),
        None => Err(ShellError::not_found(ctx.name(), target)),
    }
}

/// Pick the application for a filesystem item and fill in its content.
fn open_item(command: &str, target: &str, item: &FileSystemItem) -> Result<WindowConfig, ShellError> {
    let content = if item.is_folder() {
        AppContent::Explorer {
            path: item.path.clone(),
        }
    } else if item.is_plain_text() {
        AppContent::Notepad {
            file_path: Some(item.path.clone()),
            file_name: Some(item.name.clone()),
            text: item.content.clone().unwrap_or_default(),
            read_only: item.is_protected,
        }
    } else if item.is_image() {
        AppContent::ImageViewer {
            path: item.path.clone(),
            name: item.name.clone(),
            payload: item.payload.clone(),
        }
    } else if item.is_executable() {
        let app = program_app(item).ok_or_else(|| ShellError::unsupported_format(command, target))?;
        app.default_content(&path::parent_path(&item.path))
    } else {
        return Err(ShellError::unsupported_format(command, target));
    };

    let app = apps::app_for_type(content.app_type())
        .ok_or_else(|| ShellError::unsupported_format(command, target))?;
    Ok(app.window_config(content))
}

/// Application an executable starts: named by its content, else by its stem.
fn program_app(item: &FileSystemItem) -> Option<&'static AppDefinition> {
    item.content
        .as_deref()
        .map(str::trim)
        .and_then(apps::find_app)
        .or_else(|| apps::find_app(item.stem()))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use crate::config::ShellConfig;
    use crate::core::commands::CommandRegistry;
    use crate::core::commands::tests::{runtime, texts};
    use crate::core::error::ShellError;
    use crate::core::filesystem::VfsStore;
    use crate::core::runtime::ShellRuntime;
    use crate::models::{AppContent, AppType, FileSystemItem, WindowConfig, WindowId, WindowManager};

    #[derive(Default)]
    struct RecordingWindows {
        opened: Mutex<Vec<WindowConfig>>,
    }

    impl WindowManager for RecordingWindows {
        fn open_window(&self, config: WindowConfig) -> WindowId {
            let mut opened = self.opened.lock().unwrap();
            opened.push(config);
            WindowId(opened.len() as u64)
        }
    }

    fn with_windows() -> (ShellRuntime, Arc<RecordingWindows>) {
        let windows = Arc::new(RecordingWindows::default());
        let rt = runtime().with_window_manager(windows.clone());
        (rt, windows)
    }

    fn last_opened(windows: &RecordingWindows) -> WindowConfig {
        windows.opened.lock().unwrap().last().cloned().unwrap()
    }

    #[test]
    fn test_run_by_app_alias() {
        let (mut rt, windows) = with_windows();
        let outcome = rt.execute("start mspaint").unwrap();
        assert_eq!(texts(&outcome), vec!["Started Paint (window 1)"]);
        assert_eq!(last_opened(&windows).app_type, AppType::Paint);
    }

    #[test]
    fn test_run_text_file_substitutes_document() {
        let (mut rt, windows) = with_windows();
        rt.execute("open Desktop/readme.txt").unwrap();
        let config = last_opened(&windows);
        assert_eq!(config.title, "readme.txt - Notepad");
        match config.content {
            AppContent::Notepad {
                file_path,
                file_name,
                text,
                read_only,
            } => {
                assert_eq!(file_path.as_deref(), Some("/C:/Users/Guest/Desktop/readme.txt"));
                assert_eq!(file_name.as_deref(), Some("readme.txt"));
                assert!(text.starts_with("Welcome"));
                assert!(!read_only);
            }
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn test_run_protected_text_is_read_only() {
        let tree = FileSystemItem::root().with_children(vec![
            FileSystemItem::folder("C:", "/C:").with_children(vec![
                FileSystemItem::file("license.txt", "/C:/license.txt", "All rights reserved.")
                    .protected(true),
            ]),
        ]);
        let windows = Arc::new(RecordingWindows::default());
        let mut rt = ShellRuntime::new(
            ShellConfig::default(),
            CommandRegistry::shared(),
            Arc::new(VfsStore::new(tree)),
        )
        .with_window_manager(windows.clone());

        rt.execute("run /C:/license.txt").unwrap();
        assert!(matches!(
            last_opened(&windows).content,
            AppContent::Notepad { read_only: true, .. }
        ));
    }

    #[test]
    fn test_run_image_opens_viewer() {
        let (mut rt, windows) = with_windows();
        rt.execute("run Pictures/wallpaper.bmp").unwrap();
        let config = last_opened(&windows);
        assert_eq!(config.app_type, AppType::ImageViewer);
        assert!(matches!(
            config.content,
            AppContent::ImageViewer { payload: Some(_), .. }
        ));
    }

    #[test]
    fn test_run_searches_drive_for_executable() {
        let (mut rt, windows) = with_windows();
        rt.execute("run snake.exe").unwrap();
        assert_eq!(last_opened(&windows).app_type, AppType::Snake);
        rt.execute("run winmine.exe").unwrap();
        assert_eq!(last_opened(&windows).app_type, AppType::Minesweeper);
    }

    #[test]
    fn test_run_folder_opens_explorer() {
        let (mut rt, windows) = with_windows();
        rt.execute("run Documents").unwrap();
        assert_eq!(
            last_opened(&windows).content,
            AppContent::Explorer {
                path: "/C:/Users/Guest/Documents".to_string()
            }
        );
    }

    #[test]
    fn test_run_unresolved_target() {
        let (mut rt, windows) = with_windows();
        assert_eq!(
            rt.execute("run doom").unwrap_err(),
            ShellError::not_found("run", "doom")
        );
        assert!(windows.opened.lock().unwrap().is_empty());
    }

    #[test]
    fn test_run_without_window_manager() {
        let mut rt = runtime();
        assert_eq!(
            rt.execute("run notepad").unwrap_err(),
            ShellError::NoWindowManager {
                command: "run".to_string()
            }
        );
    }

    #[test]
    fn test_run_unsupported_file() {
        let (mut rt, _windows) = with_windows();
        assert!(matches!(
            rt.execute("run /C:/autoexec.bat").unwrap_err(),
            ShellError::UnsupportedFormat { .. }
        ));
    }
}
