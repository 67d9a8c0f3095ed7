//! File commands: `mkdir`, `touch`, `rm`, `cat`.

use regex::Regex;

use crate::core::error::ShellError;
use crate::core::path;
use crate::models::OutputLine;

use super::{Command, CommandCategory, CommandContext, CommandOutcome};

/// Characters a DOS file name may not contain.
const INVALID_NAME_PATTERN: &str = r#"[\\/:*?"<>|]"#;

pub(super) fn commands() -> Vec<Command> {
    vec![
        Command {
            name: "mkdir",
            aliases: &["md"],
            category: CommandCategory::FileSystem,
            usage: "mkdir <name>",
            description: "Create a folder",
            hidden: false,
            handler: execute_mkdir,
        },
        Command {
            name: "touch",
            aliases: &[],
            category: CommandCategory::FileSystem,
            usage: "touch <name>",
            description: "Create an empty file",
            hidden: false,
            handler: execute_touch,
        },
        Command {
            name: "rm",
            aliases: &["del", "erase"],
            category: CommandCategory::FileSystem,
            usage: "rm <path>",
            description: "Delete a file or folder",
            hidden: false,
            handler: execute_rm,
        },
        Command {
            name: "cat",
            aliases: &["type"],
            category: CommandCategory::FileSystem,
            usage: "cat <file>",
            description: "Show the contents of a text file",
            hidden: false,
            handler: execute_cat,
        },
    ]
}

// =============================================================================
// Create
// =============================================================================

#[derive(Clone, Copy)]
enum NewItem {
    Folder,
    File,
}

fn execute_mkdir(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    create(ctx, NewItem::Folder, "mkdir <name>")
}

fn execute_touch(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    create(ctx, NewItem::File, "touch <name>")
}

/// Shared body of `mkdir` and `touch`.
///
/// The parent must be an existing folder below the root and the name must be
/// free; the store itself does not reject duplicates.
fn create(ctx: &mut CommandContext<'_>, kind: NewItem, usage: &str) -> Result<CommandOutcome, ShellError> {
    let command = ctx.name().to_string();
    let target = ctx.required_arg(usage)?;
    let resolved = ctx.resolve(target);
    let parent = path::parent_path(&resolved);
    let name = path::file_name(&resolved);

    if path::is_root(&resolved) || path::is_root(&parent) {
        return Err(ShellError::permission_denied(&command, target));
    }
    if name == "." || name == ".." || has_invalid_chars(&command, name)? {
        return Err(ShellError::invalid_argument(
            &command,
            format!("{}: invalid name", target),
        ));
    }

    let parent_item = ctx
        .vfs
        .get_item_by_path(&parent)
        .ok_or_else(|| ShellError::not_found(&command, path::to_display(&parent)))?;
    if !parent_item.is_folder() {
        return Err(ShellError::not_a_directory(&command, path::to_display(&parent)));
    }
    if parent_item.child(name).is_some() {
        return Err(ShellError::already_exists(&command, target));
    }

    let created = match kind {
        NewItem::Folder => ctx.vfs.create_folder(&parent_item.path, name),
        NewItem::File => ctx.vfs.create_file(&parent_item.path, name, ""),
    };
    // The parent can vanish between the check and the write when sessions share a store
    let item = created.ok_or_else(|| ShellError::not_found(&command, path::to_display(&parent)))?;

    log::debug!("{}: created {}", command, item.path);
    let message = match kind {
        NewItem::Folder => format!("Directory created: {}", item.name),
        NewItem::File => format!("File created: {}", item.name),
    };
    Ok(CommandOutcome::line(OutputLine::success(message)))
}

fn has_invalid_chars(command: &str, name: &str) -> Result<bool, ShellError> {
    let re = Regex::new(INVALID_NAME_PATTERN).map_err(|e| {
        log::error!("{}: bad name pattern: {}", command, e);
        ShellError::Internal {
            command: command.to_string(),
        }
    })?;
    Ok(re.is_match(name))
}

// =============================================================================
// Delete
// =============================================================================

fn execute_rm(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    let target = ctx.required_arg("rm <path>")?;
    let item = ctx
        .lookup(target)
        .ok_or_else(|| ShellError::not_found(ctx.name(), target))?;

    if item.contains_protected() || path::is_root(&item.path) {
        log::warn!("{}: refused to delete protected {}", ctx.name(), item.path);
        return Err(ShellError::permission_denied(ctx.name(), target));
    }
    if !ctx.vfs.delete_item(&item.path) {
        return Err(ShellError::not_found(ctx.name(), target));
    }

    Ok(CommandOutcome::line(OutputLine::success(format!(
        "Deleted: {}",
        item.name
    ))))
}

// =============================================================================
// View
// =============================================================================

fn execute_cat(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    let target = ctx.required_arg("cat <file>")?;
    let item = ctx
        .lookup(target)
        .ok_or_else(|| ShellError::not_found(ctx.name(), target))?;

    if item.is_folder() {
        return Err(ShellError::is_a_directory(ctx.name(), target));
    }
    if !item.is_plain_text() {
        return Err(ShellError::unsupported_format(ctx.name(), target));
    }

    let content = item.content.as_deref().unwrap_or_default();
    if content.is_empty() {
        return Ok(CommandOutcome::line(OutputLine::info(format!(
            "{} is empty.",
            item.name
        ))));
    }

    Ok(CommandOutcome::output(
        content.lines().map(OutputLine::text).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use crate::core::commands::tests::{runtime, texts};
    use crate::core::error::ShellError;
    use crate::models::OutputLineData;

    #[test]
    fn test_mkdir_and_touch() {
        let mut rt = runtime();
        rt.execute("mkdir Projects").unwrap();
        rt.execute("touch Projects/notes.txt").unwrap();
        let item = rt.vfs().get_item_by_path("/C:/Users/Guest/Projects/notes.txt").unwrap();
        assert_eq!(item.path, "/C:/Users/Guest/Projects/notes.txt");
        assert_eq!(item.content.as_deref(), Some(""));
        assert!(rt.vfs().is_folder("/C:/Users/Guest/Projects"));
    }

    #[test]
    fn test_md_alias() {
        let mut rt = runtime();
        let outcome = rt.execute("md \"New Folder\"").unwrap();
        assert_eq!(texts(&outcome), vec!["Directory created: New Folder"]);
        assert!(rt.vfs().is_folder("/C:/Users/Guest/New Folder"));
    }

    #[test]
    fn test_create_refuses_root() {
        let mut rt = runtime();
        assert_eq!(
            rt.execute("mkdir /D:").unwrap_err(),
            ShellError::permission_denied("mkdir", "/D:")
        );
        assert_eq!(
            rt.execute("touch /").unwrap_err(),
            ShellError::permission_denied("touch", "/")
        );
    }

    #[test]
    fn test_create_existing_name() {
        let mut rt = runtime();
        assert_eq!(
            rt.execute("mkdir Desktop").unwrap_err(),
            ShellError::already_exists("mkdir", "Desktop")
        );
        assert_eq!(
            rt.execute("touch Desktop/readme.txt").unwrap_err(),
            ShellError::already_exists("touch", "Desktop/readme.txt")
        );
    }

    #[test]
    fn test_create_missing_parent() {
        let mut rt = runtime();
        let err = rt.execute("touch Nope/file.txt").unwrap_err();
        assert!(matches!(err, ShellError::NotFound { .. }));
        let err = rt.execute("touch Desktop/readme.txt/inner.txt").unwrap_err();
        assert!(matches!(err, ShellError::NotADirectory { .. }));
    }

    #[test]
    fn test_create_invalid_name() {
        let mut rt = runtime();
        for name in ["what?", "a*b", "x:y", "pipe|name"] {
            let err = rt.execute(&format!("touch \"{}\"", name)).unwrap_err();
            assert!(matches!(err, ShellError::InvalidArgument { .. }), "{name}");
        }
    }

    #[test]
    fn test_create_missing_operand() {
        let mut rt = runtime();
        assert!(matches!(
            rt.execute("mkdir").unwrap_err(),
            ShellError::InvalidArgument { .. }
        ));
    }

    #[test]
    fn test_rm_file_confirms_with_name() {
        let mut rt = runtime();
        let outcome = rt.execute("del Desktop/readme.txt").unwrap();
        assert_eq!(texts(&outcome), vec!["Deleted: readme.txt"]);
        assert!(rt.vfs().get_item_by_path("/C:/Users/Guest/Desktop/readme.txt").is_none());
    }

    #[test]
    fn test_rm_protected() {
        let mut rt = runtime();
        let before = rt.vfs().snapshot();
        assert_eq!(
            rt.execute("rm /C:/Windows/notepad.exe").unwrap_err(),
            ShellError::permission_denied("rm", "/C:/Windows/notepad.exe")
        );
        assert!(matches!(
            rt.execute("rm /C:/Users/Guest").unwrap_err(),
            ShellError::PermissionDenied { .. }
        ));
        assert_eq!(*rt.vfs().snapshot(), *before);
    }

    #[test]
    fn test_rm_missing_names_the_path() {
        let mut rt = runtime();
        let err = rt.execute("rm ghost.txt").unwrap_err();
        assert_eq!(err, ShellError::not_found("rm", "ghost.txt"));
        assert!(err.to_string().contains("ghost.txt"));
    }

    #[test]
    fn test_cat_prints_lines() {
        let mut rt = runtime();
        let outcome = rt.execute("type Desktop/readme.txt").unwrap();
        assert_eq!(outcome.lines[0].plain_text(), "Welcome to RetroOS!");
        assert!(outcome.lines.len() > 3);
    }

    #[test]
    fn test_cat_through_shortcut_with_remainder() {
        let mut rt = runtime();
        let outcome = rt.execute("type \"/My Documents/todo.txt\"").unwrap();
        assert_eq!(texts(&outcome), vec!["- water the plants", "- back up floppies"]);
    }

    #[test]
    fn test_mkdir_through_shortcut_is_visible_through_shortcut() {
        let mut rt = runtime();
        rt.execute("mkdir /Desktop/new").unwrap();
        assert!(rt.vfs().is_folder("/C:/Users/Guest/Desktop/new"));
        let outcome = rt.execute("ls /Desktop/new").unwrap();
        assert_eq!(outcome.lines.len(), 1);
        assert!(matches!(outcome.lines[0].data, OutputLineData::Info { .. }));
    }

    #[test]
    fn test_cat_empty_file_is_informational() {
        let mut rt = runtime();
        rt.execute("touch empty.txt").unwrap();
        let outcome = rt.execute("cat empty.txt").unwrap();
        assert_eq!(outcome.lines.len(), 1);
        assert!(matches!(outcome.lines[0].data, OutputLineData::Info { .. }));
    }

    #[test]
    fn test_cat_errors() {
        let mut rt = runtime();
        assert_eq!(
            rt.execute("cat Desktop").unwrap_err(),
            ShellError::is_a_directory("cat", "Desktop")
        );
        assert_eq!(
            rt.execute("cat Pictures/wallpaper.bmp").unwrap_err(),
            ShellError::unsupported_format("cat", "Pictures/wallpaper.bmp")
        );
        assert_eq!(
            rt.execute("cat missing.txt").unwrap_err(),
            ShellError::not_found("cat", "missing.txt")
        );
    }
}
