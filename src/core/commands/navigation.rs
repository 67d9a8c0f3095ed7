//! Navigation commands: `cd`, `pwd`, `ls`.

use crate::core::error::ShellError;
use crate::models::{FileSystemItem, OutputLine, TextStyle};

use super::{Command, CommandCategory, CommandContext, CommandOutcome};

pub(super) fn commands() -> Vec<Command> {
    vec![
        Command {
            name: "cd",
            aliases: &["chdir"],
            category: CommandCategory::Navigation,
            usage: "cd [path]",
            description: "Change the current folder, or print it when no path is given",
            hidden: false,
            handler: execute_cd,
        },
        Command {
            name: "pwd",
            aliases: &[],
            category: CommandCategory::Navigation,
            usage: "pwd",
            description: "Print the current folder",
            hidden: false,
            handler: execute_pwd,
        },
        Command {
            name: "ls",
            aliases: &["dir"],
            category: CommandCategory::Navigation,
            usage: "ls [path]",
            description: "List folder contents",
            hidden: false,
            handler: execute_ls,
        },
    ]
}

/// Execute `cd` command.
fn execute_cd(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    let Some(target) = ctx.parsed.first_arg() else {
        return Ok(CommandOutcome::line(OutputLine::text(ctx.runtime.current_path())));
    };

    let item = ctx
        .lookup(target)
        .ok_or_else(|| ShellError::not_found(ctx.name(), target))?;
    if !item.is_folder() {
        return Err(ShellError::not_a_directory(ctx.name(), target));
    }

    // The item path is canonical even when reached through a shortcut
    ctx.runtime.set_current_path(&item.path);
    Ok(CommandOutcome::empty())
}

/// Execute `pwd` command.
fn execute_pwd(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    Ok(CommandOutcome::line(OutputLine::text(ctx.runtime.current_path())))
}

/// Execute `ls` command.
///
/// Folders come first, then files, each group sorted by name. A file target
/// lists just that file; an empty folder prints a placeholder.
fn execute_ls(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    let target = ctx.parsed.first_arg().unwrap_or(".");
    let item = ctx
        .lookup(target)
        .ok_or_else(|| ShellError::not_found(ctx.name(), target))?;

    if !item.is_folder() {
        let extension = item.extension.clone().unwrap_or_default();
        return Ok(CommandOutcome::line(OutputLine::file_entry(
            &item.name,
            extension,
            file_style(&item),
        )));
    }

    if item.children().is_empty() {
        return Ok(CommandOutcome::line(OutputLine::info("Directory is empty.")));
    }

    let (mut folders, mut files): (Vec<&FileSystemItem>, Vec<&FileSystemItem>) = item
        .children()
        .iter()
        .map(|child| child.as_ref())
        .partition(|child| child.is_folder());
    folders.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let lines = folders
        .into_iter()
        .map(|folder| OutputLine::dir_entry(&folder.name, "<DIR>"))
        .chain(files.into_iter().map(|file| {
            OutputLine::file_entry(&file.name, format!("{:>8}", file.size()), file_style(file))
        }))
        .collect();

    Ok(CommandOutcome::output(lines))
}

fn file_style(item: &FileSystemItem) -> TextStyle {
    if item.is_executable() {
        TextStyle::Executable
    } else {
        TextStyle::File
    }
}
