//! System commands: `help`, `clear`, `echo`, `history`, `whoami`, `date`, `ver`.

use chrono::Local;

use crate::config::{APP_NAME, APP_VERSION};
use crate::core::error::ShellError;
use crate::models::OutputLine;

use super::{Command, CommandCategory, CommandContext, CommandOutcome};

pub(super) fn commands() -> Vec<Command> {
    vec![
        Command {
            name: "help",
            aliases: &["?"],
            category: CommandCategory::System,
            usage: "help [command]",
            description: "List commands, or describe one command",
            hidden: false,
            handler: execute_help,
        },
        Command {
            name: "clear",
            aliases: &["cls"],
            category: CommandCategory::System,
            usage: "clear",
            description: "Clear the screen",
            hidden: false,
            handler: execute_clear,
        },
        Command {
            name: "echo",
            aliases: &[],
            category: CommandCategory::System,
            usage: "echo [text]",
            description: "Print text",
            hidden: false,
            handler: execute_echo,
        },
        Command {
            name: "history",
            aliases: &["doskey"],
            category: CommandCategory::System,
            usage: "history",
            description: "Show previously entered commands",
            hidden: false,
            handler: execute_history,
        },
        Command {
            name: "whoami",
            aliases: &[],
            category: CommandCategory::System,
            usage: "whoami",
            description: "Print the current user",
            hidden: false,
            handler: execute_whoami,
        },
        Command {
            name: "date",
            aliases: &["time"],
            category: CommandCategory::System,
            usage: "date",
            description: "Print the current date and time",
            hidden: false,
            handler: execute_date,
        },
        Command {
            name: "ver",
            aliases: &["version"],
            category: CommandCategory::System,
            usage: "ver",
            description: "Print the system version",
            hidden: false,
            handler: execute_ver,
        },
    ]
}

/// Execute `help` command.
///
/// With no argument lists visible commands by category; with one argument
/// prints that command's usage, description and aliases.
fn execute_help(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    if let Some(name) = ctx.parsed.first_arg() {
        let command = ctx
            .registry
            .find(name)
            .ok_or_else(|| ShellError::UnknownCommand(name.to_string()))?;

        let mut lines = vec![
            OutputLine::text(format!("Usage: {}", command.usage)),
            OutputLine::text(command.description),
        ];
        if !command.aliases.is_empty() {
            lines.push(OutputLine::info(format!(
                "Aliases: {}",
                command.aliases.join(", ")
            )));
        }
        return Ok(CommandOutcome::output(lines));
    }

    let mut lines = Vec::new();
    for (category, commands) in ctx.registry.by_category() {
        lines.push(OutputLine::info(format!("{}:", category)));
        for command in commands {
            lines.push(OutputLine::text(format!(
                "  {:<28} {}",
                command.usage, command.description
            )));
        }
        lines.push(OutputLine::empty());
    }
    lines.push(OutputLine::text("Type 'help <command>' for details."));
    Ok(CommandOutcome::output(lines))
}

fn execute_clear(_ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    Ok(CommandOutcome::clear_screen())
}

/// Echo the words after the command name, flags included.
fn execute_echo(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    let text = ctx.parsed.tokens.get(1..).unwrap_or_default().join(" ");
    Ok(CommandOutcome::line(OutputLine::text(text)))
}

fn execute_history(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    let lines = ctx
        .runtime
        .history()
        .iter()
        .enumerate()
        .map(|(i, entry)| OutputLine::text(format!("{:>5}  {}", i + 1, entry)))
        .collect();
    Ok(CommandOutcome::output(lines))
}

fn execute_whoami(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    Ok(CommandOutcome::line(OutputLine::text(
        ctx.runtime.config().user.clone(),
    )))
}

fn execute_date(_ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    let now = Local::now();
    Ok(CommandOutcome::line(OutputLine::text(
        now.format("%a %m/%d/%Y  %H:%M:%S").to_string(),
    )))
}

fn execute_ver(_ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    Ok(CommandOutcome::output(vec![
        OutputLine::empty(),
        OutputLine::text(format!("{} [Version {}]", APP_NAME, APP_VERSION)),
        OutputLine::empty(),
    ]))
}

#[cfg(test)]
mod tests {
    use crate::core::commands::tests::{runtime, texts};
    use crate::core::error::ShellError;

    #[test]
    fn test_help_lists_categories_without_hidden() {
        let mut rt = runtime();
        let lines = texts(&rt.execute("help").unwrap());
        assert!(lines.contains(&"Navigation:".to_string()));
        assert!(lines.contains(&"Easter Eggs:".to_string()));
        assert!(lines.iter().any(|l| l.contains("mkdir <name>")));
        assert!(!lines.iter().any(|l| l.contains("matrix")));
    }

    #[test]
    fn test_help_for_one_command() {
        let mut rt = runtime();
        let lines = texts(&rt.execute("? dir").unwrap());
        assert_eq!(lines[0], "Usage: ls [path]");
        assert_eq!(lines[2], "Aliases: dir");
        assert_eq!(
            rt.execute("help nope").unwrap_err(),
            ShellError::UnknownCommand("nope".to_string())
        );
    }

    #[test]
    fn test_clear_only_signals() {
        let mut rt = runtime();
        let before = rt.vfs().snapshot();
        let outcome = rt.execute("cls").unwrap();
        assert!(outcome.clear);
        assert!(outcome.lines.is_empty());
        assert_eq!(rt.current_path(), "/C:/Users/Guest");
        assert!(std::sync::Arc::ptr_eq(&before, &rt.vfs().snapshot()));
    }

    #[test]
    fn test_echo_keeps_flags_and_quotes_content() {
        let mut rt = runtime();
        assert_eq!(
            texts(&rt.execute("echo \"hello   world\" -n").unwrap()),
            vec!["hello   world -n"]
        );
        assert_eq!(texts(&rt.execute("echo").unwrap()), vec![""]);
    }

    #[test]
    fn test_whoami_and_ver() {
        let mut rt = runtime();
        assert_eq!(texts(&rt.execute("whoami").unwrap()), vec!["guest"]);
        assert!(texts(&rt.execute("ver").unwrap())[1].starts_with("RetroOS [Version"));
    }
}
