//! Easter eggs: the `hack` sub-mode and `matrix`.
//!
//! `hack` "connects" to a fictitious mainframe. While connected, `hack cat`,
//! `hack run` and `hack exit` work over a fixed table of fake files that has
//! nothing to do with the real drive.

use crate::config::hack::{FAREWELL, FILES, INTRO, PROGRAMS, REMOTE_ADDRESS};
use crate::core::error::ShellError;
use crate::models::{Effect, OutputLine, ShellMode};

use super::{Command, CommandCategory, CommandContext, CommandOutcome};

pub(super) fn commands() -> Vec<Command> {
    vec![
        Command {
            name: "hack",
            aliases: &[],
            category: CommandCategory::EasterEggs,
            usage: "hack [cat <file> | run <program> | exit]",
            description: "Connect to the mainframe",
            hidden: false,
            handler: execute_hack,
        },
        Command {
            name: "matrix",
            aliases: &[],
            category: CommandCategory::EasterEggs,
            usage: "matrix [off]",
            description: "Follow the white rabbit",
            hidden: true,
            handler: execute_matrix,
        },
    ]
}

fn execute_hack(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    let Some(sub) = ctx.parsed.first_arg() else {
        return connect(ctx);
    };

    if ctx.runtime.mode() != ShellMode::Hack {
        return Err(ShellError::invalid_argument(
            ctx.name(),
            "not connected (run 'hack' first)",
        ));
    }

    let operand = ctx.parsed.args.get(1).map(String::as_str);
    match (sub.to_lowercase().as_str(), operand) {
        ("cat", Some(file)) => read_file(ctx.name(), file),
        ("run", Some(program)) => run_program(ctx.name(), program),
        ("cat", None) => Err(ShellError::missing_operand(ctx.name(), "hack cat <file>")),
        ("run", None) => Err(ShellError::missing_operand(ctx.name(), "hack run <program>")),
        ("exit", _) => disconnect(ctx),
        (other, _) => Err(ShellError::invalid_argument(
            ctx.name(),
            format!("unknown subcommand '{}'", other),
        )),
    }
}

/// Bare `hack`: play the intro and switch modes.
fn connect(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    if ctx.runtime.mode() == ShellMode::Hack {
        return Ok(CommandOutcome::line(OutputLine::info(
            "Already connected. Type 'hack exit' to disconnect.",
        )));
    }

    ctx.runtime.enter_hack(REMOTE_ADDRESS);
    let delay = ctx.runtime.config().teletype_delay();
    let lines = INTRO.iter().map(|line| OutputLine::success(*line)).collect();
    Ok(CommandOutcome::output(lines).paced(delay))
}

fn disconnect(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    ctx.runtime.exit_hack();
    let lines = FAREWELL.iter().map(|line| OutputLine::info(*line)).collect();
    Ok(CommandOutcome::output(lines).without_effect())
}

fn read_file(command: &str, name: &str) -> Result<CommandOutcome, ShellError> {
    let (_, content) = FILES
        .iter()
        .find(|(file, _)| file.eq_ignore_ascii_case(name))
        .ok_or_else(|| ShellError::not_found(command, name))?;
    Ok(CommandOutcome::output(
        content.lines().map(OutputLine::text).collect(),
    ))
}

fn run_program(command: &str, name: &str) -> Result<CommandOutcome, ShellError> {
    let program = PROGRAMS
        .iter()
        .find(|p| p.eq_ignore_ascii_case(name))
        .ok_or_else(|| ShellError::not_found(command, name))?;

    let outcome = match *program {
        "matrix.exe" => CommandOutcome::line(OutputLine::success("Wake up, Neo...")).with_effect(Effect::Matrix),
        "self_destruct.exe" => CommandOutcome::output(vec![
            OutputLine::error("SELF DESTRUCT SEQUENCE INITIATED"),
            OutputLine::text("3..."),
            OutputLine::text("2..."),
            OutputLine::text("1..."),
            OutputLine::info("Just kidding."),
        ])
        .with_effect(Effect::Alarm),
        _ => CommandOutcome::output(vec![
            OutputLine::text("Tracing route to 192.168.13.37..."),
            OutputLine::info("Trace complete. Nobody is watching. Probably."),
        ])
        .with_effect(Effect::Trace),
    };
    Ok(outcome)
}

/// Hidden `matrix [off]`.
fn execute_matrix(ctx: &mut CommandContext<'_>) -> Result<CommandOutcome, ShellError> {
    let off = ctx
        .parsed
        .first_arg()
        .is_some_and(|arg| arg.eq_ignore_ascii_case("off"));
    if off {
        return Ok(CommandOutcome::empty().without_effect());
    }
    Ok(CommandOutcome::line(OutputLine::success("Follow the white rabbit.")).with_effect(Effect::Matrix))
}

#[cfg(test)]
mod tests {
    use crate::config::hack::{INTRO, REMOTE_ADDRESS, RETURN_PATH_KEY};
    use crate::core::commands::tests::{runtime, texts};
    use crate::core::error::ShellError;
    use crate::models::{Effect, EffectRequest, ShellMode};

    #[test]
    fn test_hack_enters_mode_and_paces_intro() {
        let mut rt = runtime();
        let outcome = rt.execute("hack").unwrap();
        assert_eq!(outcome.lines.len(), INTRO.len());
        assert!(outcome.pace.is_some());
        assert_eq!(rt.mode(), ShellMode::Hack);
        assert_eq!(rt.current_path(), REMOTE_ADDRESS);
        assert_eq!(rt.session_value(RETURN_PATH_KEY), Some("/C:/Users/Guest"));
    }

    #[test]
    fn test_hack_cat_reads_virtual_file() {
        let mut rt = runtime();
        rt.execute("hack").unwrap();
        let outcome = rt.execute("hack cat secret_project.txt").unwrap();
        assert_eq!(texts(&outcome)[0], "PROJECT CHIMERA");
        assert_eq!(
            rt.execute("hack cat readme.txt").unwrap_err(),
            ShellError::not_found("hack", "readme.txt")
        );
    }

    #[test]
    fn test_hack_exit_restores_path() {
        let mut rt = runtime();
        rt.execute("cd Documents").unwrap();
        rt.execute("hack").unwrap();
        let outcome = rt.execute("hack exit").unwrap();
        assert_eq!(outcome.effect, Some(EffectRequest::Clear));
        assert_eq!(rt.mode(), ShellMode::Normal);
        assert_eq!(rt.current_path(), "/C:/Users/Guest/Documents");
        assert_eq!(rt.session_value(RETURN_PATH_KEY), None);
    }

    #[test]
    fn test_hack_subcommands_need_connection() {
        let mut rt = runtime();
        for line in ["hack cat secret_project.txt", "hack run matrix.exe", "hack exit"] {
            assert!(
                matches!(rt.execute(line).unwrap_err(), ShellError::InvalidArgument { .. }),
                "{line}"
            );
        }
        assert_eq!(rt.mode(), ShellMode::Normal);
        assert_eq!(rt.current_path(), "/C:/Users/Guest");
    }

    #[test]
    fn test_hack_run_programs_set_effects() {
        let mut rt = runtime();
        rt.execute("hack").unwrap();
        for (program, effect) in [
            ("matrix.exe", Effect::Matrix),
            ("SELF_DESTRUCT.EXE", Effect::Alarm),
            ("trace.exe", Effect::Trace),
        ] {
            let outcome = rt.execute(&format!("hack run {}", program)).unwrap();
            assert_eq!(outcome.effect, Some(EffectRequest::Set(effect)));
        }
        assert!(matches!(
            rt.execute("hack run doom.exe").unwrap_err(),
            ShellError::NotFound { .. }
        ));
    }

    #[test]
    fn test_hack_twice_keeps_return_path() {
        let mut rt = runtime();
        rt.execute("hack").unwrap();
        let outcome = rt.execute("hack").unwrap();
        assert_eq!(outcome.lines.len(), 1);
        assert_eq!(rt.session_value(RETURN_PATH_KEY), Some("/C:/Users/Guest"));
    }

    #[test]
    fn test_unknown_subcommand() {
        let mut rt = runtime();
        rt.execute("hack").unwrap();
        assert!(matches!(
            rt.execute("hack rm -rf").unwrap_err(),
            ShellError::InvalidArgument { .. }
        ));
    }

    #[test]
    fn test_matrix_toggle() {
        let mut rt = runtime();
        let on = rt.execute("matrix").unwrap();
        assert_eq!(on.effect, Some(EffectRequest::Set(Effect::Matrix)));
        let off = rt.execute("matrix off").unwrap();
        assert_eq!(off.effect, Some(EffectRequest::Clear));
    }
}
