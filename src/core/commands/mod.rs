//! Command registry and built-in commands.
//!
//! This module provides:
//! - [`Command`]: a named, aliased, categorized handler
//! - [`CommandRegistry`]: the lookup table built once at startup
//! - [`CommandContext`]: what a handler gets to work with
//! - [`CommandOutcome`]: what a handler hands back
//!
//! # Architecture
//!
//! Each category module exposes a `commands()` factory. The registry
//! concatenates them; the runtime looks up the first word of each line and
//! calls the handler with a fresh context. Handlers report failures as
//! [`ShellError`] and never touch the transcript directly.

mod files;
mod hack;
mod launch;
mod navigation;
mod result;
mod system;

pub use result::CommandOutcome;

use std::fmt;
use std::sync::Arc;

use crate::core::error::ShellError;
use crate::core::filesystem::VfsStore;
use crate::core::parser::ParsedCommand;
use crate::core::path;
use crate::core::runtime::ShellRuntime;
use crate::models::{FileSystemItem, WindowManager};

// =============================================================================
// Command Definition
// =============================================================================

/// Handler signature shared by every command.
pub type Handler = fn(&mut CommandContext<'_>) -> Result<CommandOutcome, ShellError>;

/// Grouping used by `help`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandCategory {
    Navigation,
    FileSystem,
    Applications,
    EasterEggs,
    System,
}

impl CommandCategory {
    /// All categories in display order.
    pub const ALL: [Self; 5] = [
        Self::Navigation,
        Self::FileSystem,
        Self::Applications,
        Self::EasterEggs,
        Self::System,
    ];
}

impl fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Navigation => "Navigation",
            Self::FileSystem => "File System",
            Self::Applications => "Applications",
            Self::EasterEggs => "Easter Eggs",
            Self::System => "System",
        })
    }
}

/// A registered command.
#[derive(Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub category: CommandCategory,
    pub usage: &'static str,
    pub description: &'static str,
    /// Hidden commands work but are left out of `help`.
    pub hidden: bool,
    pub handler: Handler,
}

impl Command {
    /// Check if `name` is this command's name or one of its aliases.
    ///
    /// Comparison ignores ASCII case.
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("category", &self.category)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Immutable set of commands, shared by every session through `Arc`.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// Every built-in command, category by category.
    pub fn builtin() -> Self {
        let mut commands = Vec::new();
        commands.extend(navigation::commands());
        commands.extend(files::commands());
        commands.extend(launch::commands());
        commands.extend(hack::commands());
        commands.extend(system::commands());
        Self::new(commands)
    }

    /// Shared handle to the built-in registry.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::builtin())
    }

    /// Find a command by name or alias, ignoring case.
    pub fn find(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.matches(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Commands listed by `help`, grouped by category in display order.
    pub fn by_category(&self) -> Vec<(CommandCategory, Vec<&Command>)> {
        CommandCategory::ALL
            .iter()
            .map(|&category| {
                let commands: Vec<&Command> = self
                    .commands
                    .iter()
                    .filter(|c| c.category == category && !c.hidden)
                    .collect();
                (category, commands)
            })
            .filter(|(_, commands)| !commands.is_empty())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

// =============================================================================
// Execution Context
// =============================================================================

/// Everything a handler may read or change while it runs.
pub struct CommandContext<'a> {
    pub parsed: &'a ParsedCommand,
    pub runtime: &'a mut ShellRuntime,
    pub vfs: &'a VfsStore,
    pub windows: Option<&'a dyn WindowManager>,
    pub registry: &'a CommandRegistry,
}

impl<'a> CommandContext<'a> {
    /// The command name as invoked (lower-cased), for error messages.
    pub fn name(&self) -> &'a str {
        &self.parsed.name
    }

    /// First positional argument, or a "missing operand" error.
    pub fn required_arg(&self, usage: &str) -> Result<&'a str, ShellError> {
        self.parsed
            .first_arg()
            .ok_or_else(|| ShellError::missing_operand(self.name(), usage))
    }

    /// Canonical path of `target` relative to the working directory.
    pub fn resolve(&self, target: &str) -> String {
        path::resolve_with_shortcuts(self.runtime.current_path(), target)
    }

    /// Look up `target` relative to the working directory.
    pub fn lookup(&self, target: &str) -> Option<Arc<FileSystemItem>> {
        self.vfs.get_item_by_path(&self.resolve(target))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::ShellConfig;

    /// Session on the stock tree, no window manager, unpaced output.
    pub(crate) fn runtime() -> ShellRuntime {
        let config = ShellConfig {
            teletype_delay_ms: 0,
            ..ShellConfig::default()
        };
        ShellRuntime::new(
            config,
            CommandRegistry::shared(),
            Arc::new(VfsStore::with_default_tree()),
        )
    }

    /// Rendered text of every line in an outcome.
    pub(crate) fn texts(outcome: &CommandOutcome) -> Vec<String> {
        outcome.lines.iter().map(|l| l.plain_text()).collect()
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let registry = CommandRegistry::builtin();
        assert_eq!(registry.find("DIR").map(|c| c.name), Some("ls"));
        assert_eq!(registry.find("Type").map(|c| c.name), Some("cat"));
        assert_eq!(registry.find("cls").map(|c| c.name), Some("clear"));
        assert!(registry.find("frobnicate").is_none());
    }

    #[test]
    fn test_aliases_resolve_to_the_same_command() {
        let registry = CommandRegistry::builtin();
        for (alias, name) in [
            ("dir", "ls"),
            ("md", "mkdir"),
            ("del", "rm"),
            ("type", "cat"),
            ("start", "run"),
            ("open", "run"),
            ("?", "help"),
        ] {
            assert_eq!(registry.find(alias).map(|c| c.name), Some(name), "{alias}");
        }
    }

    #[test]
    fn test_names_and_aliases_are_unique() {
        let registry = CommandRegistry::builtin();
        let mut seen = std::collections::HashSet::new();
        for command in registry.iter() {
            for name in std::iter::once(&command.name).chain(command.aliases) {
                assert!(seen.insert(name.to_lowercase()), "duplicate command name {name}");
            }
        }
    }

    #[test]
    fn test_by_category_skips_hidden_and_empty() {
        let registry = CommandRegistry::builtin();
        let groups = registry.by_category();
        assert_eq!(groups.first().map(|(c, _)| *c), Some(CommandCategory::Navigation));
        assert!(
            groups
                .iter()
                .flat_map(|(_, commands)| commands)
                .all(|c| !c.hidden)
        );
        assert!(
            !groups
                .iter()
                .flat_map(|(_, commands)| commands)
                .any(|c| c.name == "matrix")
        );
        assert!(groups.iter().all(|(_, commands)| !commands.is_empty()));
    }
}
