//! Command-line parser.
//!
//! Turns a raw input line into a [`ParsedCommand`]:
//! - First word: lower-cased command name
//! - `--name` / `--name=value`: long flags
//! - `-xyz`: one boolean flag per character
//! - Everything else: positional arguments, case preserved

mod lexer;

pub use lexer::Lexer;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// =============================================================================
// Parsed Command
// =============================================================================

/// Value of a command-line flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Text(String),
}

impl FlagValue {
    /// Check if the flag is set to boolean `true`.
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Bool(_) => None,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A tokenized and classified input line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ParsedCommand {
    /// Input exactly as submitted
    pub raw: String,
    /// All words, including the command name
    pub tokens: Vec<String>,
    /// Lower-cased first word (empty for blank input)
    pub name: String,
    /// Positional arguments in order
    pub args: Vec<String>,
    pub flags: BTreeMap<String, FlagValue>,
    pub is_empty: bool,
}

impl ParsedCommand {
    /// Check if a flag is present (with any value).
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    pub fn flag(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name)
    }

    /// First positional argument.
    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Positional arguments joined with single spaces.
    pub fn rest(&self) -> String {
        self.args.join(" ")
    }
}

// =============================================================================
// Parser
// =============================================================================

/// Parse a raw input line.
pub fn parse_input(input: &str) -> ParsedCommand {
    let tokens = Lexer::new(input).tokenize();

    let Some((first, rest)) = tokens.split_first() else {
        return ParsedCommand {
            raw: input.to_string(),
            is_empty: true,
            ..Default::default()
        };
    };

    let mut args = Vec::new();
    let mut flags = BTreeMap::new();
    for token in rest {
        classify(token, &mut args, &mut flags);
    }

    ParsedCommand {
        raw: input.to_string(),
        name: first.to_lowercase(),
        args,
        flags,
        is_empty: false,
        tokens,
    }
}

fn classify(token: &str, args: &mut Vec<String>, flags: &mut BTreeMap<String, FlagValue>) {
    if let Some(long) = token.strip_prefix("--") {
        if long.is_empty() {
            args.push(token.to_string());
            return;
        }
        match long.split_once('=') {
            Some((name, "true")) => flags.insert(name.to_string(), FlagValue::Bool(true)),
            Some((name, value)) => flags.insert(name.to_string(), FlagValue::Text(value.to_string())),
            None => flags.insert(long.to_string(), FlagValue::Bool(true)),
        };
    } else if let Some(short) = token.strip_prefix('-')
        && !short.is_empty()
    {
        for c in short.chars() {
            flags.insert(c.to_lowercase().collect(), FlagValue::Bool(true));
        }
    } else {
        args.push(token.to_string());
    }
}

// =============================================================================
// Tests
// =============================================================================
