//! Lexer for splitting shell input into words.
//!
//! Handles:
//! - Whitespace-separated words
//! - Single and double quotes (consumed, not retained; no nesting)
//! - Backslash escapes (the next character is taken literally)
//!
//! Malformed input never fails: an unterminated quote or a trailing
//! backslash simply ends the last word with whatever was collected.

use std::iter::Peekable;
use std::str::Chars;

// =============================================================================
// Lexer
// =============================================================================

/// Lexer producing one `String` per word.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    /// Tokenize the entire input into a vector
    pub fn tokenize(self) -> Vec<String> {
        self.collect()
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }
}

impl Iterator for Lexer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.skip_whitespace();
            self.chars.peek()?;

            let mut word = String::new();
            let mut quote: Option<char> = None;
            let mut escaped = false;

            while let Some(c) = self.chars.next() {
                if escaped {
                    word.push(c);
                    escaped = false;
                    continue;
                }
                match (c, quote) {
                    ('\\', _) => escaped = true,
                    (q, Some(open)) if q == open => quote = None,
                    (_, Some(_)) => word.push(c),
                    ('"' | '\'', None) => quote = Some(c),
                    (w, None) if w.is_whitespace() => break,
                    _ => word.push(c),
                }
            }

            // `""` and a lone trailing `\` produce nothing
            if !word.is_empty() {
                return Some(word);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
