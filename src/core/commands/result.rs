//! Command execution result type.

use std::time::Duration;

use crate::models::{Effect, EffectRequest, OutputLine};

/// Result of a successful command.
///
/// Commands return output lines and may also ask the runtime to clear the
/// transcript, change the visual effect, or pace the lines like a teletype.
/// Mode and path changes go through the runtime's setters instead.
#[derive(Clone, Debug, Default)]
pub struct CommandOutcome {
    /// Output lines to display
    pub lines: Vec<OutputLine>,
    /// Wipe the transcript before appending `lines`
    pub clear: bool,
    pub effect: Option<EffectRequest>,
    /// Delay between consecutive lines
    pub pace: Option<Duration>,
}

impl CommandOutcome {
    /// Create an outcome with just output.
    pub fn output(lines: Vec<OutputLine>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    /// Create an outcome with a single line.
    pub fn line(line: OutputLine) -> Self {
        Self::output(vec![line])
    }

    /// Create an empty outcome (no output, no side effects).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create an outcome that only clears the transcript.
    pub fn clear_screen() -> Self {
        Self {
            clear: true,
            ..Self::default()
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(EffectRequest::Set(effect));
        self
    }

    pub fn without_effect(mut self) -> Self {
        self.effect = Some(EffectRequest::Clear);
        self
    }

    /// Deliver lines one at a time, `delay` apart.
    pub fn paced(mut self, delay: Duration) -> Self {
        self.pace = Some(delay);
        self
    }
}
