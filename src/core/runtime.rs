//! Per-session interpreter state.
//!
//! [`ShellRuntime`] owns everything one terminal session remembers: the
//! working directory, mode, session store, history, active effect and the
//! transcript. Hosts feed it lines through [`ShellRuntime::submit`] and watch
//! the transcript through a listener.

use std::collections::{HashMap, VecDeque};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use crate::config::ShellConfig;
use crate::config::hack::RETURN_PATH_KEY;
use crate::core::commands::{Command, CommandContext, CommandOutcome, CommandRegistry};
use crate::core::error::ShellError;
use crate::core::filesystem::VfsStore;
use crate::core::history::CommandHistory;
use crate::core::parser::{ParsedCommand, parse_input};
use crate::core::path;
use crate::models::{Effect, EffectRequest, OutputLine, ShellMode, WindowManager};
use crate::utils::RingBuffer;

/// Change to the transcript reported to the listener.
#[derive(Clone, Copy, Debug)]
pub enum TranscriptEvent<'a> {
    Appended(&'a OutputLine),
    Cleared,
}

/// Observer invoked for every transcript change.
pub type TranscriptListener = Box<dyn FnMut(TranscriptEvent<'_>) + Send>;

/// One terminal session.
///
/// `submit` takes `&mut self`, so a session runs one command at a time. The
/// registry, store and window manager are shared handles and may serve
/// several sessions.
pub struct ShellRuntime {
    config: ShellConfig,
    registry: Arc<CommandRegistry>,
    vfs: Arc<VfsStore>,
    windows: Option<Arc<dyn WindowManager>>,

    current_path: String,
    mode: ShellMode,
    session: HashMap<String, String>,
    history: CommandHistory,
    effect: Option<Effect>,
    transcript: RingBuffer<OutputLine>,
    /// Paced lines not yet delivered
    pending: VecDeque<OutputLine>,
    listener: Option<TranscriptListener>,
}

impl ShellRuntime {
    pub fn new(config: ShellConfig, registry: Arc<CommandRegistry>, vfs: Arc<VfsStore>) -> Self {
        Self {
            current_path: path::normalize(&config.home_path),
            history: CommandHistory::new(config.history_limit.max(1)),
            transcript: RingBuffer::new(config.transcript_limit.max(1)),
            config,
            registry,
            vfs,
            windows: None,
            mode: ShellMode::Normal,
            session: HashMap::new(),
            effect: None,
            pending: VecDeque::new(),
            listener: None,
        }
    }

    /// Attach the window manager used by `run`.
    pub fn with_window_manager(mut self, windows: Arc<dyn WindowManager>) -> Self {
        self.windows = Some(windows);
        self
    }

    // =========================================================================
    // Line Submission
    // =========================================================================

    /// Run one input line and apply its result to the session.
    ///
    /// Leftover paced output from a cancelled submission is flushed first.
    /// Paced output is delivered with an async delay between lines; if this
    /// future is dropped part way, the rest waits for the next submission.
    pub async fn submit(&mut self, line: &str) {
        self.flush_pending();
        self.history.record(line);
        let prompt = self.prompt();
        self.print(OutputLine::command(prompt, line));

        match self.execute(line) {
            Ok(outcome) => self.apply(outcome).await,
            Err(err) => self.print(OutputLine::error(err.to_string())),
        }
    }

    /// Parse, look up and run a line without touching the transcript.
    ///
    /// Handler side effects on the session (path, mode, session store) still
    /// happen; the returned outcome is not applied.
    pub fn execute(&mut self, line: &str) -> Result<CommandOutcome, ShellError> {
        let parsed = parse_input(line);
        if parsed.is_empty {
            return Ok(CommandOutcome::empty());
        }

        let registry = Arc::clone(&self.registry);
        let Some(command) = registry.find(&parsed.name) else {
            log::debug!("unknown command: {}", parsed.name);
            let typed = parsed.tokens.first().cloned().unwrap_or_default();
            return Err(ShellError::UnknownCommand(typed));
        };

        self.dispatch(command, &parsed)
    }

    /// Call a handler inside a panic boundary.
    fn dispatch(&mut self, command: &Command, parsed: &ParsedCommand) -> Result<CommandOutcome, ShellError> {
        log::debug!("dispatch {} {:?}", command.name, parsed.args);
        let vfs = Arc::clone(&self.vfs);
        let windows = self.windows.clone();
        let registry = Arc::clone(&self.registry);
        let handler = command.handler;

        let mut ctx = CommandContext {
            parsed,
            runtime: self,
            vfs: &vfs,
            windows: windows.as_deref(),
            registry: &registry,
        };

        panic::catch_unwind(AssertUnwindSafe(|| handler(&mut ctx))).unwrap_or_else(|_| {
            log::error!("command '{}' panicked", parsed.name);
            Err(ShellError::Internal {
                command: parsed.name.clone(),
            })
        })
    }

    async fn apply(&mut self, outcome: CommandOutcome) {
        if outcome.clear {
            self.clear();
        }
        match outcome.effect {
            Some(EffectRequest::Set(effect)) => self.set_effect(Some(effect)),
            Some(EffectRequest::Clear) => self.set_effect(None),
            None => {}
        }

        match outcome.pace {
            Some(delay) if !delay.is_zero() => {
                self.pending.extend(outcome.lines);
                self.drain_pending(delay).await;
            }
            _ => self.print_lines(outcome.lines),
        }
    }

    async fn drain_pending(&mut self, delay: Duration) {
        while let Some(line) = self.pending.pop_front() {
            self.print(line);
            if !self.pending.is_empty() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    fn flush_pending(&mut self) {
        while let Some(line) = self.pending.pop_front() {
            self.print(line);
        }
    }

    // =========================================================================
    // Transcript
    // =========================================================================

    /// Append one line to the transcript.
    pub fn print(&mut self, line: OutputLine) {
        if let Some(listener) = self.listener.as_mut() {
            listener(TranscriptEvent::Appended(&line));
        }
        self.transcript.push(line);
    }

    pub fn print_lines(&mut self, lines: impl IntoIterator<Item = OutputLine>) {
        for line in lines {
            self.print(line);
        }
    }

    /// Wipe the transcript.
    pub fn clear(&mut self) {
        self.transcript.clear();
        if let Some(listener) = self.listener.as_mut() {
            listener(TranscriptEvent::Cleared);
        }
    }

    /// Lines shown so far, oldest first.
    ///
    /// Bounded by `transcript_limit`: once full, each new line drops the
    /// oldest one.
    pub fn transcript(&self) -> &RingBuffer<OutputLine> {
        &self.transcript
    }

    /// Paced lines still waiting to be shown.
    pub fn pending_lines(&self) -> usize {
        self.pending.len()
    }

    pub fn set_listener(&mut self, listener: impl FnMut(TranscriptEvent<'_>) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    // =========================================================================
    // Session State
    // =========================================================================

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn set_current_path(&mut self, new_path: &str) {
        self.current_path = path::normalize(new_path);
    }

    pub fn mode(&self) -> ShellMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ShellMode) {
        self.mode = mode;
    }

    pub fn effect(&self) -> Option<Effect> {
        self.effect
    }

    pub fn set_effect(&mut self, effect: Option<Effect>) {
        self.effect = effect;
    }

    pub fn session_value(&self, key: &str) -> Option<&str> {
        self.session.get(key).map(String::as_str)
    }

    pub fn set_session_value(&mut self, key: &str, value: impl Into<String>) {
        self.session.insert(key.to_string(), value.into());
    }

    pub fn clear_session_key(&mut self, key: &str) {
        self.session.remove(key);
    }

    /// Switch to hack mode, remembering where to come back to.
    pub fn enter_hack(&mut self, address: &str) {
        let previous = std::mem::replace(&mut self.current_path, path::normalize(address));
        self.set_session_value(RETURN_PATH_KEY, previous);
        self.mode = ShellMode::Hack;
        log::debug!("entered hack mode at {}", self.current_path);
    }

    /// Leave hack mode and restore the path saved by [`Self::enter_hack`].
    ///
    /// Returns the restored path, or `None` when no path was saved.
    pub fn exit_hack(&mut self) -> Option<String> {
        self.mode = ShellMode::Normal;
        let previous = self.session.remove(RETURN_PATH_KEY)?;
        self.current_path = previous.clone();
        Some(previous)
    }

    /// Prompt shown before each input line.
    pub fn prompt(&self) -> String {
        match self.mode {
            ShellMode::Normal => format!("{}>", path::to_display(&self.current_path)),
            ShellMode::Hack => format!("root@{}# ", path::file_name(&self.current_path)),
        }
    }

    // =========================================================================
    // History
    // =========================================================================

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Recall the previous line (up arrow).
    pub fn previous_command(&mut self) -> Option<String> {
        self.history.recall_previous().map(str::to_string)
    }

    /// Recall the next line (down arrow); empty past the newest.
    pub fn next_command(&mut self) -> String {
        self.history.recall_next().to_string()
    }

    /// Stop browsing history (escape), so the next up arrow starts again
    /// from the newest line.
    pub fn cancel_recall(&mut self) {
        self.history.reset_cursor();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn vfs(&self) -> &Arc<VfsStore> {
        &self.vfs
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Return to a fresh session: home folder, normal mode, nothing pending.
    ///
    /// The shared store is left as is.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.current_path = path::normalize(&self.config.home_path);
        self.mode = ShellMode::Normal;
        self.session.clear();
        self.history = CommandHistory::new(self.config.history_limit.max(1));
        self.effect = None;
        self.clear();
    }
}
