//! Shell configuration.
//!
//! Centralizes the constants used throughout the crate, plus [`ShellConfig`]
//! for the values a host may override at startup (loaded from TOML).

use std::time::Duration;

use serde::Deserialize;

use crate::core::error::ConfigError;

// =============================================================================
// Application Metadata
// =============================================================================

/// Name shown by `ver` and in the CLI banner.
pub const APP_NAME: &str = "RetroOS";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Banner printed by the CLI host at session start.
pub const BANNER: &[&str] = &[
    "RetroOS [Version 0.1.0]",
    "(C) Copyright RetroOS contributors.",
    "",
    "Type 'help' for available commands.",
];

// =============================================================================
// Filesystem Layout
// =============================================================================

/// Default working directory of a new session.
pub const HOME_PATH: &str = "/C:/Users/Guest";

/// Folder whose binary files get a desktop icon.
pub const DESKTOP_PATH: &str = "/C:/Users/Guest/Desktop";

/// Default user name reported by `whoami`.
pub const DEFAULT_USER: &str = "guest";

/// Extension `cat` accepts as plain text.
pub const TEXT_EXTENSION: &str = "txt";

/// Extensions opened by the image viewer.
pub const IMAGE_EXTENSIONS: &[&str] = &["bmp", "png", "jpg", "jpeg", "gif"];

/// Extensions treated as launchable programs.
pub const EXECUTABLE_EXTENSIONS: &[&str] = &["exe", "lnk"];

// =============================================================================
// Terminal Configuration
// =============================================================================

/// Maximum number of submitted lines kept for recall.
pub const MAX_COMMAND_HISTORY: usize = 50;

/// Maximum number of transcript lines kept per session.
pub const MAX_TRANSCRIPT_LINES: usize = 1000;

// =============================================================================
// Hack Mode
// =============================================================================

/// Easter-egg sub-mode constants.
pub mod hack {
    /// Session key holding the working directory captured on entry.
    pub const RETURN_PATH_KEY: &str = "hack.return_path";

    /// Synthetic working directory while connected.
    pub const REMOTE_ADDRESS: &str = "/mainframe/192.168.13.37";

    /// Default delay between intro lines (milliseconds).
    pub const TELETYPE_DELAY_MS: u64 = 120;

    /// Scripted connection sequence.
    pub const INTRO: &[&str] = &[
        "Initializing uplink...",
        "Bypassing firewall [##########] 100%",
        "Cracking RSA-512 handshake... done",
        "Spoofing MAC address 00:1A:2B:3C:4D:5E",
        "ACCESS GRANTED",
        "Connected to mainframe 192.168.13.37",
        "Commands: hack cat <file>, hack run <program>, hack exit",
    ];

    /// Lines printed by `hack exit`.
    pub const FAREWELL: &[&str] = &["Wiping logs...", "Connection closed."];

    /// Fictitious files readable with `hack cat`.
    pub const FILES: &[(&str, &str)] = &[
        (
            "secret_project.txt",
            "PROJECT CHIMERA\nStatus: CLASSIFIED\nThe coffee machine on floor 3 is sentient.\nDo not let it near the network.",
        ),
        (
            "passwords.txt",
            "admin: hunter2\nroot: correct-horse-battery-staple\nguest: guest",
        ),
        (
            "mainframe.log",
            "[00:00:01] boot ok\n[00:13:37] intrusion detected\n[00:13:38] intrusion ignored",
        ),
    ];

    /// Fictitious programs runnable with `hack run`.
    pub const PROGRAMS: &[&str] = &["matrix.exe", "self_destruct.exe", "trace.exe"];
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Host-overridable session settings.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// home_path = "/C:/Users/Guest/Documents"
/// teletype_delay_ms = 0
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Working directory of a new session.
    pub home_path: String,
    /// Desktop folder path for icon placement.
    pub desktop_path: String,
    /// Name reported by `whoami`.
    pub user: String,
    /// History capacity.
    pub history_limit: usize,
    /// Transcript capacity.
    pub transcript_limit: usize,
    /// Delay between paced output lines, in milliseconds.
    pub teletype_delay_ms: u64,
}

impl ShellConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Delay between paced output lines.
    pub fn teletype_delay(&self) -> Duration {
        Duration::from_millis(self.teletype_delay_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid("history_limit must be positive"));
        }
        if self.transcript_limit == 0 {
            return Err(ConfigError::Invalid("transcript_limit must be positive"));
        }
        if !self.home_path.starts_with('/') {
            return Err(ConfigError::Invalid("home_path must be absolute"));
        }
        Ok(())
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            home_path: HOME_PATH.to_string(),
            desktop_path: DESKTOP_PATH.to_string(),
            user: DEFAULT_USER.to_string(),
            history_limit: MAX_COMMAND_HISTORY,
            transcript_limit: MAX_TRANSCRIPT_LINES,
            teletype_delay_ms: hack::TELETYPE_DELAY_MS,
        }
    }
}
