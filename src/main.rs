//! `retrosh`: run a shell session in the terminal.
//!
//! Reads lines from stdin (or `--command` arguments) and prints the
//! transcript. Window launches are printed instead of drawn.

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::exit;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use clap::Parser;
use thiserror::Error;

use retrosh::config::{BANNER, ShellConfig};
use retrosh::core::{ConfigError, DesktopLayer, SnapshotError};
use retrosh::models::{FileSystemItem, OutputLineData};
use retrosh::{CommandRegistry, ShellRuntime, TranscriptEvent, VfsStore, WindowConfig, WindowId, WindowManager};

#[derive(Parser, Debug)]
#[command(name = "retrosh", version, about = "Retro desktop command shell")]
struct Cli {
    /// TOML file overriding session settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON drive snapshot to load at start and save on exit
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Run these lines instead of reading stdin
    #[arg(short = 'e', long = "command")]
    commands: Vec<String>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("stdin: {0}")]
    Stdin(io::Error),
    #[error("stdout: {0}")]
    Stdout(io::Error),
}

/// Window manager that reports launches on stdout.
#[derive(Default)]
struct PrintingWindows {
    next_id: AtomicU64,
}

impl WindowManager for PrintingWindows {
    fn open_window(&self, config: WindowConfig) -> WindowId {
        let id = WindowId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        println!(
            "[window {}] {} ({}x{} at {},{})",
            id, config.title, config.size.width, config.size.height, config.position.x, config.position.y
        );
        id
    }
}

/// Desktop layer that only logs icon changes.
struct LoggingDesktop;

impl DesktopLayer for LoggingDesktop {
    fn icon_placed(&self, item: &FileSystemItem) {
        log::info!("desktop icon placed: {}", item.name);
    }

    fn icon_removed(&self, path: &str) {
        log::info!("desktop icon removed: {}", path);
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn load_config(cli: &Cli) -> Result<ShellConfig, CliError> {
    match &cli.config {
        Some(path) => Ok(ShellConfig::from_toml_str(&read_file(path)?)?),
        None => Ok(ShellConfig::default()),
    }
}

fn load_store(cli: &Cli) -> Result<VfsStore, CliError> {
    match &cli.snapshot {
        Some(path) if path.exists() => Ok(VfsStore::from_json(&read_file(path)?)?),
        _ => Ok(VfsStore::with_default_tree()),
    }
}

fn save_store(path: &Path, store: &VfsStore) -> Result<(), CliError> {
    let json = store.to_json()?;
    fs::write(path, json).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })
}

async fn try_main(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let store = load_store(&cli)?.with_desktop(&config.desktop_path, Arc::new(LoggingDesktop));
    let store = Arc::new(store);

    let interactive = cli.commands.is_empty() && io::stdin().is_terminal();
    let mut runtime = ShellRuntime::new(config, CommandRegistry::shared(), Arc::clone(&store))
        .with_window_manager(Arc::new(PrintingWindows::default()));

    runtime.set_listener(move |event| match event {
        // The terminal already shows what the user typed
        TranscriptEvent::Appended(line) if interactive && matches!(line.data, OutputLineData::Command { .. }) => {}
        TranscriptEvent::Appended(line) => println!("{}", line),
        TranscriptEvent::Cleared => print!("\x1b[2J\x1b[H"),
    });

    if cli.commands.is_empty() {
        for line in BANNER {
            println!("{}", line);
        }
        let stdin = io::stdin();
        let mut input = String::new();
        loop {
            if interactive {
                print!("{}", runtime.prompt());
                io::stdout().flush().map_err(CliError::Stdout)?;
            }
            input.clear();
            if stdin.lock().read_line(&mut input).map_err(CliError::Stdin)? == 0 {
                break;
            }
            let line = input.trim_end_matches(['\r', '\n']);
            if matches!(line.trim(), "exit" | "quit") {
                break;
            }
            runtime.submit(line).await;
        }
    } else {
        for line in &cli.commands {
            runtime.submit(line).await;
        }
    }

    if let Some(path) = &cli.snapshot {
        save_store(path, &store)?;
        log::info!("saved drive snapshot to {}", path.display());
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    if let Err(e) = try_main(cli).await {
        log::error!("{}", e);
        exit(1);
    }
}
