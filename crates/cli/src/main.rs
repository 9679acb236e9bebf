use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use navkit_tui::AppOptions;
use navkit_types::PathMatchMode;
use navkit_util::{GalleryConfig, UserPreferences, expand_tilde};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Interactive gallery for navigation sections and text fields.
#[derive(Debug, Parser)]
#[command(name = "navkit", version, about)]
struct Cli {
    /// Gallery configuration (JSON). The built-in demo is used when omitted.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Theme id, e.g. `nord` or `dracula`.
    #[arg(long)]
    theme: Option<String>,

    /// Initial navigation location for every section.
    #[arg(long, value_name = "PATH")]
    active_path: Option<String>,

    /// How item urls are compared to the active path.
    #[arg(long, value_enum)]
    match_mode: Option<MatchModeArg>,

    /// Print the initial component state as JSON and exit.
    #[arg(long)]
    dump: bool,

    /// Write logs to this file. Logging is disabled in the terminal UI
    /// otherwise.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MatchModeArg {
    Prefix,
    Segment,
}

impl From<MatchModeArg> for PathMatchMode {
    fn from(arg: MatchModeArg) -> Self {
        match arg {
            MatchModeArg::Prefix => PathMatchMode::Prefix,
            MatchModeArg::Segment => PathMatchMode::SegmentBoundary,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref(), cli.dump)?;

    let config = match cli.config.as_deref() {
        Some(path) => {
            let path = expand_tilde(&path.to_string_lossy());
            GalleryConfig::load(&path).with_context(|| format!("loading gallery config {}", path.display()))?
        }
        None => GalleryConfig::demo(),
    };
    let preferences = Arc::new(load_preferences());
    let options = AppOptions {
        preferred_theme: cli.theme,
        match_mode: cli.match_mode.map(PathMatchMode::from),
        active_path: cli.active_path,
    };

    if cli.dump {
        let snapshot = navkit_tui::snapshot(config, preferences, options)?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    info!("starting gallery");
    navkit_tui::run(config, preferences, options).await
}

fn load_preferences() -> UserPreferences {
    UserPreferences::new().unwrap_or_else(|error| {
        warn!(%error, "failed to load preferences; using in-memory defaults");
        UserPreferences::ephemeral()
    })
}

/// Logs go to `log_file` when given, to stderr for `--dump`, and nowhere
/// while the terminal UI owns the screen.
fn init_tracing(log_file: Option<&Path>, dump: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None if dump => builder.with_writer(std::io::stderr).try_init(),
        None => builder.with_writer(std::io::sink).try_init(),
    };
    if let Err(error) = result {
        eprintln!("tracing already initialised: {error}");
    }
    Ok(())
}
