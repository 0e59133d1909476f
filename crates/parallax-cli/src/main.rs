use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parallax_core::AppConfig;

mod commands;

use commands::progress::ProgressArgs;

#[derive(Parser)]
#[command(name = "parallax")]
#[command(author, version, about = "Scroll-driven parallax engine with a terminal demo")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of ~/.config/parallax/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the demo page in the terminal
    Run,
    /// Compute progress and derived parameters for one geometry sample
    Progress(ProgressArgs),
    /// Map a progress value to opacity and offset
    Params {
        /// Progress in [0, 1]; out-of-range values are clamped
        progress: f64,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Simulate a fingerprint scan
    Scan {
        /// Seed for the outcome draw
        #[arg(long)]
        seed: Option<u64>,
        /// Skip the tick delay
        #[arg(long)]
        instant: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}

/// Install the global subscriber; logs go to `log_file` when given, stderr otherwise
fn init_logging(config: &AppConfig, log_file: Option<PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);

    // `config path` and `config init` must work even with a broken file
    if let Some(Commands::Config { action }) = &cli.command {
        match action {
            ConfigAction::Path => return commands::config::path(&config_path),
            ConfigAction::Init { force } => return commands::config::init(&config_path, *force),
            ConfigAction::Show => {}
        }
    }

    // Load configuration
    let config = AppConfig::load_from(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    // The TUI owns the terminal, so its logs go to a file
    let log_file = match cli.command {
        Some(Commands::Run) | None => Some(config.log_path()),
        _ => None,
    };
    init_logging(&config, log_file)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Progress(args)) => commands::progress::run(&config, &args),
        Some(Commands::Params { progress, json }) => commands::progress::params(&config, progress, json),
        Some(Commands::Scan { seed, instant }) => {
            commands::scan::run(&config, seed.or(config.demo.seed), instant).await
        }
        Some(Commands::Config { .. }) => commands::config::show(&config),
    }
}
