#![recursion_limit = "256"]
//! # Main Entry Point
//!
//! Initializes the application:
//! - Domain: Configuration, Result Envelope and Types
//! - Infrastructure: Matrix, Console, Resource API, Brain
//! - Application: Router, Attention Window, Error Reporter
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::application::bot::Hackbot;
use crate::domain::config::AppConfig;
use crate::domain::traits::SystemClock;
use crate::infrastructure::api::HttpResourceClient;
use crate::infrastructure::brain;
use crate::infrastructure::console::ConsoleChat;
use crate::infrastructure::matrix::MatrixChat;
use crate::strings::{help, logs};

const DATA_DIR: &str = "data";
const LOG_FILE: &str = "session.log";

#[derive(Parser, Debug)]
#[command(
    name = "hackbot",
    version,
    about = "Chat bot for managing hackathon teams",
    after_help = help::COMMANDS
)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "data/config.yaml")]
    config: PathBuf,

    /// Chat on stdin/stdout instead of connecting to Matrix
    #[arg(long)]
    console: bool,

    /// User name for console messages
    #[arg(long, default_value = "console")]
    user: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Logging Setup
    if !Path::new(DATA_DIR).exists() {
        fs::create_dir(DATA_DIR).context("Failed to create data directory")?;
    }
    // Clear previous session log
    let log_path = Path::new(DATA_DIR).join(LOG_FILE);
    if log_path.exists() {
        let _ = fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(DATA_DIR, LOG_FILE);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn",
        )
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);

    // The console transport owns stdout
    let console_layer = if cli.console {
        None
    } else {
        Some(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::info!("Starting Hackbot...");

    // 2. Load Configuration
    let config = if cli.console && !cli.config.exists() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    } else {
        let config = AppConfig::load(&cli.config)?;
        tracing::info!("{}", logs::config_loaded(&cli.config.display().to_string()));
        config
    };
    tracing::info!("{}", logs::api_url(&config.api.url));
    tracing::info!("{}", logs::error_channel(&config.errors.channel));
    let config = Arc::new(config);

    // 3. Initialize Infrastructure
    let brain = brain::connect(&config.brain).await?;
    let api = Arc::new(HttpResourceClient::new(&config.api)?);
    let clock = Arc::new(SystemClock);

    // 4. Pick a transport and run
    if cli.console {
        let chat = Arc::new(ConsoleChat);
        let bot = Arc::new(Hackbot::build(config.clone(), chat.clone(), api, brain, clock)?);
        return chat.run(bot, &cli.user).await;
    }

    let matrix_config = config
        .services
        .matrix
        .as_ref()
        .context("services.matrix must be configured unless --console is given")?;
    let chat = Arc::new(MatrixChat::login(matrix_config).await?);
    let bot = Arc::new(Hackbot::build(config.clone(), chat.clone(), api, brain, clock)?);

    if let Err(e) = chat.run(bot).await {
        tracing::error!("{}", logs::sync_loop_fail(&format!("{e:#}")));
        return Err(e);
    }
    Ok(())
}
