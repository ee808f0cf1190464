//! codepad server - network-accessible code execution and testing service.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use codepad::config;
use codepad::executor::Executor;
use codepad::server::{AppState, build_router};
use codepad::session::SessionGate;

#[derive(Parser)]
#[command(name = "codepad")]
#[command(about = "Network-accessible code execution and testing service", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "codepad.toml")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = config::load_config(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    info!("Loaded configuration from {}", cli.config.display());

    std::fs::create_dir_all(&config.process.temp_root).with_context(|| {
        format!(
            "Failed to create temp root {}",
            config.process.temp_root.display()
        )
    })?;

    let session_gate = SessionGate::connect(&config.session)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to Redis at {}:{}",
                config.session.redis_host, config.session.redis_port
            )
        })?;

    let bind = config.server.bind.clone();
    let state = Arc::new(AppState {
        executor: Executor::new(config),
    });

    let router = build_router(state, Arc::new(session_gate));

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    info!("Listening on {bind}");

    axum::serve(listener, router)
        .await
        .context("Server error")?;

    Ok(())
}
