//! toolbus server entry point.
//!
//! Binary name: `toolbus`
//!
//! Parses CLI arguments, loads configuration, wires the application state,
//! then serves the WebSocket endpoint until Ctrl+C or SIGTERM.

mod config;
mod http;
mod state;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use state::AppState;

/// Demo tool-dispatch server over a WebSocket connection.
#[derive(Parser)]
#[command(name = "toolbus", version, about, long_about = None)]
struct Cli {
    /// Interface to bind (overrides the config file).
    #[arg(long)]
    host: Option<String>,

    /// TCP port to listen on (overrides the config file).
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to the TOML config file.
    #[arg(long, default_value = "toolbus.toml")]
    config: PathBuf,

    /// Suppress all output except errors.
    #[arg(long)]
    quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,toolbus_api=debug,toolbus_core=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let mut config = config::load_config(&cli.config).await;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let state = AppState::init().await;
    let router = http::router::build_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "toolbus listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve when the process receives Ctrl+C or (on unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
