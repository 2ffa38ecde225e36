use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use lp_host::bootstrap::{resolve_config, tracing::init_tracing_subscriber, wire_dependencies};
use lp_host::ipc::{default_socket_path, IpcServer};
use tracing::{error, info};

/// Live multi-screen projection controller.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the IPC socket path
    #[arg(short, long)]
    socket: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(err) = run(args).await {
        error!("{err:#}");
        eprintln!("liveprojector: {err:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = resolve_config(args.config.as_deref())?;

    if let Err(err) = init_tracing_subscriber(&config.logs_dir) {
        eprintln!("Failed to initialize tracing: {err}");
    }

    let socket_path = match args.socket {
        Some(path) => path,
        None if !config.socket_path.as_os_str().is_empty() => config.socket_path.clone(),
        None => default_socket_path()?,
    };

    let host = Arc::new(
        wire_dependencies(config)
            .await
            .context("Failed to wire dependencies")?,
    );
    let server = IpcServer::bind_to(socket_path)?;
    info!(socket = %server.path().display(), "liveprojector ready");

    server
        .serve_until(host, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!(error = %err, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await
}
