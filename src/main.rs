use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ipma_core::Config;
use ipma_server::AppState;
use ipma_weather::{ForecastService, IpmaClient};

/// Caching proxy in front of the IPMA open-data forecast API.
#[derive(Debug, Parser)]
#[command(name = "ipma-proxy", version)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `[server] bind_addr`
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    ipma_core::init();

    let (mut config, _) = Config::load_validated(args.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }

    let client = IpmaClient::from_config(&config).context("Failed to build IPMA client")?;
    tracing::info!(
        base_url = client.base_url(),
        ttls = ?client.ttls(),
        "Upstream client ready"
    );
    let state = AppState::new(ForecastService::new(client));

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;

    ipma_server::serve(listener, state, shutdown_signal()).await?;

    tracing::info!("IPMA proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
