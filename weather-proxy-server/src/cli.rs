use anyhow::Context;
use clap::Parser;
use std::{path::PathBuf, sync::Arc};
use weather_proxy_core::{Config, OpenWeatherProvider};

use crate::routes;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-proxy", version, about = "HTTP relay for OpenWeatherMap current weather")]
pub struct Args {
    /// Host address to bind; overrides the config file and environment.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind; overrides the config file and environment.
    #[arg(long)]
    pub port: Option<u16>,

    /// Path to a TOML config file; defaults to the platform config dir.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        // Resolved at startup so a missing credential fails the boot, not
        // the first request.
        let api_key = config.openweather_api_key()?.to_owned();
        let provider = OpenWeatherProvider::with_base_url(api_key, config.openweather.base_url.clone());
        let app = routes::router(Arc::new(provider));

        let addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        tracing::info!(%addr, "weather proxy listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install ctrl-c handler");
    }
}
