//! HTTP server command
//!
//! Startup order: configuration, database pool + ping, then bind. A failure
//! at any step exits before the listener exists.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use userbook_server::{create_pool, run_server, Config, PgUserRepo};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on (overrides PORT)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Address to bind to (overrides BIND_HOST, default 0.0.0.0)
    #[arg(long, short = 'b')]
    pub bind_host: Option<IpAddr>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = load_config(&args)?;

    let pool = create_pool(&config.database)
        .await
        .context("Database is unreachable; refusing to start")?;

    tracing::info!("Starting userbook server on {}", config.http.bind_addr);

    // Run server (blocks until shutdown)
    run_server(Arc::new(PgUserRepo::new(pool)), &config.http)
        .await
        .context("Server error")?;

    Ok(())
}

fn load_config(args: &ServeArgs) -> Result<Config> {
    // PORT is required by Config; a flag satisfies it too.
    let port_override = args.port.map(|p| p.to_string());
    let mut config = Config::from_lookup(|key| match key {
        "PORT" if port_override.is_some() => port_override.clone(),
        _ => std::env::var(key).ok(),
    })
    .context("Invalid configuration")?;

    if let Some(host) = args.bind_host {
        config.http.bind_addr = SocketAddr::new(host, config.http.bind_addr.port());
    }

    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}
