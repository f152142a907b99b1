//! `devstats-server`: HTTP front end for the collectors.
//!
//! Environment:
//! - `DEVSTATS_ADDR`     listen address (default `127.0.0.1:5000`)
//! - `DEVSTATS_PROFILES` JSON profile list replacing the built-in sources
//! - `RUST_LOG`          tracing filter (default `info`)

use std::net::SocketAddr;

use devstats_rs::server::{self, AppState};
use devstats_rs::{DsClient, Router, sources};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "127.0.0.1:5000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr: SocketAddr = std::env::var("DEVSTATS_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let client = DsClient::builder().build()?;
    let router = match std::env::var("DEVSTATS_PROFILES") {
        Ok(path) => {
            tracing::info!(%path, "loading source profiles");
            Router::from_profiles(&client, sources::profiles_from_path(&path)?)?
        }
        Err(_) => Router::with_builtin_sources(&client)?,
    };
    tracing::info!(sources = router.len(), "router ready");

    let state = AppState::new(router, client.country().name.clone());
    server::serve(addr, state).await?;
    Ok(())
}
