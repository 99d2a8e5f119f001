//! shoutbox-server entry point
//!
//! Accepts a text message over HTTP, persists it, and lists the most
//! recent ones. Configuration comes from flags or the environment; a
//! missing DATABASE_URL means "run with no persistence".

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use shoutbox_server::{run_server, ServerArgs};

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing().ok();

    let args = ServerArgs::parse();
    run_server(args).await
}
