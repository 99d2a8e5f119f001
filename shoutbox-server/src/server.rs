//! Axum server setup and router configuration

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use shoutbox_store::MessageStore;

use crate::routes;
use crate::state::AppState;

/// Server command-line arguments
#[derive(Parser, Debug, Clone)]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "3030")]
    pub port: u16,

    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Datastore connection string, e.g. sqlite://shoutbox.db
    /// (omit to run without persistence)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

impl Default for ServerArgs {
    fn default() -> Self {
        Self {
            port: 3030,
            bind: "127.0.0.1".to_string(),
            database_url: None,
            timeout: 30,
        }
    }
}

/// Run the server with the given arguments
pub async fn run_server(args: ServerArgs) -> anyhow::Result<()> {
    let store = open_store(args.database_url.as_deref()).await;
    let state = AppState::new(store);

    let app = create_router(state, args.timeout);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Starting shoutbox-server on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Open the message store, or fall back to running without persistence.
///
/// An unreachable datastore is a routine condition, not a startup
/// failure: the server stays up and reports it through the health route.
async fn open_store(database_url: Option<&str>) -> Option<MessageStore> {
    let url = match database_url {
        Some(url) => url,
        None => {
            warn!("DATABASE_URL not set, running without persistence");
            return None;
        }
    };

    match MessageStore::connect(url).await {
        Ok(store) => {
            info!("Message store ready at {}", url);
            Some(store)
        }
        Err(err) => {
            warn!("Could not open message store: {}", err);
            None
        }
    }
}

/// Create the axum router with all routes
pub fn create_router(state: AppState, timeout_secs: u64) -> Router {
    // CORS layer for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(timeout_secs)))
        .layer(cors);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::messages::router())
        .merge(routes::diag::router())
        .layer(middleware)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
