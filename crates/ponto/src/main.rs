mod app;
mod config;
mod handlers;
mod photos;
mod rate_limit;
mod state;
mod storage;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ponto_core::storage::CheckInRepository;

use crate::{app::create_app, config::Config, state::AppState};

/// Ponto - Check-in kiosk backend
#[derive(Parser, Debug)]
#[command(name = "ponto")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables take precedence
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ponto=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let state = AppState::sqlite(config.clone());

    // Nothing is served unless directories and schema are in place
    if let Err(e) = bootstrap(&config, &*state.repo).await {
        tracing::error!(error = %format!("{e:#}"), "Failed to start server");
        return Err(e);
    }

    let app = create_app(state);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?
        }
    };

    let local_addr = listener.local_addr()?;
    tracing::info!("listening on {local_addr}");
    tracing::info!("local URL: http://localhost:{}", local_addr.port());
    tracing::info!(
        "external URL: http://{}:{}/ponto",
        config.server_ip,
        local_addr.port()
    );
    tracing::info!(
        uploads = %config.photo_dir().display(),
        database = %config.db_path.display(),
        "storage locations"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Create the upload and database directories, then the schema.
async fn bootstrap(config: &Config, repo: &dyn CheckInRepository) -> Result<()> {
    let photo_dir = config.photo_dir();
    tokio::fs::create_dir_all(&photo_dir)
        .await
        .with_context(|| format!("cannot create upload directory {}", photo_dir.display()))?;

    if let Some(db_dir) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(db_dir)
            .await
            .with_context(|| format!("cannot create database directory {}", db_dir.display()))?;
    }

    repo.initialize()
        .await
        .with_context(|| format!("cannot initialize database {}", config.db_path.display()))?;

    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
