//! todo-service
//!
//! Task-tracking REST service backed by an embedded `SQLite` database.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `8080`)
//! - `STORAGE_MODE`: `sqlite` (default) | `in_memory`
//! - `DB_FILE`: `SQLite` database file (default: `DB_FILE.db`)
//! - `DB_MAX_CONNECTIONS`: `SQLite` pool size (default: `5`)
//! - `WORKER_THREADS`: Number of tokio worker threads (default: logical CPU count)
//! - `LOG_FORMAT`: `text` (default) | `json`
//! - `RUST_LOG`: Logging filter (default: `todo_service=debug,tower_http=debug`)
//!
//! Variables may also be placed in a `.env` file in the working directory.

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use todo_service::api::{AppState, router};
use todo_service::config::{LogFormat, ServerConfig};
use todo_service::infrastructure::{RepositoryConfig, RepositoryFactory};
use todo_service::service::TaskService;

const DEFAULT_LOG_FILTER: &str = "todo_service=debug,tower_http=debug";

fn main() {
    dotenvy::dotenv().ok();

    // The subscriber is not installed yet, so startup errors go to stderr.
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Configuration error: {error}");
            std::process::exit(1);
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if let Some(threads) = config.worker_threads {
        builder.worker_threads(threads);
        eprintln!("Tokio worker_threads set to: {threads}");
    } else {
        eprintln!("Tokio worker_threads: using default (logical CPU count)");
    }

    let runtime = match builder.build() {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("Failed to create tokio runtime: {error}");
            std::process::exit(1);
        }
    };

    runtime.block_on(async_main(config));
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn async_main(config: ServerConfig) {
    init_tracing(config.log_format);

    tracing::info!("Starting todo-service");

    let repository_config = match RepositoryConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    tracing::info!(
        storage_mode = ?repository_config.storage_mode,
        database_path = %repository_config.sqlite.database_path.display(),
        "Repository configuration loaded"
    );

    let repository = match RepositoryFactory::new(repository_config).create().await {
        Ok(repository) => repository,
        Err(error) => {
            tracing::error!("Failed to initialize repository: {}", error);
            std::process::exit(1);
        }
    };

    let service = match TaskService::bootstrap(repository).await {
        Ok(service) => service,
        Err(error) => {
            tracing::error!("Failed to initialize task service: {}", error);
            std::process::exit(1);
        }
    };

    let application = router(AppState::new(service));

    let address = match config.socket_address() {
        Ok(address) => address,
        Err(error) => {
            tracing::error!(%error, "Invalid server address");
            std::process::exit(1);
        }
    };

    let listener = match TcpListener::bind(address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, "Failed to bind to address {}", address);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(address) => tracing::info!("Listening on {}", address),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    if let Err(error) = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "Server error");
        std::process::exit(1);
    }

    tracing::info!("Server shutdown complete");
}

/// Completes on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
