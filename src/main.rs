//! TaskHub server: personal task lists behind a login.
//!
//! Main entry point that wires all crates together and starts the server.

use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use taskhub_api::{AppState, build_app};
use taskhub_auth::{PasswordPolicy, SessionCleanup};
use taskhub_core::config::AppConfig;
use taskhub_core::error::AppError;
use taskhub_database::Stores;
use taskhub_database::migration::run_migrations;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment.
///
/// `TASKHUB_CONFIG` names an explicit file; otherwise `config/default.toml`
/// is merged with the `TASKHUB_ENV` overlay.
fn load_configuration() -> Result<AppConfig, AppError> {
    match std::env::var("TASKHUB_CONFIG") {
        Ok(path) => AppConfig::from_file(&path),
        Err(_) => {
            let env = std::env::var("TASKHUB_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting TaskHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Stores + migrations ──────────────────────────────
    let stores = Stores::connect(&config.database).await?;

    if let Some(pool) = stores.pool() {
        if config.database.run_migrations {
            run_migrations(pool.pool()).await?;
        } else {
            tracing::info!("Skipping migrations (database.run_migrations = false)");
        }
    }

    // ── Step 2: Password policy ──────────────────────────────────
    tracing::info!(
        "Loading password policy (common list: {})...",
        config.auth.password.common_passwords_path
    );
    let policy = PasswordPolicy::from_config(&config.auth.password)?;
    tracing::info!("Password policy ready");

    // ── Step 3: Session cleanup task ─────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let cleanup = SessionCleanup::new(stores.sessions.clone());
    let cleanup_interval = Duration::from_secs(config.session.cleanup_interval_minutes * 60);
    let cleanup_handle = tokio::spawn(async move {
        cleanup.run(cleanup_interval, shutdown_rx).await;
    });

    // ── Step 4: Build and start HTTP server ──────────────────────
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = build_app(AppState::new(config, stores.clone(), policy));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("TaskHub listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 5: Drain background work ────────────────────────────
    if tokio::time::timeout(grace, cleanup_handle).await.is_err() {
        tracing::warn!("Session cleanup did not stop within {:?}", grace);
    }

    if let Some(pool) = stores.pool() {
        pool.close().await;
    }

    tracing::info!("TaskHub stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
