//! Research Nexus server
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use nexus_api::{AppState, build_app};
use nexus_core::config::AppConfig;
use nexus_core::error::AppError;
use nexus_database::Repositories;
use nexus_service::Services;

#[tokio::main]
async fn main() {
    let env = std::env::var("NEXUS_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(kind = %e.kind, error = %e.message, "Server error");
        std::process::exit(1);
    }
}

/// Install the global subscriber: JSON lines or pretty output, filtered by
/// `RUST_LOG` or else `logging.level`.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = fmt().with_env_filter(filter).with_target(true);

    if config.logging.is_json() {
        builder.json().with_current_span(false).init();
    } else {
        builder.pretty().init();
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Research Nexus v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Metadata backend (migrations run for PostgreSQL) ──
    tracing::info!(backend = %config.database.backend, "Connecting metadata backend...");
    let repositories = Repositories::connect(&config.database).await?;

    // ── Step 2: Byte storage ─────────────────────────────────────
    let storage = nexus_storage::build_provider(&config.storage).await?;

    // ── Step 3: Services ─────────────────────────────────────────
    let services = Services::new(repositories, storage, &config);

    // ── Step 4: Startup reconciliation ───────────────────────────
    if config.consistency.reconcile_on_startup {
        match services.coordinator.reconcile_all().await {
            Ok(reports) => {
                let drifted = reports.iter().filter(|r| r.drifted).count();
                tracing::info!(folders = reports.len(), drifted, "Startup reconciliation complete");
            }
            Err(e) => {
                tracing::warn!(kind = %e.kind, error = %e.message, "Startup reconciliation failed");
            }
        }
    }

    // ── Step 5: HTTP server ──────────────────────────────────────
    let addr = config.server.bind_address();
    let state = AppState::new(config, services);
    let app = build_app(state.clone());

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(
            nexus_core::ErrorKind::Configuration,
            format!("Failed to bind {addr}"),
            e,
        )
    })?;
    tracing::info!(address = %addr, "Research Nexus listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await?;

    state.services.repositories.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
