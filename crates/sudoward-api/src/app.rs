//! Application builder: wires router, middleware and state into an Axum app.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use sudoward_audit::JsonlAuditLog;
use sudoward_core::config::{AppConfig, CorsConfig};
use sudoward_core::error::AppError;
use sudoward_core::traits::{ArtifactWriter, AuditSink, Clock, SystemClock, SystemProbe};
use sudoward_grant::find_orphans;
use sudoward_host::{PasswdProbe, SudoersArtifactWriter};
use sudoward_worker::ExpirySweeper;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, cors_config: &CorsConfig) -> Router {
    build_router(state)
        .layer(build_cors_layer(cors_config))
        .layer(TraceLayer::new_for_http())
}

/// Runs the Sudoward server against the real host until a shutdown signal.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Sudoward server...");

    let probe: Arc<dyn SystemProbe> = Arc::new(PasswdProbe::new(&config.host));
    let artifacts: Arc<dyn ArtifactWriter> = Arc::new(SudoersArtifactWriter::new(&config.grant));
    let audit: Arc<dyn AuditSink> = Arc::new(JsonlAuditLog::new(&config.audit));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let state = AppState::new(config.clone(), probe, artifacts, audit, clock);

    match find_orphans(state.artifacts.as_ref(), &state.store).await {
        Ok(orphans) if !orphans.is_empty() => {
            tracing::warn!(
                count = orphans.len(),
                dir = %config.grant.artifact_dir,
                "Found sudo artifacts left by a previous run; they stay active until removed"
            );
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "Could not scan for orphaned sudo artifacts"),
    }

    let sweeper = ExpirySweeper::new(
        Arc::clone(&state.store),
        state.revokes.as_ref().clone(),
        Arc::clone(&state.clock),
        &config.sweeper,
    )
    .start();

    let app = build_app(state, &config.server.cors);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Sudoward server listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    sweeper.stop().await;

    served.map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Sudoward server stopped");
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

    tracing::info!("Shutdown signal received");
}
