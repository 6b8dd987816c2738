//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use qa_common::{AppConfig, AppError, JwtService, StorageBackend};
use qa_core::{SnowflakeGenerator, VoteRepository};
use qa_db::{create_pool, run_migrations, MemoryVoteRepository, PgVoteRepository};
use qa_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Highest worker id a snowflake generator accepts
const MAX_WORKER_ID: u16 = 1023;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes get the base stack only, so health checks are never rate limited.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_middleware(health_routes());

    api.merge(health).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let vote_repo = create_vote_repository(&config).await?;

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    if config.snowflake.worker_id > MAX_WORKER_ID {
        return Err(AppError::Config(format!(
            "WORKER_ID must be at most {MAX_WORKER_ID}, got {}",
            config.snowflake.worker_id
        )));
    }
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = ServiceContextBuilder::new()
        .vote_repo(vote_repo)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Open the configured vote store
async fn create_vote_repository(config: &AppConfig) -> Result<Arc<dyn VoteRepository>, AppError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory vote storage; votes are lost on restart");
            Ok(Arc::new(MemoryVoteRepository::new()))
        }
        StorageBackend::Postgres => {
            let database = config.database.as_ref().ok_or_else(|| {
                AppError::Config("DATABASE_URL is required for the postgres backend".to_string())
            })?;

            info!("Connecting to PostgreSQL...");
            let db_config = qa_db::DatabaseConfig {
                url: database.url.clone(),
                max_connections: database.max_connections,
                min_connections: database.min_connections,
                migrations_dir: database.migrations_dir.clone(),
                ..Default::default()
            };
            let pool = create_pool(&db_config)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            if database.run_migrations {
                run_migrations(&pool, &database.migrations_dir)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }

            Ok(Arc::new(PgVoteRepository::new(pool)))
        }
    }
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config.api.address().parse().map_err(|e| {
        AppError::Config(format!("Invalid listen address {}: {e}", config.api.address()))
    })?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}

/// Resolves on Ctrl+C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
