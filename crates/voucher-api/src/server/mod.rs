//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use voucher_common::{AppConfig, AppError, StorageBackend};
use voucher_core::SnowflakeGenerator;
use voucher_db::{
    create_pool, run_migrations, MemoryStore, PgCustomerRepository, PgEventRepository,
    PgQrRepository, PgReleaseRepository, PgStorageHealth, PgVoucherRepository,
};
use voucher_service::{ServiceContext, ServiceContextBuilder};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware.
/// Health probes skip rate limiting.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_middleware(health_routes());

    Ok(api.merge(health).with_state(state))
}

/// Initialize storage and services and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = match config.storage.backend {
        StorageBackend::Postgres => postgres_context(&config, snowflake_generator).await?,
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on exit");
            ServiceContext::from_store(MemoryStore::new(), snowflake_generator)
        }
    };

    Ok(AppState::new(service_context, config))
}

async fn postgres_context(
    config: &AppConfig,
    snowflake_generator: Arc<SnowflakeGenerator>,
) -> Result<ServiceContext, AppError> {
    let database = config
        .database
        .as_ref()
        .ok_or_else(|| AppError::Config("DATABASE_URL is required for postgres storage".to_string()))?;

    info!("Connecting to PostgreSQL...");
    let db_config = voucher_db::DatabaseConfig::from(database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!("Database migrations applied");
    }

    ServiceContextBuilder::new()
        .customer_repo(Arc::new(PgCustomerRepository::new(pool.clone())))
        .voucher_repo(Arc::new(PgVoucherRepository::new(pool.clone())))
        .release_repo(Arc::new(PgReleaseRepository::new(pool.clone())))
        .event_repo(Arc::new(PgEventRepository::new(pool.clone())))
        .qr_repo(Arc::new(PgQrRepository::new(pool.clone())))
        .storage_health(Arc::new(PgStorageHealth::new(pool)))
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Serve the application on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Listener has no local address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
