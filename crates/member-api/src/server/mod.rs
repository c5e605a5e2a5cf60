//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use member_common::{provider_for, AppConfig, AppError, SmtpEmailSender};
use member_core::{EmailSender, MemberRepository};
use member_db::{create_pool, ensure_schema, seed_sample_member, PgMemberRepository, PoolConfig};
use member_service::{Notifier, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{with_api_protection, with_request_tracing};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// How long shutdown waits for notifications still being sent
pub const NOTIFICATION_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the complete Axum application with all routes and middleware
///
/// `/health` is traced but never rate limited or subject to CORS.
///
/// # Errors
/// `AppError::Config` when the rate limit settings are unusable
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = with_api_protection(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = with_request_tracing(health_routes());

    Ok(api.merge(health).with_state(state))
}

/// Build the service context around an existing repository and mail sender
pub fn create_state_with(
    config: AppConfig,
    member_repo: Arc<dyn MemberRepository>,
    mailer: Arc<dyn EmailSender>,
) -> Result<AppState, AppError> {
    let notifier = Notifier::from_config(&config.notifications, mailer);

    let service_context = ServiceContextBuilder::new()
        .member_repo(member_repo)
        .notifier(notifier)
        .phone_region(config.phone.default_region)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    if !config.app.deployment.is_gateway() && config.auth.uses_default_key() {
        warn!("API_KEY is not set; using the development default");
    }

    // Resolve database credentials
    let credentials = provider_for(&config)
        .await
        .map_err(|e| AppError::Config(e.to_string()))?;
    info!(source = credentials.source(), "Resolving database credentials");
    let db_credentials = credentials
        .database_credentials()
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    // Create database pool
    info!("Connecting to PostgreSQL...");
    let pool_config = PoolConfig::from_settings(&config.database, &db_credentials)
        .map_err(|e| AppError::Config(e.to_string()))?;
    let pool = create_pool(&pool_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    ensure_schema(&pool).await?;

    let member_repo = PgMemberRepository::new(pool);

    if !config.app.deployment.is_gateway() && seed_sample_member(&member_repo).await? {
        info!("Inserted sample member");
    }

    // Email delivery
    let mailer = SmtpEmailSender::from_config(&config.notifications.smtp)
        .map_err(|e| AppError::Config(e.to_string()))?;
    info!(
        enabled = config.notifications.enabled,
        host = %config.notifications.smtp.host,
        "Email notifications configured"
    );

    create_state_with(config, Arc::new(member_repo), Arc::new(mailer))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::internal)?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid bind address {}: {}", config.api.address(), e)))?;

    let state = create_app_state(config).await?;
    let notifier = state.service_context().notifier().clone();
    let app = create_app(state)?;

    run_server(app, addr).await?;

    if !notifier.drain(NOTIFICATION_DRAIN_TIMEOUT).await {
        warn!("Shut down with registration notifications still unsent");
    }
    Ok(())
}
