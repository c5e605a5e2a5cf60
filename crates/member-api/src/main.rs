//! Membership API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p member-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use member_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing before config so config errors are logged
    dotenvy::dotenv().ok();
    let env = std::env::var("APP_ENV")
        .ok()
        .and_then(|v| v.parse::<Environment>().ok())
        .unwrap_or_default();
    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Membership API Server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        deployment = %config.app.deployment,
        port = config.api.port,
        "Configuration loaded"
    );

    member_api::run(config).await?;

    Ok(())
}
