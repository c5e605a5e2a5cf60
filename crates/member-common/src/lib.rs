//! # member-common
//!
//! Shared infrastructure: configuration, application errors, caller
//! authentication, database credential sourcing, SMTP delivery, and telemetry.

pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod mail;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{verify_api_key, GatewayClaims, GatewayIdentity, API_KEY_HEADER};
pub use config::{
    AppConfig, AppSettings, AuthConfig, AwsConfig, ConfigError, CorsConfig, DatabaseSettings,
    DeploymentMode, Environment, NotificationConfig, PhoneConfig, RateLimitConfig, ServerConfig,
    SmtpConfig,
};
pub use credentials::{
    provider_for, CredentialError, CredentialProvider, DbCredentials, EnvCredentialProvider,
    SecretsManagerCredentialProvider,
};
pub use error::{AppError, AppResult};
pub use mail::SmtpEmailSender;
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
