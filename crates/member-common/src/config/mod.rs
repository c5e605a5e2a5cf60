//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, AuthConfig, AwsConfig, ConfigError, CorsConfig, DatabaseSettings,
    DeploymentMode, Environment, NotificationConfig, PhoneConfig, RateLimitConfig, ServerConfig,
    SmtpConfig, DEFAULT_API_KEY, DEFAULT_NOTIFICATION_EMAIL,
};
