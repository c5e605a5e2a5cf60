//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! one is present).

use std::env;
use std::fmt;
use std::str::FromStr;

use member_core::PhoneRegion;
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseSettings,
    pub auth: AuthConfig,
    pub notifications: NotificationConfig,
    pub aws: AwsConfig,
    pub phone: PhoneConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
    pub deployment: DeploymentMode,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        }
    }
}

/// Where the service runs, which decides how callers are authenticated and
/// where database credentials come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// Standalone: `X-API-Key` shared secret, credentials from env vars,
    /// schema bootstrap plus sample data
    #[default]
    Local,
    /// Behind a trusted API gateway: no key check, caller identity from the
    /// forwarded bearer token, credentials from the secrets store
    Gateway,
}

impl DeploymentMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Gateway => "gateway",
        }
    }

    #[must_use]
    pub fn is_gateway(&self) -> bool {
        matches!(self, Self::Gateway)
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "gateway" | "lambda" => Ok(Self::Gateway),
            other => Err(ConfigError::InvalidValue("DEPLOYMENT_MODE", other.to_string())),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database location, local credentials and pool sizing
#[derive(Clone)]
pub struct DatabaseSettings {
    /// Full connection URL overriding the individual fields (local mode only)
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    /// Secrets store entry holding `username`/`password` (gateway mode)
    pub secret_arn: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("secret_arn", &self.secret_arn)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

/// Shared-secret authentication settings
#[derive(Clone)]
pub struct AuthConfig {
    pub api_key: String,
}

impl AuthConfig {
    /// Check whether the built-in development key is in use
    #[must_use]
    pub fn uses_default_key(&self) -> bool {
        self.api_key == DEFAULT_API_KEY
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig").field("api_key", &"<redacted>").finish()
    }
}

/// Notification email settings
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub enabled: bool,
    /// Sender address, also the admin recipient when no submitter is known
    pub sender_email: String,
    pub smtp: SmtpConfig,
}

/// SMTP relay settings
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// AWS settings for the secrets store
#[derive(Debug, Clone)]
pub struct AwsConfig {
    pub region: String,
}

/// Phone parsing settings
#[derive(Debug, Clone, Copy)]
pub struct PhoneConfig {
    pub default_region: PhoneRegion,
}

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

pub const DEFAULT_API_KEY: &str = "dev-api-key-12345";
pub const DEFAULT_NOTIFICATION_EMAIL: &str = "admin@yourdomain.com";

// Default value functions
fn default_app_name() -> String {
    "membership-api".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_db_port() -> u16 {
    5432
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_smtp_port() -> u16 {
    587
}

fn default_aws_region() -> String {
    "us-east-1".to_string()
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a value cannot be parsed, or if gateway mode is
    /// selected without `DB_SECRET_ARN`
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let deployment = match var("DEPLOYMENT_MODE") {
            Some(mode) => mode.parse()?,
            None if var("AWS_LAMBDA_FUNCTION_NAME").is_some() => DeploymentMode::Gateway,
            None => DeploymentMode::Local,
        };

        let env = var("APP_ENV")
            .and_then(|s| s.parse::<Environment>().ok())
            .unwrap_or_default();

        let secret_arn = var("DB_SECRET_ARN");
        if deployment.is_gateway() && secret_arn.is_none() {
            return Err(ConfigError::MissingVar("DB_SECRET_ARN"));
        }

        let default_region = match var("PHONE_DEFAULT_REGION") {
            Some(code) => code
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PHONE_DEFAULT_REGION", code))?,
            None => PhoneRegion::default(),
        };

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env,
                deployment,
            },
            api: ServerConfig {
                host: var("API_HOST").unwrap_or_else(default_host),
                port: parse_or(&var, "API_PORT", default_port())?,
            },
            database: DatabaseSettings {
                url: var("DATABASE_URL").filter(|_| !deployment.is_gateway()),
                host: var("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: parse_or(&var, "DB_PORT", default_db_port())?,
                name: var("DB_NAME").unwrap_or_else(|| "membership".to_string()),
                user: var("DB_USER").unwrap_or_else(|| "postgres".to_string()),
                password: var("DB_PASSWORD").unwrap_or_default(),
                secret_arn,
                max_connections: parse_or(&var, "DATABASE_MAX_CONNECTIONS", default_max_connections())?,
                min_connections: parse_or(&var, "DATABASE_MIN_CONNECTIONS", default_min_connections())?,
            },
            auth: AuthConfig {
                api_key: var("API_KEY").unwrap_or_else(|| DEFAULT_API_KEY.to_string()),
            },
            notifications: NotificationConfig {
                enabled: parse_bool_or(&var, "ENABLE_NOTIFICATIONS", true)?,
                sender_email: var("NOTIFICATION_EMAIL")
                    .unwrap_or_else(|| DEFAULT_NOTIFICATION_EMAIL.to_string()),
                smtp: SmtpConfig {
                    host: var("SMTP_HOST").unwrap_or_else(|| "localhost".to_string()),
                    port: parse_or(&var, "SMTP_PORT", default_smtp_port())?,
                    username: var("SMTP_USERNAME"),
                    password: var("SMTP_PASSWORD"),
                },
            },
            aws: AwsConfig {
                region: var("AWS_REGION_NAME").unwrap_or_else(default_aws_region),
            },
            phone: PhoneConfig { default_region },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_or(
                    &var,
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second(),
                )?,
                burst: parse_or(&var, "RATE_LIMIT_BURST", default_burst())?,
            },
            cors: CorsConfig {
                allowed_origins: var("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|origin| !origin.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

fn parse_or<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default),
    }
}

fn parse_bool_or<F>(var: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue(key, raw)),
        },
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
