//! Database credential sourcing
//!
//! Local deployments read the credentials from the environment; gateway
//! deployments fetch them from AWS Secrets Manager. Which one is used is
//! decided once at startup by [`provider_for`].

mod env;
mod secrets_manager;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

pub use env::EnvCredentialProvider;
pub use secrets_manager::SecretsManagerCredentialProvider;

use crate::config::{AppConfig, DeploymentMode};

/// Username/password pair for the database
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct DbCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for DbCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Credential retrieval errors
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("Failed to retrieve secret: {0}")]
    Fetch(String),

    #[error("Secret has no string value")]
    EmptySecret,

    #[error("Secret is malformed: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Resolve the credentials used to open database connections
    async fn database_credentials(&self) -> Result<DbCredentials, CredentialError>;

    /// Short name of the credential source, for logs
    fn source(&self) -> &'static str;
}

/// Select the credential source for the configured deployment mode
pub async fn provider_for(
    config: &AppConfig,
) -> Result<Arc<dyn CredentialProvider>, CredentialError> {
    match config.app.deployment {
        DeploymentMode::Local => Ok(Arc::new(EnvCredentialProvider::from_settings(
            &config.database,
        ))),
        DeploymentMode::Gateway => {
            let secret_id = config
                .database
                .secret_arn
                .clone()
                .ok_or(CredentialError::MissingConfig("DB_SECRET_ARN"))?;
            let provider = SecretsManagerCredentialProvider::from_config(&config.aws, secret_id).await;
            Ok(Arc::new(provider))
        }
    }
}
