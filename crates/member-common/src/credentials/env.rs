use async_trait::async_trait;

use super::{CredentialError, CredentialProvider, DbCredentials};
use crate::config::DatabaseSettings;

/// Credentials taken from `DB_USER` / `DB_PASSWORD`
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    credentials: DbCredentials,
}

impl EnvCredentialProvider {
    pub fn new(credentials: DbCredentials) -> Self {
        Self { credentials }
    }

    pub fn from_settings(settings: &DatabaseSettings) -> Self {
        Self::new(DbCredentials {
            username: settings.user.clone(),
            password: settings.password.clone(),
        })
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn database_credentials(&self) -> Result<DbCredentials, CredentialError> {
        Ok(self.credentials.clone())
    }

    fn source(&self) -> &'static str {
        "environment"
    }
}
