use async_trait::async_trait;
use aws_sdk_secretsmanager::config::Region;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::Client;
use tracing::instrument;

use super::{CredentialError, CredentialProvider, DbCredentials};
use crate::config::AwsConfig;

/// Credentials stored as a JSON secret with `username` and `password` keys
/// (the layout RDS-managed secrets use)
#[derive(Debug, Clone)]
pub struct SecretsManagerCredentialProvider {
    client: Client,
    secret_id: String,
}

impl SecretsManagerCredentialProvider {
    pub fn new(client: Client, secret_id: impl Into<String>) -> Self {
        Self {
            client,
            secret_id: secret_id.into(),
        }
    }

    /// Build a client from the default AWS credential chain
    pub async fn from_config(aws: &AwsConfig, secret_id: impl Into<String>) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(aws.region.clone()))
            .load()
            .await;

        Self::new(Client::new(&sdk_config), secret_id)
    }
}

#[async_trait]
impl CredentialProvider for SecretsManagerCredentialProvider {
    #[instrument(skip(self), fields(secret_id = %self.secret_id))]
    async fn database_credentials(&self) -> Result<DbCredentials, CredentialError> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(&self.secret_id)
            .send()
            .await
            .map_err(|e| CredentialError::Fetch(DisplayErrorContext(&e).to_string()))?;

        let secret = output.secret_string().ok_or(CredentialError::EmptySecret)?;
        parse_secret(secret)
    }

    fn source(&self) -> &'static str {
        "secrets-manager"
    }
}

fn parse_secret(secret: &str) -> Result<DbCredentials, CredentialError> {
    serde_json::from_str(secret).map_err(|e| CredentialError::Malformed(e.to_string()))
}
