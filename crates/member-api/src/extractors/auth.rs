//! Caller authentication extractors
//!
//! Locally every `/members` request must carry the shared `X-API-Key`.
//! Behind the gateway the key check is skipped and the caller's email is
//! read from the forwarded bearer token instead.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use member_common::{verify_api_key, GatewayIdentity, API_KEY_HEADER};

use crate::response::ApiError;
use crate::state::AppState;

/// Proof that the request passed the API key check
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyAuth;

#[async_trait]
impl<S> FromRequestParts<S> for ApiKeyAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let config = app_state.config();

        if config.app.deployment.is_gateway() {
            return Ok(ApiKeyAuth);
        }

        let presented = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok());

        verify_api_key(presented, &config.auth.api_key).map_err(|e| {
            tracing::warn!(uri = %parts.uri, "Rejected request with invalid API key");
            ApiError::from(e)
        })?;

        Ok(ApiKeyAuth)
    }
}

/// Email of the caller, when the gateway forwarded one
///
/// Always `None` in local deployments. Never rejects a request.
#[derive(Debug, Clone, Default)]
pub struct Submitter(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for Submitter
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        if !app_state.config().app.deployment.is_gateway() {
            return Ok(Submitter(None));
        }

        let authorization = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        if authorization.is_none() {
            tracing::debug!("No bearer token forwarded by gateway");
        }

        Ok(Submitter(
            GatewayIdentity::from_authorization(authorization).map(|identity| identity.email),
        ))
    }
}
