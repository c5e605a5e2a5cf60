//! Caller authentication
//!
//! Local deployments check a shared secret; gateway deployments trust the
//! identity an upstream gateway forwards in a bearer token.

mod api_key;
mod gateway;

pub use api_key::{verify_api_key, API_KEY_HEADER};
pub use gateway::{GatewayClaims, GatewayIdentity};
