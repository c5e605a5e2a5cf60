//! Test fixtures and data generators
//!
//! Provides reusable request bodies, response shapes and tokens.

use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Member registration request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    pub is_employee: bool,
}

impl CreateMemberRequest {
    /// A valid request with a never-before-used email
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            first_name: "Alice".to_string(),
            last_name: format!("Ng{suffix}"),
            email: format!("member{suffix}@example.com"),
            phone: Some("9123 4567".to_string()),
            age: Some(28),
            is_employee: false,
        }
    }
}

/// Stored member as returned by the API
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub is_employee: bool,
    pub created_at: String,
}

/// Listing response
#[derive(Debug, Deserialize)]
pub struct MembersResponse {
    pub message: String,
    pub members: Vec<MemberResponse>,
}

/// Health check response
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub environment: String,
}

/// Error response body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// A bearer token as an upstream gateway would forward it
///
/// Signed with a throwaway key; the service does not verify signatures.
pub fn gateway_token(email: &str) -> String {
    encode(
        &Header::default(),
        &json!({ "sub": "user-123", "email": email }),
        &EncodingKey::from_secret(b"gateway-signing-key"),
    )
    .expect("token encodes")
}
