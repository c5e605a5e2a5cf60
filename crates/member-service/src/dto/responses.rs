//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output, with camelCase
//! field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Member Responses
// ============================================================================

/// A stored member record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub is_employee: bool,
    pub created_at: DateTime<Utc>,
}

/// Result of a member search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembersResponse {
    pub message: String,
    pub members: Vec<MemberResponse>,
}

impl MembersResponse {
    pub fn retrieved(members: Vec<MemberResponse>) -> Self {
        Self {
            message: "Members retrieved successfully".to_string(),
            members,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub environment: String,
}

impl HealthResponse {
    pub fn healthy(service: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.into(),
            environment: environment.into(),
        }
    }
}
