//! Shared-secret API key check

use crate::error::{AppError, AppResult};

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// Compare a presented key against the configured one
///
/// A missing key is rejected the same way as a wrong one. The comparison
/// time does not depend on where the first differing byte is.
pub fn verify_api_key(presented: Option<&str>, expected: &str) -> AppResult<()> {
    match presented {
        Some(key) if constant_time_eq(key.as_bytes(), expected.as_bytes()) => Ok(()),
        _ => Err(AppError::InvalidApiKey),
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
