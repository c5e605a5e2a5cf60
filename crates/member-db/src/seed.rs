//! Sample data for local deployments

use chrono::DateTime;
use member_core::entities::Member;
use member_core::error::DomainError;
use member_core::traits::{MemberRepository, RepoResult};
use tracing::info;
use uuid::Uuid;

use crate::repositories::PgMemberRepository;

pub const SAMPLE_MEMBER_ID: Uuid = Uuid::from_u128(0xd2e2_c905_0e57_410d_bd31_a99d_eed4_d39e);

/// 2025-09-27T06:42:55.811443Z
const SAMPLE_CREATED_AT_MICROS: i64 = 1_758_955_375_811_443;

/// The record a fresh local database starts with
pub fn sample_member() -> Member {
    Member {
        id: SAMPLE_MEMBER_ID,
        first_name: "John".to_string(),
        last_name: "Tan".to_string(),
        email: "johntan@gmail.com".to_string(),
        phone: Some("+6591234567".to_string()),
        age: Some(30),
        is_employee: true,
        created_at: DateTime::from_timestamp_micros(SAMPLE_CREATED_AT_MICROS).unwrap_or_default(),
    }
}

/// Insert the sample member when the table is empty
///
/// Returns whether a row was written. Losing a race against another
/// instance seeding the same row is not an error.
pub async fn seed_sample_member(repo: &PgMemberRepository) -> RepoResult<bool> {
    if repo.count().await? > 0 {
        info!("Database already has members, skipping seed");
        return Ok(false);
    }

    match repo.insert(&sample_member()).await {
        Ok(member) => {
            info!(member_id = %member.id, "Sample member added");
            Ok(true)
        }
        Err(DomainError::EmailAlreadyExists) => Ok(false),
        Err(e) => Err(e),
    }
}
