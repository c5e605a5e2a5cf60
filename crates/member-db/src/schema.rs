//! Table bootstrap
//!
//! Applied at startup in every deployment mode. Each statement is
//! idempotent.

use member_core::traits::RepoResult;
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::repositories::map_db_error;

pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS members (
        id           UUID PRIMARY KEY,
        first_name   TEXT NOT NULL,
        last_name    TEXT NOT NULL,
        email        TEXT NOT NULL UNIQUE,
        phone        TEXT,
        age          INTEGER,
        is_employee  BOOLEAN NOT NULL DEFAULT FALSE,
        created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_members_name ON members (first_name, last_name)",
];

/// Create the members table and its indexes if they do not exist
#[instrument(skip(pool))]
pub async fn ensure_schema(pool: &PgPool) -> RepoResult<()> {
    for statement in SCHEMA {
        sqlx::query(*statement)
            .execute(pool)
            .await
            .map_err(map_db_error)?;
    }

    info!("Database schema ready");
    Ok(())
}
