//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use member_core::entities::{Member, MemberFilter, NewMember};
use member_core::error::DomainError;
use member_core::traits::{MemberRepository, RepoResult};

use crate::models::MemberModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a fully formed record (explicit id and creation time)
    #[instrument(skip(self, member), fields(member_id = %member.id))]
    pub async fn insert(&self, member: &Member) -> RepoResult<Member> {
        let model = sqlx::query_as::<_, MemberModel>(
            r#"
            INSERT INTO members (id, first_name, last_name, email, phone, age, is_employee, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, first_name, last_name, email, phone, age, is_employee, created_at
            "#,
        )
        .bind(member.id)
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.email)
        .bind(member.phone.as_deref())
        .bind(member.age)
        .bind(member.is_employee)
        .bind(member.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(model.into())
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn create(&self, member: &NewMember) -> RepoResult<Member> {
        self.insert(&member.clone().into_member()).await
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &MemberFilter) -> RepoResult<Vec<Member>> {
        let results = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, first_name, last_name, email, phone, age, is_employee, created_at
            FROM members
            WHERE ($1::text IS NULL OR first_name = $1)
              AND ($2::text IS NULL OR last_name = $2)
            ORDER BY created_at, id
            "#,
        )
        .bind(filter.first_name.as_deref())
        .bind(filter.last_name.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Member::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, first_name, last_name, email, phone, age, is_employee, created_at
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
