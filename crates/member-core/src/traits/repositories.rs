//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{Member, MemberFilter, NewMember};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Persist a new member, assigning its id and creation time
    ///
    /// Fails with `DomainError::EmailAlreadyExists` when the email is taken
    /// and `DomainError::DatabaseError` on any other storage failure.
    /// Nothing is persisted when an error is returned.
    async fn create(&self, member: &NewMember) -> RepoResult<Member>;

    /// List members matching every populated filter field
    async fn list(&self, filter: &MemberFilter) -> RepoResult<Vec<Member>>;

    /// Find member by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Member>>;

    /// Count all stored members
    async fn count(&self) -> RepoResult<i64>;
}
