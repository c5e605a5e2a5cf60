//! Member service
//!
//! Registration, lookup, and filtered listing of members.

use tracing::{info, instrument};
use uuid::Uuid;

use member_core::entities::{MemberFilter, NewMember};
use member_core::{sanitize_name, sanitize_phone_number, DomainError};

use crate::dto::{CreateMemberRequest, MemberResponse, MembersResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Returned when a listing matches nothing
pub const NO_MEMBERS_FOUND: &str = "No members found for the given query.";

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a member
    ///
    /// The request is validated, sanitized, and persisted; the notification
    /// then goes out on a background task and cannot affect the result.
    #[instrument(skip(self, request, submitter))]
    pub async fn create(
        &self,
        request: CreateMemberRequest,
        submitter: Option<String>,
    ) -> ServiceResult<MemberResponse> {
        request.validate_for_region(self.ctx.phone_region())?;

        let new_member = self.sanitize(request)?;
        let member = self.ctx.member_repo().create(&new_member).await?;

        info!(member_id = %member.id, "Member registered");

        // Runs detached once the handle is dropped
        let _notification = self.ctx.notifier().dispatch(member.clone(), submitter);

        Ok(member.into())
    }

    /// List members matching the filter
    ///
    /// An empty result is reported as not found.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: MemberFilter) -> ServiceResult<MembersResponse> {
        let members = self.ctx.member_repo().list(&filter).await?;

        if members.is_empty() {
            return Err(ServiceError::NoMatches(NO_MEMBERS_FOUND));
        }

        Ok(MembersResponse::retrieved(
            members.into_iter().map(MemberResponse::from).collect(),
        ))
    }

    /// Get a member by id
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> ServiceResult<MemberResponse> {
        self.ctx
            .member_repo()
            .find_by_id(id)
            .await?
            .map(MemberResponse::from)
            .ok_or_else(|| DomainError::MemberNotFound(id).into())
    }

    fn sanitize(&self, request: CreateMemberRequest) -> ServiceResult<NewMember> {
        let first_name = sanitize_name(&request.first_name);
        if first_name.is_empty() {
            return Err(DomainError::EmptyAfterSanitization { field: "firstName" }.into());
        }

        let last_name = sanitize_name(&request.last_name);
        if last_name.is_empty() {
            return Err(DomainError::EmptyAfterSanitization { field: "lastName" }.into());
        }

        let phone = request
            .phone
            .map(|phone| sanitize_phone_number(phone.trim(), self.ctx.phone_region()))
            .filter(|phone| !phone.is_empty());

        Ok(NewMember {
            first_name,
            last_name,
            email: request.email.trim().to_string(),
            phone,
            age: request.age,
            is_employee: request.is_employee,
        })
    }
}
