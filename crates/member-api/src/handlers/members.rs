//! Member handlers
//!
//! Registration, listing and lookup of members.

use axum::{extract::State, Json};
use member_service::dto::{CreateMemberRequest, MemberResponse, MembersResponse};
use member_service::MemberService;

use crate::extractors::{ApiKeyAuth, MemberQuery, Submitter, UuidPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a member
///
/// POST /members
pub async fn create_member(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    Submitter(submitter): Submitter,
    ValidatedJson(request): ValidatedJson<CreateMemberRequest>,
) -> ApiResult<Created<Json<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    let member = service.create(request, submitter).await?;
    Ok(Created(Json(member)))
}

/// List members, optionally filtered by exact first/last name
///
/// GET /members
pub async fn list_members(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    MemberQuery(filter): MemberQuery,
) -> ApiResult<Json<MembersResponse>> {
    let service = MemberService::new(state.service_context());
    let members = service.list(filter).await?;
    Ok(Json(members))
}

/// Get member by ID
///
/// GET /members/{id}
pub async fn get_member(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    UuidPath(id): UuidPath,
) -> ApiResult<Json<MemberResponse>> {
    let service = MemberService::new(state.service_context());
    let member = service.get(id).await?;
    Ok(Json(member))
}
