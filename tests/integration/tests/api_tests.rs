//! API Integration Tests
//!
//! Each test runs the full router on a local port against in-memory storage
//! seeded with the sample member (John Tan).
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, fixtures::*, TestServer, TEST_ADMIN_EMAIL,
};
use reqwest::{header, StatusCode};
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health").await.unwrap();
    let health: HealthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(health.status, "healthy");
    assert_eq!(health.service, "membership-api");
    assert_eq!(health.environment, "local");
}

#[tokio::test]
async fn test_health_reports_gateway_mode() {
    let server = TestServer::start_gateway().await.unwrap();

    let response = server.get("/health").await.unwrap();
    let health: HealthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(health.environment, "gateway");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/health").await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_create_without_key_is_unauthorized() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/members", &CreateMemberRequest::unique())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "ApiKey"
    );
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error.code, "INVALID_API_KEY");
    assert_eq!(server.repo.snapshot().len(), 1);
}

#[tokio::test]
async fn test_wrong_key_is_unauthorized() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .client
        .get(format!("{}/members", server.base_url()))
        .header("x-api-key", "not-the-key")
        .send()
        .await
        .unwrap();

    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_reads_require_key() {
    let server = TestServer::start().await.unwrap();

    let list = server.get("/members").await.unwrap();
    assert_status(list, StatusCode::UNAUTHORIZED).await.unwrap();

    let get = server
        .get("/members/d2e2c905-0e57-410d-bd31-a99deed4d39e")
        .await
        .unwrap();
    assert_status(get, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Create Tests
// ============================================================================

#[tokio::test]
async fn test_create_member() {
    let server = TestServer::start().await.unwrap();
    let request = CreateMemberRequest::unique();

    let response = server.post_auth("/members", &request).await.unwrap();
    let member: MemberResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(uuid::Uuid::parse_str(&member.id).is_ok());
    assert_eq!(member.first_name, "Alice");
    assert_eq!(member.email, request.email);
    assert_eq!(member.phone.as_deref(), Some("+6591234567"));
    assert_eq!(member.age, Some(28));
    assert!(!member.is_employee);
    assert!(!member.created_at.is_empty());
}

#[tokio::test]
async fn test_create_strips_markup_from_names() {
    let server = TestServer::start().await.unwrap();
    let mut request = CreateMemberRequest::unique();
    request.first_name = "<script>alert(1)</script>".to_string();

    let response = server.post_auth("/members", &request).await.unwrap();
    let member: MemberResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(member.first_name, "alert1");
}

#[tokio::test]
async fn test_create_defaults_is_employee() {
    let server = TestServer::start().await.unwrap();
    let body = json!({
        "firstName": "Bob",
        "lastName": "Lee",
        "email": format!("bob{}@example.com", unique_suffix()),
    });

    let response = server.post_auth("/members", &body).await.unwrap();
    let member: MemberResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(!member.is_employee);
    assert_eq!(member.phone, None);
    assert_eq!(member.age, None);
}

#[tokio::test]
async fn test_create_with_missing_field_is_unprocessable() {
    let server = TestServer::start().await.unwrap();
    let body = json!({ "firstName": "Bob", "email": "bob@example.com" });

    let response = server.post_auth("/members", &body).await.unwrap();

    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();
}

#[tokio::test]
async fn test_create_with_invalid_email_reports_field() {
    let server = TestServer::start().await.unwrap();
    let mut request = CreateMemberRequest::unique();
    request.email = "not-an-email".to_string();

    let response = server.post_auth("/members", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();

    assert_eq!(body.error.code, "VALIDATION_ERROR");
    assert!(body.error.details.unwrap().get("email").is_some());
}

#[tokio::test]
async fn test_create_with_invalid_phone_is_unprocessable() {
    let server = TestServer::start().await.unwrap();
    let mut request = CreateMemberRequest::unique();
    request.phone = Some("not-a-phone".to_string());

    let response = server.post_auth("/members", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();

    assert!(body.error.details.unwrap().get("phone").is_some());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let server = TestServer::start().await.unwrap();
    let mut request = CreateMemberRequest::unique();
    request.email = "johntan@gmail.com".to_string();

    let response = server.post_auth("/members", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();

    assert_eq!(body.error.code, "EMAIL_ALREADY_EXISTS");
    let stored = server.repo.snapshot();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].first_name, "John");
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let server = TestServer::start().await.unwrap();
    server.repo.set_unavailable(true);

    let response = server
        .post_auth("/members", &CreateMemberRequest::unique())
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();

    assert_eq!(body.error.message, "Internal server error");
}

#[tokio::test]
async fn test_concurrent_creates_are_all_retrievable() {
    let server = TestServer::start().await.unwrap();
    let first = CreateMemberRequest::unique();
    let second = CreateMemberRequest::unique();

    let (a, b) = tokio::join!(
        server.post_auth("/members", &first),
        server.post_auth("/members", &second)
    );
    let a: MemberResponse = assert_json(a.unwrap(), StatusCode::CREATED).await.unwrap();
    let b: MemberResponse = assert_json(b.unwrap(), StatusCode::CREATED).await.unwrap();
    assert_ne!(a.id, b.id);

    for created in [a, b] {
        let response = server
            .get_auth(&format!("/members/{}", created.id))
            .await
            .unwrap();
        let fetched: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(fetched, created);
    }
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_local_create_alerts_admin() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post_auth("/members", &CreateMemberRequest::unique())
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let sent = server.wait_for_mail(1).await.unwrap();
    assert_eq!(sent[0].to, TEST_ADMIN_EMAIL);
    assert!(sent[0].subject.starts_with("New Member Registration"));
}

#[tokio::test]
async fn test_gateway_create_confirms_to_submitter() {
    let server = TestServer::start_gateway().await.unwrap();
    let token = gateway_token("jane@example.com");

    let response = server
        .post_bearer("/members", &token, &CreateMemberRequest::unique())
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let sent = server.wait_for_mail(1).await.unwrap();
    assert_eq!(sent[0].to, "jane@example.com");
    assert!(sent[0].subject.starts_with("Member Registration Successful"));
}

#[tokio::test]
async fn test_gateway_ignores_malformed_token() {
    let server = TestServer::start_gateway().await.unwrap();

    let response = server
        .post_bearer("/members", "not.a.jwt", &CreateMemberRequest::unique())
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let sent = server.wait_for_mail(1).await.unwrap();
    assert_eq!(sent[0].to, TEST_ADMIN_EMAIL);
}

#[tokio::test]
async fn test_disabled_notifications_send_nothing() {
    let server = TestServer::start_with(&[("ENABLE_NOTIFICATIONS", "false")])
        .await
        .unwrap();

    let response = server
        .post_auth("/members", &CreateMemberRequest::unique())
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert!(server.mailer.sent().is_empty());
}

// ============================================================================
// Read Tests
// ============================================================================

#[tokio::test]
async fn test_list_seeded_member_by_name() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .get_auth("/members?firstName=John&lastName=Tan")
        .await
        .unwrap();
    let list: MembersResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(list.message, "Members retrieved successfully");
    assert_eq!(list.members.len(), 1);
    assert_eq!(list.members[0].email, "johntan@gmail.com");
    assert_eq!(list.members[0].phone.as_deref(), Some("+6591234567"));
}

#[tokio::test]
async fn test_list_without_match_is_not_found() {
    let server = TestServer::start().await.unwrap();

    let response = server.get_auth("/members?firstName=Nobody").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();

    assert_eq!(body.error.message, "No members found for the given query.");
}

#[tokio::test]
async fn test_list_is_case_sensitive() {
    let server = TestServer::start().await.unwrap();

    let response = server.get_auth("/members?firstName=john").await.unwrap();

    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_list_repeated_parameter_uses_last_value() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .get_auth("/members?firstName=Nobody&firstName=John")
        .await
        .unwrap();
    let list: MembersResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(list.members.len(), 1);
    assert_eq!(list.members[0].first_name, "John");
}

#[tokio::test]
async fn test_list_rejects_unknown_parameter() {
    let server = TestServer::start().await.unwrap();

    let response = server.get_auth("/members?email=johntan@gmail.com").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(body.error.code, "INVALID_QUERY_PARAMETER");
}

#[tokio::test]
async fn test_get_seeded_member() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .get_auth("/members/d2e2c905-0e57-410d-bd31-a99deed4d39e")
        .await
        .unwrap();
    let member: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(member.first_name, "John");
    assert_eq!(member.last_name, "Tan");
    assert!(member.is_employee);
}

#[tokio::test]
async fn test_get_unknown_member_is_not_found() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .get_auth(&format!("/members/{}", uuid::Uuid::new_v4()))
        .await
        .unwrap();

    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_get_malformed_id_is_bad_request() {
    let server = TestServer::start().await.unwrap();

    let response = server.get_auth("/members/not-a-uuid").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(body.error.code, "INVALID_PATH_PARAMETER");
}
