//! Integration tests for team document upload, download, and deletion.

use axum::http::{StatusCode, header};
use uuid::Uuid;

use teamboard_core::config::AppConfig;

use crate::helpers::TestApp;

const REPORT: &[u8] = b"%PDF-1.4 quarterly numbers";

struct Team {
    app: TestApp,
    owner: String,
    bob: String,
    team_id: Uuid,
    bob_member: Uuid,
}

async fn team_with(app: TestApp) -> Team {
    let owner = app.register("owner@example.com", "Olivia").await;
    let bob = app.register("bob@example.com", "Bob").await;
    let team_id = app.create_team(&owner, "Core").await;
    let bob_member = app.join(&owner, team_id, "bob@example.com", &bob).await;
    Team {
        app,
        owner,
        bob,
        team_id,
        bob_member,
    }
}

#[tokio::test]
async fn test_upload_and_download() {
    let t = team_with(TestApp::new()).await;

    let uploaded = t
        .app
        .upload(
            &t.owner,
            Some(t.team_id),
            "quarterly-report.pdf",
            "application/pdf",
            REPORT,
            None,
        )
        .await;
    assert_eq!(uploaded.status, StatusCode::CREATED, "{:?}", uploaded.body);
    let doc = uploaded.data();
    assert_eq!(doc["title"], "quarterly-report");
    assert_eq!(doc["fileName"], "quarterly-report.pdf");
    assert_eq!(doc["contentType"], "application/pdf");
    assert_eq!(doc["size"], REPORT.len());
    assert_eq!(doc["teamId"], t.team_id.to_string());

    let listed = t
        .app
        .request_in("GET", "/api/documents", None, Some(&t.bob), Some(t.team_id))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.data().as_array().unwrap().len(), 1);

    let downloaded = t
        .app
        .request_in(
            "GET",
            &format!("/api/documents/{}/download", uploaded.id()),
            None,
            Some(&t.bob),
            Some(t.team_id),
        )
        .await;
    assert_eq!(downloaded.status, StatusCode::OK);
    assert_eq!(downloaded.bytes.as_ref(), REPORT);
    assert_eq!(
        downloaded.headers[header::CONTENT_TYPE],
        "application/pdf"
    );
    assert_eq!(
        downloaded.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"quarterly-report.pdf\""
    );
}

#[tokio::test]
async fn test_explicit_title_wins() {
    let t = team_with(TestApp::new()).await;

    let uploaded = t
        .app
        .upload(
            &t.owner,
            Some(t.team_id),
            "notes.txt",
            "text/plain",
            b"hello",
            Some("Meeting notes"),
        )
        .await;
    assert_eq!(uploaded.status, StatusCode::CREATED);
    assert_eq!(uploaded.data()["title"], "Meeting notes");
}

#[tokio::test]
async fn test_team_header_is_required() {
    let t = team_with(TestApp::new()).await;

    let listed = t
        .app
        .request("GET", "/api/documents", None, Some(&t.owner))
        .await;
    assert_eq!(listed.status, StatusCode::BAD_REQUEST);
    assert_eq!(listed.body["message"], "X-Team-Id header is required");

    let uploaded = t
        .app
        .upload(&t.owner, None, "a.txt", "text/plain", b"a", None)
        .await;
    assert_eq!(uploaded.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_members_only() {
    let t = team_with(TestApp::new()).await;
    let stranger = t.app.register("stranger@example.com", "Sam").await;

    let listed = t
        .app
        .request_in("GET", "/api/documents", None, Some(&stranger), Some(t.team_id))
        .await;
    assert_eq!(listed.status, StatusCode::NOT_FOUND);

    let uploaded = t
        .app
        .upload(&stranger, Some(t.team_id), "a.txt", "text/plain", b"a", None)
        .await;
    assert_eq!(uploaded.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_contributor_upload_needs_a_grant() {
    let t = team_with(TestApp::new()).await;

    let denied = t
        .app
        .upload(&t.bob, Some(t.team_id), "a.txt", "text/plain", b"a", None)
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    t.app
        .allow(&t.owner, t.team_id, t.bob_member, "documents:write")
        .await;
    let allowed = t
        .app
        .upload(&t.bob, Some(t.team_id), "a.txt", "text/plain", b"a", None)
        .await;
    assert_eq!(allowed.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_empty_and_oversize_files_rejected() {
    let mut config = AppConfig::for_tests();
    config.documents.max_upload_bytes = 16;
    let t = team_with(TestApp::with_config(config)).await;

    let empty = t
        .app
        .upload(&t.owner, Some(t.team_id), "empty.txt", "text/plain", b"", None)
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let oversize = t
        .app
        .upload(&t.owner, Some(t.team_id), "big.bin", "application/octet-stream", &[7u8; 64], None)
        .await;
    assert_eq!(oversize.status, StatusCode::BAD_REQUEST);

    let fits = t
        .app
        .upload(&t.owner, Some(t.team_id), "small.bin", "application/octet-stream", &[7u8; 16], None)
        .await;
    assert_eq!(fits.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_body_over_transport_limit_is_payload_too_large() {
    let mut config = AppConfig::for_tests();
    config.documents.max_upload_bytes = 16;
    let t = team_with(TestApp::with_config(config)).await;

    // No Content-Length, so the limit trips while the multipart body streams.
    let huge = vec![7u8; 70 * 1024];
    let response = t
        .app
        .upload(&t.owner, Some(t.team_id), "huge.bin", "application/octet-stream", &huge, None)
        .await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.body["error"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_delete_rules() {
    let t = team_with(TestApp::new()).await;
    t.app
        .allow(&t.owner, t.team_id, t.bob_member, "documents:write")
        .await;

    let owners = t
        .app
        .upload(&t.owner, Some(t.team_id), "plan.txt", "text/plain", b"plan", None)
        .await;
    let bobs = t
        .app
        .upload(&t.bob, Some(t.team_id), "draft.txt", "text/plain", b"draft", None)
        .await;

    let denied = t
        .app
        .request_in(
            "DELETE",
            &format!("/api/documents/{}", owners.id()),
            None,
            Some(&t.bob),
            Some(t.team_id),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    // Uploaders may remove their own documents.
    let own = t
        .app
        .request_in(
            "DELETE",
            &format!("/api/documents/{}", bobs.id()),
            None,
            Some(&t.bob),
            Some(t.team_id),
        )
        .await;
    assert_eq!(own.status, StatusCode::NO_CONTENT);

    let by_owner = t
        .app
        .request_in(
            "DELETE",
            &format!("/api/documents/{}", owners.id()),
            None,
            Some(&t.owner),
            Some(t.team_id),
        )
        .await;
    assert_eq!(by_owner.status, StatusCode::NO_CONTENT);

    let gone = t
        .app
        .request_in(
            "GET",
            &format!("/api/documents/{}/download", owners.id()),
            None,
            Some(&t.owner),
            Some(t.team_id),
        )
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}
