//! Integration tests for sending, accepting, rejecting, and revoking invites.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use teamboard_core::config::AppConfig;

use crate::helpers::{TestApp, TestResponse};

async fn invite(app: &TestApp, token: &str, team_id: Uuid, email: &str) -> TestResponse {
    app.request(
        "POST",
        &format!("/api/invites/teams/{team_id}"),
        Some(json!({ "email": email })),
        Some(token),
    )
    .await
}

#[tokio::test]
async fn test_invite_shows_up_as_pending_for_the_addressee() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "Olivia").await;
    let guest = app.register("guest@example.com", "Gus").await;
    let team_id = app.create_team(&owner, "Core").await;

    let sent = invite(&app, &owner, team_id, " Guest@Example.com ").await;
    assert_eq!(sent.status, StatusCode::CREATED);
    assert_eq!(sent.data()["email"], "guest@example.com");
    assert_eq!(sent.data()["status"], "Pending");

    let pending = app
        .request("GET", "/api/invites/pending", None, Some(&guest))
        .await;
    assert_eq!(pending.status, StatusCode::OK);
    let list = pending.data().as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["teamName"], "Core");
    assert_eq!(list[0]["id"], sent.data()["id"]);

    let owners_pending = app
        .request("GET", "/api/invites/pending", None, Some(&owner))
        .await;
    assert!(owners_pending.data().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_accept_makes_a_contributor() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "Olivia").await;
    let guest = app.register("guest@example.com", "Gus").await;
    let team_id = app.create_team(&owner, "Core").await;

    let sent = invite(&app, &owner, team_id, "guest@example.com").await;
    let accepted = app
        .request(
            "POST",
            &format!("/api/invites/{}/accept", sent.id()),
            None,
            Some(&guest),
        )
        .await;
    assert_eq!(accepted.status, StatusCode::OK);
    assert_eq!(accepted.data()["baseRole"], "Contributor");

    let teams = app.request("GET", "/api/teams", None, Some(&guest)).await;
    assert_eq!(teams.data()[0]["teamId"], team_id.to_string());
    assert_eq!(teams.data()[0]["role"], "Contributor");

    // A used invite cannot be accepted twice.
    let again = app
        .request(
            "POST",
            &format!("/api/invites/{}/accept", sent.id()),
            None,
            Some(&guest),
        )
        .await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_and_member_invites_conflict() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "Olivia").await;
    let team_id = app.create_team(&owner, "Core").await;

    let first = invite(&app, &owner, team_id, "new@example.com").await;
    assert_eq!(first.status, StatusCode::CREATED);

    let duplicate = invite(&app, &owner, team_id, "NEW@example.com").await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["error"], "CONFLICT");

    let member = invite(&app, &owner, team_id, "owner@example.com").await;
    assert_eq!(member.status, StatusCode::CONFLICT);

    for email in ["not-an-email", "a@@b.c", "a b@c.d", "a@b..c"] {
        let malformed = invite(&app, &owner, team_id, email).await;
        assert_eq!(malformed.status, StatusCode::BAD_REQUEST, "{email} accepted");
    }
}

#[tokio::test]
async fn test_only_admins_invite_and_list() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "Olivia").await;
    let bob = app.register("bob@example.com", "Bob").await;
    let stranger = app.register("stranger@example.com", "Sam").await;
    let team_id = app.create_team(&owner, "Core").await;
    app.join(&owner, team_id, "bob@example.com", &bob).await;

    let by_contributor = invite(&app, &bob, team_id, "a@example.com").await;
    assert_eq!(by_contributor.status, StatusCode::FORBIDDEN);

    let by_stranger = invite(&app, &stranger, team_id, "a@example.com").await;
    assert_eq!(by_stranger.status, StatusCode::NOT_FOUND);

    let listed_by_bob = app
        .request("GET", &format!("/api/invites/teams/{team_id}"), None, Some(&bob))
        .await;
    assert_eq!(listed_by_bob.status, StatusCode::FORBIDDEN);

    let listed = app
        .request("GET", &format!("/api/invites/teams/{team_id}"), None, Some(&owner))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    // Bob's accepted invite is still on record.
    assert_eq!(listed.data().as_array().unwrap().len(), 1);
    assert_eq!(listed.data()[0]["status"], "Accepted");
}

#[tokio::test]
async fn test_wrong_addressee_is_forbidden() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "Olivia").await;
    let other = app.register("other@example.com", "Otto").await;
    let team_id = app.create_team(&owner, "Core").await;

    let sent = invite(&app, &owner, team_id, "guest@example.com").await;

    for action in ["accept", "reject"] {
        let response = app
            .request(
                "POST",
                &format!("/api/invites/{}/{action}", sent.id()),
                None,
                Some(&other),
            )
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{action}");
    }

    let missing = app
        .request(
            "POST",
            &format!("/api/invites/{}/accept", Uuid::new_v4()),
            None,
            Some(&other),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reject_and_revoke_close_the_invite() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "Olivia").await;
    let guest = app.register("guest@example.com", "Gus").await;
    let team_id = app.create_team(&owner, "Core").await;

    let first = invite(&app, &owner, team_id, "guest@example.com").await;
    let rejected = app
        .request(
            "POST",
            &format!("/api/invites/{}/reject", first.id()),
            None,
            Some(&guest),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::OK);
    assert_eq!(rejected.data()["status"], "Revoked");

    // Once closed, the address can be invited again.
    let second = invite(&app, &owner, team_id, "guest@example.com").await;
    assert_eq!(second.status, StatusCode::CREATED);

    let revoked = app
        .request(
            "DELETE",
            &format!("/api/invites/{}", second.id()),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(revoked.status, StatusCode::OK);
    assert_eq!(revoked.data()["status"], "Revoked");

    let twice = app
        .request(
            "DELETE",
            &format!("/api/invites/{}", second.id()),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(twice.status, StatusCode::BAD_REQUEST);

    let pending = app
        .request("GET", "/api/invites/pending", None, Some(&guest))
        .await;
    assert!(pending.data().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_expired_invite_cannot_be_accepted() {
    let mut config = AppConfig::for_tests();
    config.invites.ttl_days = 0;
    let app = TestApp::with_config(config);

    let owner = app.register("owner@example.com", "Olivia").await;
    let guest = app.register("guest@example.com", "Gus").await;
    let team_id = app.create_team(&owner, "Core").await;

    let sent = invite(&app, &owner, team_id, "guest@example.com").await;
    assert_eq!(sent.status, StatusCode::CREATED);

    let pending = app
        .request("GET", "/api/invites/pending", None, Some(&guest))
        .await;
    assert!(pending.data().as_array().unwrap().is_empty());

    let accepted = app
        .request(
            "POST",
            &format!("/api/invites/{}/accept", sent.id()),
            None,
            Some(&guest),
        )
        .await;
    assert_eq!(accepted.status, StatusCode::BAD_REQUEST);
    assert_eq!(accepted.body["message"], "Invite has expired");

    // The stale invite no longer blocks a new one.
    let again = invite(&app, &owner, team_id, "guest@example.com").await;
    assert_eq!(again.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_expired_invite_cannot_be_rejected() {
    let mut config = AppConfig::for_tests();
    config.invites.ttl_days = 0;
    let app = TestApp::with_config(config);

    let owner = app.register("owner@example.com", "Olivia").await;
    let guest = app.register("guest@example.com", "Gus").await;
    let team_id = app.create_team(&owner, "Core").await;

    let sent = invite(&app, &owner, team_id, "guest@example.com").await;
    assert_eq!(sent.status, StatusCode::CREATED);

    let rejected = app
        .request(
            "POST",
            &format!("/api/invites/{}/reject", sent.id()),
            None,
            Some(&guest),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);
    assert_eq!(rejected.body["message"], "Invite has expired");

    let listed = app
        .request("GET", &format!("/api/invites/teams/{team_id}"), None, Some(&owner))
        .await;
    assert_eq!(listed.data()[0]["status"], "Expired");
}

#[tokio::test]
async fn test_nested_create_path_sends_invite() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "Olivia").await;
    let team_id = app.create_team(&owner, "Core").await;

    let sent = app
        .request(
            "POST",
            &format!("/api/invites/teams/{team_id}/invites"),
            Some(json!({ "email": "guest@example.com" })),
            Some(&owner),
        )
        .await;
    assert_eq!(sent.status, StatusCode::CREATED);
    assert_eq!(sent.data()["email"], "guest@example.com");
    assert_eq!(sent.data()["status"], "Pending");
}
