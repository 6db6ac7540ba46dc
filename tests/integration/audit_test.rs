//! Integration tests for the team audit log.

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::TestApp;

fn actions(entries: &Value) -> Vec<&str> {
    entries
        .as_array()
        .map(|list| list.iter().filter_map(|e| e["action"].as_str()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_team_activity_is_logged_newest_first() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "Olivia").await;
    let bob = app.register("bob@example.com", "Bob").await;
    let team_id = app.create_team(&owner, "Core").await;
    app.join(&owner, team_id, "bob@example.com", &bob).await;

    let renamed = app
        .request(
            "PUT",
            &format!("/api/teams/{team_id}"),
            Some(json!({ "name": "Core Platform" })),
            Some(&owner),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);

    // Any member may read the log.
    let log = app
        .request("GET", &format!("/api/teams/{team_id}/audit"), None, Some(&bob))
        .await;
    assert_eq!(log.status, StatusCode::OK);
    assert_eq!(
        actions(log.data()),
        ["TeamUpdated", "MemberAdded", "InviteAccepted", "InviteSent", "TeamCreated"]
    );

    let newest = &log.data()[0];
    assert_eq!(newest["userEmail"], "owner@example.com");
    assert_eq!(newest["entityId"], team_id.to_string());

    let added = &log.data()[1];
    assert_eq!(added["userEmail"], "bob@example.com");
    assert_eq!(added["details"], "bob@example.com");
}

#[tokio::test]
async fn test_limit_is_honored() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "Olivia").await;
    let team_id = app.create_team(&owner, "Core").await;
    for name in ["One", "Two", "Three"] {
        app.request(
            "PUT",
            &format!("/api/teams/{team_id}"),
            Some(json!({ "name": name })),
            Some(&owner),
        )
        .await;
    }

    let log = app
        .request(
            "GET",
            &format!("/api/teams/{team_id}/audit?limit=2"),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(log.status, StatusCode::OK);
    assert_eq!(actions(log.data()), ["TeamUpdated", "TeamUpdated"]);
    assert_eq!(log.data()[0]["details"], "Renamed to 'Three'");

    let all = app
        .request("GET", &format!("/api/teams/{team_id}/audit"), None, Some(&owner))
        .await;
    assert_eq!(all.data().as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_board_writes_are_logged() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "Olivia").await;
    let team_id = app.create_team(&owner, "Core").await;

    let task = app
        .request_in(
            "POST",
            "/api/tasks",
            Some(json!({ "title": "Ship it" })),
            Some(&owner),
            Some(team_id),
        )
        .await;
    app.request_in(
        "DELETE",
        &format!("/api/tasks/{}", task.id()),
        None,
        Some(&owner),
        Some(team_id),
    )
    .await;
    app.upload(&owner, Some(team_id), "plan.txt", "text/plain", b"plan", None)
        .await;

    // Personal board activity stays out of the team log.
    app.request("POST", "/api/tasks", Some(json!({ "title": "Mine" })), Some(&owner))
        .await;

    let log = app
        .request("GET", &format!("/api/teams/{team_id}/audit"), None, Some(&owner))
        .await;
    assert_eq!(
        actions(log.data()),
        ["DocumentUploaded", "TaskDeleted", "TaskCreated", "TeamCreated"]
    );
}

#[tokio::test]
async fn test_non_members_cannot_read_the_log() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "Olivia").await;
    let stranger = app.register("stranger@example.com", "Sam").await;
    let team_id = app.create_team(&owner, "Core").await;

    let log = app
        .request(
            "GET",
            &format!("/api/teams/{team_id}/audit"),
            None,
            Some(&stranger),
        )
        .await;
    assert_eq!(log.status, StatusCode::NOT_FOUND);
}
