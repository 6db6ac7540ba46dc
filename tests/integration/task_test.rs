//! Integration tests for personal and team board tasks.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_personal_task_lifecycle() {
    let app = TestApp::new();
    let token = app.register("user@example.com", "Uma").await;

    let created = app
        .request(
            "POST",
            "/api/tasks",
            Some(json!({ "title": "  Plan sprint ", "priority": "high" })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let task = created.data();
    assert_eq!(task["title"], "Plan sprint");
    assert_eq!(task["priority"], "high");
    assert_eq!(task["columnId"], "todo");
    assert_eq!(task["completed"], false);
    assert!(task["teamId"].is_null());
    assert!(task.get("userId").is_some());
    let id = created.id();

    let fetched = app
        .request("GET", &format!("/api/tasks/{id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.data()["id"], id.to_string());

    let listed = app.request("GET", "/api/tasks", None, Some(&token)).await;
    assert_eq!(listed.data().as_array().unwrap().len(), 1);

    let deleted = app
        .request("DELETE", &format!("/api/tasks/{id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app
        .request("GET", &format!("/api/tasks/{id}"), None, Some(&token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_is_partial() {
    let app = TestApp::new();
    let token = app.register("user@example.com", "Uma").await;
    let created = app
        .request(
            "POST",
            "/api/tasks",
            Some(json!({ "title": "Draft", "description": "first pass" })),
            Some(&token),
        )
        .await;
    let id = created.id();

    let updated = app
        .request(
            "PUT",
            &format!("/api/tasks/{id}"),
            Some(json!({ "title": "  ", "priority": "low" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["title"], "Draft");
    assert_eq!(updated.data()["description"], "first pass");
    assert_eq!(updated.data()["priority"], "low");

    let bad = app
        .request(
            "PUT",
            &format!("/api/tasks/{id}"),
            Some(json!({ "priority": "urgent" })),
            Some(&token),
        )
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_toggle_move_and_by_column() {
    let app = TestApp::new();
    let token = app.register("user@example.com", "Uma").await;
    let created = app
        .request("POST", "/api/tasks", Some(json!({ "title": "Ship" })), Some(&token))
        .await;
    let id = created.id();

    let toggled = app
        .request("PUT", &format!("/api/tasks/{id}/toggle"), None, Some(&token))
        .await;
    assert_eq!(toggled.status, StatusCode::OK);
    assert_eq!(toggled.data()["completed"], true);

    let moved = app
        .request(
            "PATCH",
            &format!("/api/tasks/{id}/move"),
            Some(json!({ "columnId": "done" })),
            Some(&token),
        )
        .await;
    assert_eq!(moved.status, StatusCode::OK);
    assert_eq!(moved.data()["columnId"], "done");
    assert_eq!(moved.data()["completed"], true);

    let blank_move = app
        .request(
            "PATCH",
            &format!("/api/tasks/{id}/move"),
            Some(json!({ "columnId": "" })),
            Some(&token),
        )
        .await;
    assert_eq!(blank_move.status, StatusCode::BAD_REQUEST);

    let done = app
        .request("GET", "/api/tasks/column/done", None, Some(&token))
        .await;
    assert_eq!(done.data().as_array().unwrap().len(), 1);
    let todo = app
        .request("GET", "/api/tasks/column/todo", None, Some(&token))
        .await;
    assert!(todo.data().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_stats_count_the_board() {
    let app = TestApp::new();
    let token = app.register("user@example.com", "Uma").await;

    app.request(
        "POST",
        "/api/tasks",
        Some(json!({
            "title": "Overdue",
            "priority": "high",
            "dueDate": "2020-01-01T00:00:00Z",
        })),
        Some(&token),
    )
    .await;
    let done = app
        .request("POST", "/api/tasks", Some(json!({ "title": "Done" })), Some(&token))
        .await;
    app.request(
        "PUT",
        &format!("/api/tasks/{}/toggle", done.id()),
        None,
        Some(&token),
    )
    .await;

    let stats = app.request("GET", "/api/tasks/stats", None, Some(&token)).await;
    assert_eq!(stats.status, StatusCode::OK);
    let stats = stats.data();
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["active"], 1);
    assert_eq!(stats["completed"], 1);
    assert_eq!(stats["highPriority"], 1);
    assert_eq!(stats["overdue"], 1);
}

#[tokio::test]
async fn test_personal_boards_are_private() {
    let app = TestApp::new();
    let alice = app.register("alice@example.com", "Alice").await;
    let bob = app.register("bob@example.com", "Bob").await;

    let created = app
        .request("POST", "/api/tasks", Some(json!({ "title": "Mine" })), Some(&alice))
        .await;

    let listed = app.request("GET", "/api/tasks", None, Some(&bob)).await;
    assert!(listed.data().as_array().unwrap().is_empty());

    let peek = app
        .request("GET", &format!("/api/tasks/{}", created.id()), None, Some(&bob))
        .await;
    assert_eq!(peek.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_title_is_required() {
    let app = TestApp::new();
    let token = app.register("user@example.com", "Uma").await;

    let response = app
        .request("POST", "/api/tasks", Some(json!({ "title": "" })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let blank = app
        .request("POST", "/api/tasks", Some(json!({ "title": "   " })), Some(&token))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let anonymous = app.request("GET", "/api/tasks", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_team_board_needs_write_grant() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "Olivia").await;
    let bob = app.register("bob@example.com", "Bob").await;
    let team_id = app.create_team(&owner, "Core").await;
    let bob_member = app.join(&owner, team_id, "bob@example.com", &bob).await;
    let board = Some(team_id);

    let denied = app
        .request_in("POST", "/api/tasks", Some(json!({ "title": "Nope" })), Some(&bob), board)
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    // Reading the team board needs no grant.
    let listed = app
        .request_in("GET", "/api/tasks", None, Some(&bob), board)
        .await;
    assert_eq!(listed.status, StatusCode::OK);

    app.allow(&owner, team_id, bob_member, "tasks:write").await;
    let created = app
        .request_in("POST", "/api/tasks", Some(json!({ "title": "Mine" })), Some(&bob), board)
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["teamId"], team_id.to_string());

    // Team tasks stay off the personal board.
    let personal = app.request("GET", "/api/tasks", None, Some(&owner)).await;
    assert!(personal.data().as_array().unwrap().is_empty());
    let team = app
        .request_in("GET", "/api/tasks", None, Some(&owner), board)
        .await;
    assert_eq!(team.data().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_team_delete_rules() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "Olivia").await;
    let bob = app.register("bob@example.com", "Bob").await;
    let team_id = app.create_team(&owner, "Core").await;
    let bob_member = app.join(&owner, team_id, "bob@example.com", &bob).await;
    app.allow(&owner, team_id, bob_member, "tasks:write").await;
    let board = Some(team_id);

    let owners = app
        .request_in("POST", "/api/tasks", Some(json!({ "title": "Owner's" })), Some(&owner), board)
        .await;
    let bobs = app
        .request_in("POST", "/api/tasks", Some(json!({ "title": "Bob's" })), Some(&bob), board)
        .await;

    let denied = app
        .request_in("DELETE", &format!("/api/tasks/{}", owners.id()), None, Some(&bob), board)
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let own = app
        .request_in("DELETE", &format!("/api/tasks/{}", bobs.id()), None, Some(&bob), board)
        .await;
    assert_eq!(own.status, StatusCode::NO_CONTENT);

    app.allow(&owner, team_id, bob_member, "tasks:delete").await;
    let granted = app
        .request_in("DELETE", &format!("/api/tasks/{}", owners.id()), None, Some(&bob), board)
        .await;
    assert_eq!(granted.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_team_header_is_checked() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "Olivia").await;
    let stranger = app.register("stranger@example.com", "Sam").await;
    let team_id = app.create_team(&owner, "Core").await;

    let outsider = app
        .request_in("GET", "/api/tasks", None, Some(&stranger), Some(team_id))
        .await;
    assert_eq!(outsider.status, StatusCode::NOT_FOUND);

    let unknown = app
        .request_in("GET", "/api/tasks", None, Some(&owner), Some(Uuid::new_v4()))
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let response = app
        .router
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .uri("/api/tasks")
                .header("Authorization", format!("Bearer {owner}"))
                .header("X-Team-Id", "not-a-team")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
