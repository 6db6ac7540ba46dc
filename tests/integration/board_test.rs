//! Integration tests for board columns.

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::TestApp;

fn column_ids(columns: &Value) -> Vec<String> {
    columns
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|c| c["id"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_new_board_is_seeded() {
    let app = TestApp::new();
    let token = app.register("user@example.com", "Uma").await;

    let listed = app.request("GET", "/api/columns", None, Some(&token)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(column_ids(listed.data()), ["todo", "in-progress", "done"]);
    assert_eq!(listed.data()[0]["title"], "To Do");
    assert_eq!(listed.data()[0]["order"], 1);
    assert_eq!(listed.data()[2]["order"], 3);

    // Reading again does not seed a second set.
    let again = app.request("GET", "/api/columns", None, Some(&token)).await;
    assert_eq!(again.data().as_array().unwrap().len(), 3);

    let single = app
        .request("GET", "/api/columns/in-progress", None, Some(&token))
        .await;
    assert_eq!(single.status, StatusCode::OK);
    assert_eq!(single.data()["title"], "In Progress");

    let missing = app
        .request("GET", "/api/columns/backlog", None, Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_appends_a_column() {
    let app = TestApp::new();
    let token = app.register("user@example.com", "Uma").await;

    let created = app
        .request(
            "POST",
            "/api/columns",
            Some(json!({ "title": "Review" })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let column = created.data();
    assert!(column["id"].as_str().unwrap().starts_with("col-"));
    assert_eq!(column["title"], "Review");
    assert_eq!(column["order"], 4);
    assert!(column["color"].as_str().unwrap().starts_with('#'));

    let colored = app
        .request(
            "POST",
            "/api/columns",
            Some(json!({ "title": "Blocked", "color": "#000000" })),
            Some(&token),
        )
        .await;
    assert_eq!(colored.data()["color"], "#000000");
    assert_eq!(colored.data()["order"], 5);

    let blank = app
        .request("POST", "/api/columns", Some(json!({ "title": "" })), Some(&token))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_reorder() {
    let app = TestApp::new();
    let token = app.register("user@example.com", "Uma").await;

    let renamed = app
        .request(
            "PUT",
            "/api/columns/todo",
            Some(json!({ "title": "Backlog", "color": "" })),
            Some(&token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.data()["title"], "Backlog");
    assert_eq!(renamed.data()["color"], "#3b82f6");

    let bad_order = app
        .request(
            "PUT",
            "/api/columns/todo",
            Some(json!({ "order": 0 })),
            Some(&token),
        )
        .await;
    assert_eq!(bad_order.status, StatusCode::BAD_REQUEST);

    let reordered = app
        .request(
            "PUT",
            "/api/columns/reorder",
            Some(json!({ "columnIds": ["done", "todo", "in-progress", "ghost"] })),
            Some(&token),
        )
        .await;
    assert_eq!(reordered.status, StatusCode::OK);
    assert_eq!(column_ids(reordered.data()), ["done", "todo", "in-progress"]);

    let listed = app.request("GET", "/api/columns", None, Some(&token)).await;
    assert_eq!(column_ids(listed.data()), ["done", "todo", "in-progress"]);
}

#[tokio::test]
async fn test_last_column_cannot_be_deleted() {
    let app = TestApp::new();
    let token = app.register("user@example.com", "Uma").await;

    for id in ["done", "in-progress"] {
        let deleted = app
            .request("DELETE", &format!("/api/columns/{id}"), None, Some(&token))
            .await;
        assert_eq!(deleted.status, StatusCode::NO_CONTENT, "{id}");
    }

    let last = app
        .request("DELETE", "/api/columns/todo", None, Some(&token))
        .await;
    assert_eq!(last.status, StatusCode::BAD_REQUEST);

    let missing = app
        .request("DELETE", "/api/columns/done", None, Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_boards_have_their_own_columns() {
    let app = TestApp::new();
    let alice = app.register("alice@example.com", "Alice").await;
    let bob = app.register("bob@example.com", "Bob").await;

    app.request(
        "POST",
        "/api/columns",
        Some(json!({ "title": "Alice only" })),
        Some(&alice),
    )
    .await;

    let bobs = app.request("GET", "/api/columns", None, Some(&bob)).await;
    assert_eq!(column_ids(bobs.data()), ["todo", "in-progress", "done"]);
}

#[tokio::test]
async fn test_team_columns_need_a_grant() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "Olivia").await;
    let bob = app.register("bob@example.com", "Bob").await;
    let team_id = app.create_team(&owner, "Core").await;
    let bob_member = app.join(&owner, team_id, "bob@example.com", &bob).await;
    let board = Some(team_id);

    let listed = app
        .request_in("GET", "/api/columns", None, Some(&bob), board)
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.data().as_array().unwrap().len(), 3);

    let denied = app
        .request_in(
            "POST",
            "/api/columns",
            Some(json!({ "title": "QA" })),
            Some(&bob),
            board,
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let by_owner = app
        .request_in(
            "POST",
            "/api/columns",
            Some(json!({ "title": "QA" })),
            Some(&owner),
            board,
        )
        .await;
    assert_eq!(by_owner.status, StatusCode::CREATED);

    app.allow(&owner, team_id, bob_member, "columns:write").await;
    let granted = app
        .request_in(
            "DELETE",
            &format!("/api/columns/{}", by_owner.data()["id"].as_str().unwrap()),
            None,
            Some(&bob),
            board,
        )
        .await;
    assert_eq!(granted.status, StatusCode::NO_CONTENT);

    // The owner's personal board is untouched.
    let personal = app.request("GET", "/api/columns", None, Some(&owner)).await;
    assert_eq!(personal.data().as_array().unwrap().len(), 3);
}
