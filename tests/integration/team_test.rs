//! Integration tests for teams, member management, grants, and ownership.

use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::helpers::{TestApp, uuid_at};

/// Owner and one Contributor in a fresh team.
struct Crew {
    app: TestApp,
    owner: String,
    bob: String,
    team_id: Uuid,
    owner_member: Uuid,
    bob_member: Uuid,
    bob_user: Uuid,
}

async fn crew() -> Crew {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "Olivia Owner").await;
    let bob = app.register("bob@example.com", "Bob").await;
    let team_id = app.create_team(&owner, "Core").await;
    let bob_member = app.join(&owner, team_id, "bob@example.com", &bob).await;

    let members = app
        .request("GET", &format!("/api/teams/{team_id}/members"), None, Some(&owner))
        .await;
    let owner_member = member_with_email(members.data(), "owner@example.com");
    let bob_user = user_with_email(members.data(), "bob@example.com");

    Crew {
        app,
        owner,
        bob,
        team_id,
        owner_member,
        bob_member,
        bob_user,
    }
}

fn find_email<'a>(members: &'a Value, email: &str) -> &'a Value {
    members
        .as_array()
        .and_then(|list| list.iter().find(|m| m["email"] == email))
        .unwrap_or_else(|| panic!("No member {email} in {members}"))
}

fn member_with_email(members: &Value, email: &str) -> Uuid {
    uuid_at(&find_email(members, email)["id"])
}

fn user_with_email(members: &Value, email: &str) -> Uuid {
    uuid_at(&find_email(members, email)["userId"])
}

fn role_of(members: &Value, member_id: Uuid) -> String {
    members
        .as_array()
        .and_then(|list| list.iter().find(|m| m["id"] == member_id.to_string()))
        .and_then(|m| m["role"].as_str())
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn test_create_and_list_teams() {
    let app = TestApp::new();
    let token = app.register("owner@example.com", "Olivia").await;

    let created = app
        .request("POST", "/api/teams", Some(json!({ "name": "  Core  " })), Some(&token))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["name"], "Core");
    assert!(created.data()["ownerId"].as_str().is_some());

    let listed = app.request("GET", "/api/teams", None, Some(&token)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.data()[0]["name"], "Core");
    assert_eq!(listed.data()[0]["role"], "Owner");
    assert_eq!(listed.data()[0]["teamId"], created.data()["id"]);
}

#[tokio::test]
async fn test_blank_team_name_is_rejected() {
    let app = TestApp::new();
    let token = app.register("owner@example.com", "Olivia").await;

    let response = app
        .request("POST", "/api/teams", Some(json!({ "name": "   " })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_team_detail_includes_role_and_members() {
    let c = crew().await;

    let detail = c
        .app
        .request("GET", &format!("/api/teams/{}", c.team_id), None, Some(&c.bob))
        .await;

    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.data()["name"], "Core");
    assert_eq!(detail.data()["role"], "Contributor");
    assert_eq!(detail.data()["members"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_non_member_gets_not_found_everywhere() {
    let c = crew().await;
    let eve = c.app.register("eve@example.com", "Eve").await;
    let team = c.team_id;

    let paths = [
        ("GET", format!("/api/teams/{team}"), None),
        ("PUT", format!("/api/teams/{team}"), Some(json!({ "name": "Mine" }))),
        ("GET", format!("/api/teams/{team}/members"), None),
        ("GET", format!("/api/teams/{team}/audit"), None),
        ("DELETE", format!("/api/teams/{team}/members/{}", c.bob_member), None),
        (
            "POST",
            format!("/api/teams/{team}/transfer-ownership"),
            Some(json!({ "newOwnerId": c.bob_user })),
        ),
        ("GET", format!("/api/invites/teams/{team}"), None),
        (
            "POST",
            format!("/api/invites/teams/{team}"),
            Some(json!({ "email": "eve@example.com" })),
        ),
    ];

    for (method, path, body) in paths {
        let response = c.app.request(method, &path, body, Some(&eve)).await;
        assert_eq!(
            response.status,
            StatusCode::NOT_FOUND,
            "{method} {path} returned {:?}",
            response.body
        );
    }

    let tasks = c
        .app
        .request_in("GET", "/api/tasks", None, Some(&eve), Some(team))
        .await;
    assert_eq!(tasks.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_contributor_cannot_administer() {
    let c = crew().await;
    let team = c.team_id;

    let rename = c
        .app
        .request(
            "PUT",
            &format!("/api/teams/{team}"),
            Some(json!({ "name": "Taken over" })),
            Some(&c.bob),
        )
        .await;
    assert_eq!(rename.status, StatusCode::FORBIDDEN);

    let grant = c
        .app
        .request(
            "PUT",
            &format!("/api/teams/{team}/members/{}/grants", c.bob_member),
            Some(json!({ "scope": "tasks:write", "grantType": "Allow" })),
            Some(&c.bob),
        )
        .await;
    assert_eq!(grant.status, StatusCode::FORBIDDEN);

    let remove = c
        .app
        .request(
            "DELETE",
            &format!("/api/teams/{team}/members/{}", c.owner_member),
            None,
            Some(&c.bob),
        )
        .await;
    assert_eq!(remove.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_rename_by_owner() {
    let c = crew().await;

    let response = c
        .app
        .request(
            "PUT",
            &format!("/api/teams/{}", c.team_id),
            Some(json!({ "name": "Platform" })),
            Some(&c.owner),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Platform");
}

#[tokio::test]
async fn test_change_role_rules() {
    let c = crew().await;
    let team = c.team_id;
    let role_path = |member: Uuid| format!("/api/teams/{team}/members/{member}/role");

    let promoted = c
        .app
        .request("PUT", &role_path(c.bob_member), Some(json!({ "role": "manager" })), Some(&c.owner))
        .await;
    assert_eq!(promoted.status, StatusCode::OK);
    assert_eq!(promoted.data()["baseRole"], "Manager");

    let to_owner = c
        .app
        .request("PUT", &role_path(c.bob_member), Some(json!({ "role": "Owner" })), Some(&c.owner))
        .await;
    assert_eq!(to_owner.status, StatusCode::BAD_REQUEST);

    let unknown = c
        .app
        .request("PUT", &role_path(c.bob_member), Some(json!({ "role": "Admin" })), Some(&c.owner))
        .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);

    let demote_owner = c
        .app
        .request(
            "PUT",
            &role_path(c.owner_member),
            Some(json!({ "role": "Contributor" })),
            Some(&c.owner),
        )
        .await;
    assert_eq!(demote_owner.status, StatusCode::BAD_REQUEST);

    let missing = c
        .app
        .request(
            "PUT",
            &role_path(Uuid::new_v4()),
            Some(json!({ "role": "Manager" })),
            Some(&c.owner),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_member_rules() {
    let c = crew().await;
    let team = c.team_id;

    let remove_owner = c
        .app
        .request(
            "DELETE",
            &format!("/api/teams/{team}/members/{}", c.owner_member),
            None,
            Some(&c.owner),
        )
        .await;
    assert_eq!(remove_owner.status, StatusCode::BAD_REQUEST);

    let missing = c
        .app
        .request(
            "DELETE",
            &format!("/api/teams/{team}/members/{}", Uuid::new_v4()),
            None,
            Some(&c.owner),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let removed = c
        .app
        .request(
            "DELETE",
            &format!("/api/teams/{team}/members/{}", c.bob_member),
            None,
            Some(&c.owner),
        )
        .await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);

    let after = c
        .app
        .request("GET", &format!("/api/teams/{team}"), None, Some(&c.bob))
        .await;
    assert_eq!(after.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_transfer_ownership_swaps_roles() {
    let c = crew().await;
    let team = c.team_id;

    let response = c
        .app
        .request(
            "POST",
            &format!("/api/teams/{team}/transfer-ownership"),
            Some(json!({ "newOwnerId": c.bob_user })),
            Some(&c.owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let members = c
        .app
        .request("GET", &format!("/api/teams/{team}/members"), None, Some(&c.owner))
        .await;
    assert_eq!(role_of(members.data(), c.bob_member), "Owner");
    assert_eq!(role_of(members.data(), c.owner_member), "Manager");

    let owners = members
        .data()
        .as_array()
        .map(|list| list.iter().filter(|m| m["role"] == "Owner").count());
    assert_eq!(owners, Some(1));
}

#[tokio::test]
async fn test_transfer_ownership_guards() {
    let c = crew().await;
    let team = c.team_id;
    let path = format!("/api/teams/{team}/transfer-ownership");

    let by_contributor = c
        .app
        .request("POST", &path, Some(json!({ "newOwnerId": c.bob_user })), Some(&c.bob))
        .await;
    assert_eq!(by_contributor.status, StatusCode::FORBIDDEN);

    let to_stranger = c
        .app
        .request("POST", &path, Some(json!({ "newOwnerId": Uuid::new_v4() })), Some(&c.owner))
        .await;
    assert_eq!(to_stranger.status, StatusCode::BAD_REQUEST);

    let members = c
        .app
        .request("GET", &format!("/api/teams/{team}/members"), None, Some(&c.owner))
        .await;
    assert_eq!(role_of(members.data(), c.owner_member), "Owner");
    assert_eq!(role_of(members.data(), c.bob_member), "Contributor");
}

#[tokio::test]
async fn test_grants_can_be_replaced_and_deleted() {
    let c = crew().await;
    let team = c.team_id;
    let grants_path = format!("/api/teams/{team}/members/{}/grants", c.bob_member);

    let first = c
        .app
        .request(
            "PUT",
            &grants_path,
            Some(json!({ "scope": "documents:write", "grantType": "Allow" })),
            Some(&c.owner),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let replaced = c
        .app
        .request(
            "PUT",
            &grants_path,
            Some(json!({ "scope": "documents:write", "grantType": "Deny" })),
            Some(&c.owner),
        )
        .await;
    assert_eq!(replaced.status, StatusCode::OK);
    assert_eq!(replaced.data()["grantType"], "Deny");

    let members = c
        .app
        .request("GET", &format!("/api/teams/{team}/members"), None, Some(&c.owner))
        .await;
    let bob = find_email(members.data(), "bob@example.com");
    assert_eq!(bob["grants"].as_array().map(Vec::len), Some(1));

    let grant_id = replaced.id();
    let deleted = c
        .app
        .request("DELETE", &format!("{grants_path}/{grant_id}"), None, Some(&c.owner))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let again = c
        .app
        .request("DELETE", &format!("{grants_path}/{grant_id}"), None, Some(&c.owner))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_team_id_path_is_rejected() {
    let app = TestApp::new();
    let token = app.register("owner@example.com", "Olivia").await;

    let response = app
        .request("GET", "/api/teams/not-a-uuid", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
