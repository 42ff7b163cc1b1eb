//! Integration tests for user registration and profiles.

mod common;

use axum::http::StatusCode;
use common::TestClient;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct UserRecord {
    id: String,
    name: String,
    email: String,
    overall_budget_cents: i64,
}

#[tokio::test]
async fn test_register_and_fetch_user() {
    let client = TestClient::new();

    let (status, parsed): (_, Option<UserRecord>) = client
        .post_json(
            "/api/users",
            serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "overall_budget_cents": 200_000,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let user = parsed.unwrap();
    assert_eq!(user.name, "Ada");
    assert_eq!(user.overall_budget_cents, 200_000);

    let (status, parsed): (_, Option<UserRecord>) =
        client.get_json(&format!("/api/users/{}", user.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parsed.unwrap().email, "ada@example.com");
}

#[tokio::test]
async fn test_register_rejects_blank_fields() {
    let client = TestClient::new();
    let (status, _): (_, Option<serde_json::Value>) = client
        .post_json(
            "/api/users",
            serde_json::json!({ "name": "", "email": "ada@example.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_fetch_missing_user_is_404() {
    let client = TestClient::new();
    let (status, _) = client.get("/api/users/no-such-user").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_overall_budget() {
    let client = TestClient::new();
    let id = client.create_user("Ada", "ada@example.com", 100_000).await;

    let (status, parsed): (_, Option<UserRecord>) = client
        .put_json(
            &format!("/api/users/{}", id),
            serde_json::json!({ "overall_budget_cents": 250_000 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let user = parsed.unwrap();
    assert_eq!(user.overall_budget_cents, 250_000);
    assert_eq!(user.name, "Ada");
}
