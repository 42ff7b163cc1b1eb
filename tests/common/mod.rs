//! Shared test utilities for integration tests.
//!
//! Provides a `TestClient` that drives the application router directly,
//! backed by a fresh in-memory record store per test.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use outlay::config::{Config, StoreBackend};
use outlay::handlers;
use outlay::state::AppState;
use outlay::store::{MemoryStore, RecordStore};
use tower::ServiceExt;

pub struct TestClient {
    state: AppState,
}

impl TestClient {
    /// A client over an empty in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// A client over the demo fixture (user-1 plus seeded records).
    pub fn with_demo_data() -> Self {
        Self::with_store(Arc::new(MemoryStore::with_demo_data()))
    }

    fn with_store(store: Arc<dyn RecordStore>) -> Self {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 0,
            backend: StoreBackend::Memory { demo_data: false },
        };
        let state = AppState {
            store,
            config: Arc::new(config),
        };
        Self { state }
    }

    pub fn router(&self) -> Router {
        handlers::routes().with_state(self.state.clone())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        uri: &str,
    ) -> (StatusCode, Option<T>) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).ok();
        (status, parsed)
    }

    async fn send_json(&self, method: &str, uri: &str, body: serde_json::Value) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body_bytes).to_string())
    }

    /// POST a JSON body and parse the JSON response.
    pub async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, Option<T>) {
        let (status, body) = self.send_json("POST", uri, body).await;
        (status, serde_json::from_str(&body).ok())
    }

    /// PUT a JSON body and parse the JSON response.
    pub async fn put_json<T: serde::de::DeserializeOwned>(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, Option<T>) {
        let (status, body) = self.send_json("PUT", uri, body).await;
        (status, serde_json::from_str(&body).ok())
    }

    /// Make a DELETE request and return the status.
    pub async fn delete(&self, uri: &str) -> StatusCode {
        let response = self
            .router()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response.status()
    }

    // =========================================================================
    // Helper methods for creating entities through the API
    // =========================================================================

    /// Register a user and return its id.
    pub async fn create_user(&self, name: &str, email: &str, overall_budget_cents: i64) -> String {
        let (status, user): (_, Option<serde_json::Value>) = self
            .post_json(
                "/api/users",
                serde_json::json!({
                    "name": name,
                    "email": email,
                    "overall_budget_cents": overall_budget_cents,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "user creation failed");
        user.unwrap()["id"].as_str().unwrap().to_string()
    }

    /// Create a category and return its id.
    pub async fn create_category(&self, owner_id: &str, name: &str) -> String {
        let (status, category): (_, Option<serde_json::Value>) = self
            .post_json(
                "/api/categories",
                serde_json::json!({ "name": name, "owner_id": owner_id }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "category creation failed");
        category.unwrap()["id"].as_str().unwrap().to_string()
    }

    /// Create a budget for a category and return its id.
    pub async fn create_budget(
        &self,
        owner_id: &str,
        category_id: &str,
        amount_cents: i64,
    ) -> String {
        let (status, budget): (_, Option<serde_json::Value>) = self
            .post_json(
                "/api/budgets",
                serde_json::json!({
                    "category_id": category_id,
                    "owner_id": owner_id,
                    "amount_cents": amount_cents,
                    "period": "Monthly",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "budget creation failed");
        budget.unwrap()["id"].as_str().unwrap().to_string()
    }

    /// Create an expense and return its id.
    pub async fn create_expense(
        &self,
        owner_id: &str,
        category_id: &str,
        amount_cents: i64,
        date: &str,
        description: &str,
    ) -> String {
        let (status, expense): (_, Option<serde_json::Value>) = self
            .post_json(
                &format!("/api/expenses/{}/{}", owner_id, category_id),
                serde_json::json!({
                    "description": description,
                    "amount_cents": amount_cents,
                    "date": date,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "expense creation failed");
        expense.unwrap()["id"].as_str().unwrap().to_string()
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
