//! Shared helpers for controller and router integration tests

use axum::response::Response;
use floodwatch::server::model::app::AppState;
use floodwatch_test_utils::TestContext;
use serde::de::DeserializeOwned;

/// Extension trait for TestContext to build the server's AppState
pub trait TestContextExt {
    fn into_app_state(&self) -> AppState;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        AppState::from(self.db.clone())
    }
}

/// Reads a response body as JSON
pub async fn json_body<T: DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    serde_json::from_slice(&bytes).expect("Response body is not the expected JSON")
}
