use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::controllers::generate::GenerateController;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(
    State(controller): State<Arc<GenerateController>>,
) -> impl IntoResponse {
    let models: Vec<&str> = controller
        .configured_models()
        .iter()
        .map(|m| m.as_str())
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "models": models
        })),
    )
}
