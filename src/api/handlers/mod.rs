/// Chat endpoint (JSON or NDJSON streaming body).
pub mod chat;
/// Model listing endpoint.
pub mod models;
/// Document upload endpoint.
pub mod upload;

use axum::Json;

/// Liveness check.
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "The API is running" }))
}
