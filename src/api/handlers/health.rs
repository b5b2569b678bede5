/*
 * Responsibility
 * - GET /health (疎通用)
 * - access rule で PUBLIC 扱い (トークンなしで通る)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
