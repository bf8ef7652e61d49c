use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "OK",
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })),
    )
}
