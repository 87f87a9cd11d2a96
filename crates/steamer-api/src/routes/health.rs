use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

pub async fn health() -> Json<Value> {
    Json(json!({ "success": true, "message": "ok" }))
}

pub async fn index() -> Json<Value> {
    super::success(
        "Welcome to Steamer API",
        json!({
            "message": "Steamer API",
            "serverTime": Utc::now().to_rfc3339(),
        }),
    )
}
