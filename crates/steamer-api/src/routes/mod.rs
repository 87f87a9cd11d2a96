pub mod health;
pub mod profiles;
pub mod steam;

use axum::http::{StatusCode, Uri};
use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use crate::auth;
use crate::state::AppState;

/// Success envelope shared by all endpoints
pub fn success<T: Serialize>(message: &str, data: T) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": message,
        "data": data,
    }))
}

async fn not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": format!("Not Found - {}", uri.path()),
        })),
    )
}

/// Create the HTTP router
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/resolve/{id}", get(steam::resolve))
        .route("/refresh/{id}", post(steam::refresh))
        .route("/profiles", get(profiles::list).post(profiles::create))
        .route(
            "/profiles/{id}",
            get(profiles::get_one)
                .patch(profiles::patch)
                .delete(profiles::remove),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        .nest("/api", api)
        .fallback(not_found)
        .with_state(state)
}
