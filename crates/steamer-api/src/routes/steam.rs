use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

const RESOLVE_FAILED: &str = "Failed to resolve Steam ID";
const REFRESH_FAILED: &str = "Failed to refresh Steam profile";

/// Resolve a SteamID64, profile URL or custom URL, serving the stored
/// profile while it is fresh
pub async fn resolve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let resolution = state
        .resolver
        .resolve(&id)
        .await
        .map_err(|e| AppError::from_resolve(e, RESOLVE_FAILED))?;

    Ok(super::success(
        "Steam profile resolved",
        json!({
            "profile": resolution.profile,
            "cached": resolution.cached,
            "receivedId": resolution.received_id,
        }),
    ))
}

/// Re-fetch a stored profile from Steam regardless of its age
pub async fn refresh(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let profile = state
        .resolver
        .refresh(&id)
        .await
        .map_err(|e| AppError::from_resolve(e, REFRESH_FAILED))?;

    Ok(super::success(
        "Steam profile refreshed",
        json!({ "profile": profile }),
    ))
}
