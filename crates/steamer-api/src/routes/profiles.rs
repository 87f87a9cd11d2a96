//! Administrative access to stored profiles

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use steamer_db::{NewProfile, ProfileAttributes, ProfileRow, SteamProfile};
use steamer_resolver::{StoreError, PROFILE_NOT_FOUND};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListParams {
    limit: Option<i64>,
    offset: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfile {
    #[serde(default)]
    steam_id64: String,
    #[serde(flatten)]
    attributes: ProfileAttributes,
}

fn materialize(row: ProfileRow) -> Result<SteamProfile, AppError> {
    row.into_profile()
        .map_err(|e| AppError::from(StoreError::Decode(e)))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, AppError> {
    let limit = params.limit.unwrap_or(50).clamp(1, 100);
    let offset = params.offset.unwrap_or(0).max(0);

    let profiles = state
        .store()
        .list(limit, offset)
        .await?
        .into_iter()
        .map(materialize)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(super::success("Profiles retrieved", json!(profiles)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateProfile>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let steam_id64 = body.steam_id64.trim().to_string();
    if steam_id64.is_empty() {
        return Err(AppError::Unprocessable("steamId64 is required".into()));
    }

    let changes = body
        .attributes
        .to_changes(None)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let row = state
        .store()
        .insert(NewProfile {
            steam_id64,
            changes,
        })
        .await?;

    let profile = materialize(row)?;
    Ok((
        StatusCode::CREATED,
        super::success("Profile created", json!(profile)),
    ))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let row = state
        .store()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(PROFILE_NOT_FOUND.into()))?;

    let profile = materialize(row)?;
    Ok(super::success("Profile retrieved", json!(profile)))
}

pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(attributes): Json<ProfileAttributes>,
) -> Result<Json<Value>, AppError> {
    if attributes.is_blank() {
        return Err(AppError::Unprocessable("No updates provided".into()));
    }

    let changes = attributes
        .to_changes(None)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let row = state.store().update_by_id(id, changes).await?;

    let profile = materialize(row)?;
    Ok(super::success("Profile updated", json!(profile)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.store().delete_by_id(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(PROFILE_NOT_FOUND.into()))
    }
}
