//! Settings API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::{Settings, SettingsUpdate};
use crate::db::repository::SettingsRepository;
use crate::utils::AppResult;
use crate::utils::time::parse_close_time;

const RESOURCE: &str = "settings";

/// Get current settings (lazily created with the default close time)
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<Settings>> {
    let repo = SettingsRepository::new(state.get_db());
    let settings = repo.get_or_create().await?;
    Ok(Json(settings))
}

/// Update settings
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<SettingsUpdate>,
) -> AppResult<Json<Settings>> {
    // Malformed close times are rejected at the door; the booking gate relies
    // on the stored value parsing cleanly
    if let Some(close_time) = &payload.close_time {
        parse_close_time(close_time)?;
    }

    let repo = SettingsRepository::new(state.get_db());
    let settings = repo.update(payload).await?;

    state.publish_store(RESOURCE).await;

    Ok(Json(settings))
}
