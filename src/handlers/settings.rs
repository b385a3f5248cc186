use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::handlers::ws::{broadcast, JournalEvent};
use crate::models::settings::{SettingsResponse, UpdateSettingsRequest};
use crate::AppState;

pub async fn get_settings(State(state): State<AppState>) -> AppResult<Json<SettingsResponse>> {
    let settings = state.store.get_settings().await?;
    Ok(Json(SettingsResponse::from(&settings)))
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(body): Json<UpdateSettingsRequest>,
) -> AppResult<Json<SettingsResponse>> {
    let mut settings = state.store.get_settings().await?;
    body.apply_to(&mut settings);
    state.store.put_settings(&settings).await?;

    tracing::info!(
        ai_enabled = settings.ai_enabled,
        provider = settings.ai_provider.as_str(),
        language = settings.language.code(),
        "Settings updated"
    );
    broadcast(&state, JournalEvent::SettingsChanged);
    Ok(Json(SettingsResponse::from(&settings)))
}
