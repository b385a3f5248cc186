use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Duration, NaiveDate, Utc};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::supported_date;
use crate::handlers::ws::{broadcast, JournalEvent};
use crate::models::daily_entry::{DailyEntry, EntryRangeQuery, UpsertEntryRequest};
use crate::services::assistant::AssistantReply;
use crate::services::journal::{self, SavedEntry};
use crate::services::prompts::{self, MOOD_HISTORY_DAYS};
use crate::services::summary_builder;
use crate::AppState;

async fn load_entry(state: &AppState, date: NaiveDate) -> AppResult<DailyEntry> {
    state
        .store
        .get_entry(date)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No entry for {}", date)))
}

pub async fn upsert_entry(
    State(state): State<AppState>,
    Json(body): Json<UpsertEntryRequest>,
) -> AppResult<Json<SavedEntry>> {
    body.validate()?;
    body.validate_scores().map_err(AppError::Validation)?;

    let date = supported_date(body.date.unwrap_or_else(|| Utc::now().date_naive()))?;
    let mut entry = state
        .store
        .get_entry(date)
        .await?
        .unwrap_or_else(|| DailyEntry::new(date));
    body.apply_to(&mut entry);

    let saved = journal::save_entry(state.store.as_ref(), entry).await?;

    broadcast(&state, JournalEvent::EntrySaved { date });
    if let Some(summary) = &saved.summary {
        broadcast(
            &state,
            JournalEvent::SummaryRegenerated {
                week_start: summary.week_start,
            },
        );
    }

    Ok(Json(saved))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<EntryRangeQuery>,
) -> AppResult<Json<Vec<DailyEntry>>> {
    let end = supported_date(query.end_date.unwrap_or_else(|| Utc::now().date_naive()))?;
    let start = match query.start_date {
        Some(start) => supported_date(start)?,
        None => end - Duration::days(30),
    };
    if start > end {
        return Err(AppError::Validation(
            "start_date must not be after end_date".into(),
        ));
    }

    let entries = state.store.get_entries_in_range(start, end).await?;
    Ok(Json(entries))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<DailyEntry>> {
    let date = supported_date(date)?;
    Ok(Json(load_entry(&state, date).await?))
}

/// Computes day-scoped actions from the entry's scores and freezes them onto
/// the entry.
pub async fn generate_micro_actions(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<DailyEntry>> {
    let date = supported_date(date)?;
    let mut entry = load_entry(&state, date).await?;
    entry.micro_actions = summary_builder::build_daily_micro_actions(&entry);
    entry.updated_at = Utc::now();
    state.store.put_entry(&entry).await?;

    tracing::debug!(date = %date, actions = entry.micro_actions.len(), "Day micro-actions stored");
    broadcast(&state, JournalEvent::EntrySaved { date });
    Ok(Json(entry))
}

/// Asks the assistant for a reflection on one day. The text is stored on the
/// entry only when the assistant succeeds.
pub async fn generate_ai_summary(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<AssistantReply>> {
    let date = supported_date(date)?;
    let entry = load_entry(&state, date).await?;
    let settings = state.store.get_settings().await?;
    let recent = state
        .store
        .get_entries_in_range(date - Duration::days(MOOD_HISTORY_DAYS as i64), date - Duration::days(1))
        .await?;

    let prompt = prompts::daily_prompt(&settings, &entry, &recent);
    let content = state.assistant.complete(&settings, &prompt).await?;

    // Re-read so edits made while the assistant ran are kept.
    let mut entry = load_entry(&state, date).await?;
    entry.ai_summary = Some(content.clone());
    entry.updated_at = Utc::now();
    state.store.put_entry(&entry).await?;

    tracing::info!(date = %date, chars = content.len(), "Daily AI summary stored");
    broadcast(&state, JournalEvent::AiSummaryStored { date });
    Ok(Json(AssistantReply::ok(content)))
}
