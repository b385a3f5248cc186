use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Duration, NaiveDate, Utc};

use crate::error::{AppError, AppResult};
use crate::handlers::supported_date;
use crate::handlers::ws::{broadcast, JournalEvent};
use crate::models::weekly_summary::{SummaryRangeQuery, WeeklySummary};
use crate::services::assistant::AssistantReply;
use crate::services::prompts::{self, HISTORY_WEEKS};
use crate::services::summary_builder;
use crate::services::week::week_bounds;
use crate::AppState;

/// Summary for the week containing `date`, generated on first access.
pub async fn get_summary(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<WeeklySummary>> {
    let date = supported_date(date)?;
    let summary = summary_builder::get_or_create(state.store.as_ref(), date).await?;
    Ok(Json(summary))
}

pub async fn list_summaries(
    State(state): State<AppState>,
    Query(query): Query<SummaryRangeQuery>,
) -> AppResult<Json<Vec<WeeklySummary>>> {
    let end = supported_date(query.end_date.unwrap_or_else(|| Utc::now().date_naive()))?;
    let start = match query.start_date {
        Some(start) => supported_date(start)?,
        None => end - Duration::weeks(12),
    };
    if start > end {
        return Err(AppError::Validation(
            "start_date must not be after end_date".into(),
        ));
    }

    let summaries = state.store.get_summaries_in_range(start, end).await?;
    Ok(Json(summaries))
}

pub async fn regenerate_summary(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<WeeklySummary>> {
    let date = supported_date(date)?;
    let summary = summary_builder::regenerate(state.store.as_ref(), date).await?;
    broadcast(
        &state,
        JournalEvent::SummaryRegenerated {
            week_start: summary.week_start,
        },
    );
    Ok(Json(summary))
}

/// Asks the assistant to review the week containing `date` and stores the
/// reply as the summary's `claudeSummary`.
pub async fn generate_ai_summary(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<AssistantReply>> {
    let date = supported_date(date)?;
    let (week_start, week_end) = week_bounds(date);
    let store = state.store.as_ref();

    let summary = summary_builder::get_or_create(store, date).await?;
    let settings = store.get_settings().await?;
    let entries = store.get_entries_in_range(week_start, week_end).await?;
    let history = store
        .get_summaries_in_range(
            week_start - Duration::weeks(HISTORY_WEEKS as i64),
            week_start - Duration::days(1),
        )
        .await?;

    let prompt = prompts::weekly_prompt(&settings, &summary, &history, &entries);
    let content = state.assistant.complete(&settings, &prompt).await?;

    let mut summary = summary_builder::get_or_create(store, date).await?;
    summary.claude_summary = Some(content.clone());
    store.put_summary(&summary).await?;

    tracing::info!(week_start = %week_start, chars = content.len(), "Weekly AI summary stored");
    broadcast(&state, JournalEvent::AiSummaryStored { date: week_start });
    Ok(Json(AssistantReply::ok(content)))
}
