//! Weekly summary lifecycle: build from scratch, regenerate with the
//! assistant text carried over, and lazily create on first read.

use chrono::{NaiveDate, Utc};

use crate::catalog::MicroAction;
use crate::models::daily_entry::DailyEntry;
use crate::models::weekly_summary::WeeklySummary;
use crate::store::{RecordStore, StoreResult};

use super::aggregator::{category_averages, day_averages, weekly_averages};
use super::classifier::critical_areas;
use super::recommender::recommend;
use super::week::week_bounds;

/// Pure part of the build: aggregates `entries` into a summary for the
/// given week. `claude_summary` is always unset.
pub fn summarize_week(
    week_start: NaiveDate,
    week_end: NaiveDate,
    entries: &[DailyEntry],
) -> WeeklySummary {
    let averages = weekly_averages(entries);
    let critical = critical_areas(&averages);
    let micro_actions = recommend(&averages, &critical);

    WeeklySummary {
        week_start,
        week_end,
        category_averages: category_averages(&averages),
        averages,
        critical_areas: critical,
        micro_actions,
        entry_count: entries.len(),
        claude_summary: None,
        generated_at: Utc::now(),
    }
}

pub async fn build_weekly_summary(
    store: &dyn RecordStore,
    anchor: NaiveDate,
) -> StoreResult<WeeklySummary> {
    let (week_start, week_end) = week_bounds(anchor);
    let entries = store.get_entries_in_range(week_start, week_end).await?;
    Ok(summarize_week(week_start, week_end, &entries))
}

/// Rebuilds the week containing `anchor` from all of its entries, copies a
/// previously stored `claude_summary` onto it and persists the result.
pub async fn regenerate(store: &dyn RecordStore, anchor: NaiveDate) -> StoreResult<WeeklySummary> {
    let (week_start, _) = week_bounds(anchor);
    let previous = store.get_summary(week_start).await?;

    let mut summary = build_weekly_summary(store, anchor).await?;
    if let Some(previous) = previous {
        summary.claude_summary = previous.claude_summary;
    }

    store.put_summary(&summary).await?;
    tracing::debug!(
        week_start = %summary.week_start,
        entries = summary.entry_count,
        critical = summary.critical_areas.len(),
        "Weekly summary regenerated"
    );
    Ok(summary)
}

/// Stored summary for the week, generating and persisting it if absent.
pub async fn get_or_create(store: &dyn RecordStore, anchor: NaiveDate) -> StoreResult<WeeklySummary> {
    let (week_start, _) = week_bounds(anchor);
    match store.get_summary(week_start).await? {
        Some(summary) => Ok(summary),
        None => regenerate(store, anchor).await,
    }
}

/// Day-scoped recommendations straight from one entry's raw scores.
pub fn build_daily_micro_actions(entry: &DailyEntry) -> Vec<MicroAction> {
    let averages = day_averages(entry);
    let critical = critical_areas(&averages);
    recommend(&averages, &critical)
}
