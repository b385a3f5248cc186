use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::models::daily_entry::DailyEntry;
use crate::models::snapshot::{ImportResponse, JournalSnapshot, SNAPSHOT_VERSION};
use crate::models::weekly_summary::WeeklySummary;
use crate::store::{RecordStore, StoreResult};

use super::summary_builder;
use super::week::{supported_range, week_bounds, week_start};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedEntry {
    pub entry: DailyEntry,
    /// `None` when the entry was committed but the week could not be rebuilt.
    pub summary: Option<WeeklySummary>,
}

/// Persists `entry`, then rebuilds its week. The entry write is the only
/// part that can fail the call; a failed rebuild leaves a stale summary
/// that heals on the next save in that week.
pub async fn save_entry(store: &dyn RecordStore, entry: DailyEntry) -> StoreResult<SavedEntry> {
    store.put_entry(&entry).await?;

    let summary = match summary_builder::regenerate(store, entry.date).await {
        Ok(summary) => Some(summary),
        Err(e) => {
            tracing::warn!(
                date = %entry.date,
                error = %e,
                "Entry saved but weekly summary regeneration failed"
            );
            None
        }
    };

    Ok(SavedEntry { entry, summary })
}

/// Every record the journal accepts lies inside the supported window, so
/// scanning it exports the whole journal.
pub async fn export_snapshot(store: &dyn RecordStore) -> StoreResult<JournalSnapshot> {
    let (start, end) = supported_range();
    Ok(JournalSnapshot {
        version: SNAPSHOT_VERSION,
        entries: store.get_entries_in_range(start, end).await?,
        summaries: store.get_summaries_in_range(start, end).await?,
        settings: store.get_settings().await?,
    })
}

/// Restores a snapshot on top of the current journal. Imported summaries
/// are written first so their assistant text is carried forward when every
/// touched week is regenerated. A summary keyed by a day other than Monday
/// is moved to the Monday of its week.
pub async fn import_snapshot(
    store: &dyn RecordStore,
    snapshot: JournalSnapshot,
) -> StoreResult<ImportResponse> {
    let mut weeks: BTreeSet<NaiveDate> = BTreeSet::new();

    for mut summary in snapshot.summaries {
        let (start, end) = week_bounds(summary.week_start);
        summary.week_start = start;
        summary.week_end = end;
        store.put_summary(&summary).await?;
        weeks.insert(start);
    }

    let mut dropped_score_keys = 0;
    let imported_entries = snapshot.entries.len();
    for mut entry in snapshot.entries {
        dropped_score_keys += entry.retain_known_scores().len();
        store.put_entry(&entry).await?;
        weeks.insert(week_start(entry.date));
    }

    store.put_settings(&snapshot.settings).await?;

    for week in &weeks {
        summary_builder::regenerate(store, *week).await?;
    }

    tracing::info!(
        entries = imported_entries,
        weeks = weeks.len(),
        dropped_score_keys,
        "Journal snapshot imported"
    );

    Ok(ImportResponse {
        imported_entries,
        regenerated_weeks: weeks.len(),
        dropped_score_keys,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::{AppSettings, Language};
    use crate::store::{JsonFileStore, SqliteStore, StoreError};
    use async_trait::async_trait;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    /// Delegates entry calls, fails every summary write.
    struct SummaryWritesFail(SqliteStore);

    #[async_trait]
    impl RecordStore for SummaryWritesFail {
        async fn get_entries_in_range(
            &self,
            start: NaiveDate,
            end: NaiveDate,
        ) -> StoreResult<Vec<DailyEntry>> {
            self.0.get_entries_in_range(start, end).await
        }
        async fn get_entry(&self, date: NaiveDate) -> StoreResult<Option<DailyEntry>> {
            self.0.get_entry(date).await
        }
        async fn put_entry(&self, entry: &DailyEntry) -> StoreResult<()> {
            self.0.put_entry(entry).await
        }
        async fn get_summary(&self, week_start: NaiveDate) -> StoreResult<Option<WeeklySummary>> {
            self.0.get_summary(week_start).await
        }
        async fn get_summaries_in_range(
            &self,
            start: NaiveDate,
            end: NaiveDate,
        ) -> StoreResult<Vec<WeeklySummary>> {
            self.0.get_summaries_in_range(start, end).await
        }
        async fn put_summary(&self, _summary: &WeeklySummary) -> StoreResult<()> {
            Err(StoreError::Corrupt("disk full".into()))
        }
        async fn get_settings(&self) -> StoreResult<AppSettings> {
            self.0.get_settings().await
        }
        async fn put_settings(&self, settings: &AppSettings) -> StoreResult<()> {
            self.0.put_settings(settings).await
        }
        async fn ping(&self) -> StoreResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn save_regenerates_owning_week() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        let mut entry = DailyEntry::new(d(6));
        entry.scores.insert("maslow_love".into(), 1);

        let saved = save_entry(&store, entry).await.unwrap();
        let summary = saved.summary.unwrap();
        assert_eq!(summary.week_start, d(4));
        assert_eq!(summary.critical_areas[0].question_id, "maslow_love");
        assert!(store.get_summary(d(4)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn failed_regeneration_keeps_entry_committed() {
        let inner = SqliteStore::connect("sqlite::memory:").await.unwrap();
        let store = SummaryWritesFail(inner);
        let mut entry = DailyEntry::new(d(6));
        entry.scores.insert("maslow_love".into(), 4);

        let saved = save_entry(&store, entry).await.unwrap();
        assert!(saved.summary.is_none());
        assert!(store.get_entry(d(6)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn export_then_import_into_fresh_store() {
        let source = SqliteStore::connect("sqlite::memory:").await.unwrap();
        let mut entry = DailyEntry::new(d(5));
        entry.scores.insert("perma_flow".into(), 2);
        save_entry(&source, entry).await.unwrap();

        let mut summary = source.get_summary(d(4)).await.unwrap().unwrap();
        summary.claude_summary = Some("Find more flow.".into());
        source.put_summary(&summary).await.unwrap();
        source
            .put_settings(&AppSettings {
                language: Language::Es,
                ..Default::default()
            })
            .await
            .unwrap();

        let mut snapshot = export_snapshot(&source).await.unwrap();
        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(snapshot.summaries.len(), 1);
        snapshot.entries[0]
            .scores
            .insert("question_from_old_version".into(), 3);

        let dir = tempfile::tempdir().unwrap();
        let target = JsonFileStore::open(dir.path().join("journal.json")).await.unwrap();
        let report = import_snapshot(&target, snapshot).await.unwrap();

        assert_eq!(report.imported_entries, 1);
        assert_eq!(report.regenerated_weeks, 1);
        assert_eq!(report.dropped_score_keys, 1);

        let restored = target.get_summary(d(4)).await.unwrap().unwrap();
        assert_eq!(restored.claude_summary.as_deref(), Some("Find more flow."));
        assert_eq!(restored.averages["perma_flow"], 2.0);
        assert_eq!(target.get_settings().await.unwrap().language, Language::Es);
    }

    #[tokio::test]
    async fn imported_summary_is_moved_to_its_monday() {
        let source = SqliteStore::connect("sqlite::memory:").await.unwrap();
        let mut entry = DailyEntry::new(d(5));
        entry.scores.insert("perma_flow".into(), 4);
        save_entry(&source, entry).await.unwrap();

        let mut snapshot = export_snapshot(&source).await.unwrap();
        snapshot.summaries[0].week_start = d(6);
        snapshot.summaries[0].week_end = d(12);
        snapshot.summaries[0].claude_summary = Some("Keep it up.".into());

        let target = SqliteStore::connect("sqlite::memory:").await.unwrap();
        let report = import_snapshot(&target, snapshot).await.unwrap();
        assert_eq!(report.regenerated_weeks, 1);

        let stored = target.get_summaries_in_range(d(1), d(31)).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].week_start, d(4));
        assert_eq!(stored[0].week_end, d(10));
        assert_eq!(stored[0].claude_summary.as_deref(), Some("Keep it up."));
    }

    #[tokio::test]
    async fn export_covers_the_whole_supported_window() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        let (first, last) = supported_range();
        for date in [first, d(5), last] {
            let mut entry = DailyEntry::new(date);
            entry.scores.insert("perma_flow".into(), 3);
            save_entry(&store, entry).await.unwrap();
        }

        let snapshot = export_snapshot(&store).await.unwrap();
        let dates: Vec<NaiveDate> = snapshot.entries.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![first, d(5), last]);
        assert_eq!(snapshot.summaries.len(), 3);
    }
}
