use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::{RecordStore, StoreResult};
use crate::models::daily_entry::DailyEntry;
use crate::models::settings::AppSettings;
use crate::models::snapshot::{JournalSnapshot, SNAPSHOT_VERSION};
use crate::models::weekly_summary::WeeklySummary;

/// Keeps the whole journal in memory and rewrites the user-data file on
/// every mutation. Writes go to a sibling temp file first, then rename.
/// Stale score keys are dropped when the file is opened, so the next write
/// never carries them back to disk.
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<Journal>,
}

#[derive(Default)]
struct Journal {
    entries: BTreeMap<NaiveDate, DailyEntry>,
    summaries: BTreeMap<NaiveDate, WeeklySummary>,
    settings: AppSettings,
}

impl Journal {
    fn from_snapshot(snapshot: JournalSnapshot) -> Self {
        Self {
            entries: snapshot
                .entries
                .into_iter()
                .map(|mut e| {
                    e.retain_known_scores();
                    (e.date, e)
                })
                .collect(),
            summaries: snapshot
                .summaries
                .into_iter()
                .map(|s| (s.week_start, s))
                .collect(),
            settings: snapshot.settings,
        }
    }

    fn to_snapshot(&self) -> JournalSnapshot {
        JournalSnapshot {
            version: SNAPSHOT_VERSION,
            entries: self.entries.values().cloned().collect(),
            summaries: self.summaries.values().cloned().collect(),
            settings: self.settings.clone(),
        }
    }
}

impl JsonFileStore {
    /// Opens `path`, starting empty if the file does not exist yet. A file
    /// that fails to parse is an error; it is never overwritten silently.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let journal = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: JournalSnapshot = serde_json::from_slice(&bytes)?;
                tracing::info!(
                    path = %path.display(),
                    entries = snapshot.entries.len(),
                    summaries = snapshot.summaries.len(),
                    "Loaded journal file"
                );
                Journal::from_snapshot(snapshot)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No journal file yet, starting empty");
                Journal::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            state: Mutex::new(journal),
        })
    }

    async fn persist(&self, journal: &Journal) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(&journal.to_snapshot())?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn get_entries_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<DailyEntry>> {
        let journal = self.state.lock().await;
        Ok(journal
            .entries
            .range(start..=end)
            .map(|(_, e)| e.clone())
            .collect())
    }

    async fn get_entry(&self, date: NaiveDate) -> StoreResult<Option<DailyEntry>> {
        let journal = self.state.lock().await;
        Ok(journal.entries.get(&date).cloned())
    }

    async fn put_entry(&self, entry: &DailyEntry) -> StoreResult<()> {
        let mut journal = self.state.lock().await;
        journal.entries.insert(entry.date, entry.clone());
        self.persist(&journal).await
    }

    async fn get_summary(&self, week_start: NaiveDate) -> StoreResult<Option<WeeklySummary>> {
        let journal = self.state.lock().await;
        Ok(journal.summaries.get(&week_start).cloned())
    }

    async fn get_summaries_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<WeeklySummary>> {
        let journal = self.state.lock().await;
        Ok(journal
            .summaries
            .range(start..=end)
            .map(|(_, s)| s.clone())
            .collect())
    }

    async fn put_summary(&self, summary: &WeeklySummary) -> StoreResult<()> {
        let mut journal = self.state.lock().await;
        journal.summaries.insert(summary.week_start, summary.clone());
        self.persist(&journal).await
    }

    async fn get_settings(&self) -> StoreResult<AppSettings> {
        Ok(self.state.lock().await.settings.clone())
    }

    async fn put_settings(&self, settings: &AppSettings) -> StoreResult<()> {
        let mut journal = self.state.lock().await;
        journal.settings = settings.clone();
        self.persist(&journal).await
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
