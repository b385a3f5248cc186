//! Record store: CRUD over daily entries, weekly summaries and settings.
//!
//! The engine only ever talks to [`RecordStore`]; the two backends are a
//! SQLite database (default) and a single user-data JSON file. Both filter
//! stale score keys when an entry is loaded.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::daily_entry::DailyEntry;
use crate::models::settings::AppSettings;
use crate::models::weekly_summary::WeeklySummary;

pub mod json_file;
pub mod sqlite;

pub use json_file::JsonFileStore;
pub use sqlite::SqliteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Entries whose date falls in `[start, end]`, ascending by date.
    async fn get_entries_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<DailyEntry>>;

    async fn get_entry(&self, date: NaiveDate) -> StoreResult<Option<DailyEntry>>;

    /// Upsert keyed by `entry.date`.
    async fn put_entry(&self, entry: &DailyEntry) -> StoreResult<()>;

    async fn get_summary(&self, week_start: NaiveDate) -> StoreResult<Option<WeeklySummary>>;

    /// Persisted summaries whose `week_start` falls in `[start, end]`, ascending.
    async fn get_summaries_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<WeeklySummary>>;

    /// Upsert keyed by `summary.week_start`.
    async fn put_summary(&self, summary: &WeeklySummary) -> StoreResult<()>;

    /// Stored settings, or defaults when none were ever saved.
    async fn get_settings(&self) -> StoreResult<AppSettings>;

    async fn put_settings(&self, settings: &AppSettings) -> StoreResult<()>;

    /// Cheap liveness check for /readyz.
    async fn ping(&self) -> StoreResult<()>;
}
