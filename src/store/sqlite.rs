use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use sqlx::{FromRow, SqlitePool};

use super::{RecordStore, StoreError, StoreResult};
use crate::db;
use crate::models::daily_entry::{DailyEntry, MAX_SLIDER};
use crate::models::settings::AppSettings;
use crate::models::weekly_summary::WeeklySummary;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = db::create_pool(database_url).await?;
        Ok(Self { pool })
    }
}

#[derive(FromRow)]
struct EntryRow {
    entry_date: NaiveDate,
    scores: String,
    mood: Option<String>,
    anxiety: Option<i64>,
    depression: Option<i64>,
    joy: Option<i64>,
    anger: Option<i64>,
    gratitude: Option<i64>,
    notes: Option<String>,
    ai_summary: Option<String>,
    micro_actions: String,
    completed_habits: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct SummaryRow {
    week_start: NaiveDate,
    week_end: NaiveDate,
    averages: String,
    category_averages: String,
    critical_areas: String,
    micro_actions: String,
    entry_count: i64,
    claude_summary: Option<String>,
    generated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct SettingsRow {
    ai_enabled: bool,
    ai_provider: String,
    language: String,
    api_key: Option<String>,
}

/// Parses a bare enum tag such as `claude` through its serde representation.
fn parse_tag<T: DeserializeOwned>(tag: &str) -> StoreResult<T> {
    serde_json::from_value(serde_json::Value::String(tag.to_string()))
        .map_err(|_| StoreError::Corrupt(format!("unknown value '{}'", tag)))
}

fn slider(value: Option<i64>) -> Option<u8> {
    value
        .and_then(|v| u8::try_from(v).ok())
        .filter(|v| *v <= MAX_SLIDER)
}

impl TryFrom<EntryRow> for DailyEntry {
    type Error = StoreError;

    fn try_from(row: EntryRow) -> StoreResult<Self> {
        let mut entry = DailyEntry {
            date: row.entry_date,
            scores: serde_json::from_str(&row.scores)?,
            mood: row.mood.as_deref().map(parse_tag).transpose()?,
            anxiety: slider(row.anxiety),
            depression: slider(row.depression),
            joy: slider(row.joy),
            anger: slider(row.anger),
            gratitude: slider(row.gratitude),
            notes: row.notes,
            ai_summary: row.ai_summary,
            micro_actions: serde_json::from_str(&row.micro_actions)?,
            completed_habits: serde_json::from_str(&row.completed_habits)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };
        entry.retain_known_scores();
        Ok(entry)
    }
}

impl TryFrom<SummaryRow> for WeeklySummary {
    type Error = StoreError;

    fn try_from(row: SummaryRow) -> StoreResult<Self> {
        Ok(WeeklySummary {
            week_start: row.week_start,
            week_end: row.week_end,
            averages: serde_json::from_str(&row.averages)?,
            category_averages: serde_json::from_str(&row.category_averages)?,
            critical_areas: serde_json::from_str(&row.critical_areas)?,
            micro_actions: serde_json::from_str(&row.micro_actions)?,
            entry_count: usize::try_from(row.entry_count).unwrap_or(0),
            claude_summary: row.claude_summary,
            generated_at: row.generated_at,
        })
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn get_entries_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<DailyEntry>> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT * FROM daily_entries
            WHERE entry_date BETWEEN ?1 AND ?2
            ORDER BY entry_date ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DailyEntry::try_from).collect()
    }

    async fn get_entry(&self, date: NaiveDate) -> StoreResult<Option<DailyEntry>> {
        sqlx::query_as::<_, EntryRow>("SELECT * FROM daily_entries WHERE entry_date = ?1")
            .bind(date)
            .fetch_optional(&self.pool)
            .await?
            .map(DailyEntry::try_from)
            .transpose()
    }

    async fn put_entry(&self, entry: &DailyEntry) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO daily_entries (
                entry_date, scores, mood, anxiety, depression, joy, anger, gratitude,
                notes, ai_summary, micro_actions, completed_habits, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            ON CONFLICT(entry_date) DO UPDATE SET
                scores = excluded.scores,
                mood = excluded.mood,
                anxiety = excluded.anxiety,
                depression = excluded.depression,
                joy = excluded.joy,
                anger = excluded.anger,
                gratitude = excluded.gratitude,
                notes = excluded.notes,
                ai_summary = excluded.ai_summary,
                micro_actions = excluded.micro_actions,
                completed_habits = excluded.completed_habits,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(entry.date)
        .bind(serde_json::to_string(&entry.scores)?)
        .bind(entry.mood.map(|m| m.label()))
        .bind(entry.anxiety.map(i64::from))
        .bind(entry.depression.map(i64::from))
        .bind(entry.joy.map(i64::from))
        .bind(entry.anger.map(i64::from))
        .bind(entry.gratitude.map(i64::from))
        .bind(&entry.notes)
        .bind(&entry.ai_summary)
        .bind(serde_json::to_string(&entry.micro_actions)?)
        .bind(serde_json::to_string(&entry.completed_habits)?)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_summary(&self, week_start: NaiveDate) -> StoreResult<Option<WeeklySummary>> {
        sqlx::query_as::<_, SummaryRow>("SELECT * FROM weekly_summaries WHERE week_start = ?1")
            .bind(week_start)
            .fetch_optional(&self.pool)
            .await?
            .map(WeeklySummary::try_from)
            .transpose()
    }

    async fn get_summaries_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<WeeklySummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT * FROM weekly_summaries
            WHERE week_start BETWEEN ?1 AND ?2
            ORDER BY week_start ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(WeeklySummary::try_from).collect()
    }

    async fn put_summary(&self, summary: &WeeklySummary) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO weekly_summaries (
                week_start, week_end, averages, category_averages, critical_areas,
                micro_actions, entry_count, claude_summary, generated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(week_start) DO UPDATE SET
                week_end = excluded.week_end,
                averages = excluded.averages,
                category_averages = excluded.category_averages,
                critical_areas = excluded.critical_areas,
                micro_actions = excluded.micro_actions,
                entry_count = excluded.entry_count,
                claude_summary = excluded.claude_summary,
                generated_at = excluded.generated_at
            "#,
        )
        .bind(summary.week_start)
        .bind(summary.week_end)
        .bind(serde_json::to_string(&summary.averages)?)
        .bind(serde_json::to_string(&summary.category_averages)?)
        .bind(serde_json::to_string(&summary.critical_areas)?)
        .bind(serde_json::to_string(&summary.micro_actions)?)
        .bind(summary.entry_count as i64)
        .bind(&summary.claude_summary)
        .bind(summary.generated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_settings(&self) -> StoreResult<AppSettings> {
        let row = sqlx::query_as::<_, SettingsRow>(
            "SELECT ai_enabled, ai_provider, language, api_key FROM app_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(AppSettings::default());
        };

        Ok(AppSettings {
            ai_enabled: row.ai_enabled,
            ai_provider: parse_tag(&row.ai_provider)?,
            language: parse_tag(&row.language)?,
            api_key: row.api_key,
        })
    }

    async fn put_settings(&self, settings: &AppSettings) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO app_settings (id, ai_enabled, ai_provider, language, api_key)
            VALUES (1, ?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                ai_enabled = excluded.ai_enabled,
                ai_provider = excluded.ai_provider,
                language = excluded.language,
                api_key = excluded.api_key
            "#,
        )
        .bind(settings.ai_enabled)
        .bind(settings.ai_provider.as_str())
        .bind(settings.language.code())
        .bind(&settings.api_key)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
