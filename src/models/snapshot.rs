use serde::{Deserialize, Serialize};

use super::daily_entry::DailyEntry;
use super::settings::AppSettings;
use super::weekly_summary::WeeklySummary;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Whole-journal document. Layout of the JSON store file and of
/// export/import payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub entries: Vec<DailyEntry>,
    #[serde(default)]
    pub summaries: Vec<WeeklySummary>,
    #[serde(default)]
    pub settings: AppSettings,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

impl Default for JournalSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            entries: Vec::new(),
            summaries: Vec::new(),
            settings: AppSettings::default(),
        }
    }
}

/// POST /api/import acknowledgment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub imported_entries: usize,
    pub regenerated_weeks: usize,
    pub dropped_score_keys: usize,
}
