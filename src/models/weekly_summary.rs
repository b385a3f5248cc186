use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{Category, MicroAction};

/// Aggregated view over one Monday-Sunday week, keyed by `week_start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    #[serde(default)]
    pub averages: BTreeMap<String, f64>,
    #[serde(default)]
    pub category_averages: BTreeMap<Category, f64>,
    #[serde(default)]
    pub critical_areas: Vec<CriticalArea>,
    #[serde(default)]
    pub micro_actions: Vec<MicroAction>,
    #[serde(default)]
    pub entry_count: usize,
    /// Assistant text. Carried over on regeneration, never computed here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude_summary: Option<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalArea {
    pub question_id: String,
    pub category: Category,
    pub score: f64,
}

#[derive(Debug, Deserialize)]
pub struct SummaryRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
