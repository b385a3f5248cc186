use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use validator::Validate;

use crate::catalog::questions::is_known_question;
use crate::catalog::MicroAction;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;
pub const MAX_SLIDER: u8 = 10;

/// One day's answers. `scores` only ever holds answered catalog questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub scores: BTreeMap<String, u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anxiety: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depression: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joy: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anger: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gratitude: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    /// Snapshot taken when day actions were generated; never recomputed on read.
    #[serde(default)]
    pub micro_actions: Vec<MicroAction>,
    #[serde(default)]
    pub completed_habits: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyEntry {
    pub fn new(date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            date,
            scores: BTreeMap::new(),
            mood: None,
            anxiety: None,
            depression: None,
            joy: None,
            anger: None,
            gratitude: None,
            notes: None,
            ai_summary: None,
            micro_actions: Vec::new(),
            completed_habits: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Drops score keys that are not in the question catalog or whose value
    /// is off the 1-5 scale. Returns the dropped keys.
    pub fn retain_known_scores(&mut self) -> Vec<String> {
        let mut dropped = Vec::new();
        self.scores.retain(|id, score| {
            let keep = is_known_question(id) && (MIN_SCORE..=MAX_SCORE).contains(score);
            if !keep {
                dropped.push(id.clone());
            }
            keep
        });
        if !dropped.is_empty() {
            tracing::debug!(date = %self.date, dropped = ?dropped, "Dropped stale score keys");
        }
        dropped
    }

    pub fn slider(&self, slider: Slider) -> Option<u8> {
        match slider {
            Slider::Anxiety => self.anxiety,
            Slider::Depression => self.depression,
            Slider::Joy => self.joy,
            Slider::Anger => self.anger,
            Slider::Gratitude => self.gratitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Awful,
    Bad,
    Okay,
    Good,
    Great,
}

impl Mood {
    pub fn label(self) -> &'static str {
        match self {
            Mood::Awful => "awful",
            Mood::Bad => "bad",
            Mood::Okay => "okay",
            Mood::Good => "good",
            Mood::Great => "great",
        }
    }
}

/// The 0-10 daily sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    Anxiety,
    Depression,
    Joy,
    Anger,
    Gratitude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Low,
    Moderate,
    High,
}

impl Slider {
    pub const ALL: [Slider; 5] = [
        Slider::Anxiety,
        Slider::Depression,
        Slider::Joy,
        Slider::Anger,
        Slider::Gratitude,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Slider::Anxiety => "anxiety",
            Slider::Depression => "depression",
            Slider::Joy => "joy",
            Slider::Anger => "anger",
            Slider::Gratitude => "gratitude",
        }
    }

    pub fn band(value: u8) -> Band {
        match value {
            0..=3 => Band::Low,
            4..=6 => Band::Moderate,
            _ => Band::High,
        }
    }

    /// Human label for a value; wording depends on whether high is good.
    pub fn label(self, value: u8) -> &'static str {
        match (self, Self::band(value)) {
            (Slider::Anxiety, Band::Low) => "calm",
            (Slider::Anxiety, Band::Moderate) => "uneasy",
            (Slider::Anxiety, Band::High) => "very anxious",
            (Slider::Depression, Band::Low) => "light",
            (Slider::Depression, Band::Moderate) => "low",
            (Slider::Depression, Band::High) => "heavy",
            (Slider::Joy, Band::Low) => "joyless",
            (Slider::Joy, Band::Moderate) => "content",
            (Slider::Joy, Band::High) => "joyful",
            (Slider::Anger, Band::Low) => "at ease",
            (Slider::Anger, Band::Moderate) => "irritated",
            (Slider::Anger, Band::High) => "angry",
            (Slider::Gratitude, Band::Low) => "ungrateful",
            (Slider::Gratitude, Band::Moderate) => "appreciative",
            (Slider::Gratitude, Band::High) => "deeply grateful",
        }
    }

    /// True when the value sits in the band that warrants attention.
    pub fn is_concerning(self, value: u8) -> bool {
        match self {
            Slider::Anxiety | Slider::Depression | Slider::Anger => Self::band(value) == Band::High,
            Slider::Joy | Slider::Gratitude => Self::band(value) == Band::Low,
        }
    }
}

/// POST /api/entries. Absent fields keep the stored value; `scores`, when
/// present, replaces the stored map.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertEntryRequest {
    pub date: Option<NaiveDate>,
    pub scores: Option<BTreeMap<String, u8>>,
    pub mood: Option<Mood>,
    #[validate(range(max = 10, message = "Anxiety must be 0-10"))]
    pub anxiety: Option<u8>,
    #[validate(range(max = 10, message = "Depression must be 0-10"))]
    pub depression: Option<u8>,
    #[validate(range(max = 10, message = "Joy must be 0-10"))]
    pub joy: Option<u8>,
    #[validate(range(max = 10, message = "Anger must be 0-10"))]
    pub anger: Option<u8>,
    #[validate(range(max = 10, message = "Gratitude must be 0-10"))]
    pub gratitude: Option<u8>,
    #[validate(length(max = 5000, message = "Notes must be under 5000 characters"))]
    pub notes: Option<String>,
    pub completed_habits: Option<BTreeSet<String>>,
}

impl UpsertEntryRequest {
    /// Every score key must be a catalog question and every value on the 1-5 scale.
    pub fn validate_scores(&self) -> Result<(), String> {
        let Some(scores) = &self.scores else {
            return Ok(());
        };
        for (id, score) in scores {
            if !is_known_question(id) {
                return Err(format!("Unknown question id: {}", id));
            }
            if !(MIN_SCORE..=MAX_SCORE).contains(score) {
                return Err(format!("Score for {} must be between 1 and 5", id));
            }
        }
        Ok(())
    }

    /// Merges the request into `entry` (a stored record or a fresh one).
    pub fn apply_to(self, entry: &mut DailyEntry) {
        if let Some(scores) = self.scores {
            entry.scores = scores;
        }
        if self.mood.is_some() {
            entry.mood = self.mood;
        }
        if self.anxiety.is_some() {
            entry.anxiety = self.anxiety;
        }
        if self.depression.is_some() {
            entry.depression = self.depression;
        }
        if self.joy.is_some() {
            entry.joy = self.joy;
        }
        if self.anger.is_some() {
            entry.anger = self.anger;
        }
        if self.gratitude.is_some() {
            entry.gratitude = self.gratitude;
        }
        if self.notes.is_some() {
            entry.notes = self.notes;
        }
        if let Some(habits) = self.completed_habits {
            entry.completed_habits = habits;
        }
        entry.updated_at = Utc::now();
    }
}

#[derive(Debug, Deserialize)]
pub struct EntryRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
