//! Plain-text prompts for the external assistant. The assistant's reply is
//! stored verbatim, so nothing here asks for structured output.

use std::fmt::Write;

use crate::catalog::questions::question;
use crate::models::daily_entry::{DailyEntry, Slider};
use crate::models::settings::AppSettings;
use crate::models::weekly_summary::WeeklySummary;

/// Weeks of category history included in a weekly prompt.
pub const HISTORY_WEEKS: usize = 4;
/// Days of mood history included in a daily prompt.
pub const MOOD_HISTORY_DAYS: usize = 7;

fn language_line(settings: &AppSettings) -> String {
    format!(
        "Respond in {} ({}). Keep it warm, concrete and under 250 words.",
        settings.language.name(),
        settings.language.code()
    )
}

fn question_text(id: &str) -> &str {
    question(id).map(|q| q.text).unwrap_or(id)
}

fn slider_table(out: &mut String, entries: &[DailyEntry]) {
    let _ = writeln!(out, "| Date | Anxiety | Depression | Joy | Anger | Gratitude |");
    let _ = writeln!(out, "|---|---|---|---|---|---|");
    for entry in entries {
        let cells: Vec<String> = Slider::ALL
            .iter()
            .map(|s| {
                entry
                    .slider(*s)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".into())
            })
            .collect();
        let _ = writeln!(out, "| {} | {} |", entry.date, cells.join(" | "));
    }
}

/// Weekly coaching prompt. `history` holds earlier summaries, newest last;
/// only the last [`HISTORY_WEEKS`] are used.
pub fn weekly_prompt(
    settings: &AppSettings,
    summary: &WeeklySummary,
    history: &[WeeklySummary],
    entries: &[DailyEntry],
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "You are a supportive wellbeing coach. Review this person's week ({} to {}) \
         and write a short reflection with two or three practical suggestions.",
        summary.week_start, summary.week_end
    );
    let _ = writeln!(out, "{}\n", language_line(settings));

    let recent = &history[history.len().saturating_sub(HISTORY_WEEKS)..];
    if !recent.is_empty() {
        let _ = writeln!(out, "## Previous weeks (category averages, 1-5)");
        for past in recent {
            let cells: Vec<String> = past
                .category_averages
                .iter()
                .map(|(c, avg)| format!("{} {:.1}", c.as_str(), avg))
                .collect();
            let _ = writeln!(out, "- Week of {}: {}", past.week_start, cells.join(", "));
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "## This week ({} daily entries)",
        summary.entry_count
    );
    if summary.averages.is_empty() {
        let _ = writeln!(out, "No questions were answered this week.");
    } else {
        let _ = writeln!(out, "| Question | Average |");
        let _ = writeln!(out, "|---|---|");
        for (id, avg) in &summary.averages {
            let _ = writeln!(out, "| {} | {:.2} |", question_text(id), avg);
        }
    }
    out.push('\n');

    if !summary.critical_areas.is_empty() {
        let _ = writeln!(out, "## Critical areas (average below 2.5)");
        for area in &summary.critical_areas {
            let _ = writeln!(
                out,
                "- {} [{}]: {:.2}",
                question_text(&area.question_id),
                area.category.as_str(),
                area.score
            );
        }
        out.push('\n');
    }

    if !summary.micro_actions.is_empty() {
        let _ = writeln!(out, "## Suggested micro-actions");
        for action in &summary.micro_actions {
            let _ = writeln!(out, "- {}: {}", action.title, action.description);
        }
        out.push('\n');
    }

    if entries.iter().any(|e| Slider::ALL.iter().any(|s| e.slider(*s).is_some())) {
        let _ = writeln!(out, "## Daily feelings (0-10)");
        slider_table(&mut out, entries);
    }

    out
}

/// Daily reflection prompt. `recent` holds the days before `entry`, oldest
/// first; only the last [`MOOD_HISTORY_DAYS`] are used.
pub fn daily_prompt(settings: &AppSettings, entry: &DailyEntry, recent: &[DailyEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "You are a supportive wellbeing coach. Write a brief reflection on this \
         person's day ({}) and one small thing they could try tomorrow.",
        entry.date
    );
    let _ = writeln!(out, "{}\n", language_line(settings));

    if let Some(mood) = entry.mood {
        let _ = writeln!(out, "Mood: {}\n", mood.label());
    }

    if !entry.scores.is_empty() {
        let _ = writeln!(out, "## Answers (1-5)");
        let _ = writeln!(out, "| Area | Question | Score |");
        let _ = writeln!(out, "|---|---|---|");
        for (id, score) in &entry.scores {
            let category = question(id).map(|q| q.category.as_str()).unwrap_or("-");
            let _ = writeln!(out, "| {} | {} | {} |", category, question_text(id), score);
        }
        out.push('\n');
    }

    let sliders: Vec<String> = Slider::ALL
        .iter()
        .filter_map(|s| {
            entry.slider(*s).map(|v| {
                let flag = if s.is_concerning(v) { " (!)" } else { "" };
                format!("- {}: {}/10, {}{}", s.name(), v, s.label(v), flag)
            })
        })
        .collect();
    if !sliders.is_empty() {
        let _ = writeln!(out, "## Feelings");
        let _ = writeln!(out, "{}\n", sliders.join("\n"));
    }

    if let Some(notes) = entry.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        let _ = writeln!(out, "## Notes\n{}\n", notes.trim());
    }

    let moods: Vec<String> = recent[recent.len().saturating_sub(MOOD_HISTORY_DAYS)..]
        .iter()
        .filter_map(|e| e.mood.map(|m| format!("{} {}", e.date, m.label())))
        .collect();
    if !moods.is_empty() {
        let _ = writeln!(out, "## Mood over the previous days");
        let _ = writeln!(out, "{}", moods.join(", "));
    }

    out
}
