use crate::catalog::questions::{category_of, question_rank};
use crate::models::weekly_summary::CriticalArea;

use super::aggregator::Averages;

/// Scores strictly below this (on the 1-5 scale) are critical.
pub const CRITICAL_THRESHOLD: f64 = 2.5;

/// Critical questions, lowest score first. Equal scores keep questionnaire
/// order.
pub fn critical_areas(averages: &Averages) -> Vec<CriticalArea> {
    let mut areas: Vec<CriticalArea> = averages
        .iter()
        .filter(|(_, score)| **score < CRITICAL_THRESHOLD)
        .filter_map(|(id, score)| {
            category_of(id).map(|category| CriticalArea {
                question_id: id.clone(),
                category,
                score: *score,
            })
        })
        .collect();

    areas.sort_by(|a, b| {
        a.score
            .total_cmp(&b.score)
            .then_with(|| question_rank(&a.question_id).cmp(&question_rank(&b.question_id)))
    });
    areas
}
