use std::collections::BTreeSet;

use crate::catalog::micro_actions::{actions_for, preferred_action};
use crate::catalog::questions::{category_of, question_rank};
use crate::catalog::{Category, MicroAction, Priority};
use crate::models::weekly_summary::CriticalArea;

use super::aggregator::Averages;

pub const MAX_ACTIONS: usize = 5;
/// Only the lowest few critical areas get a high-priority action.
pub const CRITICAL_CONSIDERED: usize = 3;

/// Picks at most [`MAX_ACTIONS`] actions, one per category:
///
/// 1. the high-priority action for each of the first three critical areas;
/// 2. the physiological baseline (sleep) if step 1 did not cover it;
/// 3. medium-priority actions for the weakest remaining scored questions.
///
/// Input with no data at all yields no actions.
pub fn recommend(averages: &Averages, critical: &[CriticalArea]) -> Vec<MicroAction> {
    if averages.is_empty() && critical.is_empty() {
        return Vec::new();
    }

    let mut used: BTreeSet<Category> = BTreeSet::new();
    let mut picked: Vec<MicroAction> = Vec::new();

    for area in critical.iter().take(CRITICAL_CONSIDERED) {
        if !used.insert(area.category) {
            continue;
        }
        if let Some(action) = preferred_action(area.category, Priority::High) {
            picked.push(action.into());
        }
    }

    if used.insert(Category::Physiological) {
        if let Some(action) = actions_for(Category::Physiological).next() {
            picked.push(action.into());
        }
    }

    if picked.len() < MAX_ACTIONS {
        let mut weakest: Vec<(&str, f64, Category)> = averages
            .iter()
            .filter_map(|(id, avg)| category_of(id).map(|c| (id.as_str(), *avg, c)))
            .filter(|(_, _, category)| !used.contains(category))
            .collect();
        weakest.sort_by(|a, b| {
            a.1.total_cmp(&b.1)
                .then_with(|| question_rank(a.0).cmp(&question_rank(b.0)))
        });

        for (_, _, category) in weakest {
            if picked.len() >= MAX_ACTIONS {
                break;
            }
            if !used.insert(category) {
                continue;
            }
            if let Some(action) = preferred_action(category, Priority::Medium) {
                picked.push(action.into());
            }
        }
    }

    picked.truncate(MAX_ACTIONS);
    picked
}
