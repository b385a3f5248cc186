use std::collections::BTreeMap;

use crate::catalog::questions::category_of;
use crate::catalog::Category;
use crate::models::daily_entry::DailyEntry;

/// Question id -> mean score. A question nobody answered has no key.
pub type Averages = BTreeMap<String, f64>;

/// Per-question arithmetic mean over the scores present in `entries`.
pub fn weekly_averages(entries: &[DailyEntry]) -> Averages {
    let mut totals: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for entry in entries {
        for (id, score) in &entry.scores {
            let slot = totals.entry(id.as_str()).or_insert((0, 0));
            slot.0 += u32::from(*score);
            slot.1 += 1;
        }
    }

    totals
        .into_iter()
        .map(|(id, (sum, count))| (id.to_string(), f64::from(sum) / f64::from(count)))
        .collect()
}

/// A single day's raw scores viewed as averages, for day-scoped recommendations.
pub fn day_averages(entry: &DailyEntry) -> Averages {
    entry
        .scores
        .iter()
        .map(|(id, score)| (id.clone(), f64::from(*score)))
        .collect()
}

/// Category -> mean of its question averages. Categories with no scored
/// question are omitted.
pub fn category_averages(averages: &Averages) -> BTreeMap<Category, f64> {
    let mut totals: BTreeMap<Category, (f64, u32)> = BTreeMap::new();
    for (id, avg) in averages {
        if let Some(category) = category_of(id) {
            let slot = totals.entry(category).or_insert((0.0, 0));
            slot.0 += avg;
            slot.1 += 1;
        }
    }

    totals
        .into_iter()
        .map(|(category, (sum, count))| (category, sum / f64::from(count)))
        .collect()
}
