use chrono::{Datelike, Duration, NaiveDate};

/// Dates the journal accepts, inclusive. Both ends are whole weeks
/// (Monday 1900-01-01 to Sunday 9999-12-26), so every week in the window
/// keeps four-digit years and sorts correctly as stored text.
pub fn supported_range() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN),
        NaiveDate::from_ymd_opt(9999, 12, 26).unwrap_or(NaiveDate::MAX),
    )
}

pub fn is_supported(date: NaiveDate) -> bool {
    let (min, max) = supported_range();
    (min..=max).contains(&date)
}

/// Monday and Sunday of the ISO week containing `anchor`. Clamped at the
/// edges of chrono's calendar instead of overflowing.
pub fn week_bounds(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days_since_monday = anchor.weekday().num_days_from_monday();
    let week_start = anchor
        .checked_sub_signed(Duration::days(days_since_monday as i64))
        .unwrap_or(NaiveDate::MIN);
    let week_end = week_start
        .checked_add_signed(Duration::days(6))
        .unwrap_or(NaiveDate::MAX);
    (week_start, week_end)
}

pub fn week_start(anchor: NaiveDate) -> NaiveDate {
    week_bounds(anchor).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn monday_anchor_starts_its_own_week() {
        assert_eq!(week_bounds(d(2024, 3, 4)), (d(2024, 3, 4), d(2024, 3, 10)));
    }

    #[test]
    fn sunday_anchor_belongs_to_preceding_monday() {
        assert_eq!(week_bounds(d(2024, 3, 10)), (d(2024, 3, 4), d(2024, 3, 10)));
    }

    #[test]
    fn week_can_span_year_boundary() {
        let (start, end) = week_bounds(d(2025, 1, 1));
        assert_eq!(start, d(2024, 12, 30));
        assert_eq!(end, d(2025, 1, 5));
        assert_eq!(start.weekday(), Weekday::Mon);
        assert_eq!(end.weekday(), Weekday::Sun);
    }

    #[test]
    fn supported_window_is_whole_weeks() {
        let (min, max) = supported_range();
        assert_eq!(week_bounds(min).0, min);
        assert_eq!(week_bounds(max).1, max);
        assert!(is_supported(min) && is_supported(max));
        assert!(!is_supported(d(1899, 12, 31)));
        assert!(!is_supported(d(9999, 12, 27)));
    }

    #[test]
    fn calendar_edges_do_not_overflow() {
        let (start, end) = week_bounds(NaiveDate::MAX);
        assert!(start <= NaiveDate::MAX);
        assert_eq!(end, NaiveDate::MAX);
        let (start, _) = week_bounds(NaiveDate::MIN);
        assert_eq!(start, NaiveDate::MIN);
    }
}
