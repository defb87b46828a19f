//! Business-day calendar.
//!
//! A business day is a Monday..Friday date of the month that is not in
//! the holiday set. The holiday set comes from the holiday provider and
//! may be empty when the provider is unavailable.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// All business days of `month` (one-based) in `year`, ascending.
pub fn business_days(year: i32, month: u32, holidays: &HashSet<NaiveDate>) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let mut days = Vec::new();
    let mut day = first;
    while day.month() == month {
        let weekday = day.weekday();
        let is_weekend = weekday == Weekday::Sat || weekday == Weekday::Sun;
        if !is_weekend && !holidays.contains(&day) {
            days.push(day);
        }
        day += Duration::days(1);
    }
    days
}

/// Number of business days in the month, as a convenience for score
/// denominators.
pub fn business_day_count(year: i32, month: u32, holidays: &HashSet<NaiveDate>) -> usize {
    business_days(year, month, holidays).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn january_2024_has_23_business_days() {
        let days = business_days(2024, 1, &HashSet::new());
        assert_eq!(days.len(), 23);
        // Jan 1 2024 is a Monday, Jan 6/7 the first weekend.
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(!days.contains(&NaiveDate::from_ymd_opt(2024, 1, 6).unwrap()));
        assert!(!days.contains(&NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()));
    }

    #[test]
    fn holidays_are_excluded() {
        let mut holidays = HashSet::new();
        holidays.insert(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let days = business_days(2024, 1, &holidays);
        assert_eq!(days.len(), 22);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn weekend_holiday_changes_nothing() {
        let mut holidays = HashSet::new();
        holidays.insert(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap());
        assert_eq!(business_day_count(2024, 1, &holidays), 23);
    }

    #[test]
    fn invalid_month_is_empty() {
        assert!(business_days(2024, 13, &HashSet::new()).is_empty());
    }

    #[test]
    fn result_is_ascending() {
        let days = business_days(2024, 2, &HashSet::new());
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }
}
