//! Monthly compliance scorer.
//!
//! Two pure scoring functions share the same shape: an attendance
//! component and a report component, each worth half of the total.
//! Employees are scored on their own coverage and report cells; tutors
//! on how completely they filled attendance and reports for their whole
//! roster. Zero denominators (no business days, empty roster) score 0
//! rather than erroring.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use shared::models::attendance::AttendanceRecord;
use shared::models::report::ReportData;

/// Weights and slot counts for a month's score.
#[derive(Debug, Clone, Copy)]
pub struct ScorePolicy {
    pub attendance_points: f64,
    pub report_points: f64,
    pub guide_slots: u32,
    pub board_slots: u32,
}

impl Default for ScorePolicy {
    fn default() -> Self {
        Self {
            attendance_points: 50.0,
            report_points: 50.0,
            guide_slots: 2,
            board_slots: 4,
        }
    }
}

/// Qualitative band for a total score.
pub fn band(total: f64) -> &'static str {
    if total >= 90.0 {
        "Excellent"
    } else if total >= 70.0 {
        "Good"
    } else if total >= 50.0 {
        "Fair"
    } else {
        "Low"
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Per-status counters over a month of records.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusCounters {
    pub present: u32,
    pub absent: u32,
    pub delay: u32,
    pub vacation: u32,
    pub permission: u32,
    pub incapacity: u32,
}

impl StatusCounters {
    pub fn of(records: &[AttendanceRecord]) -> Self {
        use shared::models::attendance::AttendanceStatus::*;
        let mut counters = Self::default();
        for record in records {
            match record.status {
                Present => counters.present += 1,
                Absent => counters.absent += 1,
                Delay => counters.delay += 1,
                Vacation => counters.vacation += 1,
                Permission => counters.permission += 1,
                Incapacity => counters.incapacity += 1,
                None => {}
            }
        }
        counters
    }
}

/// Monthly score for a single employee.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeScore {
    pub attendance_score: f64,
    pub report_score: f64,
    pub total: f64,
    pub band: &'static str,
    pub business_days: usize,
    pub covered_days: usize,
    pub complete_cells: usize,
    pub expected_cells: usize,
    pub counters: StatusCounters,
}

/// One employee's month: covered business days plus completed report
/// cells over the expected cell count.
pub fn employee_score(
    policy: &ScorePolicy,
    business_days: &[NaiveDate],
    records: &[AttendanceRecord],
    report: Option<&ReportData>,
) -> EmployeeScore {
    let covered_dates: HashSet<&str> = records
        .iter()
        .filter(|r| r.status.covers_day())
        .map(|r| r.date.as_str())
        .collect();
    let day_keys: Vec<String> = business_days
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    let covered_days = day_keys
        .iter()
        .filter(|d| covered_dates.contains(d.as_str()))
        .count();

    let expected_cells =
        business_days.len() + policy.guide_slots as usize + policy.board_slots as usize;
    let complete_cells = report
        .map(|r| r.complete_count().min(expected_cells))
        .unwrap_or(0);

    let attendance_score = policy.attendance_points * ratio(covered_days, business_days.len());
    let report_score = policy.report_points * ratio(complete_cells, expected_cells);
    let total = attendance_score + report_score;

    EmployeeScore {
        attendance_score,
        report_score,
        total,
        band: band(total),
        business_days: business_days.len(),
        covered_days,
        complete_cells,
        expected_cells,
        counters: StatusCounters::of(records),
    }
}

/// Monthly diligence score for a tutor over their roster.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorScore {
    pub attendance_score: f64,
    pub report_score: f64,
    pub total: f64,
    pub band: &'static str,
    pub business_days: usize,
    pub roster_size: usize,
    pub covered_slots: usize,
    pub total_slots: usize,
    pub complete_reports: usize,
}

/// Tutor diligence: filled (employee, business day) slots over the full
/// grid, plus fully-filled report documents over the roster. Report
/// completeness here is presence-based, any mark counts.
pub fn tutor_score(
    policy: &ScorePolicy,
    business_days: &[NaiveDate],
    roster_size: usize,
    records: &[AttendanceRecord],
    reports: &[ReportData],
) -> TutorScore {
    let day_keys: HashSet<String> = business_days
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    let covered_slots = records
        .iter()
        .filter(|r| day_keys.contains(&r.date))
        .map(|r| (r.employee_id, r.date.as_str()))
        .collect::<HashSet<_>>()
        .len();
    let total_slots = business_days.len() * roster_size;

    let day_slots: Vec<u32> = business_days.iter().map(|d| d.day()).collect();
    let complete_reports = reports
        .iter()
        .filter(|r| r.is_fully_filled(&day_slots, policy.guide_slots, policy.board_slots))
        .count();

    let attendance_score = policy.attendance_points * ratio(covered_slots, total_slots);
    let report_score = policy.report_points * ratio(complete_reports, roster_size);
    let total = attendance_score + report_score;

    TutorScore {
        attendance_score,
        report_score,
        total,
        band: band(total),
        business_days: business_days.len(),
        roster_size,
        covered_slots,
        total_slots,
        complete_reports,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::calendar::business_days;
    use shared::models::attendance::AttendanceStatus;
    use shared::models::report::ReportSection;

    fn record(employee_id: i64, date: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: 0,
            employee_id,
            date: date.to_string(),
            status,
            comment: None,
            arrival_time: None,
            permission_type: None,
            start_date: None,
            end_date: None,
            created_at: 0,
        }
    }

    fn full_report(days: &[NaiveDate]) -> ReportData {
        let mut data = ReportData::default();
        for d in days {
            data.apply_cell(ReportSection::Faltantes, &d.day().to_string(), "check", None);
        }
        for k in 1..=2u32 {
            data.apply_cell(ReportSection::Guias, &k.to_string(), "check", None);
        }
        for k in 1..=4u32 {
            data.apply_cell(ReportSection::Tableros, &k.to_string(), "check", None);
        }
        data
    }

    #[test]
    fn perfect_month_is_excellent() {
        let days = business_days(2024, 1, &HashSet::new());
        let records: Vec<_> = days
            .iter()
            .map(|d| record(1, &d.format("%Y-%m-%d").to_string(), AttendanceStatus::Present))
            .collect();
        let report = full_report(&days);

        let score = employee_score(&ScorePolicy::default(), &days, &records, Some(&report));
        assert_eq!(score.attendance_score, 50.0);
        assert_eq!(score.report_score, 50.0);
        assert_eq!(score.total, 100.0);
        assert_eq!(score.band, "Excellent");
        assert_eq!(score.counters.present, days.len() as u32);
    }

    #[test]
    fn absences_lose_attendance_points_only() {
        let days = business_days(2024, 1, &HashSet::new());
        // Half the days present, the rest absent: absent still counts in
        // the raw counters but never toward coverage.
        let records: Vec<_> = days
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let status = if i % 2 == 0 {
                    AttendanceStatus::Present
                } else {
                    AttendanceStatus::Absent
                };
                record(1, &d.format("%Y-%m-%d").to_string(), status)
            })
            .collect();

        let score = employee_score(&ScorePolicy::default(), &days, &records, None);
        assert!(score.attendance_score > 0.0 && score.attendance_score < 50.0);
        assert_eq!(score.report_score, 0.0);
        assert_eq!(score.covered_days, 12);
        assert_eq!(score.counters.absent, 11);
    }

    #[test]
    fn vacation_and_permission_cover_the_day() {
        let days = business_days(2024, 1, &HashSet::new());
        let records: Vec<_> = days
            .iter()
            .map(|d| record(1, &d.format("%Y-%m-%d").to_string(), AttendanceStatus::Vacation))
            .collect();
        let score = employee_score(&ScorePolicy::default(), &days, &records, None);
        assert_eq!(score.attendance_score, 50.0);
    }

    #[test]
    fn empty_month_scores_zero() {
        let score = employee_score(&ScorePolicy::default(), &[], &[], None);
        assert_eq!(score.total, 0.0);
        assert_eq!(score.band, "Low");
    }

    #[test]
    fn weekend_records_do_not_count() {
        let days = business_days(2024, 1, &HashSet::new());
        // Jan 6 2024 is a Saturday.
        let records = vec![record(1, "2024-01-06", AttendanceStatus::Present)];
        let score = employee_score(&ScorePolicy::default(), &days, &records, None);
        assert_eq!(score.covered_days, 0);
    }

    #[test]
    fn tutor_with_complete_roster_is_excellent() {
        let days = business_days(2024, 1, &HashSet::new());
        let mut records = Vec::new();
        for employee in [1, 2] {
            for d in &days {
                records.push(record(
                    employee,
                    &d.format("%Y-%m-%d").to_string(),
                    AttendanceStatus::Present,
                ));
            }
        }
        let reports = vec![full_report(&days), full_report(&days)];

        let score = tutor_score(&ScorePolicy::default(), &days, 2, &records, &reports);
        assert_eq!(score.total, 100.0);
        assert_eq!(score.band, "Excellent");
        assert_eq!(score.covered_slots, days.len() * 2);
    }

    #[test]
    fn tutor_slot_coverage_counts_any_status() {
        let days = business_days(2024, 1, &HashSet::new());
        let records: Vec<_> = days
            .iter()
            .map(|d| record(1, &d.format("%Y-%m-%d").to_string(), AttendanceStatus::Absent))
            .collect();
        let score = tutor_score(&ScorePolicy::default(), &days, 1, &records, &[]);
        // Absent marks still show the tutor filled the grid.
        assert_eq!(score.attendance_score, 50.0);
        assert_eq!(score.report_score, 0.0);
        assert_eq!(score.band, "Fair");
    }

    #[test]
    fn empty_roster_scores_zero() {
        let days = business_days(2024, 1, &HashSet::new());
        let score = tutor_score(&ScorePolicy::default(), &days, 0, &[], &[]);
        assert_eq!(score.total, 0.0);
    }

    #[test]
    fn band_thresholds() {
        assert_eq!(band(90.0), "Excellent");
        assert_eq!(band(89.9), "Good");
        assert_eq!(band(70.0), "Good");
        assert_eq!(band(50.0), "Fair");
        assert_eq!(band(49.9), "Low");
    }
}
