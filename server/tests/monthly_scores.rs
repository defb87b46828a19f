//! Scoring over repository data: the same assembly the score handlers
//! perform, against a real database.

mod common;

use std::collections::HashSet;

use common::{assign_to_roster, seed_admin, seed_employee, seed_tutor, setup_db};
use sqlx::SqlitePool;
use tutoria_server::compliance::calendar::business_days;
use tutoria_server::compliance::score::{employee_score, tutor_score, ScorePolicy};
use tutoria_server::db::repository::{attendance, report};
use tutoria_server::utils::time;
use shared::models::{AttendanceMark, AttendanceStatus, ReportData, ReportSection};

async fn mark(pool: &SqlitePool, employee_id: i64, date: &str, status: AttendanceStatus) {
    let payload = AttendanceMark {
        employee_id,
        date: date.to_string(),
        status,
        comment: None,
        arrival_time: None,
        permission_type: None,
        start_date: None,
        end_date: None,
    };
    attendance::mark(pool, &payload).await.unwrap();
}

#[tokio::test]
async fn perfect_employee_month_scores_100() {
    let (_dir, pool) = setup_db().await;
    let admin = seed_admin(&pool, "coordinator").await;
    let tutor = seed_tutor(&pool, "tutor_a", Some(admin.id)).await;
    let employee = seed_employee(&pool, "Ana García").await;
    assign_to_roster(&pool, employee.id, tutor.id).await;

    let days = business_days(2024, 1, &HashSet::new());
    assert_eq!(days.len(), 23);

    let mut data = ReportData::default();
    for day in &days {
        use chrono::Datelike;
        mark(
            &pool,
            employee.id,
            &day.format("%Y-%m-%d").to_string(),
            AttendanceStatus::Present,
        )
        .await;
        data.apply_cell(ReportSection::Faltantes, &day.day().to_string(), "check", None);
    }
    for k in 1..=2u32 {
        data.apply_cell(ReportSection::Guias, &k.to_string(), "check", None);
    }
    for k in 1..=4u32 {
        data.apply_cell(ReportSection::Tableros, &k.to_string(), "check", None);
    }
    report::upsert(&pool, employee.id, 1, 2024, &data).await.unwrap();

    let pattern = time::month_pattern(2024, 1);
    let records = attendance::find_for_employees(&pool, &[employee.id], Some(&pattern))
        .await
        .unwrap();
    let stored = report::find_by_key(&pool, employee.id, 1, 2024)
        .await
        .unwrap()
        .unwrap()
        .parsed_data();

    let policy = ScorePolicy::default();
    let score = employee_score(&policy, &days, &records, Some(&stored));
    assert_eq!(score.total, 100.0);
    assert_eq!(score.band, "Excellent");

    let tutor_view = tutor_score(&policy, &days, 1, &records, &[stored]);
    assert_eq!(tutor_view.total, 100.0);
    assert_eq!(tutor_view.band, "Excellent");
}

#[tokio::test]
async fn upsert_is_full_replace_for_the_day() {
    let (_dir, pool) = setup_db().await;
    let admin = seed_admin(&pool, "coordinator").await;
    let tutor = seed_tutor(&pool, "tutor_a", Some(admin.id)).await;
    let employee = seed_employee(&pool, "Ana García").await;
    assign_to_roster(&pool, employee.id, tutor.id).await;

    mark(&pool, employee.id, "2024-01-02", AttendanceStatus::Absent).await;
    mark(&pool, employee.id, "2024-01-02", AttendanceStatus::Present).await;

    let record = attendance::find_by_key(&pool, employee.id, "2024-01-02")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, AttendanceStatus::Present);

    // `none` deletes the mark entirely
    mark(&pool, employee.id, "2024-01-02", AttendanceStatus::None).await;
    assert!(attendance::find_by_key(&pool, employee.id, "2024-01-02")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn report_cell_patch_round_trip() {
    let (_dir, pool) = setup_db().await;
    let admin = seed_admin(&pool, "coordinator").await;
    let tutor = seed_tutor(&pool, "tutor_a", Some(admin.id)).await;
    let employee = seed_employee(&pool, "Ana García").await;
    assign_to_roster(&pool, employee.id, tutor.id).await;

    report::patch_cell(&pool, employee.id, 1, 2024, ReportSection::Faltantes, "5", "check", None)
        .await
        .unwrap();
    report::patch_cell(
        &pool,
        employee.id,
        1,
        2024,
        ReportSection::Tableros,
        "2",
        "cross",
        Some("sin evidencia".to_string()),
    )
    .await
    .unwrap();

    let data = report::find_by_key(&pool, employee.id, 1, 2024)
        .await
        .unwrap()
        .unwrap()
        .parsed_data();
    assert_eq!(data.faltantes["5"].status, "check");
    assert_eq!(data.tableros["2"].comment.as_deref(), Some("sin evidencia"));
    assert_eq!(data.complete_count(), 1);

    // "empty" clears the slot
    report::patch_cell(&pool, employee.id, 1, 2024, ReportSection::Faltantes, "5", "empty", None)
        .await
        .unwrap();
    let data = report::find_by_key(&pool, employee.id, 1, 2024)
        .await
        .unwrap()
        .unwrap()
        .parsed_data();
    assert!(data.faltantes.is_empty());

    let months = report::archived_months(&pool).await.unwrap();
    assert_eq!(months, vec![(2024, 1, 1)]);
}
