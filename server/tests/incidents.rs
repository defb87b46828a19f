//! Incident open-state filtering, including the legacy status spelling.

mod common;

use tutoria_server::db::repository::incident;
use shared::models::incident::{IncidentCreate, IncidentWithNames, LEGACY_IN_PROGRESS};

async fn report_incident(
    pool: &sqlx::SqlitePool,
    employee_id: i64,
    status: &str,
) -> i64 {
    incident::create(
        pool,
        IncidentCreate {
            employee_id,
            incident_type: "falta".to_string(),
            status: status.to_string(),
            description: None,
            start_date: None,
            end_date: None,
        },
    )
    .await
    .expect("create incident")
}

#[tokio::test]
async fn active_set_includes_legacy_status_and_excludes_resolved() {
    let (_dir, pool) = common::setup_db().await;
    let tutor = common::seed_tutor(&pool, "clara", None).await;
    let employee = common::seed_employee(&pool, "Ana García").await;
    common::assign_to_roster(&pool, employee.id, tutor.id).await;

    let legacy_id = report_incident(&pool, employee.id, LEGACY_IN_PROGRESS).await;
    report_incident(&pool, employee.id, "pending").await;
    report_incident(&pool, employee.id, "resolved").await;

    let active = incident::find_active_for_owners(&pool, &[tutor.id])
        .await
        .expect("active incidents");
    assert_eq!(active.len(), 2);
    assert!(active.iter().any(|i| i.id == legacy_id));
    assert!(active.iter().all(|i| i.status != "resolved"));

    let count = incident::count_active_for_owners(&pool, &[tutor.id])
        .await
        .expect("active count");
    assert_eq!(count, 2);
}

#[tokio::test]
async fn legacy_status_normalizes_in_responses() {
    let (_dir, pool) = common::setup_db().await;
    let tutor = common::seed_tutor(&pool, "clara", None).await;
    let employee = common::seed_employee(&pool, "Ana García").await;
    common::assign_to_roster(&pool, employee.id, tutor.id).await;

    report_incident(&pool, employee.id, LEGACY_IN_PROGRESS).await;

    let normalized: Vec<IncidentWithNames> = incident::find_active_for_owners(&pool, &[tutor.id])
        .await
        .expect("active incidents")
        .into_iter()
        .map(IncidentWithNames::normalized)
        .collect();
    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized[0].status, "in_progress");
}
