//! Delay alert engine end to end: threshold, recipients, dedup.

mod common;

use common::{assign_to_roster, seed_admin, seed_employee, seed_tutor, setup_db};
use sqlx::SqlitePool;
use tutoria_server::compliance::delays::on_delay_marked;
use tutoria_server::db::repository::{alert, attendance};
use shared::models::{AttendanceMark, AttendanceStatus};

async fn mark_delay(pool: &SqlitePool, employee_id: i64, date: &str) {
    let payload = AttendanceMark {
        employee_id,
        date: date.to_string(),
        status: AttendanceStatus::Delay,
        comment: Some("llegó tarde".to_string()),
        arrival_time: Some("09:40".to_string()),
        permission_type: None,
        start_date: None,
        end_date: None,
    };
    attendance::mark(pool, &payload).await.unwrap();
    on_delay_marked(pool, employee_id, date).await.unwrap();
}

#[tokio::test]
async fn two_delays_produce_no_alert() {
    let (_dir, pool) = setup_db().await;
    let admin = seed_admin(&pool, "coordinator").await;
    let tutor = seed_tutor(&pool, "tutor_a", Some(admin.id)).await;
    let employee = seed_employee(&pool, "Ana García").await;
    assign_to_roster(&pool, employee.id, tutor.id).await;

    mark_delay(&pool, employee.id, "2024-03-04").await;
    mark_delay(&pool, employee.id, "2024-03-05").await;

    assert!(alert::find_for_user(&pool, tutor.id).await.unwrap().is_empty());
    assert!(alert::find_for_user(&pool, admin.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn third_delay_alerts_owner_and_supervisor_once() {
    let (_dir, pool) = setup_db().await;
    let admin = seed_admin(&pool, "coordinator").await;
    let tutor = seed_tutor(&pool, "tutor_a", Some(admin.id)).await;
    let employee = seed_employee(&pool, "Ana García").await;
    assign_to_roster(&pool, employee.id, tutor.id).await;

    mark_delay(&pool, employee.id, "2024-03-04").await;
    mark_delay(&pool, employee.id, "2024-03-05").await;
    mark_delay(&pool, employee.id, "2024-03-06").await;

    let tutor_alerts = alert::find_for_user(&pool, tutor.id).await.unwrap();
    let admin_alerts = alert::find_for_user(&pool, admin.id).await.unwrap();
    assert_eq!(tutor_alerts.len(), 1);
    assert_eq!(admin_alerts.len(), 1);

    let details = tutor_alerts[0].parsed_details().unwrap();
    assert_eq!(details.kind, "3_delays");
    assert_eq!(details.subtype, "accumulated");
    assert_eq!(details.employee_name, "Ana García");
    assert_eq!(details.month, "Marzo");
    assert_eq!(details.year, 2024);
    assert_eq!(details.count, 3);
    assert_eq!(details.latest_date, "2024-03-06");
    assert_eq!(details.delays.len(), 3);
    assert_eq!(details.delays[0].date, "2024-03-04");

    // Fourth delay in the same month is absorbed by the unique index
    mark_delay(&pool, employee.id, "2024-03-07").await;
    assert_eq!(alert::find_for_user(&pool, tutor.id).await.unwrap().len(), 1);
    assert_eq!(alert::find_for_user(&pool, admin.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn new_month_starts_a_fresh_threshold() {
    let (_dir, pool) = setup_db().await;
    let admin = seed_admin(&pool, "coordinator").await;
    let tutor = seed_tutor(&pool, "tutor_a", Some(admin.id)).await;
    let employee = seed_employee(&pool, "Ana García").await;
    assign_to_roster(&pool, employee.id, tutor.id).await;

    for date in ["2024-03-04", "2024-03-05", "2024-03-06"] {
        mark_delay(&pool, employee.id, date).await;
    }
    for date in ["2024-04-01", "2024-04-02", "2024-04-03"] {
        mark_delay(&pool, employee.id, date).await;
    }

    let alerts = alert::find_for_user(&pool, tutor.id).await.unwrap();
    assert_eq!(alerts.len(), 2);
    let months: Vec<i64> = alerts.iter().map(|a| a.month).collect();
    assert!(months.contains(&3) && months.contains(&4));
}

#[tokio::test]
async fn unassigned_employee_triggers_nothing() {
    let (_dir, pool) = setup_db().await;
    let _admin = seed_admin(&pool, "coordinator").await;
    let employee = seed_employee(&pool, "Suelto Sin Tutor").await;

    for date in ["2024-03-04", "2024-03-05", "2024-03-06"] {
        mark_delay(&pool, employee.id, date).await;
    }

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM alerts")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn mark_read_is_scoped_to_the_recipient() {
    let (_dir, pool) = setup_db().await;
    let admin = seed_admin(&pool, "coordinator").await;
    let tutor = seed_tutor(&pool, "tutor_a", Some(admin.id)).await;
    let employee = seed_employee(&pool, "Ana García").await;
    assign_to_roster(&pool, employee.id, tutor.id).await;

    for date in ["2024-03-04", "2024-03-05", "2024-03-06"] {
        mark_delay(&pool, employee.id, date).await;
    }

    let tutor_alert = &alert::find_unread_for_user(&pool, tutor.id).await.unwrap()[0];

    // The supervisor cannot read the tutor's copy
    assert!(alert::mark_read(&pool, tutor_alert.id, admin.id).await.is_err());

    alert::mark_read(&pool, tutor_alert.id, tutor.id).await.unwrap();
    assert!(alert::find_unread_for_user(&pool, tutor.id).await.unwrap().is_empty());
    assert_eq!(alert::find_unread_for_user(&pool, admin.id).await.unwrap().len(), 1);
}
