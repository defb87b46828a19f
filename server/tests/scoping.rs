//! Authorization scope and roster ownership behavior.

mod common;

use common::{assign_to_roster, seed_admin, seed_employee, seed_tutor, setup_db};
use tutoria_server::db::repository::{roster, user};

#[tokio::test]
async fn admin_scope_is_self_plus_supervised_tutors() {
    let (_dir, pool) = setup_db().await;
    let admin = seed_admin(&pool, "coordinator").await;
    let tutor_a = seed_tutor(&pool, "tutor_a", Some(admin.id)).await;
    let tutor_b = seed_tutor(&pool, "tutor_b", Some(admin.id)).await;
    let _other = seed_tutor(&pool, "tutor_elsewhere", None).await;

    let mut scope = user::resolve_authorized_ids(&pool, admin.id).await.unwrap();
    scope.sort();
    let mut expected = vec![admin.id, tutor_a.id, tutor_b.id];
    expected.sort();
    assert_eq!(scope, expected);
}

#[tokio::test]
async fn tutor_scope_is_only_themselves() {
    let (_dir, pool) = setup_db().await;
    let admin = seed_admin(&pool, "coordinator").await;
    let tutor = seed_tutor(&pool, "tutor_a", Some(admin.id)).await;

    let scope = user::resolve_authorized_ids(&pool, tutor.id).await.unwrap();
    assert_eq!(scope, vec![tutor.id]);
}

#[tokio::test]
async fn unknown_caller_resolves_to_empty_scope() {
    let (_dir, pool) = setup_db().await;
    let scope = user::resolve_authorized_ids(&pool, 9999).await.unwrap();
    assert!(scope.is_empty());

    // Empty scope means list queries return nothing rather than erroring
    let members = roster::members_for_owners(&pool, &scope).await.unwrap();
    assert!(members.is_empty());
}

#[tokio::test]
async fn readding_employee_replaces_roster_owner() {
    let (_dir, pool) = setup_db().await;
    let admin = seed_admin(&pool, "coordinator").await;
    let tutor_a = seed_tutor(&pool, "tutor_a", Some(admin.id)).await;
    let tutor_b = seed_tutor(&pool, "tutor_b", Some(admin.id)).await;
    let employee = seed_employee(&pool, "Ana García").await;

    assign_to_roster(&pool, employee.id, tutor_a.id).await;
    assert_eq!(
        roster::owner_of(&pool, employee.id).await.unwrap(),
        Some(tutor_a.id)
    );

    // Second add moves ownership instead of duplicating the row
    assign_to_roster(&pool, employee.id, tutor_b.id).await;
    assert_eq!(
        roster::owner_of(&pool, employee.id).await.unwrap(),
        Some(tutor_b.id)
    );

    let for_a = roster::members_for_owners(&pool, &[tutor_a.id]).await.unwrap();
    assert!(for_a.is_empty());
    let for_b = roster::members_for_owners(&pool, &[tutor_b.id]).await.unwrap();
    assert_eq!(for_b.len(), 1);
    assert_eq!(for_b[0].full_name, "Ana García");
}

#[tokio::test]
async fn admin_sees_supervised_rosters() {
    let (_dir, pool) = setup_db().await;
    let admin = seed_admin(&pool, "coordinator").await;
    let tutor = seed_tutor(&pool, "tutor_a", Some(admin.id)).await;
    let employee = seed_employee(&pool, "Luis Pérez").await;
    assign_to_roster(&pool, employee.id, tutor.id).await;

    let scope = user::resolve_authorized_ids(&pool, admin.id).await.unwrap();
    let members = roster::members_for_owners(&pool, &scope).await.unwrap();
    assert_eq!(members.len(), 1);

    assert_eq!(roster::count_for_owners(&pool, &scope).await.unwrap(), 1);
}
