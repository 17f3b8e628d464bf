//! Integration tests for salary packages, payroll, payments and subscriptions.

mod common;

use assert_matches::assert_matches;
use common::{create_user, date, new_pickup, STAFF_ROLE_ID};
use sqlx::PgPool;
use wastewise_core::payroll::{compute_amounts, PackageFigures};
use wastewise_db::models::payment::{CreatePayment, PaymentQuery, STATUS_SUCCEEDED};
use wastewise_db::models::payroll::{CreatePayroll, PayrollQuery};
use wastewise_db::models::salary_package::{
    CreateSalaryPackage, SalaryPackage, UpdateSalaryPackage,
};
use wastewise_db::models::subscription::{CreateSubscription, SubscriptionQuery};
use wastewise_db::repositories::{
    PaymentRepo, PayrollRepo, PickupRepo, SalaryPackageRepo, SubscriptionRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn driver_package(pool: &PgPool) -> SalaryPackage {
    SalaryPackageRepo::create(
        pool,
        &CreateSalaryPackage {
            name: "Driver Grade A".into(),
            position: "Truck driver".into(),
            base_salary_cents: 300_000,
            allowance_cents: 20_000,
            deduction_cents: 15_000,
            currency: None,
            description: None,
        },
    )
    .await
    .unwrap()
}

fn payroll_for(staff_id: i64, package: &SalaryPackage, bonus: i64) -> CreatePayroll {
    let figures = PackageFigures {
        base_salary_cents: package.base_salary_cents,
        allowance_cents: package.allowance_cents,
        deduction_cents: package.deduction_cents,
    };
    CreatePayroll {
        staff_id,
        salary_package_id: package.id,
        period_start: date(2026, 10, 1),
        period_end: date(2026, 10, 31),
        amounts: compute_amounts(figures, bonus).unwrap(),
        currency: package.currency.clone(),
    }
}

// ---------------------------------------------------------------------------
// Salary packages
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_salary_package_crud(pool: PgPool) {
    let pkg = driver_package(&pool).await;
    assert_eq!(pkg.currency, "usd");

    let updated = SalaryPackageRepo::update(
        &pool,
        pkg.id,
        &UpdateSalaryPackage {
            allowance_cents: Some(25_000),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.allowance_cents, 25_000);
    assert_eq!(updated.base_salary_cents, 300_000);

    assert_eq!(SalaryPackageRepo::list(&pool).await.unwrap().len(), 1);
    assert!(SalaryPackageRepo::delete(&pool, pkg.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_package_in_use_cannot_be_deleted(pool: PgPool) {
    let staff = create_user(&pool, "driver@example.com", STAFF_ROLE_ID).await;
    let pkg = driver_package(&pool).await;
    PayrollRepo::create(&pool, &payroll_for(staff.id, &pkg, 0))
        .await
        .unwrap();

    let err = SalaryPackageRepo::delete(&pool, pkg.id).await.unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23503")
    );
}

// ---------------------------------------------------------------------------
// Payroll
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_payroll_amounts_persisted(pool: PgPool) {
    let staff = create_user(&pool, "driver@example.com", STAFF_ROLE_ID).await;
    let pkg = driver_package(&pool).await;

    let payroll = PayrollRepo::create(&pool, &payroll_for(staff.id, &pkg, 5_000))
        .await
        .unwrap();
    assert_eq!(payroll.gross_cents, 325_000);
    assert_eq!(payroll.net_cents, 310_000);
    assert_eq!(payroll.status, "generated");
    assert!(payroll.paid_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_period_rejected(pool: PgPool) {
    let staff = create_user(&pool, "driver@example.com", STAFF_ROLE_ID).await;
    let pkg = driver_package(&pool).await;
    PayrollRepo::create(&pool, &payroll_for(staff.id, &pkg, 0))
        .await
        .unwrap();

    let err = PayrollRepo::create(&pool, &payroll_for(staff.id, &pkg, 0))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db) if db.constraint() == Some("uq_payrolls_staff_period")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_paid_once(pool: PgPool) {
    let staff = create_user(&pool, "driver@example.com", STAFF_ROLE_ID).await;
    let pkg = driver_package(&pool).await;
    let payroll = PayrollRepo::create(&pool, &payroll_for(staff.id, &pkg, 0))
        .await
        .unwrap();

    let paid = PayrollRepo::mark_paid(&pool, payroll.id).await.unwrap().unwrap();
    assert_eq!(paid.status, "paid");
    assert!(paid.paid_at.is_some());

    assert!(PayrollRepo::mark_paid(&pool, payroll.id).await.unwrap().is_none());

    let page = PayrollRepo::list(
        &pool,
        &PayrollQuery {
            staff_id: Some(staff.id),
            status: Some("paid".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(page.total, 1);
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_payment_status_update(pool: PgPool) {
    let pickup = PickupRepo::create(&pool, None, &new_pickup("Ada Obi", "standard"))
        .await
        .unwrap();
    PaymentRepo::create(
        &pool,
        &CreatePayment {
            payment_intent_id: "pi_123".into(),
            pickup_id: Some(pickup.id),
            user_id: None,
            amount_cents: 1500,
            currency: "usd".into(),
            status: "requires_payment_method".into(),
            description: None,
        },
    )
    .await
    .unwrap();

    let updated = PaymentRepo::update_status(&pool, "pi_123", STATUS_SUCCEEDED)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, STATUS_SUCCEEDED);

    assert!(PaymentRepo::update_status(&pool, "pi_unknown", STATUS_SUCCEEDED)
        .await
        .unwrap()
        .is_none());

    let page = PaymentRepo::list(
        &pool,
        &PaymentQuery {
            pickup_id: Some(pickup.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(
        PaymentRepo::find_by_intent_id(&pool, "pi_123")
            .await
            .unwrap()
            .map(|p| p.amount_cents),
        Some(1500)
    );
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subscribe_then_resubscribe(pool: PgPool) {
    let input = CreateSubscription {
        email: "news@example.com".into(),
        name: Some("Neo".into()),
        plan: "basic".into(),
    };
    let first = SubscriptionRepo::upsert(&pool, &input).await.unwrap();
    assert!(first.is_created());

    let id = first.subscription().id;
    assert!(SubscriptionRepo::deactivate(&pool, id).await.unwrap());

    let again = SubscriptionRepo::upsert(
        &pool,
        &CreateSubscription {
            email: "news@example.com".into(),
            name: None,
            plan: "premium".into(),
        },
    )
    .await
    .unwrap();
    assert!(!again.is_created());
    let sub = again.subscription();
    assert_eq!(sub.id, id);
    assert_eq!(sub.plan, "premium");
    assert_eq!(sub.name.as_deref(), Some("Neo"));
    assert!(sub.is_active);

    let active = SubscriptionRepo::list(
        &pool,
        &SubscriptionQuery {
            active: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(active.total, 1);
}
