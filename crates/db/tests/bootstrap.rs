use sqlx::PgPool;
use wastewise_core::roles::{CITIZEN_ROLE_ID, ROLE_ADMIN, ROLE_CITIZEN, ROLE_STAFF};
use wastewise_db::repositories::RoleRepo;

/// Connect, migrate and verify the seeded role table.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    wastewise_db::health_check(&pool).await.unwrap();

    let roles = RoleRepo::list(&pool).await.unwrap();
    let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec![ROLE_ADMIN, ROLE_STAFF, ROLE_CITIZEN]);

    let citizen = RoleRepo::find_by_name(&pool, ROLE_CITIZEN)
        .await
        .unwrap()
        .expect("citizen role seeded");
    assert_eq!(citizen.id, CITIZEN_ROLE_ID);
}

/// A role inserted after seeding must not collide with the fixed ids.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_sequence_follows_seed(pool: PgPool) {
    let id: i64 = sqlx::query_scalar("INSERT INTO roles (name) VALUES ('auditor') RETURNING id")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(id, 4);
}

/// Every mutable table carries an updated_at trigger.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_triggers_present(pool: PgPool) {
    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT event_object_table::TEXT
         FROM information_schema.triggers
         WHERE trigger_name = 'set_updated_at'
         GROUP BY event_object_table
         ORDER BY event_object_table",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for table in [
        "payments",
        "payrolls",
        "pickups",
        "recycling_requests",
        "salary_packages",
        "subscriptions",
        "user_sessions",
        "users",
        "waste_materials",
    ] {
        assert!(
            tables.iter().any(|t| t == table),
            "Table {table} is missing its set_updated_at trigger"
        );
    }
}
