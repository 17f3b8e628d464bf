use serde_json::json;
use sqlx::PgPool;
use wastewise_db::models::system_log::{CreateSystemLog, SystemLogQuery};
use wastewise_db::repositories::SystemLogRepo;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_write_and_filter_logs(pool: PgPool) {
    SystemLogRepo::create(&pool, &CreateSystemLog::new("info", "pickup created"))
        .await
        .unwrap();
    SystemLogRepo::create(
        &pool,
        &CreateSystemLog::new("error", "stripe unreachable").with_context(json!({"attempt": 2})),
    )
    .await
    .unwrap();

    let all = SystemLogRepo::query(&pool, &SystemLogQuery::default())
        .await
        .unwrap();
    assert_eq!(all.total, 2);
    // Newest first.
    assert_eq!(all.items[0].message, "stripe unreachable");

    let errors = SystemLogRepo::query(
        &pool,
        &SystemLogQuery {
            level: Some("error".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(errors.total, 1);
    assert_eq!(errors.items[0].context, Some(json!({"attempt": 2})));

    let search = SystemLogRepo::query(
        &pool,
        &SystemLogQuery {
            search: Some("PICKUP".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(search.total, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_level_rejected_by_schema(pool: PgPool) {
    let err = SystemLogRepo::create(&pool, &CreateSystemLog::new("fatal", "boom")).await;
    assert!(err.is_err());
}
