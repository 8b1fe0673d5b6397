//! 订单仓储 PostgreSQL 测试
//!
//! 需要 DATABASE_URL 指向可用的 PostgreSQL 实例：
//! `cargo test -p order-service -- --ignored`

use order_service::domain::OrderRepository;
use order_service::infrastructure::PostgresOrderRepository;
use petstore_errors::AppError;
use rust_decimal::Decimal;
use sqlx::PgPool;

async fn seed_item(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO catalogue.item_info (name, price, description, quantity, image_url)
        VALUES ($1, $2, 'test item', 5, 'https://img.example/item.png')
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(Decimal::new(1250, 2))
    .fetch_one(pool)
    .await
    .unwrap()
}

#[test]
fn test_startup_migrations_only_touch_order_schema() {
    let migrator = sqlx::migrate!("./migrations");
    assert!(migrator.iter().count() > 0);
    for migration in migrator.iter() {
        assert!(
            !migration.sql.contains("catalogue"),
            "migration {} touches the catalogue schema",
            migration.description
        );
    }
}

#[sqlx::test(migrations = "./migrations", fixtures("catalogue"))]
#[ignore] // 需要 PostgreSQL 实例
async fn test_save_then_get(pool: PgPool) {
    let item_id = seed_item(&pool, "Dog food").await;
    let repo = PostgresOrderRepository::new(pool);

    let detail = repo.save_order(42, item_id).await.unwrap();
    assert!(detail.order.id > 0);
    assert_eq!(detail.order.user_id, 42);

    let item = detail.item.expect("catalogue item should be joined");
    assert_eq!(item.name, "Dog food");
    assert_eq!(item.price, Decimal::new(1250, 2));

    let fetched = repo.get_order_by_id(detail.order.id).await.unwrap();
    assert_eq!(fetched, detail.order);
}

#[sqlx::test(migrations = "./migrations", fixtures("catalogue"))]
#[ignore] // 需要 PostgreSQL 实例
async fn test_save_with_unknown_item_is_degraded(pool: PgPool) {
    let repo = PostgresOrderRepository::new(pool);

    let detail = repo.save_order(42, 9999).await.unwrap();
    assert!(detail.item.is_none());
    assert!(repo.get_order_by_id(detail.order.id).await.is_ok());
}

#[sqlx::test(migrations = "./migrations", fixtures("catalogue"))]
#[ignore] // 需要 PostgreSQL 实例
async fn test_missing_order(pool: PgPool) {
    let repo = PostgresOrderRepository::new(pool);

    assert!(matches!(repo.get_order_by_id(1).await, Err(AppError::NotFound(_))));
    assert!(matches!(repo.delete_order_by_id(1).await, Err(AppError::NotFound(_))));
}

#[sqlx::test(migrations = "./migrations", fixtures("catalogue"))]
#[ignore] // 需要 PostgreSQL 实例
async fn test_delete_order(pool: PgPool) {
    let item_id = seed_item(&pool, "Cat toy").await;
    let repo = PostgresOrderRepository::new(pool);

    let detail = repo.save_order(7, item_id).await.unwrap();
    repo.delete_order_by_id(detail.order.id).await.unwrap();
    assert!(matches!(
        repo.get_order_by_id(detail.order.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[sqlx::test(migrations = "./migrations", fixtures("catalogue"))]
#[ignore] // 需要 PostgreSQL 实例
async fn test_all_orders_sorted_by_id(pool: PgPool) {
    let item_id = seed_item(&pool, "Bird seed").await;
    let repo = PostgresOrderRepository::new(pool);

    assert!(repo.get_all_orders().await.unwrap().is_empty());

    let first = repo.save_order(1, item_id).await.unwrap();
    let second = repo.save_order(2, item_id).await.unwrap();

    let ids: Vec<i64> = repo.get_all_orders().await.unwrap().iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![first.order.id, second.order.id]);
}

#[sqlx::test(migrations = "./migrations", fixtures("catalogue"))]
#[ignore] // 需要 PostgreSQL 实例
async fn test_orders_by_user_join_items(pool: PgPool) {
    let item_id = seed_item(&pool, "Fish tank").await;
    let repo = PostgresOrderRepository::new(pool);

    assert!(repo.get_orders_by_user_id(42).await.unwrap().is_empty());

    repo.save_order(42, item_id).await.unwrap();
    repo.save_order(43, item_id).await.unwrap();

    let orders = repo.get_orders_by_user_id(42).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order.user_id, 42);
    assert_eq!(orders[0].item.as_ref().map(|i| i.name.as_str()), Some("Fish tank"));
}

#[sqlx::test(migrations = "./migrations", fixtures("catalogue"))]
#[ignore] // 需要 PostgreSQL 实例
async fn test_duplicate_catalogue_name_maps_to_conflict(pool: PgPool) {
    seed_item(&pool, "Unique name").await;

    let err = sqlx::query("INSERT INTO catalogue.item_info (name) VALUES ('Unique name')")
        .execute(&pool)
        .await
        .map_err(petstore_adapter_postgres::map_sqlx_error)
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(ref msg) if msg.contains("item_info_name_key")));
}
