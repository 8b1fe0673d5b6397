//! 订单仓储 PostgreSQL 实现

use async_trait::async_trait;
use petstore_adapter_postgres::map_sqlx_error;
use petstore_errors::{AppError, AppResult};
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::domain::{ItemSnapshot, Order, OrderDetail, OrderRepository};

use super::rows::{ItemRow, OrderItemRow, OrderRow};

pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 读取目录商品（不在事务内）
    async fn find_item(&self, item_id: i64) -> AppResult<Option<ItemSnapshot>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, price, description, quantity, image_url
            FROM catalogue.item_info
            WHERE id = $1
            "#,
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(ItemSnapshot::from))
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn save_order(&self, user_id: i64, item_id: i64) -> AppResult<OrderDetail> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO order_service.orders (user_id, item_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(item_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| AppError::not_found("Order insert returned no id"))?;

        tx.commit().await.map_err(map_sqlx_error)?;
        debug!(op = "data.save_order", order_id = id, "Order row committed");

        let order = Order {
            id,
            user_id,
            item_id,
        };

        let item = match self.find_item(item_id).await {
            Ok(Some(item)) => Some(item),
            Ok(None) => {
                warn!(op = "data.save_order", order_id = id, item_id, "Catalogue item not found");
                None
            }
            Err(e) => {
                warn!(op = "data.save_order", order_id = id, item_id, error = %e, "Failed to read catalogue item");
                None
            }
        };

        Ok(OrderDetail::new(order, item))
    }

    async fn get_order_by_id(&self, id: i64) -> AppResult<Order> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, item_id
            FROM order_service.orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Order::from)
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))
    }

    async fn get_all_orders(&self) -> AppResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, item_id
            FROM order_service.orders
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn get_orders_by_user_id(&self, user_id: i64) -> AppResult<Vec<OrderDetail>> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT o.id, o.user_id, o.item_id,
                   i.name AS item_name,
                   i.price AS item_price,
                   i.description AS item_description,
                   i.quantity AS item_quantity,
                   i.image_url AS item_image_url
            FROM order_service.orders o
            INNER JOIN catalogue.item_info i ON o.item_id = i.id
            WHERE o.user_id = $1
            ORDER BY o.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(OrderDetail::from).collect())
    }

    async fn delete_order_by_id(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = sqlx::query("DELETE FROM order_service.orders WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(map_sqlx_error)?;
            return Err(AppError::not_found(format!("Order {} not found", id)));
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}
