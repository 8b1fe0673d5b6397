//! 订单工作流
//!
//! 编排仓储与通知：创建 → 读取商品详情 → 发布通知

use std::sync::Arc;

use metrics::counter;
use petstore_config::NotificationPolicy;
use petstore_errors::{AppError, AppResult};
use tracing::{error, info, warn};

use crate::domain::{Order, OrderDetail, OrderNotifier, OrderRepository};

pub struct OrderWorkflow {
    repository: Arc<dyn OrderRepository>,
    notifier: Arc<dyn OrderNotifier>,
    notification_policy: NotificationPolicy,
}

impl OrderWorkflow {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        notifier: Arc<dyn OrderNotifier>,
        notification_policy: NotificationPolicy,
    ) -> Self {
        Self {
            repository,
            notifier,
            notification_policy,
        }
    }

    /// 创建订单并通知
    ///
    /// 通知失败时：`BestEffort` 仅记录日志；`Required` 返回 `Internal`，此时订单行已提交
    pub async fn create_order(
        &self,
        user_id: i64,
        item_id: i64,
        bearer_token: Option<&str>,
    ) -> AppResult<OrderDetail> {
        if user_id <= 0 {
            return Err(AppError::validation("user_id must be positive"));
        }
        if item_id <= 0 {
            return Err(AppError::validation("item_id must be positive"));
        }

        let detail = self.repository.save_order(user_id, item_id).await?;
        counter!("orders_created_total").increment(1);
        info!(
            op = "order.create",
            order_id = detail.order.id,
            user_id,
            item_id,
            enriched = detail.is_enriched(),
            "Order created"
        );

        if let Err(e) = self.notifier.notify(bearer_token, &detail).await {
            counter!("order_notifications_total", "result" => "failed").increment(1);
            match self.notification_policy {
                NotificationPolicy::BestEffort => {
                    warn!(op = "order.create", order_id = detail.order.id, error = %e, "Order notification failed");
                }
                NotificationPolicy::Required => {
                    error!(op = "order.create", order_id = detail.order.id, error = %e, "Order notification failed");
                    return Err(AppError::internal(format!(
                        "order {} created but notification failed: {}",
                        detail.order.id, e
                    )));
                }
            }
        } else {
            counter!("order_notifications_total", "result" => "sent").increment(1);
        }

        Ok(detail)
    }

    pub async fn list_orders(&self) -> AppResult<Vec<Order>> {
        let orders = self.repository.get_all_orders().await?;
        info!(op = "order.list", count = orders.len(), "Orders listed");
        Ok(orders)
    }

    pub async fn get_order(&self, id: i64) -> AppResult<Order> {
        let order = self.repository.get_order_by_id(id).await?;
        info!(op = "order.get", order_id = id, "Order fetched");
        Ok(order)
    }

    pub async fn get_orders_by_user_id(&self, user_id: i64) -> AppResult<Vec<OrderDetail>> {
        let orders = self.repository.get_orders_by_user_id(user_id).await?;
        info!(op = "order.get_by_user", user_id, count = orders.len(), "User orders fetched");
        Ok(orders)
    }

    pub async fn delete_order(&self, id: i64) -> AppResult<()> {
        self.repository.delete_order_by_id(id).await?;
        info!(op = "order.delete", order_id = id, "Order deleted");
        Ok(())
    }
}
