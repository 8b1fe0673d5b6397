//! 订单通知：解析请求方身份后发布到 broker 队列

use std::sync::Arc;

use async_trait::async_trait;
use petstore_adapter_amqp::MessagePublisher;
use petstore_bootstrap::record_message_publish;
use petstore_errors::{AppError, AppResult};
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{CallerIdentity, IdentityService, OrderDetail, OrderNotifier};

/// 通知消息体
#[derive(Debug, Serialize)]
pub struct OrderNotification<'a> {
    pub user_info: &'a CallerIdentity,
    pub order_info: &'a OrderDetail,
}

pub struct BrokerNotifier {
    identity: Arc<dyn IdentityService>,
    publisher: Arc<dyn MessagePublisher>,
    queue: String,
}

impl BrokerNotifier {
    pub fn new(
        identity: Arc<dyn IdentityService>,
        publisher: Arc<dyn MessagePublisher>,
        queue: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            publisher,
            queue: queue.into(),
        }
    }
}

#[async_trait]
impl OrderNotifier for BrokerNotifier {
    async fn notify(&self, bearer_token: Option<&str>, detail: &OrderDetail) -> AppResult<()> {
        let token = bearer_token.ok_or_else(|| AppError::unauthenticated("bearer token is missing"))?;

        let caller = self.identity.resolve_caller(token).await.map_err(|e| {
            warn!(order_id = detail.order.id, error = %e, "Cannot resolve order requester");
            AppError::internal("failed to get user info from sso service")
        })?;

        let payload = serde_json::to_vec(&OrderNotification {
            user_info: &caller,
            order_info: detail,
        })
        .map_err(|e| AppError::internal(format!("Failed to encode order notification: {}", e)))?;

        let result = self.publisher.publish_raw(&self.queue, &payload).await;
        record_message_publish(&self.queue, result.is_ok());
        result?;

        debug!(
            order_id = detail.order.id,
            queue = %self.queue,
            bytes = payload.len(),
            "Order notification published"
        );
        Ok(())
    }
}
