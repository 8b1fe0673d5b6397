//! 订单通知端口

use async_trait::async_trait;
use petstore_errors::AppResult;

use super::OrderDetail;

/// 订单创建成功后的异步通知
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    /// 以请求方身份发布订单通知
    ///
    /// token 缺失时返回 `Unauthenticated`
    async fn notify(&self, bearer_token: Option<&str>, detail: &OrderDetail) -> AppResult<()>;
}
