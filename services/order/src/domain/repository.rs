//! 订单仓储接口

use async_trait::async_trait;
use petstore_errors::AppResult;

use super::{Order, OrderDetail};

/// 订单仓储接口
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// 插入订单并返回带商品详情的结果
    ///
    /// 商品详情读取失败不影响插入结果，此时 `item` 为 `None`
    async fn save_order(&self, user_id: i64, item_id: i64) -> AppResult<OrderDetail>;

    /// 根据 ID 查找订单，不存在时返回 `NotFound`
    async fn get_order_by_id(&self, id: i64) -> AppResult<Order>;

    /// 全部订单，按 ID 升序
    async fn get_all_orders(&self) -> AppResult<Vec<Order>>;

    /// 某个用户的订单及商品详情
    async fn get_orders_by_user_id(&self, user_id: i64) -> AppResult<Vec<OrderDetail>>;

    /// 删除订单，不存在时返回 `NotFound`
    async fn delete_order_by_id(&self, id: i64) -> AppResult<()>;
}
