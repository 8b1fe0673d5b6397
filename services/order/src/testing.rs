//! 单元测试用的内存实现

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use petstore_errors::{AppError, AppResult};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::domain::{
    CallerIdentity, IdentityService, ItemSnapshot, Order, OrderDetail, OrderRepository,
};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const CUSTOMER_TOKEN: &str = "customer-token";
pub const ADMIN_ID: i64 = 1;
pub const CUSTOMER_ID: i64 = 42;

pub fn item(id: i64, name: &str) -> ItemSnapshot {
    ItemSnapshot {
        id,
        name: name.to_string(),
        price: Decimal::new(1999, 2),
        description: format!("{} description", name),
        quantity: 10,
        image_url: format!("https://img.example/{}.png", id),
    }
}

/// 内存订单仓储
pub struct InMemoryOrderRepository {
    orders: RwLock<Vec<Order>>,
    items: HashMap<i64, ItemSnapshot>,
    next_id: AtomicI64,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(Vec::new()),
            items: HashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn with_item(mut self, item: ItemSnapshot) -> Self {
        self.items.insert(item.id, item);
        self
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save_order(&self, user_id: i64, item_id: i64) -> AppResult<OrderDetail> {
        let order = Order {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id,
            item_id,
        };
        self.orders.write().await.push(order.clone());
        Ok(OrderDetail::new(order, self.items.get(&item_id).cloned()))
    }

    async fn get_order_by_id(&self, id: i64) -> AppResult<Order> {
        self.orders
            .read()
            .await
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("order {} not found", id)))
    }

    async fn get_all_orders(&self) -> AppResult<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }

    async fn get_orders_by_user_id(&self, user_id: i64) -> AppResult<Vec<OrderDetail>> {
        // 与 SQL inner join 一致：没有商品的订单不返回
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .filter(|o| o.user_id == user_id)
            .filter_map(|o| {
                self.items
                    .get(&o.item_id)
                    .map(|item| OrderDetail::new(o.clone(), Some(item.clone())))
            })
            .collect())
    }

    async fn delete_order_by_id(&self, id: i64) -> AppResult<()> {
        let mut orders = self.orders.write().await;
        let before = orders.len();
        orders.retain(|o| o.id != id);
        if orders.len() == before {
            return Err(AppError::not_found(format!("order {} not found", id)));
        }
        Ok(())
    }
}

/// 固定用户表的身份服务
pub struct StaticIdentityService {
    users: HashMap<String, CallerIdentity>,
    admins: HashSet<i64>,
    unavailable: bool,
    checks_failing: bool,
}

impl StaticIdentityService {
    /// 一个管理员 (`ADMIN_TOKEN`) 和一个普通用户 (`CUSTOMER_TOKEN`)
    pub fn standard() -> Self {
        let mut users = HashMap::new();
        users.insert(
            ADMIN_TOKEN.to_string(),
            CallerIdentity {
                user_id: ADMIN_ID,
                email: "admin@petstore.dev".to_string(),
                role: "admin".to_string(),
            },
        );
        users.insert(
            CUSTOMER_TOKEN.to_string(),
            CallerIdentity {
                user_id: CUSTOMER_ID,
                email: "customer@petstore.dev".to_string(),
                role: "user".to_string(),
            },
        );
        Self {
            users,
            admins: HashSet::from([ADMIN_ID]),
            unavailable: false,
            checks_failing: false,
        }
    }

    /// 所有调用都失败
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::standard()
        }
    }

    /// `resolve_caller` 正常，`is_admin` / `is_authenticated` 失败
    pub fn checks_failing() -> Self {
        Self {
            checks_failing: true,
            ..Self::standard()
        }
    }

    fn check_available(&self) -> AppResult<()> {
        if self.unavailable {
            return Err(AppError::internal("failed to get user info from sso service"));
        }
        Ok(())
    }

    fn check_role_lookup(&self) -> AppResult<()> {
        self.check_available()?;
        if self.checks_failing {
            return Err(AppError::internal("sso role lookup failed"));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityService for StaticIdentityService {
    async fn resolve_caller(&self, token: &str) -> AppResult<CallerIdentity> {
        self.check_available()?;
        self.users
            .get(token)
            .cloned()
            .ok_or_else(|| AppError::internal("failed to get user info from sso service"))
    }

    async fn is_admin(&self, user_id: i64) -> AppResult<bool> {
        self.check_role_lookup()?;
        Ok(self.admins.contains(&user_id))
    }

    async fn is_authenticated(&self, token: &str) -> AppResult<bool> {
        self.check_role_lookup()?;
        Ok(self.users.contains_key(token))
    }
}
