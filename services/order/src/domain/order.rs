//! 订单实体

use rust_decimal::Decimal;
use serde::Serialize;

/// 订单
///
/// `id` 由存储在插入时分配，之后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub item_id: i64,
}

/// 目录商品快照（只读，来自 `catalogue.item_info`）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSnapshot {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub quantity: i32,
    pub image_url: String,
}

/// 订单 + 商品详情的读时投影
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    /// `None` 表示无法读取目录数据
    pub item: Option<ItemSnapshot>,
}

impl OrderDetail {
    pub fn new(order: Order, item: Option<ItemSnapshot>) -> Self {
        Self { order, item }
    }

    pub fn is_enriched(&self) -> bool {
        self.item.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_detail_serializes_flat_order_fields() {
        let detail = OrderDetail::new(
            Order {
                id: 1,
                user_id: 42,
                item_id: 7,
            },
            Some(ItemSnapshot {
                id: 7,
                name: "Dog food".to_string(),
                price: Decimal::from_str("19.99").unwrap(),
                description: "Dry food".to_string(),
                quantity: 3,
                image_url: "https://img/7.png".to_string(),
            }),
        );

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["user_id"], 42);
        assert_eq!(value["item_id"], 7);
        assert_eq!(value["item"]["name"], "Dog food");
        assert_eq!(value["item"]["price"], "19.99");
    }

    #[test]
    fn test_degraded_detail_has_null_item() {
        let detail = OrderDetail::new(
            Order {
                id: 2,
                user_id: 1,
                item_id: 99,
            },
            None,
        );
        assert!(!detail.is_enriched());
        let value = serde_json::to_value(&detail).unwrap();
        assert!(value["item"].is_null());
    }
}
