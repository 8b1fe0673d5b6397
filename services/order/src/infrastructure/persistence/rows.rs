//! 数据库行结构

use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::domain::{ItemSnapshot, Order, OrderDetail};

#[derive(Debug, FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub user_id: i64,
    pub item_id: i64,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            item_id: row.item_id,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct ItemRow {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub quantity: i32,
    pub image_url: String,
}

impl From<ItemRow> for ItemSnapshot {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            description: row.description,
            quantity: row.quantity,
            image_url: row.image_url,
        }
    }
}

/// orders × item_info 连接查询的行
#[derive(Debug, FromRow)]
pub struct OrderItemRow {
    pub id: i64,
    pub user_id: i64,
    pub item_id: i64,
    pub item_name: String,
    pub item_price: Decimal,
    pub item_description: String,
    pub item_quantity: i32,
    pub item_image_url: String,
}

impl From<OrderItemRow> for OrderDetail {
    fn from(row: OrderItemRow) -> Self {
        let item = ItemSnapshot {
            id: row.item_id,
            name: row.item_name,
            price: row.item_price,
            description: row.item_description,
            quantity: row.item_quantity,
            image_url: row.item_image_url,
        };
        OrderDetail::new(
            Order {
                id: row.id,
                user_id: row.user_id,
                item_id: row.item_id,
            },
            Some(item),
        )
    }
}
