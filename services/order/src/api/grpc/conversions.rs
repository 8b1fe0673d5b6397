//! 领域模型与 Proto 消息的转换

use petstore_errors::{AppError, AppResult};

use crate::domain::{ItemSnapshot, Order, OrderDetail};
use crate::proto::order::v1 as pb;

pub fn item_to_proto(item: &ItemSnapshot) -> pb::Item {
    pb::Item {
        id: item.id,
        name: item.name.clone(),
        price: item.price.to_string(),
        description: item.description.clone(),
        quantity: item.quantity,
        image_url: item.image_url.clone(),
    }
}

pub fn order_to_proto(order: &Order) -> pb::Order {
    pb::Order {
        id: order.id,
        user_id: order.user_id,
        item_id: order.item_id,
        item: None,
    }
}

pub fn detail_to_proto(detail: &OrderDetail) -> pb::Order {
    pb::Order {
        item: detail.item.as_ref().map(item_to_proto),
        ..order_to_proto(&detail.order)
    }
}

/// `GetOrderRequest.id` 是字符串编码的整数
pub fn parse_order_id(raw: &str) -> AppResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::validation(format!("invalid order id: {:?}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::item;

    #[test]
    fn test_parse_order_id() {
        assert_eq!(parse_order_id("15").unwrap(), 15);
        assert_eq!(parse_order_id(" 15 ").unwrap(), 15);
        assert!(matches!(parse_order_id("abc"), Err(AppError::Validation(_))));
        assert!(matches!(parse_order_id(""), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_detail_without_item_leaves_item_unset() {
        let detail = OrderDetail::new(
            Order {
                id: 3,
                user_id: 42,
                item_id: 7,
            },
            None,
        );
        let proto = detail_to_proto(&detail);
        assert_eq!(proto.id, 3);
        assert!(proto.item.is_none());
    }

    #[test]
    fn test_item_price_is_decimal_string() {
        let proto = item_to_proto(&item(7, "Bird seed"));
        assert_eq!(proto.price, "19.99");
        assert_eq!(proto.quantity, 10);
    }
}
