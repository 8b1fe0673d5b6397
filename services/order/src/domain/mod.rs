//! 领域层
//!
//! 订单实体、调用方身份，以及仓储 / 身份服务 / 通知的端口定义

mod identity;
mod notifier;
mod order;
mod repository;

pub use identity::*;
pub use notifier::*;
pub use order::*;
pub use repository::*;
