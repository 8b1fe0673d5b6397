//! petstore-adapter-amqp - AMQP (RabbitMQ) 适配器
//!
//! 进程内共享一个发布者：连接池 + 缓存的 channel，channel 断开后在下一次发布时重建

mod memory;
mod publisher;

pub use memory::*;
pub use publisher::*;

use async_trait::async_trait;
use petstore_errors::AppResult;

/// 消息发布者 trait
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// 发布原始负载到指定队列（默认 exchange，routing key 即队列名）
    async fn publish_raw(&self, queue: &str, payload: &[u8]) -> AppResult<()>;
}
