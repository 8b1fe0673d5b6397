//! 内存发布者（测试与本地开发用）

use async_trait::async_trait;
use petstore_errors::{AppError, AppResult};
use tokio::sync::RwLock;

use crate::MessagePublisher;

/// 已发布的消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub queue: String,
    pub payload: Vec<u8>,
}

/// 内存消息发布者
#[derive(Default)]
pub struct InMemoryPublisher {
    messages: RwLock<Vec<PublishedMessage>>,
    fail: bool,
}

impl InMemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每次发布都失败，模拟 broker 不可用
    pub fn failing() -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
            fail: true,
        }
    }

    pub async fn messages(&self) -> Vec<PublishedMessage> {
        self.messages.read().await.clone()
    }
}

#[async_trait]
impl MessagePublisher for InMemoryPublisher {
    async fn publish_raw(&self, queue: &str, payload: &[u8]) -> AppResult<()> {
        if self.fail {
            return Err(AppError::internal("broker unavailable"));
        }
        self.messages.write().await.push(PublishedMessage {
            queue: queue.to_string(),
            payload: payload.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_publish() {
        let publisher = InMemoryPublisher::new();
        publisher.publish_raw("order", b"hello").await.unwrap();

        let messages = publisher.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].queue, "order");
        assert_eq!(messages[0].payload, b"hello");
    }

    #[tokio::test]
    async fn test_failing_publisher() {
        let publisher = InMemoryPublisher::failing();
        assert!(publisher.publish_raw("order", b"hello").await.is_err());
        assert!(publisher.messages().await.is_empty());
    }
}
