//! Metrics 模块
//!
//! 通用指标记录函数与连接池指标采集

use metrics::{counter, gauge};
use petstore_adapter_postgres::PoolStatus;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::infrastructure::Infrastructure;

/// 记录消息发布结果
pub fn record_message_publish(queue: &str, success: bool) {
    let labels = [
        ("queue", queue.to_string()),
        ("success", success.to_string()),
    ];
    counter!("message_publish_total", &labels).increment(1);
}

/// 记录被拒绝的鉴权请求
pub fn record_authorization_denied(method: &str, code: tonic::Code) {
    let labels = [
        ("method", method.to_string()),
        ("code", format!("{:?}", code)),
    ];
    counter!("authorization_denied_total", &labels).increment(1);
}

/// 记录 PostgreSQL 连接池指标
pub fn record_postgres_pool_metrics(status: &PoolStatus) {
    gauge!("postgres_pool_size").set(status.size as f64);
    gauge!("postgres_pool_idle").set(status.idle as f64);
    gauge!("postgres_pool_active").set(status.active as f64);
    gauge!("postgres_pool_utilization").set(status.utilization());
}

/// 连接池 Metrics 采集器
///
/// 定期采集 PostgreSQL 连接池状态
pub struct PoolMetricsCollector {
    infra: Arc<Infrastructure>,
    interval: Duration,
}

impl PoolMetricsCollector {
    pub fn new(infra: Arc<Infrastructure>, interval: Duration) -> Self {
        Self { infra, interval }
    }

    /// 启动后台采集任务
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                ticker.tick().await;

                let status = self.infra.postgres_pool_status();
                record_postgres_pool_metrics(&status);

                debug!(
                    postgres_size = status.size,
                    postgres_idle = status.idle,
                    postgres_active = status.active,
                    "Pool metrics collected"
                );
            }
        })
    }
}
