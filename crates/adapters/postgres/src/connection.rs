//! PostgreSQL 连接管理

use petstore_errors::{AppError, AppResult};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::debug;

/// PostgreSQL 连接池配置
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// 创建 PostgreSQL 连接池
pub async fn create_pool(config: &PostgresConfig) -> AppResult<PgPool> {
    debug!(max_connections = config.max_connections, "Creating PostgreSQL pool");
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout)
        .idle_timeout(config.idle_timeout)
        .connect(&config.url)
        .await
        .map_err(|e| AppError::database(format!("Failed to create pool: {}", e)))
}

/// 检查数据库连接
pub async fn check_connection(pool: &PgPool) -> AppResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Database health check failed: {}", e)))?;
    Ok(())
}

/// 连接池状态快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    pub size: u32,
    pub idle: u32,
    pub active: u32,
}

impl PoolStatus {
    /// 使用率（百分比）
    pub fn utilization(&self) -> f64 {
        if self.size == 0 {
            0.0
        } else {
            self.active as f64 / self.size as f64 * 100.0
        }
    }
}

/// 读取连接池当前状态
pub fn pool_status(pool: &PgPool) -> PoolStatus {
    let size = pool.size();
    let idle = pool.num_idle() as u32;
    PoolStatus {
        size,
        idle,
        active: size.saturating_sub(idle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = PostgresConfig::new("postgres://localhost/orders")
            .with_max_connections(25)
            .with_connect_timeout(Duration::from_secs(3));
        assert_eq!(config.max_connections, 25);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_pool_utilization() {
        let status = PoolStatus { size: 10, idle: 6, active: 4 };
        assert_eq!(status.utilization(), 40.0);
        let empty = PoolStatus { size: 0, idle: 0, active: 0 };
        assert_eq!(empty.utilization(), 0.0);
    }
}
