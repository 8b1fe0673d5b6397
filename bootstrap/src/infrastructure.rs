//! 基础设施资源管理
//!
//! 进程级共享资源，由 bootstrap 统一初始化后注入各服务

use std::sync::Arc;
use std::time::Duration;

use petstore_adapter_amqp::{AmqpPublisher, AmqpPublisherConfig};
use petstore_adapter_postgres::{PoolStatus, PostgresConfig, create_pool, pool_status};
use petstore_config::AppConfig;
use petstore_errors::{AppError, AppResult};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tonic::transport::{Channel, Endpoint};
use tracing::info;

use crate::retry::{RetryConfig, with_retry};

/// 基础设施资源容器
#[derive(Clone)]
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: PgPool,
    /// 共享的 AMQP 发布者
    amqp_publisher: Arc<AmqpPublisher>,
    /// SSO 服务 gRPC channel（惰性连接）
    sso_channel: Channel,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let retry_config = RetryConfig::default();

        // 1. PostgreSQL 连接池
        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections);
        let postgres_pool = with_retry(&retry_config, "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;
        info!(
            max_connections = config.database.max_connections,
            "PostgreSQL connection pool created"
        );

        // 2. AMQP 发布者
        let amqp_config = AmqpPublisherConfig::new(config.amqp.url.expose_secret().clone())
            .with_connect_timeout(Duration::from_secs(config.amqp.connect_timeout_secs));
        let amqp_publisher = with_retry(&retry_config, "AMQP connection", || {
            let cfg = amqp_config.clone();
            async move { AmqpPublisher::connect(&cfg).await }
        })
        .await?;

        // 3. SSO channel
        let timeout = Duration::from_secs(config.sso.timeout_secs);
        let sso_channel = Endpoint::from_shared(config.sso.endpoint.clone())
            .map_err(|e| AppError::internal(format!("Invalid SSO endpoint: {}", e)))?
            .connect_timeout(timeout)
            .timeout(timeout)
            .connect_lazy();
        info!(endpoint = %config.sso.endpoint, "SSO channel configured");

        Ok(Self {
            config,
            postgres_pool,
            amqp_publisher: Arc::new(amqp_publisher),
            sso_channel,
        })
    }

    /// 获取应用配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取 PostgreSQL 连接池
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    /// 获取共享 AMQP 发布者
    pub fn amqp_publisher(&self) -> Arc<AmqpPublisher> {
        self.amqp_publisher.clone()
    }

    /// 获取 SSO 服务 channel
    pub fn sso_channel(&self) -> Channel {
        self.sso_channel.clone()
    }

    /// 获取 PostgreSQL 连接池状态
    pub fn postgres_pool_status(&self) -> PoolStatus {
        pool_status(&self.postgres_pool)
    }
}
