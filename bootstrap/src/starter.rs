//! 服务启动器
//!
//! 提供统一的服务启动模式

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use petstore_config::AppConfig;
use petstore_errors::{AppError, AppResult};
use petstore_telemetry::init_metrics;
use tonic::transport::Server;
use tracing::{error, info};

use crate::health::{HealthChecker, HealthServer};
use crate::infrastructure::Infrastructure;
use crate::metrics::PoolMetricsCollector;
use crate::runtime::init_runtime;

/// 运行 gRPC 服务
///
/// 所有微服务的统一入口点：
/// 1. 加载配置（.env → 配置文件 → 环境变量）
/// 2. 初始化运行时（日志）
/// 3. 安装 Prometheus recorder
/// 4. 创建基础设施资源（数据库、broker、SSO channel）
/// 5. 启动健康检查 HTTP 服务器（gRPC 端口 + 1000）与连接池指标采集
/// 6. 调用闭包注册服务并启动服务器，闭包负责 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// run_server("config", |infra, server, addr| async move {
///     server
///         .add_service(MyServiceServer::new(MyServiceImpl::new(infra.postgres_pool())))
///         .serve_with_shutdown(addr, shutdown_signal())
///         .await
///         .map_err(|e| AppError::internal(e.to_string()))
/// })
/// .await
/// ```
pub async fn run_server<F, Fut>(
    config_dir: &str,
    serve: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Arc<Infrastructure>, Server, SocketAddr) -> Fut,
    Fut: Future<Output = AppResult<()>>,
{
    // 本地开发时从 .env 补充环境变量
    dotenvy::dotenv().ok();
    let config = AppConfig::load(config_dir)?;

    init_runtime(&config);
    info!("Starting {} service", config.app_name);

    let metrics = init_metrics()
        .map_err(|e| AppError::internal(format!("Failed to install Prometheus recorder: {}", e)))?;

    let infra = Arc::new(Infrastructure::from_config(config.clone()).await?);

    let collector_handle =
        PoolMetricsCollector::new(infra.clone(), Duration::from_secs(15)).start();

    let health_port = config.server.port.saturating_add(1000);
    let health_server = HealthServer::new(
        Arc::new(HealthChecker::new(infra.clone())),
        metrics,
        health_port,
    );
    let health_handle = tokio::spawn(async move {
        if let Err(e) = health_server.serve().await {
            error!("Health server error: {}", e);
        }
    });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(%addr, "gRPC server starting");

    let result = serve(infra, Server::builder(), addr).await;

    health_handle.abort();
    collector_handle.abort();

    match result {
        Ok(()) => {
            info!("Service stopped");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Service terminated with error");
            Err(e.into())
        }
    }
}
