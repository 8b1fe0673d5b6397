//! 健康检查模块
//!
//! 提供 /health、/ready 和 /metrics 端点

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;
use petstore_adapter_postgres::check_connection;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::Infrastructure;

/// 健康检查状态
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub checks: Vec<ComponentHealth>,
}

/// 组件健康状态
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            checks: vec![],
        }
    }

    pub fn add_check(&mut self, check: ComponentHealth) {
        if check.status != "healthy" {
            self.status = "unhealthy".to_string();
        }
        self.checks.push(check);
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "healthy".to_string(),
            message: None,
        }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "unhealthy".to_string(),
            message: Some(message.into()),
        }
    }
}

/// 健康检查器
pub struct HealthChecker {
    infra: Arc<Infrastructure>,
}

impl HealthChecker {
    pub fn new(infra: Arc<Infrastructure>) -> Self {
        Self { infra }
    }

    /// 存活检查：只检查进程是否在运行
    pub async fn liveness(&self) -> HealthStatus {
        HealthStatus::healthy()
    }

    /// 就绪检查：检查 PostgreSQL 与 broker
    pub async fn readiness(&self) -> HealthStatus {
        let mut status = HealthStatus::healthy();

        status.add_check(match check_connection(&self.infra.postgres_pool()).await {
            Ok(()) => ComponentHealth::healthy("postgres"),
            Err(e) => ComponentHealth::unhealthy("postgres", e.to_string()),
        });

        status.add_check(match self.infra.amqp_publisher().check_connection().await {
            Ok(()) => ComponentHealth::healthy("amqp"),
            Err(e) => ComponentHealth::unhealthy("amqp", e.to_string()),
        });

        status
    }
}

#[derive(Clone)]
struct HealthServerState {
    checker: Arc<HealthChecker>,
    metrics: PrometheusHandle,
}

/// HTTP 健康检查服务器
pub struct HealthServer {
    checker: Arc<HealthChecker>,
    metrics: PrometheusHandle,
    port: u16,
}

impl HealthServer {
    pub fn new(checker: Arc<HealthChecker>, metrics: PrometheusHandle, port: u16) -> Self {
        Self {
            checker,
            metrics,
            port,
        }
    }

    pub fn router(&self) -> Router {
        let state = HealthServerState {
            checker: self.checker.clone(),
            metrics: self.metrics.clone(),
        };

        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .route("/metrics", get(metrics_handler))
            .with_state(state)
    }

    /// 启动 HTTP 服务器
    pub async fn serve(self) -> Result<(), std::io::Error> {
        let app = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!(%addr, "Health check HTTP server starting");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await
    }
}

async fn health_handler(State(state): State<HealthServerState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.checker.liveness().await))
}

async fn ready_handler(State(state): State<HealthServerState>) -> impl IntoResponse {
    let status = state.checker.readiness().await;
    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

async fn metrics_handler(State(state): State<HealthServerState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_turns_unhealthy() {
        let mut status = HealthStatus::healthy();
        status.add_check(ComponentHealth::healthy("postgres"));
        assert!(status.is_healthy());

        status.add_check(ComponentHealth::unhealthy("amqp", "connection refused"));
        assert!(!status.is_healthy());
        assert_eq!(status.checks.len(), 2);
    }
}
