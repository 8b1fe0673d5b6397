//! 鉴权拦截链
//!
//! 每个受保护的方法对应一个 gate。tonic 的同步拦截器看不到请求体，
//! 所以整条链在 handler 入口处异步执行，未注册 gate 的方法直接放行。

use std::sync::Arc;

use async_trait::async_trait;
use petstore_bootstrap::record_authorization_denied;
use petstore_errors::{AppError, AppResult};
use tonic::metadata::MetadataMap;
use tracing::{debug, warn};

use crate::domain::{CallerIdentity, IdentityService};

/// 受保护方法的完整 gRPC 路径
pub mod methods {
    pub const CREATE_ORDER: &str = "/order.v1.OrderService/CreateOrder";
    pub const LIST_ORDERS: &str = "/order.v1.OrderService/ListOrders";
    pub const GET_ORDER: &str = "/order.v1.OrderService/GetOrder";
    pub const GET_ORDER_BY_USER_ID: &str = "/order.v1.OrderService/GetOrderByUserId";
}

/// gate 需要的请求体字段
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestFacts {
    pub requested_user_id: Option<i64>,
}

impl RequestFacts {
    pub fn for_user(user_id: i64) -> Self {
        Self {
            requested_user_id: Some(user_id),
        }
    }
}

/// 从 `authorization` metadata 提取 token，接受 `Bearer <t>` 或裸 token，
/// 其他 scheme 视为没有 token
pub fn extract_bearer_token(metadata: &MetadataMap) -> Option<String> {
    let raw = metadata.get("authorization")?.to_str().ok()?.trim();
    let token = match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        Some(_) => "",
        None if raw.eq_ignore_ascii_case("bearer") => "",
        None => raw,
    };

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// 通过身份服务解析调用方，任何失败都视为 `Internal`
async fn resolve_caller(identity: &dyn IdentityService, token: &str) -> AppResult<CallerIdentity> {
    identity.resolve_caller(token).await.map_err(|e| {
        debug!(error = %e, "Caller resolution failed");
        AppError::internal("failed to get user info from sso service")
    })
}

/// 单个方法的鉴权策略
#[async_trait]
pub trait MethodGate: Send + Sync {
    fn method(&self) -> &'static str;

    async fn check(&self, token: Option<&str>, facts: &RequestFacts) -> AppResult<()>;
}

/// CreateOrder：调用方角色必须为 admin
pub struct AdminRoleGate {
    identity: Arc<dyn IdentityService>,
}

#[async_trait]
impl MethodGate for AdminRoleGate {
    fn method(&self) -> &'static str {
        methods::CREATE_ORDER
    }

    async fn check(&self, token: Option<&str>, _facts: &RequestFacts) -> AppResult<()> {
        let token = token.ok_or_else(|| AppError::unauthenticated("authentication is required"))?;
        let caller = resolve_caller(self.identity.as_ref(), token).await?;
        if !caller.has_admin_role() {
            return Err(AppError::forbidden("only admin can create orders"));
        }
        Ok(())
    }
}

/// GetOrderByUserId：本人或管理员
pub struct OwnerOrAdminGate {
    identity: Arc<dyn IdentityService>,
}

#[async_trait]
impl MethodGate for OwnerOrAdminGate {
    fn method(&self) -> &'static str {
        methods::GET_ORDER_BY_USER_ID
    }

    async fn check(&self, token: Option<&str>, facts: &RequestFacts) -> AppResult<()> {
        let token = token.ok_or_else(|| AppError::unauthenticated("authentication is required"))?;
        let caller = resolve_caller(self.identity.as_ref(), token).await?;

        if facts.requested_user_id == Some(caller.user_id) {
            return Ok(());
        }

        let is_admin = self
            .identity
            .is_admin(caller.user_id)
            .await
            .map_err(|e| {
                debug!(error = %e, "Admin role check failed");
                AppError::internal("failed to check admin role")
            })?;
        if !is_admin {
            return Err(AppError::validation("cannot view orders of another user"));
        }
        Ok(())
    }
}

/// ListOrders：必须是管理员，缺少 token 同样视为无权限
pub struct AdminGate {
    identity: Arc<dyn IdentityService>,
}

#[async_trait]
impl MethodGate for AdminGate {
    fn method(&self) -> &'static str {
        methods::LIST_ORDERS
    }

    async fn check(&self, token: Option<&str>, _facts: &RequestFacts) -> AppResult<()> {
        let token = token.ok_or_else(|| AppError::forbidden("permission denied"))?;
        let caller = resolve_caller(self.identity.as_ref(), token).await?;

        let is_admin = self
            .identity
            .is_admin(caller.user_id)
            .await
            .map_err(|e| {
                debug!(error = %e, "Admin role check failed");
                AppError::internal("failed to check admin role")
            })?;
        if !is_admin {
            return Err(AppError::forbidden("permission denied"));
        }
        Ok(())
    }
}

/// GetOrder：token 必须有效
pub struct AuthenticatedGate {
    identity: Arc<dyn IdentityService>,
}

#[async_trait]
impl MethodGate for AuthenticatedGate {
    fn method(&self) -> &'static str {
        methods::GET_ORDER
    }

    async fn check(&self, token: Option<&str>, _facts: &RequestFacts) -> AppResult<()> {
        let token = token.ok_or_else(|| AppError::unauthenticated("authentication is required"))?;
        let authenticated = self
            .identity
            .is_authenticated(token)
            .await
            .map_err(|e| {
                debug!(error = %e, "Authentication check failed");
                AppError::internal("failed to check authentication")
            })?;
        if !authenticated {
            return Err(AppError::unauthenticated("invalid token"));
        }
        Ok(())
    }
}

/// 拦截链
pub struct AuthorizationChain {
    gates: Vec<Box<dyn MethodGate>>,
}

impl AuthorizationChain {
    pub fn new(gates: Vec<Box<dyn MethodGate>>) -> Self {
        Self { gates }
    }

    /// 订单服务的四个 gate
    pub fn standard(identity: Arc<dyn IdentityService>) -> Self {
        Self::new(vec![
            Box::new(AdminRoleGate {
                identity: identity.clone(),
            }),
            Box::new(OwnerOrAdminGate {
                identity: identity.clone(),
            }),
            Box::new(AdminGate {
                identity: identity.clone(),
            }),
            Box::new(AuthenticatedGate { identity }),
        ])
    }

    /// 执行 `method` 对应的 gate
    pub async fn intercept(
        &self,
        method: &str,
        metadata: &MetadataMap,
        facts: &RequestFacts,
    ) -> AppResult<()> {
        let Some(gate) = self.gates.iter().find(|g| g.method() == method) else {
            return Ok(());
        };

        let token = extract_bearer_token(metadata);
        if let Err(e) = gate.check(token.as_deref(), facts).await {
            warn!(method, code = ?e.grpc_code(), error = %e, "Request denied");
            record_authorization_denied(method, e.grpc_code());
            return Err(e);
        }
        Ok(())
    }
}
