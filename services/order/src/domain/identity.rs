//! 调用方身份与外部身份服务端口

use async_trait::async_trait;
use petstore_errors::AppResult;
use serde::Serialize;

/// 管理员角色名
pub const ADMIN_ROLE: &str = "admin";

/// 由 bearer token 解析出的调用方身份，仅在单个请求内有效
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallerIdentity {
    #[serde(rename = "id")]
    pub user_id: i64,
    pub email: String,
    pub role: String,
}

impl CallerIdentity {
    pub fn has_admin_role(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// 外部身份服务（SSO）
///
/// 实现方负责把传输层错误转换为 `AppError::Internal`
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// 通过 token 获取用户信息
    async fn resolve_caller(&self, token: &str) -> AppResult<CallerIdentity>;

    /// 用户是否为管理员
    async fn is_admin(&self, user_id: i64) -> AppResult<bool>;

    /// token 是否有效
    async fn is_authenticated(&self, token: &str) -> AppResult<bool>;
}
