//! 外部 SSO 服务的 gRPC 客户端适配

use async_trait::async_trait;
use petstore_errors::{AppError, AppResult};
use tonic::transport::Channel;
use tracing::warn;

use crate::domain::{CallerIdentity, IdentityService};
use crate::proto::sso::v1::auth_client::AuthClient;
use crate::proto::sso::v1::user_info_client::UserInfoClient;
use crate::proto::sso::v1::{GetUserInfoRequest, IsAdminRequest, IsAuthenticatedRequest};

/// 基于共享 channel 的 SSO 客户端，clone 开销很小
#[derive(Clone)]
pub struct SsoIdentityService {
    auth: AuthClient<Channel>,
    user_info: UserInfoClient<Channel>,
}

impl SsoIdentityService {
    pub fn new(channel: Channel) -> Self {
        Self {
            auth: AuthClient::new(channel.clone()),
            user_info: UserInfoClient::new(channel),
        }
    }
}

fn sso_failure(rpc: &str, status: tonic::Status, message: &str) -> AppError {
    warn!(rpc, code = ?status.code(), error = %status.message(), "SSO call failed");
    AppError::internal(message)
}

#[async_trait]
impl IdentityService for SsoIdentityService {
    async fn resolve_caller(&self, token: &str) -> AppResult<CallerIdentity> {
        let user = self
            .user_info
            .clone()
            .get_user_info(GetUserInfoRequest {
                token: token.to_string(),
            })
            .await
            .map_err(|s| sso_failure("GetUserInfo", s, "failed to get user info from sso service"))?
            .into_inner();

        Ok(CallerIdentity {
            user_id: user.id,
            email: user.email,
            role: user.role,
        })
    }

    async fn is_admin(&self, user_id: i64) -> AppResult<bool> {
        let response = self
            .auth
            .clone()
            .is_admin(IsAdminRequest { user_id })
            .await
            .map_err(|s| sso_failure("IsAdmin", s, "failed to check admin role"))?;

        Ok(response.into_inner().is_admin)
    }

    async fn is_authenticated(&self, token: &str) -> AppResult<bool> {
        let response = self
            .auth
            .clone()
            .is_authenticated(IsAuthenticatedRequest {
                token: token.to_string(),
            })
            .await
            .map_err(|s| sso_failure("IsAuthenticated", s, "failed to check authentication"))?;

        Ok(response.into_inner().is_authenticated)
    }
}
