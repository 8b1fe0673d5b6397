//! petstore-errors - 统一错误处理
//!
//! 所有服务共用的错误分类，以及到 gRPC 状态码的映射

use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 唯一约束冲突
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// 转换为 gRPC 状态码
    pub fn grpc_code(&self) -> tonic::Code {
        match self {
            Self::NotFound(_) => tonic::Code::NotFound,
            Self::Validation(_) => tonic::Code::InvalidArgument,
            Self::Unauthenticated(_) => tonic::Code::Unauthenticated,
            Self::Forbidden(_) => tonic::Code::PermissionDenied,
            Self::Conflict(_) => tonic::Code::AlreadyExists,
            Self::Internal(_) => tonic::Code::Internal,
            Self::Database(_) => tonic::Code::Internal,
        }
    }
}

impl From<AppError> for tonic::Status {
    fn from(err: AppError) -> Self {
        tonic::Status::new(err.grpc_code(), err.to_string())
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grpc_code_mapping() {
        assert_eq!(AppError::not_found("x").grpc_code(), tonic::Code::NotFound);
        assert_eq!(AppError::conflict("x").grpc_code(), tonic::Code::AlreadyExists);
        assert_eq!(AppError::forbidden("x").grpc_code(), tonic::Code::PermissionDenied);
        assert_eq!(AppError::validation("x").grpc_code(), tonic::Code::InvalidArgument);
        assert_eq!(AppError::database("x").grpc_code(), tonic::Code::Internal);
        assert_eq!(AppError::internal("x").grpc_code(), tonic::Code::Internal);
        assert_eq!(AppError::unauthenticated("x").grpc_code(), tonic::Code::Unauthenticated);
    }

    #[test]
    fn test_into_status_keeps_message() {
        let status: tonic::Status = AppError::unauthenticated("authentication is required").into();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
        assert!(status.message().contains("authentication is required"));
    }
}
