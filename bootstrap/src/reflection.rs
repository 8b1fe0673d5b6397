//! gRPC 反射辅助工具

use petstore_errors::{AppError, AppResult};
use tonic_reflection::server::Builder;
use tonic_reflection::server::v1::{ServerReflection, ServerReflectionServer};

/// 构建一个包含指定文件描述符集的反射服务
pub fn build_reflection(
    file_descriptor_set: &'static [u8],
) -> AppResult<ServerReflectionServer<impl ServerReflection>> {
    Builder::configure()
        .register_encoded_file_descriptor_set(file_descriptor_set)
        .build_v1()
        .map_err(|e| AppError::internal(format!("Failed to build reflection service: {}", e)))
}
