//! API 层 - gRPC 服务实现

pub mod grpc;

pub use grpc::{AuthorizationChain, OrderServiceImpl};
