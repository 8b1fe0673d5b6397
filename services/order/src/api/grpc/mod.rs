//! gRPC 服务模块

pub mod authorization;
mod conversions;
mod order_service;

pub use authorization::{AuthorizationChain, RequestFacts, extract_bearer_token, methods};
pub use order_service::OrderServiceImpl;
