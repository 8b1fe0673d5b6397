//! petstore-bootstrap - 统一服务启动骨架
//!
//! 所有服务复用的启动逻辑

mod health;
mod infrastructure;
mod layers;
mod metrics;
mod reflection;
mod retry;
mod runtime;
mod starter;

pub use health::*;
pub use infrastructure::*;
pub use layers::*;
pub use metrics::*;
pub use reflection::*;
pub use retry::*;
pub use runtime::*;
pub use starter::*;
