//! 基础设施层

pub mod messaging;
pub mod persistence;
pub mod sso;

pub use messaging::BrokerNotifier;
pub use persistence::PostgresOrderRepository;
pub use sso::SsoIdentityService;
