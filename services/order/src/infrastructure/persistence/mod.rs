//! PostgreSQL 持久化

mod order_repository;
mod rows;

pub use order_repository::PostgresOrderRepository;
