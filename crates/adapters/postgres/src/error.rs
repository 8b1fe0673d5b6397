//! 数据库错误映射
//!
//! 将 SQLx 错误统一转换为 AppError

use petstore_errors::AppError;

/// PostgreSQL 唯一约束冲突
pub const UNIQUE_VIOLATION: &str = "23505";

/// 将 SQLx 错误转换为 AppError，区分不同错误类型
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) => match code.as_ref() {
                UNIQUE_VIOLATION => AppError::conflict(match db_err.constraint() {
                    Some(constraint) => format!("Unique constraint {} violated", constraint),
                    None => "Duplicate entry violates unique constraint".to_string(),
                }),
                "23503" => AppError::validation("Foreign key constraint violation"),
                "23514" => AppError::validation("Check constraint violation"),
                "23502" => AppError::validation("Not null constraint violation"),
                "22P02" => AppError::validation("Invalid input syntax"),
                _ => AppError::database(format!("Database error ({}): {}", code, db_err)),
            },
            None => AppError::database(db_err.to_string()),
        },
        sqlx::Error::PoolTimedOut => AppError::internal("Database connection pool timeout"),
        sqlx::Error::PoolClosed => AppError::internal("Database connection pool is closed"),
        sqlx::Error::Protocol(msg) => AppError::internal(format!("Database protocol error: {}", msg)),
        _ => AppError::database(e.to_string()),
    }
}
