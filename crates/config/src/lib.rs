//! petstore-config - 配置加载库
//!
//! 加载顺序：`{dir}/default.toml` → `{dir}/{APP_ENV}.toml` → `APP_` 前缀环境变量
//! （嵌套字段用 `__` 分隔，例如 `APP_DATABASE__URL`）

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use thiserror::Error;

use secrecy::Secret;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// AMQP 消息代理配置
#[derive(Debug, Clone, Deserialize)]
pub struct AmqpConfig {
    pub url: Secret<String>,
    /// 订单通知队列
    #[serde(default = "default_queue")]
    pub queue: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_queue() -> String {
    "order".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    5
}

/// 外部身份认证（SSO）服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct SsoConfig {
    pub endpoint: String,
    #[serde(default = "default_sso_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_sso_timeout_secs() -> u64 {
    5
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 订单创建后通知失败时的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPolicy {
    /// 记录日志后继续，订单创建仍然成功
    #[default]
    BestEffort,
    /// 通知失败则整个创建请求失败（订单行已提交）
    Required,
}

/// 通知配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationConfig {
    #[serde(default)]
    pub policy: NotificationPolicy,
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub app_env: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub amqp: AmqpConfig,
    pub sso: SsoConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let config: Self = Self::figment(config_dir, &env).extract()?;
        Ok(config)
    }

    fn figment(config_dir: &str, env: &str) -> Figment {
        Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("APP_").split("__"))
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}
