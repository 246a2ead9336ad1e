//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// API 配置
    #[serde(default)]
    pub api: ApiConfig,

    /// 指标配置
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// 文档配置
    #[serde(default)]
    pub docs: DocsConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// 版本化 API 前缀
    #[serde(default = "default_api_base_path")]
    pub base_path: String,
}

fn default_api_base_path() -> String {
    "/api/v1".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: default_api_base_path(),
        }
    }
}

/// 指标配置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    /// 指标暴露路径
    #[serde(default = "default_metrics_path")]
    pub path: String,

    /// 慢请求阈值（秒）
    #[serde(default = "default_slow_threshold")]
    pub slow_threshold_secs: f64,

    /// 延迟直方图桶边界（秒）
    #[serde(default = "default_duration_buckets")]
    pub duration_buckets: Vec<f64>,
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_slow_threshold() -> f64 {
    1.0
}

fn default_duration_buckets() -> Vec<f64> {
    vec![0.1, 0.3, 1.2, 5.0, 10.0]
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            path: default_metrics_path(),
            slow_threshold_secs: default_slow_threshold(),
            duration_buckets: default_duration_buckets(),
        }
    }
}

/// 文档配置
#[derive(Debug, Clone, Deserialize)]
pub struct DocsConfig {
    /// 文档中声明的 API 基础路径
    #[serde(default = "default_docs_base_path")]
    pub base_path: String,
}

fn default_docs_base_path() -> String {
    "/api/v1/employee".to_string()
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            base_path: default_docs_base_path(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/rostra.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default = "default_log_json")]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_json() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_log_json(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.api.base_path, "/api/v1");
        assert_eq!(config.docs.base_path, "/api/v1/employee");
        assert_eq!(config.metrics.path, "/metrics");
        assert_eq!(config.database.path, "data/rostra.db");
    }

    #[test]
    fn test_default_metrics_buckets() {
        let config = MetricsConfig::default();
        assert_eq!(config.duration_buckets, vec![0.1, 0.3, 1.2, 5.0, 10.0]);
        assert_eq!(config.slow_threshold_secs, 1.0);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_database_url() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database_url(), "sqlite:data/rostra.db?mode=rwc");
    }

    #[test]
    fn test_log_defaults_to_json_info() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.json);
    }
}
