//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `ROSTRA_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `ROSTRA_SERVER__HOST=127.0.0.1`
/// - `ROSTRA_SERVER__PORT=9090`
/// - `ROSTRA_DATABASE__PATH=/data/rostra.db`
/// - `ROSTRA_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("api.base_path", "/api/v1")?
        .set_default("metrics.path", "/metrics")?
        .set_default("metrics.slow_threshold_secs", 1.0)?
        .set_default("metrics.duration_buckets", vec![0.1, 0.3, 1.2, 5.0, 10.0])?
        .set_default("docs.base_path", "/api/v1/employee")?
        .set_default("database.path", "data/rostra.db")?
        .set_default("database.max_connections", 5)?
        .set_default("log.level", "info")?
        .set_default("log.json", true)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: ROSTRA_
    // 层级分隔符: __ (双下划线)
    // 例如: ROSTRA_SERVER__PORT=9090
    builder = builder.add_source(
        Environment::with_prefix("ROSTRA")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    // 验证端口范围
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    // 验证路径前缀
    for (field, value) in [
        ("api.base_path", &config.api.base_path),
        ("docs.base_path", &config.docs.base_path),
        ("metrics.path", &config.metrics.path),
    ] {
        if !value.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "{} must start with '/'",
                field
            )));
        }
    }

    // 验证数据库路径
    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    // 验证慢请求阈值
    if config.metrics.slow_threshold_secs <= 0.0 {
        return Err(ConfigError::ValidationError(
            "Slow request threshold must be positive".to_string(),
        ));
    }

    // 验证直方图桶边界：非空且严格递增
    let buckets = &config.metrics.duration_buckets;
    if buckets.is_empty() {
        return Err(ConfigError::ValidationError(
            "Duration buckets cannot be empty".to_string(),
        ));
    }
    if buckets[0] <= 0.0 {
        return Err(ConfigError::ValidationError(
            "Duration buckets must be positive".to_string(),
        ));
    }
    if buckets.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ConfigError::ValidationError(
            "Duration buckets must be strictly ascending".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("API Base Path: {}", config.api.base_path);
    tracing::info!("Docs Base Path: {}", config.docs.base_path);
    tracing::info!("Metrics Path: {}", config.metrics.path);
    tracing::info!(
        "Slow Request Threshold: {}s",
        config.metrics.slow_threshold_secs
    );
    tracing::info!("Duration Buckets: {:?}", config.metrics.duration_buckets);
    tracing::info!("Database: {}", config.database.path);
    tracing::info!(
        "Database Max Connections: {}",
        config.database.max_connections
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("Log JSON: {}", config.log.json);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_relative_metrics_path() {
        let mut config = AppConfig::default();
        config.metrics.path = "metrics".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_db_path() {
        let mut config = AppConfig::default();
        config.database.path = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_unsorted_buckets() {
        let mut config = AppConfig::default();
        config.metrics.duration_buckets = vec![0.3, 0.1, 1.2];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_buckets() {
        let mut config = AppConfig::default();
        config.metrics.duration_buckets = Vec::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_slow_threshold() {
        let mut config = AppConfig::default();
        config.metrics.slow_threshold_secs = 0.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[server]\nport = 9090\n\n[log]\njson = false").unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9090);
        assert!(!config.log.json);
        // 未覆盖的字段保持默认值
        assert_eq!(config.metrics.path, "/metrics");
        assert_eq!(config.metrics.duration_buckets, vec![0.1, 0.3, 1.2, 5.0, 10.0]);
    }
}
