//! Rostra - 员工 CRUD API 服务
//!
//! 启动顺序:
//! - 加载配置（环境变量 > 配置文件 > 默认值）
//! - 初始化结构化日志（接受任何请求之前完成）
//! - 打开数据库并执行迁移
//! - 装配应用状态与路由，绑定端口开始服务

use std::sync::Arc;

use rostra::config::{load_config, print_config};
use rostra::infrastructure::http::{AppState, HttpServer, ServerConfig};
use rostra::infrastructure::metrics::HttpMetrics;
use rostra::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteEmployeeRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!("{},rostra={}", config.log.level, config.log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Rostra - Employee CRUD API");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器与指标注册表
    let employee_repo = Arc::new(SqliteEmployeeRepository::new(pool));
    let metrics = Arc::new(HttpMetrics::new(&config.metrics));

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(config, employee_repo, metrics);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 绑定失败是唯一的致命路径：记录原因后以非零状态退出，不重试
    if let Err(e) = server.run().await {
        tracing::error!(error = %e, "Failed to start server");
        std::process::exit(1);
    }

    Ok(())
}
