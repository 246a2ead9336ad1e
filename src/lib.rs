//! Rostra - 员工 CRUD API 服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Employee Context: 员工管理上下文
//!
//! 应用层 (application/):
//! - Ports: 端口定义（EmployeeRepository）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 指标/文档端点 + 中间件链
//! - Metrics: 请求指标采集与 Prometheus 文本导出
//! - Persistence: SQLite 存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
