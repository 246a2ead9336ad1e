//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/v1/employee          POST   创建员工
//! - /api/v1/employee          GET    员工列表
//! - /api/v1/employee/{id}     GET    员工详情
//! - /api/v1/employee/{id}     PUT    更新员工
//! - /api/v1/employee/{id}     DELETE 删除员工
//! - /api/v1/ping              GET    健康检查
//! - /metrics                  GET    Prometheus 指标
//! - /swagger/*rest            GET    Swagger UI 与接口描述文档

use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;
use crate::config::AppConfig;

/// 创建所有路由
///
/// 版本化 API 前缀与指标路径来自配置（默认 /api/v1 与 /metrics）
pub fn create_routes(config: &AppConfig) -> Router<Arc<AppState>> {
    Router::new()
        .nest(&config.api.base_path, api_routes())
        .route(&config.metrics.path, get(handlers::prometheus_metrics))
        .route("/swagger", get(handlers::swagger_redirect))
        .route("/swagger/*rest", get(handlers::swagger_ui))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/employee", employee_routes())
}

/// Employee 路由注册器：给定挂载在版本化前缀下的路由组，注册全部员工资源端点
fn employee_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        .route(
            "/:id",
            get(handlers::get_employee)
                .put(handlers::update_employee)
                .delete(handlers::delete_employee),
        )
}
