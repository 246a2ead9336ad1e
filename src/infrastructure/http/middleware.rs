//! HTTP Middleware
//!
//! 请求日志、指标采集与 panic 恢复
//!
//! 注册顺序（由 server 装配，外到内）: metrics -> recovery -> logging -> handler

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::error::{errno, ErrorResponse};
use crate::infrastructure::metrics::HttpMetrics;

/// 结构化请求日志中间件
///
/// 每个请求恰好记录一行：method、path、status、耗时。
/// 级别按状态码分类，与进程日志共用同一结构化格式。
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms = latency_ms,
            "Request completed"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms = latency_ms,
            "Request completed"
        );
    } else {
        tracing::info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms = latency_ms,
            "Request completed"
        );
    }

    response
}

/// 指标采集中间件
///
/// path 标签使用路由模板（如 `/api/v1/employee/:id`）而非原始 URI，
/// 避免标签基数随资源 ID 膨胀。
pub async fn metrics_middleware(
    State(metrics): State<Arc<HttpMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    metrics.observe(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed(),
    );

    response
}

/// panic 恢复响应
///
/// 单个请求中的未捕获 panic 转换为 500 响应，进程继续服务后续请求。
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());

    tracing::error!(error = %detail, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(
            errno::INTERNAL_ERROR,
            "internal server error",
        )),
    )
        .into_response()
}
