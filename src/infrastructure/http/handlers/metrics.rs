//! Metrics Handler
//!
//! Prometheus 文本格式暴露端点

use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// GET /metrics - 导出请求计数与延迟直方图
pub async fn prometheus_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.metrics.render()
}
