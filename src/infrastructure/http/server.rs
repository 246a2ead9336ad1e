//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::sync::Arc;

use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::info;

use super::middleware::{handle_panic, metrics_middleware, request_logging_middleware};
use super::routes::create_routes;
use super::state::AppState;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 创建带默认配置的服务器
    pub fn with_default_config(state: AppState) -> Self {
        Self::new(ServerConfig::default(), state)
    }

    /// 构建 Router
    ///
    /// 中间件按注册顺序生效（外到内）: metrics -> recovery -> logging -> handler。
    /// metrics 在最外层，panic 被恢复层转换为 500 后仍会计入观测；
    /// 日志在恢复层内侧，与 handler 的距离最近。
    pub fn build_router(&self) -> Router {
        let metrics = self.state.metrics.clone();

        create_routes(&self.state.config)
            .route_layer(middleware::from_fn(request_logging_middleware))
            .route_layer(CatchPanicLayer::custom(handle_panic))
            .route_layer(middleware::from_fn_with_state(metrics, metrics_middleware))
            .with_state(self.state.clone())
    }

    /// 启动服务器
    ///
    /// 绑定失败直接返回错误（由调用方记录并终止进程），
    /// 绑定成功后一直服务到进程被外部终止。未配置读写超时与优雅关闭。
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {}", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::EmployeeRepositoryPort;
    use crate::config::AppConfig;
    use crate::infrastructure::metrics::HttpMetrics;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteEmployeeRepository,
    };
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    async fn test_server() -> HttpServer {
        let config = AppConfig::default();

        let db_config = DatabaseConfig::in_memory();
        let pool = create_pool(&db_config).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let employee_repo: Arc<dyn EmployeeRepositoryPort> =
            Arc::new(SqliteEmployeeRepository::new(pool));
        let metrics = Arc::new(HttpMetrics::new(&config.metrics));

        let state = AppState::new(config, employee_repo, metrics);
        HttpServer::with_default_config(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let app = test_server().await.build_router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_employee_crud_roundtrip() {
        let app = test_server().await.build_router();

        // 创建
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/employee",
                serde_json::json!({
                    "name": "张三",
                    "email": "zhang.san@example.com",
                    "department": "平台组",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        assert_eq!(created["errno"], 0);
        let id = created["data"]["id"].as_str().unwrap().to_string();

        // 详情
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/employee/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let fetched = body_json(response).await;
        assert_eq!(fetched["errno"], 0);
        assert_eq!(fetched["data"]["email"], "zhang.san@example.com");

        // 更新
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/v1/employee/{}", id),
                serde_json::json!({
                    "name": "张三",
                    "email": "zhang.san@corp.example.com",
                }),
            ))
            .await
            .unwrap();
        let updated = body_json(response).await;
        assert_eq!(updated["errno"], 0);
        assert_eq!(updated["data"]["email"], "zhang.san@corp.example.com");
        assert!(updated["data"]["department"].is_null());

        // 列表
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/employee")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let listed = body_json(response).await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);

        // 删除
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/v1/employee/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let deleted = body_json(response).await;
        assert_eq!(deleted["errno"], 0);

        // 删除后查询返回 404 错误码
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/employee/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let missing = body_json(response).await;
        assert_eq!(missing["errno"], 404);
    }

    #[tokio::test]
    async fn test_create_employee_validation_errors() {
        let app = test_server().await.build_router();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/employee",
                serde_json::json!({"name": "", "email": "a@b.com"}),
            ))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["errno"], 400);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/employee",
                serde_json::json!({"name": "李四", "email": "not-an-email"}),
            ))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["errno"], 400);
    }

    #[tokio::test]
    async fn test_create_duplicate_email_conflicts() {
        let app = test_server().await.build_router();

        let payload = serde_json::json!({"name": "张三", "email": "dup@example.com"});
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/v1/employee", payload.clone()))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["errno"], 0);

        let response = app
            .oneshot(json_request("POST", "/api/v1/employee", payload))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["errno"], 409);
    }

    #[tokio::test]
    async fn test_metrics_endpoint_exposes_bucket_bounds() {
        let server = test_server().await;
        let app = server.build_router();

        // 先产生一次业务请求观测
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();

        for le in ["0.1", "0.3", "1.2", "5", "10"] {
            assert!(text.contains(&format!("le=\"{}\"", le)), "missing {}", le);
        }
        assert!(text.contains("rostra_http_requests_total"));
        assert!(text.contains("path=\"/api/v1/ping\""));
    }

    #[tokio::test]
    async fn test_every_routed_request_is_observed_once() {
        let server = test_server().await;
        let metrics = server.state.metrics.clone();
        let app = server.build_router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        assert_eq!(metrics.request_count("GET", "/api/v1/ping", 200), 1);
    }

    #[tokio::test]
    async fn test_docs_host_follows_each_request() {
        let app = test_server().await.build_router();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/swagger/doc.json")
                    .header("host", "h1.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let doc1 = body_json(response).await;
        assert_eq!(doc1["host"], "h1.example.com");
        assert_eq!(doc1["basePath"], "/api/v1/employee");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/swagger/doc.json")
                    .header("host", "h2.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let doc2 = body_json(response).await;
        assert_eq!(doc2["host"], "h2.example.com");
    }

    #[tokio::test]
    async fn test_bind_failure_surfaces_error() {
        // 先占用端口，再尝试在同一端口启动
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = occupied.local_addr().unwrap().port();

        let mut server = test_server().await;
        server.config = ServerConfig::new("127.0.0.1", port);

        // 绑定失败立刻返回错误，由 main 记录并以非零状态退出
        let result = server.run().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_swagger_index_served() {
        let app = test_server().await.build_router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/swagger/index.html")
                    .header("host", "localhost:8080")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("swagger-ui"));
        assert!(html.contains("doc.json"));
    }
}
