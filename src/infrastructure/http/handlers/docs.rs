//! Docs Handlers
//!
//! 交互式 API 文档（Swagger UI）与机器可读的接口描述文档。
//!
//! 描述文档中的 host 取自当前请求的 Host 头并作为参数传入渲染，
//! 不存在进程级可变 host 字段，并发文档请求之间互不影响。

use axum::{
    extract::{Host, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// Swagger UI 页面骨架，接口描述从同级的 doc.json 加载
const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Rostra Employee API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({
        url: "doc.json",
        dom_id: "#swagger-ui",
      });
    };
  </script>
</body>
</html>
"##;

/// GET /swagger - 跳转到文档首页
pub async fn swagger_redirect() -> Redirect {
    Redirect::temporary("/swagger/index.html")
}

/// GET /swagger/*rest - 文档 UI 与描述文档
pub async fn swagger_ui(
    State(state): State<Arc<AppState>>,
    Host(host): Host,
    Path(rest): Path<String>,
) -> Response {
    match rest.as_str() {
        "doc.json" => Json(openapi_document(&host, &state.config.docs.base_path)).into_response(),
        "index.html" => Html(SWAGGER_UI_HTML).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// 构建接口描述文档
///
/// host 为当前请求的 Host 头，base_path 来自配置（默认 /api/v1/employee），
/// 使文档里的 "try it" 链接始终指向客户端实际访问到的主机名。
fn openapi_document(host: &str, base_path: &str) -> Value {
    json!({
        "swagger": "2.0",
        "info": {
            "title": "Rostra Employee API",
            "description": "Employee CRUD API",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "host": host,
        "basePath": base_path,
        "schemes": ["http"],
        "paths": {
            "": {
                "post": {
                    "summary": "Create employee",
                    "consumes": ["application/json"],
                    "produces": ["application/json"],
                    "parameters": [{
                        "name": "employee",
                        "in": "body",
                        "required": true,
                        "schema": {"$ref": "#/definitions/EmployeeRequest"},
                    }],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "schema": {"$ref": "#/definitions/EmployeeEnvelope"},
                        },
                    },
                },
                "get": {
                    "summary": "List employees",
                    "produces": ["application/json"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "schema": {"$ref": "#/definitions/EmployeeListEnvelope"},
                        },
                    },
                },
            },
            "/{id}": {
                "get": {
                    "summary": "Get employee by id",
                    "produces": ["application/json"],
                    "parameters": [{
                        "name": "id",
                        "in": "path",
                        "required": true,
                        "type": "string",
                        "format": "uuid",
                    }],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "schema": {"$ref": "#/definitions/EmployeeEnvelope"},
                        },
                    },
                },
                "put": {
                    "summary": "Update employee",
                    "consumes": ["application/json"],
                    "produces": ["application/json"],
                    "parameters": [
                        {
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "type": "string",
                            "format": "uuid",
                        },
                        {
                            "name": "employee",
                            "in": "body",
                            "required": true,
                            "schema": {"$ref": "#/definitions/EmployeeRequest"},
                        },
                    ],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "schema": {"$ref": "#/definitions/EmployeeEnvelope"},
                        },
                    },
                },
                "delete": {
                    "summary": "Delete employee",
                    "produces": ["application/json"],
                    "parameters": [{
                        "name": "id",
                        "in": "path",
                        "required": true,
                        "type": "string",
                        "format": "uuid",
                    }],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "schema": {"$ref": "#/definitions/EmptyEnvelope"},
                        },
                    },
                },
            },
        },
        "definitions": {
            "EmployeeRequest": {
                "type": "object",
                "required": ["name", "email"],
                "properties": {
                    "name": {"type": "string"},
                    "email": {"type": "string"},
                    "department": {"type": "string"},
                },
            },
            "Employee": {
                "type": "object",
                "properties": {
                    "id": {"type": "string", "format": "uuid"},
                    "name": {"type": "string"},
                    "email": {"type": "string"},
                    "department": {"type": "string"},
                    "created_at": {"type": "string", "format": "date-time"},
                    "updated_at": {"type": "string", "format": "date-time"},
                },
            },
            "EmployeeEnvelope": {
                "type": "object",
                "properties": {
                    "errno": {"type": "integer"},
                    "error": {"type": "string"},
                    "data": {"$ref": "#/definitions/Employee"},
                },
            },
            "EmployeeListEnvelope": {
                "type": "object",
                "properties": {
                    "errno": {"type": "integer"},
                    "error": {"type": "string"},
                    "data": {
                        "type": "array",
                        "items": {"$ref": "#/definitions/Employee"},
                    },
                },
            },
            "EmptyEnvelope": {
                "type": "object",
                "properties": {
                    "errno": {"type": "integer"},
                    "error": {"type": "string"},
                    "data": {"type": "object"},
                },
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_embeds_request_host() {
        let doc = openapi_document("api.example.com:8080", "/api/v1/employee");
        assert_eq!(doc["host"], "api.example.com:8080");
        assert_eq!(doc["basePath"], "/api/v1/employee");
    }

    #[test]
    fn test_each_document_reflects_its_own_host() {
        // 顺序两次构建，各自携带自己的 host，互不影响
        let doc1 = openapi_document("h1.example.com", "/api/v1/employee");
        let doc2 = openapi_document("h2.example.com", "/api/v1/employee");

        assert_eq!(doc1["host"], "h1.example.com");
        assert_eq!(doc2["host"], "h2.example.com");
    }

    #[test]
    fn test_document_covers_crud_operations() {
        let doc = openapi_document("localhost:8080", "/api/v1/employee");

        assert!(doc["paths"][""]["post"].is_object());
        assert!(doc["paths"][""]["get"].is_object());
        assert!(doc["paths"]["/{id}"]["get"].is_object());
        assert!(doc["paths"]["/{id}"]["put"].is_object());
        assert!(doc["paths"]["/{id}"]["delete"].is_object());
    }
}
