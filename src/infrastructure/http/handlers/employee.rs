//! Employee HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{
    CreateEmployee, DeleteEmployee, GetEmployee, ListEmployees, UpdateEmployee,
};
use crate::infrastructure::http::dto::{
    ApiResponse, CreateEmployeeRequest, Empty, EmployeeResponse, UpdateEmployeeRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 创建员工
pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<Json<ApiResponse<EmployeeResponse>>, ApiError> {
    let command = CreateEmployee {
        name: req.name,
        email: req.email,
        department: req.department,
    };

    let result = state.create_employee_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(EmployeeResponse::from(
        result.record,
    ))))
}

/// 获取员工列表
pub async fn list_employees(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<EmployeeResponse>>>, ApiError> {
    let result = state.list_employees_handler.handle(ListEmployees).await?;

    let responses: Vec<EmployeeResponse> =
        result.into_iter().map(EmployeeResponse::from).collect();

    Ok(Json(ApiResponse::success(responses)))
}

/// 获取员工详情
pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EmployeeResponse>>, ApiError> {
    let query = GetEmployee { employee_id: id };

    let record = state.get_employee_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(EmployeeResponse::from(record))))
}

/// 更新员工（全量替换）
pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<ApiResponse<EmployeeResponse>>, ApiError> {
    let command = UpdateEmployee {
        employee_id: id,
        name: req.name,
        email: req.email,
        department: req.department,
    };

    let result = state.update_employee_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(EmployeeResponse::from(
        result.record,
    ))))
}

/// 删除员工
pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let command = DeleteEmployee { employee_id: id };

    state.delete_employee_handler.handle(command).await?;

    Ok(Json(ApiResponse::ok()))
}
