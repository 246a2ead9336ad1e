//! Application State
//!
//! 包含配置、指标注册表以及所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateEmployeeHandler, DeleteEmployeeHandler, UpdateEmployeeHandler,
    // Query handlers
    GetEmployeeHandler, ListEmployeesHandler,
    // Ports
    EmployeeRepositoryPort,
};
use crate::config::AppConfig;
use crate::infrastructure::metrics::HttpMetrics;

/// 应用状态
pub struct AppState {
    // ========== 配置与指标 ==========
    pub config: AppConfig,
    pub metrics: Arc<HttpMetrics>,

    // ========== Ports ==========
    pub employee_repo: Arc<dyn EmployeeRepositoryPort>,

    // ========== Command Handlers ==========
    pub create_employee_handler: CreateEmployeeHandler,
    pub update_employee_handler: UpdateEmployeeHandler,
    pub delete_employee_handler: DeleteEmployeeHandler,

    // ========== Query Handlers ==========
    pub get_employee_handler: GetEmployeeHandler,
    pub list_employees_handler: ListEmployeesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        config: AppConfig,
        employee_repo: Arc<dyn EmployeeRepositoryPort>,
        metrics: Arc<HttpMetrics>,
    ) -> Self {
        Self {
            config,
            metrics,
            employee_repo: employee_repo.clone(),

            // Command handlers
            create_employee_handler: CreateEmployeeHandler::new(employee_repo.clone()),
            update_employee_handler: UpdateEmployeeHandler::new(employee_repo.clone()),
            delete_employee_handler: DeleteEmployeeHandler::new(employee_repo.clone()),

            // Query handlers
            get_employee_handler: GetEmployeeHandler::new(employee_repo.clone()),
            list_employees_handler: ListEmployeesHandler::new(employee_repo),
        }
    }
}
