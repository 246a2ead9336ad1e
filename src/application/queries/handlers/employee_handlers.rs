//! Employee Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{EmployeeRecord, EmployeeRepositoryPort};
use crate::application::queries::{GetEmployee, ListEmployees};

/// GetEmployee Handler
pub struct GetEmployeeHandler {
    employee_repo: Arc<dyn EmployeeRepositoryPort>,
}

impl GetEmployeeHandler {
    pub fn new(employee_repo: Arc<dyn EmployeeRepositoryPort>) -> Self {
        Self { employee_repo }
    }

    pub async fn handle(&self, query: GetEmployee) -> Result<EmployeeRecord, ApplicationError> {
        self.employee_repo
            .find_by_id(query.employee_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Employee", query.employee_id))
    }
}

/// ListEmployees Handler
pub struct ListEmployeesHandler {
    employee_repo: Arc<dyn EmployeeRepositoryPort>,
}

impl ListEmployeesHandler {
    pub fn new(employee_repo: Arc<dyn EmployeeRepositoryPort>) -> Self {
        Self { employee_repo }
    }

    pub async fn handle(&self, _query: ListEmployees) -> Result<Vec<EmployeeRecord>, ApplicationError> {
        Ok(self.employee_repo.find_all().await?)
    }
}
