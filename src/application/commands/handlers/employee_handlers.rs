//! Employee Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateEmployee, DeleteEmployee, UpdateEmployee};
use crate::application::error::ApplicationError;
use crate::application::ports::{EmployeeRecord, EmployeeRepositoryPort};
use crate::domain::{Email, Employee, FullName};

fn record_from_aggregate(employee: &Employee) -> EmployeeRecord {
    EmployeeRecord {
        id: *employee.id().as_uuid(),
        name: employee.name().as_str().to_string(),
        email: employee.email().as_str().to_string(),
        department: employee.department().map(|d| d.to_string()),
        created_at: employee.created_at(),
        updated_at: employee.updated_at(),
    }
}

// ============================================================================
// CreateEmployee
// ============================================================================

/// 创建员工响应
#[derive(Debug, Clone)]
pub struct CreateEmployeeResponse {
    pub record: EmployeeRecord,
}

/// CreateEmployee Handler
pub struct CreateEmployeeHandler {
    employee_repo: Arc<dyn EmployeeRepositoryPort>,
}

impl CreateEmployeeHandler {
    pub fn new(employee_repo: Arc<dyn EmployeeRepositoryPort>) -> Self {
        Self { employee_repo }
    }

    pub async fn handle(
        &self,
        command: CreateEmployee,
    ) -> Result<CreateEmployeeResponse, ApplicationError> {
        let name = FullName::new(command.name)?;
        let email = Email::new(command.email)?;

        // 邮箱唯一性检查
        if let Some(existing) = self.employee_repo.find_by_email(email.as_str()).await? {
            return Err(ApplicationError::conflict(format!(
                "Email already in use by employee {}",
                existing.id
            )));
        }

        let employee = Employee::new(name, email, command.department);
        let record = record_from_aggregate(&employee);

        self.employee_repo.save(&record).await?;

        tracing::info!(
            employee_id = %record.id,
            email = %record.email,
            "Employee created"
        );

        Ok(CreateEmployeeResponse { record })
    }
}

// ============================================================================
// UpdateEmployee
// ============================================================================

/// 更新员工响应
#[derive(Debug, Clone)]
pub struct UpdateEmployeeResponse {
    pub record: EmployeeRecord,
}

/// UpdateEmployee Handler
pub struct UpdateEmployeeHandler {
    employee_repo: Arc<dyn EmployeeRepositoryPort>,
}

impl UpdateEmployeeHandler {
    pub fn new(employee_repo: Arc<dyn EmployeeRepositoryPort>) -> Self {
        Self { employee_repo }
    }

    pub async fn handle(
        &self,
        command: UpdateEmployee,
    ) -> Result<UpdateEmployeeResponse, ApplicationError> {
        let employee_id = command.employee_id;

        let stored = self
            .employee_repo
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Employee", employee_id))?;

        let mut employee = aggregate_from_record(&stored)?;
        employee.rename(command.name)?;
        employee.change_email(command.email)?;
        employee.assign_department(command.department);

        // 邮箱换绑时检查新邮箱未被其他员工占用
        if employee.email().as_str() != stored.email {
            if let Some(other) = self
                .employee_repo
                .find_by_email(employee.email().as_str())
                .await?
            {
                if other.id != employee_id {
                    return Err(ApplicationError::conflict(format!(
                        "Email already in use by employee {}",
                        other.id
                    )));
                }
            }
        }

        let record = record_from_aggregate(&employee);
        self.employee_repo.save(&record).await?;

        tracing::info!(
            employee_id = %record.id,
            email = %record.email,
            "Employee updated"
        );

        Ok(UpdateEmployeeResponse { record })
    }
}

// ============================================================================
// DeleteEmployee
// ============================================================================

/// DeleteEmployee Handler
pub struct DeleteEmployeeHandler {
    employee_repo: Arc<dyn EmployeeRepositoryPort>,
}

impl DeleteEmployeeHandler {
    pub fn new(employee_repo: Arc<dyn EmployeeRepositoryPort>) -> Self {
        Self { employee_repo }
    }

    pub async fn handle(&self, command: DeleteEmployee) -> Result<(), ApplicationError> {
        let employee_id = command.employee_id;

        // 先确认员工存在
        let employee = self
            .employee_repo
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Employee", employee_id))?;

        self.employee_repo.delete(employee_id).await?;

        tracing::info!(
            employee_id = %employee_id,
            email = %employee.email,
            "Employee deleted"
        );

        Ok(())
    }
}

/// 从持久化记录还原聚合（同时重校验值对象）
fn aggregate_from_record(record: &EmployeeRecord) -> Result<Employee, ApplicationError> {
    let name = FullName::new(record.name.clone())?;
    let email = Email::new(record.email.clone())?;

    Ok(Employee::from_parts(
        crate::domain::EmployeeId::from_uuid(record.id),
        name,
        email,
        record.department.clone(),
        record.created_at,
        record.updated_at,
    ))
}
