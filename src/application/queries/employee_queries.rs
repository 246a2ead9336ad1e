//! Employee Queries

use uuid::Uuid;

/// 查询单个员工
#[derive(Debug, Clone)]
pub struct GetEmployee {
    pub employee_id: Uuid,
}

/// 查询员工列表
#[derive(Debug, Clone)]
pub struct ListEmployees;
