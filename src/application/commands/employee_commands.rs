//! Employee Commands

use uuid::Uuid;

/// 创建员工命令
#[derive(Debug, Clone)]
pub struct CreateEmployee {
    pub name: String,
    pub email: String,
    pub department: Option<String>,
}

/// 更新员工命令（全量替换）
#[derive(Debug, Clone)]
pub struct UpdateEmployee {
    pub employee_id: Uuid,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
}

/// 删除员工命令
#[derive(Debug, Clone)]
pub struct DeleteEmployee {
    pub employee_id: Uuid,
}
