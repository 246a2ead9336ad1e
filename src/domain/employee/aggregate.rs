//! Employee Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Email, EmployeeError, EmployeeId, FullName};

/// Employee 聚合根
///
/// 不变量:
/// - 邮箱在系统内唯一（由仓储层保证）
/// - 姓名和邮箱始终通过值对象校验
/// - updated_at 随每次修改前移
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    name: FullName,
    email: Email,
    department: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Employee {
    /// 创建新员工
    pub fn new(name: FullName, email: Email, department: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: EmployeeId::new(),
            name,
            email,
            department,
            created_at: now,
            updated_at: now,
        }
    }

    /// 从已有字段还原聚合（用于仓储加载）
    pub fn from_parts(
        id: EmployeeId,
        name: FullName,
        email: Email,
        department: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            department,
            created_at,
            updated_at,
        }
    }

    /// 更新姓名
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), EmployeeError> {
        self.name = FullName::new(name)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// 更新邮箱
    pub fn change_email(&mut self, email: impl Into<String>) -> Result<(), EmployeeError> {
        self.email = Email::new(email)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// 调整部门
    pub fn assign_department(&mut self, department: Option<String>) {
        self.department = department;
        self.updated_at = Utc::now();
    }

    // Getters
    pub fn id(&self) -> &EmployeeId {
        &self.id
    }

    pub fn name(&self) -> &FullName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_employee() -> Employee {
        let name = FullName::new("张三").unwrap();
        let email = Email::new("zhang.san@example.com").unwrap();
        Employee::new(name, email, Some("平台组".to_string()))
    }

    #[test]
    fn test_employee_creation() {
        let employee = sample_employee();

        assert_eq!(employee.name().as_str(), "张三");
        assert_eq!(employee.email().as_str(), "zhang.san@example.com");
        assert_eq!(employee.department(), Some("平台组"));
        assert_eq!(employee.created_at(), employee.updated_at());
    }

    #[test]
    fn test_rename_validates() {
        let mut employee = sample_employee();

        assert!(employee.rename("").is_err());
        assert!(employee.rename("李四").is_ok());
        assert_eq!(employee.name().as_str(), "李四");
    }

    #[test]
    fn test_change_email_validates() {
        let mut employee = sample_employee();

        assert!(employee.change_email("not-an-email").is_err());
        assert!(employee.change_email("li.si@example.com").is_ok());
        assert_eq!(employee.email().as_str(), "li.si@example.com");
    }
}
