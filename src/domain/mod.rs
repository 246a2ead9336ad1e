//! Domain Layer - 领域层
//!
//! 单一限界上下文:
//! - Employee Context: 员工管理

pub mod employee;

pub use employee::{Email, Employee, EmployeeError, EmployeeId, FullName};
