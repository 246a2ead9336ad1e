//! Employee Context - 员工限界上下文
//!
//! 职责:
//! - 员工聚合管理
//! - 姓名/邮箱值对象校验

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::Employee;
pub use errors::EmployeeError;
pub use value_objects::{Email, EmployeeId, FullName};
