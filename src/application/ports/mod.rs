//! Application Ports - 端口定义
//!
//! 六边形架构出站端口，具体实现位于 infrastructure 层

mod repositories;

pub use repositories::{EmployeeRecord, EmployeeRepositoryPort, RepositoryError};
