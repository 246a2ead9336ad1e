//! Employee Context - Errors

use thiserror::Error;

use super::EmployeeId;

#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("员工不存在: {0}")]
    NotFound(EmployeeId),

    #[error("邮箱已被占用: {0}")]
    EmailTaken(String),

    #[error("无效的姓名: {0}")]
    InvalidName(String),

    #[error("无效的邮箱: {0}")]
    InvalidEmail(String),

    #[error("存储错误: {0}")]
    StorageError(String),
}
