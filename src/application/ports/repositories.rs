//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// 员工实体（用于持久化）
#[derive(Debug, Clone)]
pub struct EmployeeRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Employee Repository Port
#[async_trait]
pub trait EmployeeRepositoryPort: Send + Sync {
    /// 保存员工（插入或更新）
    async fn save(&self, employee: &EmployeeRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找员工
    async fn find_by_id(&self, id: Uuid) -> Result<Option<EmployeeRecord>, RepositoryError>;

    /// 根据邮箱查找员工
    async fn find_by_email(&self, email: &str) -> Result<Option<EmployeeRecord>, RepositoryError>;

    /// 获取所有员工（按创建时间倒序）
    async fn find_all(&self) -> Result<Vec<EmployeeRecord>, RepositoryError>;

    /// 删除员工
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
