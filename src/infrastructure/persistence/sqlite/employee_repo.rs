//! SQLite Employee Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{EmployeeRecord, EmployeeRepositoryPort, RepositoryError};

/// SQLite Employee Repository
pub struct SqliteEmployeeRepository {
    pool: DbPool,
}

impl SqliteEmployeeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct EmployeeRow {
    id: String,
    name: String,
    email: String,
    department: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<EmployeeRow> for EmployeeRecord {
    type Error = RepositoryError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(EmployeeRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            name: row.name,
            email: row.email,
            department: row.department,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339(&row.updated_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

/// 唯一索引冲突映射为 Duplicate 错误
fn map_sqlx_error(e: sqlx::Error, email: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.message().contains("UNIQUE constraint failed") {
            return RepositoryError::Duplicate(format!("email {}", email));
        }
    }
    RepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl EmployeeRepositoryPort for SqliteEmployeeRepository {
    async fn save(&self, employee: &EmployeeRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO employees (id, name, email, department, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                email = excluded.email,
                department = excluded.department,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(employee.id.to_string())
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(employee.created_at.to_rfc3339())
        .bind(employee.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, &employee.email))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<EmployeeRecord>, RepositoryError> {
        let row: Option<EmployeeRow> = sqlx::query_as(
            "SELECT id, name, email, department, created_at, updated_at FROM employees WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(EmployeeRecord::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<EmployeeRecord>, RepositoryError> {
        let row: Option<EmployeeRow> = sqlx::query_as(
            "SELECT id, name, email, department, created_at, updated_at FROM employees WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(EmployeeRecord::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<EmployeeRecord>, RepositoryError> {
        let rows: Vec<EmployeeRow> = sqlx::query_as(
            "SELECT id, name, email, department, created_at, updated_at FROM employees ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(EmployeeRecord::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
