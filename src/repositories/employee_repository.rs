use crate::models::{Employee, EmployeeInput};
use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{classify_write_error, RepositoryResult};

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait EmployeeRepository: Send + Sync {
    /// All rows, newest id first.
    async fn list(&self) -> RepositoryResult<Vec<Employee>>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Employee>>;
    async fn create(&self, input: &EmployeeInput) -> RepositoryResult<i64>;
    /// Returns the number of rows touched.
    async fn update(&self, id: i64, input: &EmployeeInput) -> RepositoryResult<u64>;
    /// Returns the number of rows removed.
    async fn delete(&self, id: i64) -> RepositoryResult<u64>;
}

pub struct SqliteEmployeeRepository {
    pool: SqlitePool,
}

impl SqliteEmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for SqliteEmployeeRepository {
    async fn list(&self) -> RepositoryResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, email, department, salary, status
            FROM employees
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Employee>> {
        let row = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, email, department, salary, status
            FROM employees
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, input: &EmployeeInput) -> RepositoryResult<i64> {
        let result = sqlx::query(
            "INSERT INTO employees (name, email, department, salary, status) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.department)
        .bind(input.salary)
        .bind(&input.status)
        .execute(&self.pool)
        .await
        .map_err(classify_write_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, input: &EmployeeInput) -> RepositoryResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET name = ?, email = ?, department = ?, salary = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.department)
        .bind(input.salary)
        .bind(&input.status)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(classify_write_error)?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<u64> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
