use crate::models::{EmployeeProfile, ProfileInput, ProfileSearch};
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{classify_write_error, RepositoryResult};

const PROFILE_COLUMNS: &str = "id, first_name, last_name, email, mobile, dob, gender, address, \
                               country, city, other_city, skills";

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait ProfileRepository: Send + Sync {
    async fn create(&self, input: &ProfileInput) -> RepositoryResult<i64>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<EmployeeProfile>>;
    async fn update(&self, id: i64, input: &ProfileInput) -> RepositoryResult<u64>;
    async fn delete(&self, id: i64) -> RepositoryResult<u64>;
    /// Substring filters ANDed together, newest id first.
    async fn search(&self, search: &ProfileSearch) -> RepositoryResult<Vec<EmployeeProfile>>;
}

pub struct SqliteProfileRepository {
    pool: SqlitePool,
}

impl SqliteProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(crate) fn build_search_query(search: &ProfileSearch) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {} FROM employee_profiles WHERE 1=1",
        PROFILE_COLUMNS
    ));

    if let Some(name) = search.name_filter() {
        builder
            .push(" AND first_name LIKE ")
            .push_bind(format!("%{}%", name));
    }
    if let Some(mobile) = search.mobile_filter() {
        builder
            .push(" AND mobile LIKE ")
            .push_bind(format!("%{}%", mobile));
    }

    builder.push(" ORDER BY id DESC");
    builder
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepository {
    async fn create(&self, input: &ProfileInput) -> RepositoryResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO employee_profiles
                (first_name, last_name, email, mobile, dob, gender, address, country, city, other_city, skills)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.mobile)
        .bind(&input.dob)
        .bind(&input.gender)
        .bind(&input.address)
        .bind(&input.country)
        .bind(&input.city)
        .bind(&input.other_city)
        .bind(&input.skills)
        .execute(&self.pool)
        .await
        .map_err(classify_write_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<EmployeeProfile>> {
        let row = sqlx::query_as::<_, EmployeeProfile>(&format!(
            "SELECT {} FROM employee_profiles WHERE id = ?",
            PROFILE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, input: &ProfileInput) -> RepositoryResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE employee_profiles
            SET first_name = ?, last_name = ?, email = ?, mobile = ?, dob = ?, gender = ?,
                address = ?, country = ?, city = ?, other_city = ?, skills = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.mobile)
        .bind(&input.dob)
        .bind(&input.gender)
        .bind(&input.address)
        .bind(&input.country)
        .bind(&input.city)
        .bind(&input.other_city)
        .bind(&input.skills)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(classify_write_error)?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<u64> {
        let result = sqlx::query("DELETE FROM employee_profiles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn search(&self, search: &ProfileSearch) -> RepositoryResult<Vec<EmployeeProfile>> {
        let rows = build_search_query(search)
            .build_query_as::<EmployeeProfile>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
