pub mod test_helpers {
    use std::path::Path;

    use axum::Router;
    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
    use tempfile::NamedTempFile;
    use tower_sessions::MemoryStore;

    use crate::config::{session::SessionConfig, AppConfig};
    use crate::models::Role;
    use crate::services::user_service::hash_password;
    use crate::{routes, AppState};

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        // One connection that never recycles, or the in-memory database is lost
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// Create a temporary file-based SQLite database for testing
    /// Useful when you need to test features that don't work with in-memory databases
    pub async fn create_test_db_file() -> Result<(SqlitePool, NamedTempFile), sqlx::Error> {
        let temp_file = NamedTempFile::new().map_err(sqlx::Error::Io)?;
        let db_path = temp_file
            .path()
            .to_str()
            .ok_or_else(|| sqlx::Error::Configuration("Invalid database path".into()))?;
        let database_url = format!("sqlite://{}", db_path);

        let pool = crate::db::create_pool(&database_url).await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok((pool, temp_file))
    }

    /// Default configuration with uploads redirected into `upload_dir`.
    pub fn test_config(upload_dir: &Path) -> AppConfig {
        AppConfig {
            upload_dir: upload_dir.to_path_buf(),
            jwt_secret: "test-jwt-secret".to_string(),
            ..AppConfig::default()
        }
    }

    /// Full router over an in-memory session store.
    pub fn build_test_app(pool: SqlitePool, config: AppConfig) -> Router {
        let state = AppState::new(pool, config);
        let session_layer = SessionConfig::from_env().create_layer(MemoryStore::default());
        routes::build_router(state, session_layer)
    }

    /// Insert a test user with hashed password
    pub async fn insert_test_user(
        pool: &SqlitePool,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<i64, sqlx::Error> {
        let password_hash = hash_password(password).map_err(|e| {
            sqlx::Error::Configuration(format!("Password hashing failed: {}", e).into())
        })?;

        let result = sqlx::query(
            "INSERT INTO users (email, password_hash, name, role) VALUES (?, ?, ?, ?)",
        )
        .bind(email)
        .bind(password_hash)
        .bind("Test User")
        .bind(role.as_str())
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn insert_test_employee(
        pool: &SqlitePool,
        name: &str,
        email: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO employees (name, email) VALUES (?, ?)")
            .bind(name)
            .bind(email)
            .execute(pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn insert_test_profile(
        pool: &SqlitePool,
        first_name: &str,
        email: &str,
        mobile: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO employee_profiles (first_name, email, mobile) VALUES (?, ?, ?)",
        )
        .bind(first_name)
        .bind(email)
        .bind(mobile)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn count_rows(pool: &SqlitePool, table: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
    }
}

// Re-export commonly used test functions at module level for convenience
// Note: This is test-only code. Panic on error is acceptable in tests.
#[cfg(test)]
pub async fn create_test_pool() -> sqlx::SqlitePool {
    match test_helpers::create_test_db().await {
        Ok(pool) => pool,
        Err(e) => panic!("Failed to create test pool: {}", e),
    }
}
