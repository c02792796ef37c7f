use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;
use tracing::info;

/// Open the store, creating the database file (and its directory) on first access.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the data directory exists
    if let Some(parent) = std::path::Path::new(database_url.trim_start_matches("sqlite://")).parent()
    {
        std::fs::create_dir_all(parent).ok();
    }

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Apply or lift the unique index on `employee_profiles.email`.
pub async fn ensure_profile_email_constraint(
    pool: &SqlitePool,
    unique: bool,
) -> Result<(), sqlx::Error> {
    if unique {
        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_employee_profiles_email ON employee_profiles (email)",
        )
        .execute(pool)
        .await?;
        info!("Enforcing unique employee profile emails");
    } else {
        sqlx::query("DROP INDEX IF EXISTS idx_employee_profiles_email")
            .execute(pool)
            .await?;
    }

    Ok(())
}
