pub mod employee_repository;
pub mod profile_repository;
pub mod user_repository;

pub use employee_repository::{EmployeeRepository, SqliteEmployeeRepository};
pub use profile_repository::{ProfileRepository, SqliteProfileRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Record not found")]
    NotFound,
    #[error("Record already exists")]
    AlreadyExists,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Map a write failure, singling out unique-constraint violations.
pub(crate) fn classify_write_error(err: sqlx::Error) -> RepositoryError {
    let is_unique = err
        .as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false);

    if is_unique {
        RepositoryError::AlreadyExists
    } else {
        RepositoryError::Database(err)
    }
}
