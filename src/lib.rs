pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use std::sync::Arc;

use config::AppConfig;
use repositories::{SqliteEmployeeRepository, SqliteProfileRepository, SqliteUserRepository};
use services::{
    AuthService, EmployeeService, MediaStore, ProfileService, TokenService, UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub employee_service: Arc<EmployeeService>,
    pub profile_service: Arc<ProfileService>,
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
    pub media_store: Arc<MediaStore>,
    pub pool: sqlx::SqlitePool,
}

impl AppState {
    /// Wire the SQLite repositories and services around one pool.
    pub fn new(pool: sqlx::SqlitePool, config: AppConfig) -> Self {
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let employee_repository = Arc::new(SqliteEmployeeRepository::new(pool.clone()));
        let profile_repository = Arc::new(SqliteProfileRepository::new(pool.clone()));

        let auth_service = AuthService::new(
            config.auth_strategy,
            config.demo_credential.clone(),
            user_repository.clone(),
        );

        Self {
            employee_service: Arc::new(EmployeeService::new(employee_repository)),
            profile_service: Arc::new(ProfileService::new(profile_repository)),
            user_service: Arc::new(UserService::new(user_repository)),
            auth_service: Arc::new(auth_service),
            token_service: Arc::new(TokenService::new(config.jwt_secret.clone())),
            media_store: Arc::new(MediaStore::new(config.upload_dir.clone())),
            config: Arc::new(config),
            pool,
        }
    }
}
