use crate::models::user::{Role, User};
use crate::repositories::{RepositoryError, UserRepository};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password too weak (minimum 8 characters)")]
    WeakPassword,
    #[error("User not found")]
    UserNotFound,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Password hashing failed: {0}")]
    HashingError(String),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub role: Role,
}

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, UserServiceError> {
        validate_email(&request.email)?;
        validate_password(&request.password)?;

        self.register_user(request).await
    }

    /// Insert an account without the email/password strength rules.
    ///
    /// Used by the public registration endpoint, which only requires both
    /// fields to be present.
    pub async fn register_user(&self, request: CreateUserRequest) -> Result<User, UserServiceError> {
        let password_hash = hash_password(&request.password)?;

        match self
            .repository
            .create_user(&request.email, &password_hash, request.name, request.role)
            .await
        {
            Ok(user) => {
                info!("Created {} account {}", user.role, user.email);
                Ok(user)
            }
            Err(RepositoryError::AlreadyExists) => Err(UserServiceError::EmailTaken),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }

    /// Seed an admin account unless the email is already registered.
    ///
    /// Returns `true` when a row was inserted. The demo password is shorter
    /// than the interactive minimum, so strength rules are not applied here.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<bool, UserServiceError> {
        if self.repository.find_by_email(email).await?.is_some() {
            return Ok(false);
        }

        let password_hash = hash_password(password)?;
        match self
            .repository
            .create_user(email, &password_hash, Some("Admin".to_string()), Role::Admin)
            .await
        {
            Ok(_) => {
                info!("Seeded admin account {}", email);
                Ok(true)
            }
            // Another process seeded it first.
            Err(RepositoryError::AlreadyExists) => Ok(false),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, UserServiceError> {
        Ok(self.repository.find_by_email(email).await?)
    }

    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, UserServiceError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    pub async fn list_users(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<User>, UserServiceError> {
        Ok(self.repository.list_users(limit, offset).await?)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), UserServiceError> {
        match self.repository.delete_user(id).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(UserServiceError::UserNotFound),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }

    pub async fn update_password(&self, id: i64, new_password: &str) -> Result<(), UserServiceError> {
        validate_password(new_password)?;
        let password_hash = hash_password(new_password)?;

        match self.repository.update_password(id, &password_hash).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(UserServiceError::UserNotFound),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }
}

fn validate_email(email: &str) -> Result<(), UserServiceError> {
    if !email.contains('@') || email.len() > 255 || email.is_empty() {
        return Err(UserServiceError::InvalidEmail);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), UserServiceError> {
    if password.len() < 8 {
        return Err(UserServiceError::WeakPassword);
    }
    Ok(())
}

pub fn hash_password(password: &str) -> Result<String, UserServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserServiceError::HashingError(e.to_string()))
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    if let Ok(parsed_hash) = PasswordHash::new(password_hash) {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    } else {
        false
    }
}
