use crate::config::{AuthStrategy, DemoCredential};
use crate::models::{SessionUser, User};
use crate::repositories::{RepositoryError, UserRepository};
use crate::services::user_service::verify_password;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User not found")]
    UserNotFound,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// One login capability, two backends.
pub struct AuthService {
    strategy: AuthStrategy,
    demo_credential: DemoCredential,
    user_repository: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(
        strategy: AuthStrategy,
        demo_credential: DemoCredential,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            strategy,
            demo_credential,
            user_repository,
        }
    }

    /// Resolve the identity a successful HTML login writes into the session.
    pub async fn authenticate(
        &self,
        request: &LoginRequest,
    ) -> Result<SessionUser, AuthServiceError> {
        match self.strategy {
            AuthStrategy::Demo => {
                if request.email == self.demo_credential.email
                    && request.password == self.demo_credential.password
                {
                    Ok(SessionUser::with_email(request.email.clone()))
                } else {
                    debug!("Demo login rejected for {}", request.email);
                    Err(AuthServiceError::InvalidCredentials)
                }
            }
            AuthStrategy::Hashed => {
                let user = self.verify_user(request).await?;
                Ok(SessionUser {
                    email: user.email,
                    id: Some(user.id),
                    role: Some(user.role),
                })
            }
        }
    }

    /// Check an email/password pair against the `users` table.
    pub async fn verify_user(&self, request: &LoginRequest) -> Result<User, AuthServiceError> {
        let user = self
            .user_repository
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash) {
            debug!("Password mismatch for {}", request.email);
            return Err(AuthServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn get_user_by_id(&self, user_id: i64) -> Result<User, AuthServiceError> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound)
    }
}
