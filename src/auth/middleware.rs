use axum::{
    extract::{FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::debug;

use crate::error::AuthApiError;
use crate::models::session::{SESSION_TOKEN_KEY, SESSION_USER_KEY};
use crate::models::{Role, SessionUser};
use crate::services::Claims;
use crate::AppState;

/// The logged-in session user, if the session carries one with an email.
pub async fn current_user(session: &Session) -> Option<SessionUser> {
    match session.get::<SessionUser>(SESSION_USER_KEY).await {
        Ok(user) => user.filter(SessionUser::is_present),
        Err(e) => {
            debug!("Unreadable session user: {}", e);
            None
        }
    }
}

pub async fn require_auth(session: Session, request: Request, next: Next) -> Response {
    if current_user(&session).await.is_some() {
        next.run(request).await
    } else {
        Redirect::to("/login").into_response()
    }
}

/// Verified token claims for the JSON auth surface.
///
/// The token is read from `Authorization: Bearer ...` first, then from the
/// session's stored token.
#[derive(Debug, Clone)]
pub struct TokenClaims(pub Claims);

impl FromRequestParts<AppState> for TokenClaims {
    type Rejection = AuthApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let token = match header_token {
            Some(token) => token,
            None => {
                let session = Session::from_request_parts(parts, state)
                    .await
                    .map_err(|(_, msg)| AuthApiError::Internal(msg.to_string()))?;
                session
                    .get::<String>(SESSION_TOKEN_KEY)
                    .await
                    .map_err(|e| AuthApiError::Internal(e.to_string()))?
                    .ok_or(AuthApiError::AuthenticationRequired)?
            }
        };

        let claims = state.token_service.verify(&token).map_err(|e| {
            debug!("Token rejected: {}", e);
            AuthApiError::InvalidToken
        })?;

        Ok(TokenClaims(claims))
    }
}

pub fn require_admin(claims: &Claims) -> Result<(), AuthApiError> {
    if claims.role == Role::Admin.as_str() {
        Ok(())
    } else {
        Err(AuthApiError::Forbidden)
    }
}
