use crate::auth::handlers::remember_me_requested;
use crate::auth::TokenClaims;
use crate::error::AuthApiError;
use crate::models::session::{SESSION_TOKEN_KEY, SESSION_USER_KEY};
use crate::models::{Role, SessionUser, UserProfile};
use crate::services::{
    AuthServiceError, CreateUserRequest, LoginRequest, UserServiceError,
};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_sessions::Session;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct ApiLoginRequest {
    email: Option<String>,
    password: Option<String>,
    #[serde(rename = "rememberMe", default)]
    remember_me: Value,
}

#[derive(Debug, Deserialize)]
pub struct ApiRegisterRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

fn json_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => remember_me_requested(Some(s)),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub async fn api_login_handler(
    State(app_state): State<AppState>,
    session: Session,
    Json(body): Json<ApiLoginRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    let request = LoginRequest {
        email: body.email.unwrap_or_default(),
        password: body.password.unwrap_or_default(),
    };

    let user = match app_state.auth_service.verify_user(&request).await {
        Ok(user) => user,
        Err(AuthServiceError::InvalidCredentials) => {
            return Err(AuthApiError::InvalidCredentials)
        }
        Err(e) => return Err(AuthApiError::Internal(e.to_string())),
    };

    let token = app_state
        .token_service
        .issue(&user, json_truthy(&body.remember_me))
        .map_err(|e| AuthApiError::Internal(e.to_string()))?;

    let session_user = SessionUser {
        email: user.email.clone(),
        id: Some(user.id),
        role: Some(user.role.clone()),
    };
    session
        .insert(SESSION_USER_KEY, &session_user)
        .await
        .map_err(|e| AuthApiError::Internal(e.to_string()))?;
    session
        .insert(SESSION_TOKEN_KEY, &token)
        .await
        .map_err(|e| AuthApiError::Internal(e.to_string()))?;

    info!("Token issued for {}", user.email);
    Ok(Json(json!({
        "success": true,
        "token": token,
        "user": {
            "id": user.id,
            "email": user.email,
            "name": user.name,
            "role": user.role,
        }
    })))
}

pub async fn api_register_handler(
    State(app_state): State<AppState>,
    Json(body): Json<ApiRegisterRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    let email = body.email.unwrap_or_default().trim().to_string();
    let password = body.password.unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(AuthApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let request = CreateUserRequest {
        email,
        password,
        name: body.name.filter(|n| !n.trim().is_empty()),
        role: Role::User,
    };

    let user = app_state
        .user_service
        .register_user(request)
        .await
        .map_err(|e| match e {
            UserServiceError::EmailTaken => {
                AuthApiError::BadRequest("User already exists".to_string())
            }
            other => {
                error!("Error creating user: {}", other);
                AuthApiError::Internal(other.to_string())
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User registered successfully",
            "userId": user.id,
        })),
    ))
}

pub async fn api_me_handler(
    State(app_state): State<AppState>,
    TokenClaims(claims): TokenClaims,
) -> Result<Json<UserProfile>, AuthApiError> {
    match app_state.auth_service.get_user_by_id(claims.id).await {
        Ok(user) => Ok(Json(UserProfile::from(user))),
        Err(AuthServiceError::UserNotFound) => Err(AuthApiError::UserNotFound),
        Err(e) => Err(AuthApiError::Internal(e.to_string())),
    }
}

pub async fn api_logout_handler(
    session: Session,
    TokenClaims(claims): TokenClaims,
) -> Result<impl IntoResponse, AuthApiError> {
    session
        .flush()
        .await
        .map_err(|e| AuthApiError::Internal(e.to_string()))?;

    info!("User {} logged out", claims.email);
    Ok(Json(json!({
        "success": true,
        "message": "Logged out successfully",
    })))
}
