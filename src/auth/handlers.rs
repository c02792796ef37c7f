use crate::auth::middleware::current_user;
use crate::config::session::REMEMBER_ME_DURATION;
use crate::handlers::render_page;
use crate::models::session::SESSION_USER_KEY;
use crate::services::auth_service::{AuthServiceError, LoginRequest};
use crate::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::{Expiry, Session};
use tracing::{error, info};

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    user_email: Option<String>,
    error: Option<String>,
    email: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(rename = "rememberMe")]
    remember_me: Option<String>,
}

/// Checkbox and JSON-ish truthiness for the "remember me" field.
///
/// Stricter than plain string truthiness: besides empty input, the literal
/// strings `"false"` and `"off"` (any case) also count as unchecked.
pub(crate) fn remember_me_requested(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => false,
        Some(v) => !v.eq_ignore_ascii_case("false") && !v.eq_ignore_ascii_case("off"),
    }
}

pub async fn login_page(session: Session) -> Response {
    if current_user(&session).await.is_some() {
        return Redirect::to("/home").into_response();
    }

    LoginTemplate {
        user_email: None,
        error: None,
        email: String::new(),
    }
    .into_response()
}

pub async fn login_handler(
    State(app_state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let request = LoginRequest {
        email: form.email.clone(),
        password: form.password,
    };

    match app_state.auth_service.authenticate(&request).await {
        Ok(user) => {
            if let Err(e) = session.insert(SESSION_USER_KEY, &user).await {
                error!("Failed to write session user: {}", e);
                return login_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to create session",
                    form.email,
                );
            }

            // Without this the cookie lives for the browser session only.
            if remember_me_requested(form.remember_me.as_deref()) {
                session.set_expiry(Some(Expiry::OnInactivity(REMEMBER_ME_DURATION)));
            }

            info!("User {} logged in", user.email);
            Redirect::to("/home").into_response()
        }
        Err(AuthServiceError::InvalidCredentials) => login_error(
            StatusCode::UNAUTHORIZED,
            "Invalid email or password",
            form.email,
        ),
        Err(e) => {
            error!("Login failed: {}", e);
            login_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred. Please try again.",
                form.email,
            )
        }
    }
}

fn login_error(status: StatusCode, msg: &str, email: String) -> Response {
    let template = LoginTemplate {
        user_email: None,
        error: Some(msg.to_string()),
        email,
    };
    render_page(status, &template)
}

pub async fn logout_handler(session: Session) -> impl IntoResponse {
    if let Err(e) = session.flush().await {
        error!("Failed to flush session on logout: {}", e);
    }
    Redirect::to("/home")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remember_me_truthiness() {
        assert!(remember_me_requested(Some("on")));
        assert!(remember_me_requested(Some("true")));
        assert!(remember_me_requested(Some("1")));
        assert!(!remember_me_requested(None));
        assert!(!remember_me_requested(Some("")));
        assert!(!remember_me_requested(Some("false")));
        assert!(!remember_me_requested(Some("OFF")));
    }
}
