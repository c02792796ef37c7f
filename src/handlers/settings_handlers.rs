use crate::auth::current_user;
use crate::handlers::render_page;
use crate::models::session::{SESSION_SETTINGS_KEY, SESSION_USER_KEY};
use crate::models::{SettingsForm, SettingsView, UserSettings};
use crate::services::settings_service::normalize_settings;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use tower_sessions::Session;
use tracing::{debug, error};

#[derive(Template, WebTemplate)]
#[template(path = "more/settings.html")]
struct SettingsTemplate {
    user_email: Option<String>,
    settings: SettingsView,
    success: Option<String>,
    errors: Vec<String>,
}

async fn stored_settings(session: &Session) -> UserSettings {
    session
        .get::<UserSettings>(SESSION_SETTINGS_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

pub async fn show_settings_page(session: Session) -> impl IntoResponse {
    let settings = stored_settings(&session).await;

    SettingsTemplate {
        user_email: current_user(&session).await.map(|u| u.email),
        settings: SettingsView::from(&settings),
        success: None,
        errors: Vec::new(),
    }
}

pub async fn update_settings_handler(
    session: Session,
    Form(form): Form<SettingsForm>,
) -> Response {
    let settings = match normalize_settings(&form) {
        Ok(settings) => settings,
        Err(errors) => {
            debug!("Settings rejected: {:?}", errors);
            let template = SettingsTemplate {
                user_email: current_user(&session).await.map(|u| u.email),
                settings: SettingsView::from(&form),
                success: None,
                errors,
            };
            return render_page(StatusCode::BAD_REQUEST, &template);
        }
    };

    if let Err(e) = session.insert(SESSION_SETTINGS_KEY, &settings).await {
        error!("Failed to store settings in session: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update session").into_response();
    }

    // The logged-in identity follows the saved email.
    let mut user = current_user(&session).await;
    if let Some(user) = user.as_mut() {
        user.email = settings.email.clone();
        if let Err(e) = session.insert(SESSION_USER_KEY, &*user).await {
            error!("Failed to update session user: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update session")
                .into_response();
        }
    }

    let template = SettingsTemplate {
        user_email: user.map(|u| u.email),
        settings: SettingsView::from(&settings),
        success: Some("Settings saved successfully!".to_string()),
        errors: Vec::new(),
    };
    render_page(StatusCode::OK, &template)
}
