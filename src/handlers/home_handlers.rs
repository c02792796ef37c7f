use crate::auth::current_user;
use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Redirect};
use tower_sessions::Session;

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
struct HomeTemplate {
    user_email: Option<String>,
}

pub async fn index_handler() -> impl IntoResponse {
    Redirect::to("/home")
}

pub async fn home_handler(session: Session) -> impl IntoResponse {
    HomeTemplate {
        user_email: current_user(&session).await.map(|u| u.email),
    }
}
