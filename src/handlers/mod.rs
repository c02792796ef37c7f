pub mod auth_api_handlers;
pub mod employee_api_handlers;
pub mod employee_handlers;
pub mod home_handlers;
pub mod media_handlers;
pub mod profile_handlers;
pub mod settings_handlers;

pub use auth_api_handlers::*;
pub use employee_api_handlers::*;
pub use employee_handlers::*;
pub use home_handlers::*;
pub use media_handlers::*;
pub use profile_handlers::*;
pub use settings_handlers::*;

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

/// Render a page with an explicit status, for re-rendered forms.
pub(crate) fn render_page<T: Template>(status: StatusCode, template: &T) -> Response {
    match template.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!("Template rendering failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<html><body><h1>Error rendering page</h1></body></html>".to_string()),
            )
                .into_response()
        }
    }
}
