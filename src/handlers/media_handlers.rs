use crate::auth::current_user;
use crate::handlers::render_page;
use crate::services::MediaError;
use crate::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::{error, warn};

/// Upper bound for one gallery upload.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const IMAGE_FIELD: &str = "image";

#[derive(Template, WebTemplate)]
#[template(path = "more/images.html")]
struct ImagesTemplate {
    user_email: Option<String>,
    images: Vec<String>,
    error: Option<String>,
}

async fn gallery(app_state: &AppState) -> Vec<String> {
    app_state
        .media_store
        .list_images()
        .await
        .unwrap_or_else(|e| {
            warn!("Could not read upload directory: {}", e);
            Vec::new()
        })
}

pub async fn images_page(
    State(app_state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    ImagesTemplate {
        user_email: current_user(&session).await.map(|u| u.email),
        images: gallery(&app_state).await,
        error: None,
    }
}

pub async fn upload_image_handler(
    State(app_state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Response {
    match store_upload(&app_state, multipart).await {
        Ok(_) => Redirect::to("/more/images").into_response(),
        Err(MediaError::Io(e)) => {
            error!("Failed to store upload: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Could not store image").into_response()
        }
        Err(e) => {
            let template = ImagesTemplate {
                user_email: current_user(&session).await.map(|u| u.email),
                images: gallery(&app_state).await,
                error: Some(e.to_string()),
            };
            render_page(StatusCode::BAD_REQUEST, &template)
        }
    }
}

/// Pull the `image` field out of the request and hand it to the store.
async fn store_upload(
    app_state: &AppState,
    mut multipart: Multipart,
) -> Result<String, MediaError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Invalid multipart request: {}", e);
        MediaError::MissingFile
    })? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(|e| {
            warn!("Multipart error: {}", e);
            MediaError::MissingFile
        })?;

        return app_state
            .media_store
            .store_image(&file_name, content_type.as_deref(), &data)
            .await;
    }

    Err(MediaError::MissingFile)
}
