use crate::auth::current_user;
use crate::config::{lookups, LookupOption};
use crate::error::AppError;
use crate::handlers::render_page;
use crate::models::{EmployeeProfile, ProfileForm, ProfileSearch};
use crate::services::ProfileServiceError;
use crate::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::error;

#[derive(Template, WebTemplate)]
#[template(path = "profiles/create.html")]
struct ProfileCreateTemplate {
    user_email: Option<String>,
    form: ProfileForm,
    errors: Vec<String>,
    success: Option<String>,
    countries: Vec<LookupOption>,
    cities: Vec<LookupOption>,
    skills: Vec<LookupOption>,
}

#[derive(Template, WebTemplate)]
#[template(path = "profiles/edit.html")]
struct ProfileEditTemplate {
    user_email: Option<String>,
    profile_id: i64,
    form: ProfileForm,
    errors: Vec<String>,
    countries: Vec<LookupOption>,
    cities: Vec<LookupOption>,
    skills: Vec<LookupOption>,
}

#[derive(Template, WebTemplate)]
#[template(path = "profiles/search.html")]
struct ProfileSearchTemplate {
    user_email: Option<String>,
    name: String,
    mobile: String,
    profiles: Vec<EmployeeProfile>,
}

impl ProfileCreateTemplate {
    fn new(
        user_email: Option<String>,
        form: ProfileForm,
        errors: Vec<String>,
        success: Option<String>,
    ) -> Self {
        let tables = lookups();
        Self {
            user_email,
            countries: tables.country_options(&form.country),
            cities: tables.city_options(&form.city),
            skills: tables.skill_options(&form.skills),
            form,
            errors,
            success,
        }
    }
}

impl ProfileEditTemplate {
    fn new(
        user_email: Option<String>,
        profile_id: i64,
        form: ProfileForm,
        errors: Vec<String>,
    ) -> Self {
        let tables = lookups();
        Self {
            user_email,
            profile_id,
            countries: tables.country_options(&form.country),
            cities: tables.city_options(&form.city),
            skills: tables.skill_options(&form.skills),
            form,
            errors,
        }
    }
}

pub async fn create_profile_page(session: Session) -> impl IntoResponse {
    let user_email = current_user(&session).await.map(|u| u.email);
    ProfileCreateTemplate::new(user_email, ProfileForm::default(), Vec::new(), None)
}

pub async fn create_profile_handler(
    State(app_state): State<AppState>,
    session: Session,
    body: String,
) -> Response {
    // Manually parse form data so repeated `skills` keys are kept
    let form = ProfileForm::from_urlencoded(body.as_bytes());
    let user_email = current_user(&session).await.map(|u| u.email);

    match app_state.profile_service.create_profile(&form).await {
        Ok(_) => {
            let template = ProfileCreateTemplate::new(
                user_email,
                ProfileForm::default(),
                Vec::new(),
                Some("Employee saved successfully.".to_string()),
            );
            render_page(StatusCode::OK, &template)
        }
        Err(ProfileServiceError::Validation(errors)) => {
            let template = ProfileCreateTemplate::new(user_email, form, errors, None);
            render_page(StatusCode::BAD_REQUEST, &template)
        }
        Err(e) => {
            error!("Could not save employee profile: {}", e);
            let template = ProfileCreateTemplate::new(
                user_email,
                form,
                vec!["Could not save employee profile.".to_string()],
                None,
            );
            render_page(StatusCode::INTERNAL_SERVER_ERROR, &template)
        }
    }
}

pub async fn search_profiles_page(
    State(app_state): State<AppState>,
    session: Session,
    Query(search): Query<ProfileSearch>,
) -> Result<impl IntoResponse, AppError> {
    let profiles = app_state
        .profile_service
        .search_profiles(&search)
        .await
        .map_err(|e| {
            error!("Error searching employees: {}", e);
            AppError::InternalError
        })?;

    Ok(ProfileSearchTemplate {
        user_email: current_user(&session).await.map(|u| u.email),
        name: search.name.unwrap_or_default(),
        mobile: search.mobile.unwrap_or_default(),
        profiles,
    })
}

/// Turn a posted search form into the equivalent GET query.
pub async fn search_profiles_submit(Form(search): Form<ProfileSearch>) -> Response {
    let pairs = [
        ("name", search.name.unwrap_or_default()),
        ("mobile", search.mobile.unwrap_or_default()),
    ];
    match serde_urlencoded::to_string(&pairs[..]) {
        Ok(qs) => Redirect::to(&format!("/employee/search?{}", qs)).into_response(),
        Err(e) => {
            error!("Could not encode search query: {}", e);
            Redirect::to("/employee/search").into_response()
        }
    }
}

pub async fn edit_profile_page(
    State(app_state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let profile = app_state
        .profile_service
        .find_profile(id)
        .await
        .map_err(|e| {
            error!("Error loading employee profile {}: {}", id, e);
            AppError::NotFound("Employee not found".to_string())
        })?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    let user_email = current_user(&session).await.map(|u| u.email);
    Ok(ProfileEditTemplate::new(
        user_email,
        profile.id,
        ProfileForm::from(&profile),
        Vec::new(),
    ))
}

pub async fn update_profile_handler(
    State(app_state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    body: String,
) -> Response {
    let form = ProfileForm::from_urlencoded(body.as_bytes());

    match app_state.profile_service.update_profile(id, &form).await {
        Ok(()) => Redirect::to("/employee/search").into_response(),
        Err(ProfileServiceError::Validation(errors)) => {
            let user_email = current_user(&session).await.map(|u| u.email);
            let template = ProfileEditTemplate::new(user_email, id, form, errors);
            render_page(StatusCode::BAD_REQUEST, &template)
        }
        Err(e) => {
            error!("Could not update employee profile {}: {}", id, e);
            let user_email = current_user(&session).await.map(|u| u.email);
            let template = ProfileEditTemplate::new(
                user_email,
                id,
                form,
                vec!["Could not update employee profile.".to_string()],
            );
            render_page(StatusCode::INTERNAL_SERVER_ERROR, &template)
        }
    }
}

pub async fn delete_profile_handler(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    match app_state.profile_service.delete_profile(id).await {
        Ok(()) => Redirect::to("/employee/search").into_response(),
        Err(e) => {
            error!("Could not delete employee profile {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not delete employee",
            )
                .into_response()
        }
    }
}
