use crate::auth::current_user;
use crate::error::AppError;
use crate::handlers::render_page;
use crate::models::{Employee, EmployeeForm};
use crate::services::EmployeeServiceError;
use crate::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::error;

#[derive(Template, WebTemplate)]
#[template(path = "employees/list.html")]
struct EmployeeListTemplate {
    user_email: Option<String>,
    employees: Vec<Employee>,
}

#[derive(Template, WebTemplate)]
#[template(path = "employees/form.html")]
struct EmployeeFormTemplate {
    user_email: Option<String>,
    /// Present when editing; decides the form's target.
    employee_id: Option<i64>,
    form: EmployeeForm,
    error: Option<String>,
}

const CREATE_FAILED: &str = "Could not create employee (maybe duplicate email).";
const UPDATE_FAILED: &str = "Could not update employee (maybe duplicate email).";

pub async fn list_employees_page(
    State(app_state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let employees = app_state
        .employee_service
        .list_employees()
        .await
        .map_err(|e| {
            error!("Error loading employees: {}", e);
            AppError::InternalError
        })?;

    Ok(EmployeeListTemplate {
        user_email: current_user(&session).await.map(|u| u.email),
        employees,
    })
}

pub async fn new_employee_page(session: Session) -> impl IntoResponse {
    EmployeeFormTemplate {
        user_email: current_user(&session).await.map(|u| u.email),
        employee_id: None,
        form: EmployeeForm::default(),
        error: None,
    }
}

pub async fn create_employee_handler(
    State(app_state): State<AppState>,
    session: Session,
    Form(form): Form<EmployeeForm>,
) -> Response {
    match app_state.employee_service.create_employee(form.clone()).await {
        Ok(_) => Redirect::to("/employees").into_response(),
        Err(e) => {
            let message = failure_message(e, CREATE_FAILED);
            let template = EmployeeFormTemplate {
                user_email: current_user(&session).await.map(|u| u.email),
                employee_id: None,
                form,
                error: Some(message),
            };
            render_page(StatusCode::BAD_REQUEST, &template)
        }
    }
}

pub async fn edit_employee_page(
    State(app_state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let employee = app_state
        .employee_service
        .find_employee(id)
        .await
        .map_err(|e| {
            error!("Error loading employee {}: {}", id, e);
            AppError::NotFound("Employee not found".to_string())
        })?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    Ok(EmployeeFormTemplate {
        user_email: current_user(&session).await.map(|u| u.email),
        employee_id: Some(employee.id),
        form: EmployeeForm::from(&employee),
        error: None,
    })
}

pub async fn update_employee_handler(
    State(app_state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<EmployeeForm>,
) -> Response {
    match app_state
        .employee_service
        .update_employee(id, form.clone())
        .await
    {
        Ok(_) => Redirect::to("/employees").into_response(),
        Err(e) => {
            let message = failure_message(e, UPDATE_FAILED);
            let template = EmployeeFormTemplate {
                user_email: current_user(&session).await.map(|u| u.email),
                employee_id: Some(id),
                form,
                error: Some(message),
            };
            render_page(StatusCode::BAD_REQUEST, &template)
        }
    }
}

pub async fn delete_employee_handler(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    match app_state.employee_service.delete_employee(id).await {
        Ok(()) => Redirect::to("/employees").into_response(),
        Err(e) => {
            error!("Could not delete employee {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not delete employee",
            )
                .into_response()
        }
    }
}

/// Validation messages are shown as-is; store failures stay generic.
fn failure_message(err: EmployeeServiceError, store_failure: &str) -> String {
    match err {
        EmployeeServiceError::Validation(msg) => msg,
        _ => store_failure.to_string(),
    }
}
