use crate::error::ApiError;
use crate::models::{Employee, EmployeeForm, EmployeePayload};
use crate::services::EmployeeServiceError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::error;

pub async fn api_list_employees(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees = app_state
        .employee_service
        .list_employees()
        .await
        .map_err(|e| {
            error!("Error loading employees: {}", e);
            ApiError::Internal("Error loading employees".to_string())
        })?;

    Ok(Json(employees))
}

pub async fn api_get_employee(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, ApiError> {
    app_state
        .employee_service
        .find_employee(id)
        .await
        .map_err(|e| {
            error!("Error loading employee {}: {}", id, e);
            ApiError::Internal("Error loading employee".to_string())
        })?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn api_create_employee(
    State(app_state): State<AppState>,
    Json(payload): Json<EmployeePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = app_state
        .employee_service
        .create_employee(EmployeeForm::from(payload))
        .await
        .map_err(|e| bad_request(e, "Could not create employee"))?;

    Ok((StatusCode::CREATED, Json(employee)))
}

/// Full replace. An unknown id still answers 200 with the submitted record.
pub async fn api_update_employee(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeePayload>,
) -> Result<Json<Employee>, ApiError> {
    let employee = app_state
        .employee_service
        .update_employee(id, EmployeeForm::from(payload))
        .await
        .map_err(|e| bad_request(e, "Could not update employee"))?;

    Ok(Json(employee))
}

pub async fn api_delete_employee(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    app_state
        .employee_service
        .delete_employee(id)
        .await
        .map_err(|e| {
            error!("Could not delete employee {}: {}", id, e);
            ApiError::Internal("Could not delete employee".to_string())
        })?;

    Ok(StatusCode::NO_CONTENT)
}

fn bad_request(err: EmployeeServiceError, store_failure: &str) -> ApiError {
    match err {
        EmployeeServiceError::Validation(msg) => ApiError::BadRequest(msg),
        other => {
            error!("{}: {}", store_failure, other);
            ApiError::BadRequest(store_failure.to_string())
        }
    }
}
