use crate::models::employee::DEFAULT_STATUS;
use crate::models::{Employee, EmployeeForm, EmployeeInput};
use crate::repositories::{EmployeeRepository, RepositoryError};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum EmployeeServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Employee not found")]
    NotFound,
    #[error("Email already in use")]
    DuplicateEmail,
    #[error("Repository error: {0}")]
    RepositoryError(RepositoryError),
}

impl From<RepositoryError> for EmployeeServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists => EmployeeServiceError::DuplicateEmail,
            RepositoryError::NotFound => EmployeeServiceError::NotFound,
            other => EmployeeServiceError::RepositoryError(other),
        }
    }
}

pub struct EmployeeService {
    repository: Arc<dyn EmployeeRepository>,
}

impl EmployeeService {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, EmployeeServiceError> {
        Ok(self.repository.list().await?)
    }

    pub async fn find_employee(&self, id: i64) -> Result<Option<Employee>, EmployeeServiceError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    pub async fn create_employee(
        &self,
        form: EmployeeForm,
    ) -> Result<Employee, EmployeeServiceError> {
        let input = validate_employee(&form)?;

        let id = self.repository.create(&input).await.map_err(|e| {
            warn!("Could not create employee {}: {}", input.email, e);
            EmployeeServiceError::from(e)
        })?;

        info!("Created employee {} ({})", id, input.email);
        Ok(input.into_employee(id))
    }

    /// Full replace of every field. Missing ids are not reported.
    pub async fn update_employee(
        &self,
        id: i64,
        form: EmployeeForm,
    ) -> Result<Employee, EmployeeServiceError> {
        let input = validate_employee(&form)?;

        let touched = self.repository.update(id, &input).await.map_err(|e| {
            warn!("Could not update employee {}: {}", id, e);
            EmployeeServiceError::from(e)
        })?;

        if touched == 0 {
            warn!("Update of employee {} matched no rows", id);
        }
        Ok(input.into_employee(id))
    }

    /// Deleting an id that does not exist succeeds.
    pub async fn delete_employee(&self, id: i64) -> Result<(), EmployeeServiceError> {
        let removed = self.repository.delete(id).await?;
        info!("Deleted employee {} ({} row(s))", id, removed);
        Ok(())
    }
}

pub fn validate_employee(form: &EmployeeForm) -> Result<EmployeeInput, EmployeeServiceError> {
    let name = form.name.trim();
    let email = form.email.trim();

    if name.is_empty() {
        return Err(EmployeeServiceError::Validation(
            "Name is required".to_string(),
        ));
    }
    if email.is_empty() {
        return Err(EmployeeServiceError::Validation(
            "Email is required".to_string(),
        ));
    }

    let salary = match form.salary.trim() {
        "" => None,
        raw => Some(raw.parse::<f64>().map_err(|_| {
            EmployeeServiceError::Validation("Salary must be a number".to_string())
        })?),
    };

    let department = Some(form.department.trim())
        .filter(|d| !d.is_empty())
        .map(String::from);

    let status = match form.status.trim() {
        "" => DEFAULT_STATUS.to_string(),
        s => s.to_string(),
    };

    Ok(EmployeeInput {
        name: name.to_string(),
        email: email.to_string(),
        department,
        salary,
        status,
    })
}
