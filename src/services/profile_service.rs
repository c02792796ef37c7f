use crate::models::employee_profile::join_skills;
use crate::models::{EmployeeProfile, ProfileForm, ProfileInput, ProfileSearch};
use crate::repositories::{ProfileRepository, RepositoryError};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ProfileServiceError {
    /// Every failed rule, in form order.
    #[error("Invalid profile: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct ProfileService {
    repository: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_profile(&self, form: &ProfileForm) -> Result<i64, ProfileServiceError> {
        let input = validate_profile(form)?;

        let id = self.repository.create(&input).await.map_err(|e| {
            warn!("Could not save employee profile {}: {}", input.email, e);
            e
        })?;

        info!("Created employee profile {}", id);
        Ok(id)
    }

    pub async fn find_profile(
        &self,
        id: i64,
    ) -> Result<Option<EmployeeProfile>, ProfileServiceError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    pub async fn update_profile(
        &self,
        id: i64,
        form: &ProfileForm,
    ) -> Result<(), ProfileServiceError> {
        let input = validate_profile(form)?;

        self.repository.update(id, &input).await.map_err(|e| {
            warn!("Could not update employee profile {}: {}", id, e);
            e
        })?;

        info!("Updated employee profile {}", id);
        Ok(())
    }

    /// No existence check: removing an unknown id is a no-op.
    pub async fn delete_profile(&self, id: i64) -> Result<(), ProfileServiceError> {
        self.repository.delete(id).await?;
        info!("Deleted employee profile {}", id);
        Ok(())
    }

    pub async fn search_profiles(
        &self,
        search: &ProfileSearch,
    ) -> Result<Vec<EmployeeProfile>, ProfileServiceError> {
        Ok(self.repository.search(search).await?)
    }
}

pub fn validate_profile(form: &ProfileForm) -> Result<ProfileInput, ProfileServiceError> {
    let mut errors = Vec::new();
    if form.first_name.trim().is_empty() {
        errors.push("First Name is required".to_string());
    }
    if form.email.trim().is_empty() {
        errors.push("Email is required".to_string());
    }
    if !errors.is_empty() {
        return Err(ProfileServiceError::Validation(errors));
    }

    Ok(ProfileInput {
        first_name: form.first_name.trim().to_string(),
        last_name: Some(form.last_name.trim())
            .filter(|v| !v.is_empty())
            .map(String::from),
        email: form.email.trim().to_string(),
        mobile: optional(&form.mobile),
        dob: optional(&form.dob),
        gender: optional(&form.gender),
        address: optional(&form.address),
        country: optional(&form.country),
        city: optional(&form.city),
        other_city: optional(&form.other_city),
        skills: join_skills(&form.skills),
    })
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
