use serde::{Deserialize, Serialize};

pub const SESSION_USER_KEY: &str = "user";
pub const SESSION_SETTINGS_KEY: &str = "settings";
pub const SESSION_TOKEN_KEY: &str = "token";

/// Identity written into the session by a successful login.
///
/// The demo login only knows the email; the token login also records id and role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl SessionUser {
    pub fn with_email(email: impl Into<String>) -> Self {
        SessionUser {
            email: email.into(),
            id: None,
            role: None,
        }
    }

    pub fn is_present(&self) -> bool {
        !self.email.trim().is_empty()
    }
}
