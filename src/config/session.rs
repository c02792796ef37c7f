//! Session cookie policy.
//!
//! Cookies are signed with a key derived from `SESSION_SECRET` and are
//! browser-session scoped; only the login's "remember me" pushes the expiry
//! out (see [`REMEMBER_ME_DURATION`]).

use std::env;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha512};
use thiserror::Error;
use time::Duration;
use tower_sessions::{
    cookie::{Key, SameSite},
    service::SignedCookie,
    Expiry, SessionManagerLayer, SessionStore,
};
use tracing::warn;

use super::app::env_flag_enabled;

pub type SessionLayer<S> = SessionManagerLayer<S, SignedCookie>;

/// Cookie lifetime granted by the "remember me" checkbox.
pub const REMEMBER_ME_DURATION: Duration = Duration::days(7);

const MIN_PRODUCTION_SECRET_BYTES: usize = 64;
const PLACEHOLDER_MARKERS: [&str; 3] = ["example", "changeme", "default"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Anything but `ENVIRONMENT=production` counts as development.
    pub fn current() -> Self {
        match env::var("ENVIRONMENT").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionConfigError {
    #[error("production requires HTTPS; set FORCE_HTTPS=true")]
    HttpsRequired,
    #[error("SESSION_SECRET must be set in production")]
    MissingSecret,
    #[error("SESSION_SECRET must be at least {MIN_PRODUCTION_SECRET_BYTES} bytes in production")]
    SecretTooShort,
    #[error("SESSION_SECRET looks like a placeholder value")]
    PlaceholderSecret,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub name: String,
    secret: Option<String>,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let secret = env::var("SESSION_SECRET").ok().filter(|s| !s.is_empty());
        Self::for_environment(Environment::current(), secret)
    }

    pub fn for_environment(environment: Environment, secret: Option<String>) -> Self {
        match environment {
            // The __Host- prefix pins the cookie to this origin over HTTPS.
            Environment::Production => SessionConfig {
                secure: true,
                http_only: true,
                same_site: SameSite::Strict,
                name: "__Host-session".to_string(),
                secret,
            },
            Environment::Development => SessionConfig {
                secure: false,
                http_only: true,
                same_site: SameSite::Lax,
                name: "session".to_string(),
                secret,
            },
        }
    }

    pub fn create_layer<S: SessionStore + Clone>(&self, store: S) -> SessionLayer<S> {
        SessionManagerLayer::new(store)
            .with_secure(self.secure)
            .with_http_only(self.http_only)
            .with_same_site(self.same_site)
            .with_name(self.name.clone())
            .with_expiry(Expiry::OnSessionEnd)
            .with_signed(self.signing_key())
    }

    fn signing_key(&self) -> Key {
        match &self.secret {
            Some(secret) => derive_key(&decode_secret(secret)),
            None => {
                warn!("SESSION_SECRET not set; generating ephemeral key (development only)");
                Key::generate()
            }
        }
    }
}

/// Refuse to start a production deployment with a weak cookie setup.
pub fn validate_production_config() -> Result<(), SessionConfigError> {
    if Environment::current() != Environment::Production {
        return Ok(());
    }

    check_production_settings(
        env_flag_enabled("FORCE_HTTPS"),
        env::var("SESSION_SECRET").ok().as_deref(),
    )
}

pub fn check_production_settings(
    force_https: bool,
    secret: Option<&str>,
) -> Result<(), SessionConfigError> {
    if !force_https {
        return Err(SessionConfigError::HttpsRequired);
    }

    let secret = secret
        .filter(|s| !s.is_empty())
        .ok_or(SessionConfigError::MissingSecret)?;

    if decode_secret(secret).len() < MIN_PRODUCTION_SECRET_BYTES {
        return Err(SessionConfigError::SecretTooShort);
    }

    let lowered = secret.to_ascii_lowercase();
    if PLACEHOLDER_MARKERS.iter().any(|m| lowered.contains(m)) {
        return Err(SessionConfigError::PlaceholderSecret);
    }

    Ok(())
}

/// Base64 secrets are decoded; anything else is used as raw bytes.
fn decode_secret(secret: &str) -> Vec<u8> {
    STANDARD
        .decode(secret.as_bytes())
        .unwrap_or_else(|_| secret.as_bytes().to_vec())
}

fn derive_key(bytes: &[u8]) -> Key {
    if bytes.len() >= 64 {
        Key::from(&bytes[..64])
    } else {
        // Short secrets are stretched to the 64 bytes `Key` needs.
        Key::from(Sha512::digest(bytes).as_slice())
    }
}
