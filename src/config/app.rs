use std::{env, net::IpAddr, path::PathBuf, str::FromStr};

use anyhow::{bail, Context};
use tracing::warn;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/staffdesk.db";
const DEFAULT_DEMO_EMAIL: &str = "training@jalaacademy.com";
const DEFAULT_DEMO_PASSWORD: &str = "jobprogram";
const DEV_JWT_SECRET: &str = "dev-jwt-secret";

/// Which backend answers `AuthService::authenticate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// Exact match against the configured demo credential.
    Demo,
    /// Lookup in the `users` table with argon2 verification.
    Hashed,
}

impl FromStr for AuthStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demo" => Ok(AuthStrategy::Demo),
            "hashed" => Ok(AuthStrategy::Hashed),
            other => bail!("unknown AUTH_STRATEGY '{}', expected 'demo' or 'hashed'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DemoCredential {
    pub email: String,
    pub password: String,
}

/// Process-wide configuration, resolved once at startup and carried in `AppState`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub upload_dir: PathBuf,
    /// Build the app but skip binding a local listener.
    pub managed_hosting: bool,
    pub jwt_secret: String,
    pub auth_strategy: AuthStrategy,
    pub demo_credential: DemoCredential,
    pub auth_api_enabled: bool,
    /// Route paths whose "requires authentication" flag is forced on.
    pub protected_routes: Vec<String>,
    pub profile_email_unique: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            upload_dir: PathBuf::from("uploads"),
            managed_hosting: false,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            auth_strategy: AuthStrategy::Demo,
            demo_credential: DemoCredential {
                email: DEFAULT_DEMO_EMAIL.to_string(),
                password: DEFAULT_DEMO_PASSWORD.to_string(),
            },
            auth_api_enabled: false,
            protected_routes: Vec::new(),
            profile_email_unique: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = AppConfig::default();

        let host = match env::var("HOST") {
            Ok(value) => value
                .parse::<IpAddr>()
                .with_context(|| format!("HOST '{}' is not an IP address", value))?,
            Err(_) => defaults.host,
        };

        let port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("PORT '{}' is not a valid port", value))?,
            Err(_) => defaults.port,
        };

        let auth_strategy = match env::var("AUTH_STRATEGY") {
            Ok(value) => value.parse::<AuthStrategy>()?,
            Err(_) => defaults.auth_strategy,
        };

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                warn!("JWT_SECRET not set; using development secret for the token API");
                defaults.jwt_secret
            }
        };

        Ok(Self {
            host,
            port,
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            managed_hosting: env_flag_enabled("MANAGED_HOSTING"),
            jwt_secret,
            auth_strategy,
            demo_credential: DemoCredential {
                email: env::var("DEMO_EMAIL").unwrap_or(defaults.demo_credential.email),
                password: env::var("DEMO_PASSWORD").unwrap_or(defaults.demo_credential.password),
            },
            auth_api_enabled: env_flag_enabled("AUTH_API_ENABLED"),
            protected_routes: env::var("PROTECTED_ROUTES")
                .map(|value| parse_route_list(&value))
                .unwrap_or_default(),
            profile_email_unique: env_flag_enabled("PROFILE_EMAIL_UNIQUE"),
        })
    }

    pub fn requires_auth(&self, path: &str) -> bool {
        self.protected_routes.iter().any(|route| route == path)
    }
}

pub(crate) fn env_flag_enabled(key: &str) -> bool {
    env::var(key)
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "True"))
        .unwrap_or(false)
}

fn parse_route_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|route| !route.is_empty())
        .map(String::from)
        .collect()
}
