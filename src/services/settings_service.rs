use crate::models::settings::DEFAULT_SESSION_TIMEOUT;
use crate::models::{SettingsForm, UserSettings};
use once_cell::sync::Lazy;
use regex::Regex;

// Hardcoded regex pattern - guaranteed to be valid at compile time
#[allow(clippy::unwrap_used)]
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Validate a settings submission and normalize it into what the session stores.
pub fn normalize_settings(form: &SettingsForm) -> Result<UserSettings, Vec<String>> {
    let mut errors = Vec::new();

    let display_name = form.display_name.as_deref().unwrap_or("").trim();
    if display_name.is_empty() {
        errors.push("Display Name is required".to_string());
    }

    let raw_email = form.email.as_deref().unwrap_or("");
    if raw_email.trim().is_empty() {
        errors.push("Email is required".to_string());
    } else if !is_valid_email(raw_email) {
        errors.push("Invalid email format".to_string());
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let defaults = UserSettings::default();
    Ok(UserSettings {
        display_name: display_name.to_string(),
        email: raw_email.trim().to_string(),
        bio: form.bio.clone().unwrap_or_default(),
        email_notifications: is_checked(&form.email_notifications),
        push_notifications: is_checked(&form.push_notifications),
        sms_notifications: is_checked(&form.sms_notifications),
        theme: or_default(&form.theme, defaults.theme),
        language: or_default(&form.language, defaults.language),
        timezone: or_default(&form.timezone, defaults.timezone),
        profile_visibility: is_checked(&form.profile_visibility),
        two_factor_auth: is_checked(&form.two_factor_auth),
        session_timeout: parse_timeout(form.session_timeout.as_deref()),
    })
}

fn is_checked(value: &Option<String>) -> bool {
    value.as_deref() == Some("on")
}

fn or_default(value: &Option<String>, default: String) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default,
    }
}

/// Leading integer of the input, like a lenient `parseInt`; 30 otherwise.
fn parse_timeout(value: Option<&str>) -> i64 {
    let Some(raw) = value.map(str::trim) else {
        return DEFAULT_SESSION_TIMEOUT;
    };

    let sign_len = usize::from(raw.starts_with('-') || raw.starts_with('+'));
    let digits_end = raw[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map(|i| i + sign_len)
        .unwrap_or(raw.len());

    match raw[..digits_end].parse::<i64>() {
        Ok(0) | Err(_) => DEFAULT_SESSION_TIMEOUT,
        Ok(n) => n,
    }
}
