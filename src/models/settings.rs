use serde::{Deserialize, Serialize};

pub const DEFAULT_SESSION_TIMEOUT: i64 = 30;

/// Settings held only in the session; they die with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub display_name: String,
    pub email: String,
    pub bio: String,
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub sms_notifications: bool,
    pub theme: String,
    pub language: String,
    pub timezone: String,
    pub profile_visibility: bool,
    pub two_factor_auth: bool,
    pub session_timeout: i64,
}

impl Default for UserSettings {
    fn default() -> Self {
        UserSettings {
            display_name: String::new(),
            email: String::new(),
            bio: String::new(),
            email_notifications: false,
            push_notifications: false,
            sms_notifications: false,
            theme: "light".to_string(),
            language: "en".to_string(),
            timezone: "UTC".to_string(),
            profile_visibility: false,
            two_factor_auth: false,
            session_timeout: DEFAULT_SESSION_TIMEOUT,
        }
    }
}

/// Raw settings submission. Checkboxes are present with `"on"` when ticked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsForm {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub email_notifications: Option<String>,
    pub push_notifications: Option<String>,
    pub sms_notifications: Option<String>,
    pub theme: Option<String>,
    pub language: Option<String>,
    pub timezone: Option<String>,
    pub profile_visibility: Option<String>,
    pub two_factor_auth: Option<String>,
    pub session_timeout: Option<String>,
}

/// Template-facing view: the saved settings, or the rejected submission echoed back.
#[derive(Debug, Clone)]
pub struct SettingsView {
    pub display_name: String,
    pub email: String,
    pub bio: String,
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub sms_notifications: bool,
    pub theme: String,
    pub language: String,
    pub timezone: String,
    pub profile_visibility: bool,
    pub two_factor_auth: bool,
    pub session_timeout: String,
}

impl From<&UserSettings> for SettingsView {
    fn from(s: &UserSettings) -> Self {
        SettingsView {
            display_name: s.display_name.clone(),
            email: s.email.clone(),
            bio: s.bio.clone(),
            email_notifications: s.email_notifications,
            push_notifications: s.push_notifications,
            sms_notifications: s.sms_notifications,
            theme: s.theme.clone(),
            language: s.language.clone(),
            timezone: s.timezone.clone(),
            profile_visibility: s.profile_visibility,
            two_factor_auth: s.two_factor_auth,
            session_timeout: s.session_timeout.to_string(),
        }
    }
}

impl From<&SettingsForm> for SettingsView {
    fn from(f: &SettingsForm) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let checked = |v: &Option<String>| v.as_deref() == Some("on");
        SettingsView {
            display_name: text(&f.display_name),
            email: text(&f.email),
            bio: text(&f.bio),
            email_notifications: checked(&f.email_notifications),
            push_notifications: checked(&f.push_notifications),
            sms_notifications: checked(&f.sms_notifications),
            theme: text(&f.theme),
            language: text(&f.language),
            timezone: text(&f.timezone),
            profile_visibility: checked(&f.profile_visibility),
            two_factor_auth: checked(&f.two_factor_auth),
            session_timeout: text(&f.session_timeout),
        }
    }
}
