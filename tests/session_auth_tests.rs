mod common;

use common::{
    body_string, location, session_cookie, set_cookie_header, spawn_app, spawn_app_with,
    DEMO_EMAIL, DEMO_PASSWORD,
};
use tower_sessions::cookie::Cookie;

const SEVEN_DAYS_SECS: i64 = 7 * 24 * 60 * 60;

#[tokio::test]
async fn test_login_with_demo_credential_redirects_home() {
    let app = spawn_app().await;

    let cookie = app.login(false).await;

    let response = app.get("/home", Some(&cookie)).await;
    assert_eq!(response.status(), 200);
    assert!(body_string(response).await.contains(DEMO_EMAIL));
}

#[tokio::test]
async fn test_login_with_wrong_password_is_401() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/login",
            &format!("email={}&password=nope", DEMO_EMAIL),
            None,
        )
        .await;
    assert_eq!(response.status(), 401);

    let body = body_string(response).await;
    assert!(body.contains("Invalid email or password"));
    assert!(body.contains(&format!("value=\"{}\"", DEMO_EMAIL)));
}

#[tokio::test]
async fn test_remember_me_extends_cookie_to_seven_days() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/login",
            &format!(
                "email={}&password={}&rememberMe=on",
                DEMO_EMAIL, DEMO_PASSWORD
            ),
            None,
        )
        .await;
    assert_eq!(response.status(), 303);

    let raw = set_cookie_header(&response).expect("session cookie");
    let cookie = Cookie::parse(raw).unwrap();
    let max_age = cookie
        .max_age()
        .expect("remember-me cookie should be persistent")
        .whole_seconds();
    // Allow for the clock ticking between expiry and cookie rendering
    assert!(max_age <= SEVEN_DAYS_SECS && max_age > SEVEN_DAYS_SECS - 60);
}

#[tokio::test]
async fn test_login_without_remember_me_uses_session_cookie() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/login",
            &format!("email={}&password={}", DEMO_EMAIL, DEMO_PASSWORD),
            None,
        )
        .await;
    assert_eq!(response.status(), 303);

    let raw = set_cookie_header(&response).expect("session cookie");
    let cookie = Cookie::parse(raw).unwrap();
    assert!(cookie.max_age().is_none());
    assert!(cookie.expires().is_none());
}

#[tokio::test]
async fn test_login_page_redirects_when_already_logged_in() {
    let app = spawn_app().await;
    let cookie = app.login(false).await;

    let response = app.get("/login", Some(&cookie)).await;
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/home"));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = spawn_app().await;
    let cookie = app.login(false).await;

    let response = app.get("/logout", Some(&cookie)).await;
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/home"));

    let response = app.get("/home", Some(&cookie)).await;
    assert!(!body_string(response).await.contains(DEMO_EMAIL));
}

#[tokio::test]
async fn test_routes_are_open_by_default() {
    let app = spawn_app().await;

    let response = app.get("/employees", None).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_protected_routes_redirect_to_login() {
    let app = spawn_app_with(|config| {
        config.protected_routes = vec!["/employees".to_string(), "/more/settings".to_string()];
    })
    .await;

    let response = app.get("/employees", None).await;
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/login"));

    // Unlisted routes stay open
    let response = app.get("/employee/search", None).await;
    assert_eq!(response.status(), 200);

    let cookie = app.login(false).await;
    let response = app.get("/employees", Some(&cookie)).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_settings_defaults_render() {
    let app = spawn_app().await;

    let response = app.get("/more/settings", None).await;
    assert_eq!(response.status(), 200);

    let body = body_string(response).await;
    assert!(body.contains("<option value=\"light\" selected>"));
    assert!(body.contains("value=\"30\""));
}

#[tokio::test]
async fn test_settings_saved_in_session() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/more/settings",
            "displayName=Ana&email=ana%40example.com&theme=dark&sessionTimeout=45\
             &emailNotifications=on",
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    let cookie = session_cookie(&response).expect("settings stored in a new session");
    assert!(body_string(response)
        .await
        .contains("Settings saved successfully!"));

    let body = body_string(app.get("/more/settings", Some(&cookie)).await).await;
    assert!(body.contains("value=\"Ana\""));
    assert!(body.contains("<option value=\"dark\" selected>"));
    assert!(body.contains("value=\"45\""));
}

#[tokio::test]
async fn test_invalid_settings_leave_session_untouched() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/more/settings",
            "displayName=Ana&email=ana%40example.com",
            None,
        )
        .await;
    let cookie = session_cookie(&response).unwrap();

    let response = app
        .post_form(
            "/more/settings",
            "displayName=Changed&email=not-an-email",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), 400);
    let body = body_string(response).await;
    assert!(body.contains("Invalid email format"));
    // The rejected submission is echoed back
    assert!(body.contains("value=\"Changed\""));

    let body = body_string(app.get("/more/settings", Some(&cookie)).await).await;
    assert!(body.contains("value=\"ana@example.com\""));
    assert!(!body.contains("value=\"Changed\""));
}

#[tokio::test]
async fn test_saving_settings_updates_logged_in_email() {
    let app = spawn_app().await;
    let cookie = app.login(false).await;

    let response = app
        .post_form(
            "/more/settings",
            "displayName=Trainer&email=trainer%40example.com",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), 200);

    let body = body_string(app.get("/home", Some(&cookie)).await).await;
    assert!(body.contains("trainer@example.com"));
}
