#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use sqlx::SqlitePool;
use staffdesk::{config::AppConfig, test_utils::test_helpers};
use tempfile::TempDir;
use tower::ServiceExt;

pub const DEMO_EMAIL: &str = "training@jalaacademy.com";
pub const DEMO_PASSWORD: &str = "jobprogram";

/// A router plus the resources it borrows for the lifetime of a test.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub upload_dir: TempDir,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(configure: impl FnOnce(&mut AppConfig)) -> TestApp {
    let pool = test_helpers::create_test_db().await.unwrap();
    let upload_dir = TempDir::new().unwrap();
    let mut config = test_helpers::test_config(upload_dir.path());
    configure(&mut config);

    let router = test_helpers::build_test_app(pool.clone(), config);
    TestApp {
        router,
        pool,
        upload_dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        body: serde_json::Value,
    ) -> Response<Body> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Log in through the HTML form and return the session cookie pair.
    pub async fn login(&self, remember_me: bool) -> String {
        let body = if remember_me {
            format!("email={}&password={}&rememberMe=on", DEMO_EMAIL, DEMO_PASSWORD)
        } else {
            format!("email={}&password={}", DEMO_EMAIL, DEMO_PASSWORD)
        };
        let response = self.post_form("/login", &body, None).await;
        assert_eq!(response.status(), 303);
        session_cookie(&response).expect("login to issue a session cookie")
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn set_cookie_header(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// The `name=value` part of the session cookie, ready for a `Cookie` header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    set_cookie_header(response)
        .and_then(|raw| raw.split(';').next().map(|pair| pair.trim().to_string()))
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
