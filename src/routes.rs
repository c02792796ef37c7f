//! Route table and router assembly.
//!
//! Every HTML and JSON route is declared once in [`route_table`] together with
//! a "requires authentication" flag. The flags default to `false` for the CRUD
//! pages, which leaves them reachable without logging in; operators can force
//! individual paths behind the login gate with `PROTECTED_ROUTES`.

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::SessionStore;
use tracing::info;

use crate::auth::{self, require_auth};
use crate::config::session::SessionLayer;
use crate::handlers::{self, MAX_UPLOAD_BYTES};
use crate::AppState;

pub struct RouteEntry {
    pub path: &'static str,
    pub handler: MethodRouter<AppState>,
    pub requires_auth: bool,
}

impl RouteEntry {
    fn open(path: &'static str, handler: MethodRouter<AppState>) -> Self {
        Self {
            path,
            handler,
            requires_auth: false,
        }
    }
}

pub fn route_table() -> Vec<RouteEntry> {
    vec![
        // Session
        RouteEntry::open("/", get(handlers::index_handler)),
        RouteEntry::open("/home", get(handlers::home_handler)),
        RouteEntry::open(
            "/login",
            get(auth::handlers::login_page).post(auth::handlers::login_handler),
        ),
        RouteEntry::open("/logout", get(auth::handlers::logout_handler)),
        // Employees (HTML)
        RouteEntry::open(
            "/employees",
            get(handlers::list_employees_page).post(handlers::create_employee_handler),
        ),
        RouteEntry::open("/employees/new", get(handlers::new_employee_page)),
        RouteEntry::open("/employees/{id}", post(handlers::update_employee_handler)),
        RouteEntry::open("/employees/{id}/edit", get(handlers::edit_employee_page)),
        RouteEntry::open(
            "/employees/{id}/delete",
            post(handlers::delete_employee_handler),
        ),
        // Employees (JSON)
        RouteEntry::open(
            "/api/employees",
            get(handlers::api_list_employees).post(handlers::api_create_employee),
        ),
        RouteEntry::open(
            "/api/employees/{id}",
            get(handlers::api_get_employee)
                .put(handlers::api_update_employee)
                .delete(handlers::api_delete_employee),
        ),
        // Employee profiles
        RouteEntry::open(
            "/employee/create",
            get(handlers::create_profile_page).post(handlers::create_profile_handler),
        ),
        RouteEntry::open(
            "/employee/search",
            get(handlers::search_profiles_page).post(handlers::search_profiles_submit),
        ),
        RouteEntry::open(
            "/employee/{id}/edit",
            get(handlers::edit_profile_page).post(handlers::update_profile_handler),
        ),
        RouteEntry::open(
            "/employee/{id}/delete",
            post(handlers::delete_profile_handler),
        ),
        // More
        RouteEntry::open(
            "/more/settings",
            get(handlers::show_settings_page).post(handlers::update_settings_handler),
        ),
        RouteEntry::open(
            "/more/images",
            get(handlers::images_page)
                .post(handlers::upload_image_handler)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        ),
    ]
}

/// Token-based JSON auth, mounted under `/api/auth` when enabled.
fn auth_api_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::api_login_handler))
        .route("/register", post(handlers::api_register_handler))
        .route("/me", get(handlers::api_me_handler))
        .route("/logout", post(handlers::api_logout_handler))
}

pub fn build_router<S>(state: AppState, session_layer: SessionLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    let mut app = Router::new();

    for entry in route_table() {
        let guarded = entry.requires_auth || state.config.requires_auth(entry.path);
        let handler = if guarded {
            info!("Route {} requires authentication", entry.path);
            entry.handler.route_layer(middleware::from_fn(require_auth))
        } else {
            entry.handler
        };
        app = app.route(entry.path, handler);
    }

    if state.config.auth_api_enabled {
        info!("Mounting token auth API at /api/auth");
        app = app.nest("/api/auth", auth_api_routes());
    }

    app.nest_service("/uploads", ServeDir::new(state.config.upload_dir.clone()))
        .nest_service("/static", ServeDir::new("static"))
        .layer(session_layer)
        .layer(middleware::from_fn(add_security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn add_security_headers(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}
