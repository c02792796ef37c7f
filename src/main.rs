use staffdesk::{
    config::{
        session::{validate_production_config, SessionConfig},
        AppConfig,
    },
    db, routes, AppState,
};

use anyhow::Context;
use std::net::SocketAddr;
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "staffdesk=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("Invalid configuration")?;

    // Database connection
    let pool = db::create_pool(&config.database_url)
        .await
        .with_context(|| format!("Cannot open database {}", config.database_url))?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;
    db::ensure_profile_email_constraint(&pool, config.profile_email_unique).await?;

    let app_state = AppState::new(pool.clone(), config.clone());

    // The demo credential doubles as the seeded admin account
    app_state
        .user_service
        .ensure_admin(&config.demo_credential.email, &config.demo_credential.password)
        .await
        .context("Failed to seed admin account")?;

    // Session store
    validate_production_config().context("Refusing to start with insecure session settings")?;
    let session_store = SqliteStore::new(pool.clone())
        .with_table_name("sessions")
        .map_err(|e| anyhow::anyhow!("Invalid session table name: {}", e))?;
    session_store.migrate().await?;

    let session_layer = SessionConfig::from_env().create_layer(session_store);

    let app = routes::build_router(app_state, session_layer);

    if config.managed_hosting {
        // The hosting platform owns the listener.
        tracing::info!("MANAGED_HOSTING set; application built, not binding a local listener");
        return Ok(());
    }

    let addr = SocketAddr::from((config.host, config.port));
    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Cannot bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
