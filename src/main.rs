//! Ella Rises server binary.

use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ella_rises::adapters::http::middleware::SessionCookie;
use ella_rises::adapters::http::{app_router, AppState, Views};
use ella_rises::adapters::postgres::{
    self, PostgresDirectoryReader, PostgresRecordRepository, PostgresSchemaInspector,
    PostgresSubmissionRepository, PostgresUserRepository,
};
use ella_rises::adapters::session::{InMemorySessionStore, RedisSessionStore};
use ella_rises::config::{AppConfig, SessionBackend, ValidationError};
use ella_rises::ports::SessionStore;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn session_store(config: &AppConfig) -> Result<Arc<dyn SessionStore>, Box<dyn Error>> {
    match config.session.store {
        SessionBackend::Memory => Ok(Arc::new(InMemorySessionStore::default())),
        SessionBackend::Redis => {
            let url = config
                .session
                .redis_url
                .as_deref()
                .ok_or(ValidationError::MissingRequired("session.redis_url"))?;
            Ok(Arc::new(RedisSessionStore::connect(url).await?))
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config);

    let pool = postgres::connect(&config.database).await?;
    let sessions = session_store(&config).await?;
    tracing::info!(store = ?config.session.store, "session store ready");

    let environment = config.server.environment;
    let state = AppState {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        directory: Arc::new(PostgresDirectoryReader::new(pool.clone())),
        schema: Arc::new(PostgresSchemaInspector::new(pool.clone())),
        records: Arc::new(PostgresRecordRepository::new(pool.clone())),
        submissions: Arc::new(PostgresSubmissionRepository::new(pool)),
        sessions,
        views: Views::new()?,
        cookie: SessionCookie::new(
            config.session.secret.clone(),
            config.session.cookie_name.clone(),
            config.session.secure_cookie(environment),
            config.session.ttl(),
        ),
        session_ttl: config.session.ttl(),
    };

    let app = app_router(
        state,
        &config.server.static_dir,
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?environment, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}
