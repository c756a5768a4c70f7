//! Backend entry-point: loads configuration, applies migrations, wires the
//! adapters and serves the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::TokenService;
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::settings::{AppSettings, MIN_JWT_SECRET_BYTES};
use server::{ServerConfig, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let raw = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;
    let settings = raw
        .validate(!cfg!(debug_assertions))
        .map_err(|e| std::io::Error::other(format!("invalid configuration: {e}")))?;
    if settings.jwt_secret.len() < MIN_JWT_SECRET_BYTES {
        warn!(
            min = MIN_JWT_SECRET_BYTES,
            "jwt secret is shorter than release builds accept (dev only)"
        );
    }
    info!(?settings, "configuration loaded");

    let database_url = settings.database_url.clone();
    let applied = actix_web::rt::task::spawn_blocking(move || {
        run_pending_migrations(&database_url)
    })
    .await
    .map_err(|e| std::io::Error::other(format!("migration task failed: {e}")))?
    .map_err(|e| std::io::Error::other(format!("failed to apply migrations: {e}")))?;
    info!(applied, "database migrations up to date");

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url.as_str()).with_max_size(settings.db_max_connections),
    )
    .await
    .map_err(|e| std::io::Error::other(format!("failed to build connection pool: {e}")))?;

    let tokens = TokenService::new(&settings.jwt_secret, settings.token_issuer.as_str())
        .map_err(|e| std::io::Error::other(format!("invalid token settings: {e}")))?;

    let http_state = build_http_state(&settings, &pool, tokens);
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(settings.bind_addr, http_state),
    )?;
    info!(bind_addr = %settings.bind_addr, "listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
