/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config 読み込み → 依存生成 (PgPool, AuthService, repo) → Router 組み立て
 * - Middleware の適用順をここで固定する (外側から):
 *     http (request-id, trace, body limit, timeout)
 *     → cors → security_headers
 *     → auth::access (Request Gate → Access Decision → handler or 401/403)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware,
    repos::{PgOfferRepository, PgUserDirectory},
    services::auth::build_auth_service,
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,job_offers_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(?config, "starting offers API");

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    let auth = build_auth_service(config);
    tracing::debug!(
        access_token_ttl_seconds = auth.codec().ttl_seconds(),
        "auth service ready"
    );

    Ok(AppState::new(
        auth,
        Arc::new(PgUserDirectory::new(db.clone())),
        Arc::new(PgOfferRepository::new(db)),
    ))
}

/// Routes + Request Gate. Everything the access rules govern lives below this point.
fn secured_router(state: AppState) -> Router {
    let router = api::routes();
    middleware::auth::access::apply(router, state.clone()).with_state(state)
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = secured_router(state);
    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config.request_timeout)
}
