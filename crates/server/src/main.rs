use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use shared::domain::UserId;
use tower_http::trace::TraceLayer;
use tracing::info;

mod api;
mod app_state;
mod config;
mod pages;

use api::{
    demo_catalog, demo_recommendations, not_found, personalize_events, personalize_recommendations,
};
use app_state::AppState;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let default_user_id = UserId::parse(&settings.default_user_id).with_context(|| {
        format!(
            "configured default user id '{}' is not alphanumeric",
            settings.default_user_id
        )
    })?;
    let state = AppState {
        default_user_id,
        catalog: Arc::new(demo_catalog()?),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "demo server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::login_page))
        .route("/settings", get(pages::settings_page))
        .route("/recommendations", get(pages::recommendations_page))
        .route("/style.css", get(pages::stylesheet))
        .route("/healthz", get(healthz))
        .route("/api/recommendations", get(demo_recommendations))
        .route(
            "/personalize/recommendations",
            post(personalize_recommendations),
        )
        .route("/personalize/events", post(personalize_events))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
