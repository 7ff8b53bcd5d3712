//! Noticeboard entry-point: loads settings, seeds news and serves HTTP.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use noticeboard::inbound::http::health::HealthState;
use noticeboard::inbound::http::session_config::{BuildMode, session_settings_from_env};
use noticeboard::news_seed::seed_news;
use noticeboard::settings::AppSettings;
use server::{AppStores, ServerConfig, create_server};

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

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("settings: {e}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|e| std::io::Error::other(format!("session configuration: {e}")))?;

    let stores = AppStores::default();
    match &settings.news_seed_path {
        Some(path) => {
            seed_news(stores.news.as_ref(), path)
                .await
                .map_err(|e| std::io::Error::other(e.to_string()))?;
        }
        None => info!(reason = "no seed path", "news seeding skipped"),
    }

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr(),
    )
    .with_news_page_size(settings.news_page_size())
    .with_stores(stores);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
