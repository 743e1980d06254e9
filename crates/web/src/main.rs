use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nlprisk_core::client::{RiskApiClient, RiskSource};
use nlprisk_core::config::{ExecutionContext, Settings};
use nlprisk_core::subscription::RiskSubscription;

mod app;
mod pages;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    if let Err(e) = run(settings).await {
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(error = %format!("{e:#}"), "dashboard stopped");
        return Err(e);
    }
    Ok(())
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    let api = Arc::new(RiskApiClient::from_settings(&settings, ExecutionContext::Server)?);
    let public_api = Arc::new(RiskApiClient::from_settings(
        &settings,
        ExecutionContext::Browser,
    )?);

    let interval = settings.watchlist_refresh_interval();
    let source: Arc<dyn RiskSource> = api.clone();
    let watchlist: Vec<RiskSubscription> = settings
        .watchlist()
        .into_iter()
        .map(|symbol| RiskSubscription::spawn(source.clone(), symbol, interval))
        .collect();

    tracing::info!(
        api_base = %api.base_url(),
        public_api_base = %public_api.base_url(),
        watchlist_len = watchlist.len(),
        ?interval,
        "risk API configured"
    );

    let state = app::AppState {
        api,
        public_api,
        watchlist: Arc::new(watchlist),
    };

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], settings.port()));
    tracing::info!(%addr, "dashboard listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
