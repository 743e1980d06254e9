use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use futures::{future, stream, StreamExt};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use nlprisk_core::client::RiskApiClient;
use nlprisk_core::subscription::RiskSubscription;
use nlprisk_core::view::layout;

use crate::pages;

#[derive(Debug, Clone)]
pub struct AppState {
    /// Server-side client used for page data.
    pub api: Arc<RiskApiClient>,
    /// Browser-facing client, only used to build links.
    pub public_api: Arc<RiskApiClient>,
    pub watchlist: Arc<Vec<RiskSubscription>>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/search", get(search))
        .route("/ticker/:symbol", get(ticker))
        .route("/healthz", get(healthz))
        .route("/favicon.svg", get(favicon))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn favicon() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        layout::FAVICON_SVG,
    )
}

async fn home(State(state): State<AppState>) -> Html<String> {
    let cards = state
        .watchlist
        .iter()
        .map(|sub| (sub.symbol(), sub.current()));
    Html(pages::home_page(cards))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// Where a submitted search should navigate, if anywhere.
pub fn search_destination(query: &str) -> Option<String> {
    let symbol = query.trim().to_uppercase();
    if symbol.is_empty() {
        return None;
    }
    Some(format!("/ticker/{symbol}"))
}

async fn search(Query(params): Query<SearchParams>) -> Response {
    let Some(dest) = search_destination(params.q.as_deref().unwrap_or_default()) else {
        // 204 keeps the browser on the page it submitted from.
        return StatusCode::NO_CONTENT.into_response();
    };

    match HeaderValue::from_str(&dest) {
        Ok(location) => (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response(),
        Err(_) => {
            tracing::warn!(%dest, "search target is not a valid location header");
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}

async fn ticker(State(state): State<AppState>, Path(symbol): Path<String>) -> Response {
    let shell = pages::ticker_shell(&symbol);

    let raw_json_href = match state.public_api.ticker_risk_url(&symbol) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            tracing::warn!(%symbol, error = %e, "failed to build raw JSON link");
            None
        }
    };

    let api = state.api.clone();
    let content = async move {
        let data = api.get_ticker_risk(&symbol).await.unwrap_or_default();
        Ok::<_, Infallible>(pages::ticker_content(
            &data,
            raw_json_href.as_deref(),
            layout::current_year(),
        ))
    };

    let body = stream::once(future::ready(Ok::<_, Infallible>(shell))).chain(stream::once(content));

    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        Body::from_stream(body),
    )
        .into_response()
}
