use crate::config::{ExecutionContext, Settings};
use crate::domain::risk::{RiskSnapshot, TickerRiskResponse};
use anyhow::{anyhow, Context, Result};
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;

const RISK_PATH: [&str; 2] = ["v1", "risk"];

/// Anything that can report the current risk snapshot for a symbol.
///
/// `Ok(None)` means the backend answered without a usable `risk.risk_percent`.
#[async_trait::async_trait]
pub trait RiskSource: Send + Sync {
    async fn fetch_risk_snapshot(&self, symbol: &str) -> Result<Option<RiskSnapshot>>;
}

#[derive(Debug, Clone)]
pub struct RiskApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RiskApiClient {
    pub fn from_settings(settings: &Settings, context: ExecutionContext) -> Result<Self> {
        Self::new(settings.api_base_url(context), settings.api_timeout())
    }

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid risk API base URL: {base_url}"))?;
        anyhow::ensure!(
            !base_url.cannot_be_a_base(),
            "risk API base URL cannot carry a path: {base_url}"
        );

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build risk API http client")?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("risk API base URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn ticker_risk_url(&self, symbol: &str) -> Result<Url> {
        self.endpoint(&[RISK_PATH[0], RISK_PATH[1], symbol])
    }

    /// GETs a JSON document, failing on transport errors, non-2xx statuses and invalid bodies.
    pub async fn fetch_json(&self, segments: &[&str]) -> Result<Value> {
        let url = self.endpoint(segments)?;

        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("risk API request failed: {url}"))?;

        let status = res.status();
        if !status.is_success() {
            anyhow::bail!("risk API HTTP {status}: {url}");
        }

        res.json::<Value>()
            .await
            .with_context(|| format!("risk API response is not valid JSON: {url}"))
    }

    /// Fetches everything the detail page needs for `symbol`.
    ///
    /// Returns `None` for an empty symbol without touching the network. Any failure yields the
    /// all-zero response so the page still renders.
    pub async fn get_ticker_risk(&self, symbol: &str) -> Option<TickerRiskResponse> {
        if symbol.is_empty() {
            return None;
        }

        match self.try_get_ticker_risk(symbol).await {
            Ok(resp) => Some(resp),
            Err(err) => {
                sentry_anyhow::capture_anyhow(&err);
                tracing::warn!(%symbol, error = %format!("{err:#}"), "ticker risk fetch failed; using empty response");
                Some(TickerRiskResponse::default())
            }
        }
    }

    async fn try_get_ticker_risk(&self, symbol: &str) -> Result<TickerRiskResponse> {
        let raw = self.fetch_json(&[RISK_PATH[0], RISK_PATH[1], symbol]).await?;
        TickerRiskResponse::from_json(raw)
            .with_context(|| format!("unexpected ticker risk payload for {symbol}"))
    }
}

#[async_trait::async_trait]
impl RiskSource for RiskApiClient {
    async fn fetch_risk_snapshot(&self, symbol: &str) -> Result<Option<RiskSnapshot>> {
        let raw = self.fetch_json(&[RISK_PATH[0], RISK_PATH[1], symbol]).await?;
        let Some(risk) = raw
            .get("risk")
            .filter(|risk| risk.get("risk_percent").is_some_and(|v| !v.is_null()))
        else {
            return Ok(None);
        };

        let snapshot = serde_json::from_value::<RiskSnapshot>(risk.clone())
            .with_context(|| format!("unexpected risk snapshot for {symbol}"))?;
        Ok(Some(snapshot))
    }
}
