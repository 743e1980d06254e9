use super::{escape, format_number};
use crate::subscription::SubscriptionState;

/// A watchlist card linking to the symbol's detail page.
///
/// Shows the raw upstream value (no clamping) once data is present, a placeholder before.
pub fn render_ticker_card(symbol: &str, state: &SubscriptionState) -> String {
    let symbol = escape(symbol);
    let value = match &state.data {
        Some(snapshot) => format!(
            r#"<div class="right"><div class="muted small">Risk</div><div class="card-value">{}</div></div>"#,
            format_number(snapshot.risk_percent)
        ),
        None => r#"<div class="muted small">Loading...</div>"#.to_string(),
    };

    format!(
        r#"<a class="card" href="/ticker/{symbol}"><div class="card-row"><div><div class="muted small">Ticker</div><div class="card-symbol">{symbol}</div></div>{value}</div></a>"#
    )
}
