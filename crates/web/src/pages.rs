use nlprisk_core::domain::risk::TickerRiskResponse;
use nlprisk_core::subscription::SubscriptionState;
use nlprisk_core::view::{
    chart::render_timeseries_chart, escape, gauge::render_risk_gauge,
    headline::render_headline_list, layout, ticker_card::render_ticker_card,
};

const FALLBACK_ID: &str = "ticker-fallback";

pub fn home_page<'a, I>(cards: I) -> String
where
    I: IntoIterator<Item = (&'a str, SubscriptionState)>,
{
    let mut body = String::new();

    body.push_str(r#"<section class="panel"><h1>Risk Dashboard</h1>"#);
    body.push_str(
        r#"<form class="search" method="get" action="/search"><input type="text" name="q" placeholder="Enter ticker symbol (e.g., AAPL)" autocomplete="off"><button type="submit">Search</button></form>"#,
    );
    body.push_str("</section>");

    body.push_str(
        r##"<section class="panel"><div class="panel-head"><h2>Watchlist</h2><a class="link" href="#">Manage</a></div><div class="watchlist-grid">"##,
    );
    for (symbol, state) in cards {
        body.push_str(&render_ticker_card(symbol, &state));
    }
    body.push_str("</div></section>");

    layout::document(layout::APP_NAME, &body)
}

/// First streamed chunk of the detail page: layout start, heading and the loading fallback.
pub fn ticker_shell(symbol: &str) -> String {
    let title = format!("{} Risk Overview", symbol.to_uppercase());
    format!(
        r#"{start}<h1>{heading}</h1><div id="{FALLBACK_ID}" class="panel muted">Loading risk overview...</div>"#,
        start = layout::document_start(&format!("{title} | {}", layout::APP_NAME)),
        heading = escape(&title),
    )
}

/// Second streamed chunk: hides the fallback, then gauge, chart, headlines and the layout end.
pub fn ticker_content(data: &TickerRiskResponse, raw_json_href: Option<&str>, year: i32) -> String {
    let mut out = format!("<style>#{FALLBACK_ID}{{display:none}}</style>");

    out.push_str(r#"<div class="detail">"#);
    out.push_str(r#"<section class="panel"><h2>Risk Gauge</h2>"#);
    out.push_str(&render_risk_gauge(data.risk.risk_percent));
    out.push_str("</section>");
    out.push_str(r#"<section class="panel"><h2>Risk Over Time</h2>"#);
    out.push_str(&render_timeseries_chart(&data.timeseries));
    out.push_str("</section></div>");

    out.push_str(r#"<section class="panel"><h2>Recent Headlines</h2>"#);
    out.push_str(&render_headline_list(&data.headlines));
    out.push_str("</section>");

    if let Some(href) = raw_json_href {
        out.push_str(&format!(
            r#"<p class="small muted"><a href="{}">Raw JSON</a></p>"#,
            escape(href)
        ));
    }

    out.push_str(&layout::document_end(year));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nlprisk_core::domain::risk::{Headline, RiskSnapshot, TimeseriesPoint};

    #[test]
    fn home_lists_every_card() {
        let loaded = SubscriptionState {
            data: Some(RiskSnapshot { risk_percent: 12.0 }),
            is_loading: false,
        };
        let loading = SubscriptionState {
            data: None,
            is_loading: true,
        };
        let html = home_page([("AAPL", loaded), ("MSFT", loading)]);
        assert!(html.contains("Risk Dashboard"));
        assert!(html.contains(r#"action="/search""#));
        assert!(html.contains(r#"<div class="watchlist-grid">"#));
        assert!(html.contains(">Manage</a>"));
        assert!(html.contains(">AAPL<") && html.contains(">12<"));
        assert!(html.contains(">MSFT<") && html.contains("Loading..."));
    }

    #[test]
    fn shell_uppercases_heading_only() {
        let html = ticker_shell("aapl");
        assert!(html.contains("<h1>AAPL Risk Overview</h1>"));
        assert!(html.contains(FALLBACK_ID));
        assert!(!html.contains("</html>"));
    }

    #[test]
    fn content_composes_sections() {
        let data = TickerRiskResponse {
            risk: RiskSnapshot { risk_percent: 80.0 },
            timeseries: vec![TimeseriesPoint {
                ts: "2025-10-01".to_string(),
                risk_percent: 80.0,
            }],
            headlines: vec![Headline {
                title: "Supplier warning".to_string(),
                sentiment: Some(-0.4),
                urgency: Some(0.7),
                ..Default::default()
            }],
        };
        let html = ticker_content(&data, Some("https://api.example.com/v1/risk/aapl"), 2026);
        assert!(html.starts_with("<style>#ticker-fallback{display:none}</style>"));
        assert!(html.contains("Risk Gauge"));
        assert!(html.contains("#ef4444"));
        assert!(html.contains("Risk Over Time"));
        assert!(html.contains("Supplier warning"));
        assert!(html.contains("Sent -0.40"));
        assert!(html.contains("https://api.example.com/v1/risk/aapl"));
        assert!(html.ends_with("</html>"));
    }
}
