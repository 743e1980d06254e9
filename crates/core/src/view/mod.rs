//! Presentational components: pure functions from view-models to HTML/SVG markup.

pub mod chart;
pub mod gauge;
pub mod headline;
pub mod layout;
pub mod ticker_card;

/// Escapes text for use inside HTML element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a score the way it is shown to users: `42`, `42.5`, `-3`.
pub fn format_number(v: f64) -> String {
    // Display already drops a zero fraction; only negative zero needs help.
    if v == 0.0 {
        "0".to_string()
    } else {
        format!("{v}")
    }
}
