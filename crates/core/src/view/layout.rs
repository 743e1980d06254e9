use super::escape;
use chrono::Datelike;

pub const APP_NAME: &str = "NLP Risk Analyzer";
pub const APP_DESCRIPTION: &str = "Finance news risk dashboard";

const STYLESHEET: &str = r#"
*{box-sizing:border-box}
body{margin:0;min-height:100vh;display:flex;flex-direction:column;background:#f9fafb;color:#111827;font-family:system-ui,-apple-system,"Segoe UI",sans-serif;-webkit-font-smoothing:antialiased}
a{color:inherit;text-decoration:none}
.container{width:100%;max-width:72rem;margin:0 auto;padding:0 1rem}
header.site,footer.site{background:#fff}
header.site{border-bottom:1px solid #e5e7eb}
footer.site{margin-top:auto;border-top:1px solid #e5e7eb;color:#6b7280;font-size:.875rem}
.bar{display:flex;height:3.5rem;align-items:center;justify-content:space-between}
.brand{font-weight:600;color:#1d4ed8}
main{flex:1;padding:2rem 0}
.panel{background:#fff;border-radius:.5rem;padding:1.5rem;box-shadow:0 1px 3px rgba(0,0,0,.1);margin-bottom:1.5rem}
.panel h2{margin:0 0 1rem;font-size:1.125rem;font-weight:500}
.panel-head{display:flex;align-items:center;justify-content:space-between;margin-bottom:1rem}
.panel-head h2{margin:0}
.link{color:#1d4ed8;font-size:.875rem}
.watchlist-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(16rem,1fr));gap:1rem}
.detail{display:grid;grid-template-columns:1fr 2fr;gap:1.5rem}
.card{display:block;border:1px solid #e5e7eb;border-radius:.5rem;background:#fff;padding:1rem;box-shadow:0 1px 3px rgba(0,0,0,.1)}
.card:hover{box-shadow:0 4px 6px rgba(0,0,0,.1)}
.card-row{display:flex;align-items:baseline;justify-content:space-between}
.card-symbol{font-size:1.25rem;font-weight:600}
.card-value{font-size:1.5rem;font-weight:700}
.right{text-align:right}
.muted{color:#6b7280}.small{font-size:.875rem}.tiny{font-size:.75rem}
.search{display:flex;gap:.5rem}
.search input{flex:1;border:1px solid #d1d5db;border-radius:.375rem;padding:.5rem .75rem}
.search button{border:0;border-radius:.375rem;background:#2563eb;color:#fff;padding:.5rem 1rem;font-weight:500}
.gauge{display:flex;align-items:center;gap:1rem}
.gauge-value{font-size:1.5rem;font-weight:600}
.chart{width:100%}
.headline-list>*+*{margin-top:.75rem}
.headline{display:flex;align-items:flex-start;justify-content:space-between;border:1px solid #e5e7eb;border-radius:.375rem;padding:.75rem}
.headline-title{font-weight:500}
.badges{display:flex;gap:.5rem;font-size:.75rem}
.badge{border-radius:.25rem;padding:.25rem .5rem;white-space:nowrap}
.bg-emerald-100{background:#d1fae5}.text-emerald-700{color:#047857}
.bg-red-100{background:#fee2e2}.text-red-700{color:#b91c1c}
.bg-gray-100{background:#f3f4f6}.text-gray-700{color:#374151}
.bg-orange-100{background:#ffedd5}.text-orange-700{color:#c2410c}
.bg-yellow-100{background:#fef9c3}.text-yellow-700{color:#a16207}
"#;

pub const FAVICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32"><circle cx="16" cy="16" r="12" fill="none" stroke="#e5e7eb" stroke-width="4"/><path d="M16 4a12 12 0 0 1 12 12" fill="none" stroke="#ef4444" stroke-width="4" stroke-linecap="round"/></svg>"##;

/// Opening markup of every page, up to and including `<main>`.
pub fn document_start(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title}</title><meta name="description" content="{APP_DESCRIPTION}"><link rel="icon" href="/favicon.svg" type="image/svg+xml"><style>{STYLESHEET}</style></head><body>{header}<main class="container">"#,
        title = escape(title),
        header = render_header(),
    )
}

/// Closing markup matching [`document_start`].
pub fn document_end(year: i32) -> String {
    format!("</main>{}</body></html>", render_footer(year))
}

pub fn document(title: &str, body: &str) -> String {
    format!("{}{body}{}", document_start(title), document_end(current_year()))
}

pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

pub fn render_header() -> String {
    format!(
        r#"<header class="site"><div class="container bar"><a class="brand" href="/">{APP_NAME}</a><nav class="small muted"><a href="/">Home</a></nav></div></header>"#
    )
}

pub fn render_footer(year: i32) -> String {
    format!(
        r#"<footer class="site"><div class="container bar"><span>&copy; {year} {APP_NAME}</span></div></footer>"#
    )
}
