use super::{escape, format_number};
use crate::domain::risk::TimeseriesPoint;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 288.0;
const MARGIN_TOP: f64 = 10.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 30.0;
const MARGIN_LEFT: f64 = 40.0;

const Y_TICKS: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];
const MIN_TICK_GAP: f64 = 24.0;
// Rough advance of one 12px glyph.
const CHAR_WIDTH: f64 = 7.0;
const LINE_COLOR: &str = "#2563eb";

fn plot_width() -> f64 {
    WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

fn plot_height() -> f64 {
    HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

/// Maps a risk value onto the fixed `[0, 100]` y domain. Values outside the domain land outside
/// the plot area.
pub fn y_for(value: f64) -> f64 {
    MARGIN_TOP + (1.0 - value / 100.0) * plot_height()
}

/// Category x axis: points are evenly spaced in input order; a single point sits in the middle.
pub fn x_for(index: usize, len: usize) -> f64 {
    if len <= 1 {
        return MARGIN_LEFT + plot_width() / 2.0;
    }
    MARGIN_LEFT + index as f64 * plot_width() / (len - 1) as f64
}

pub fn project(points: &[TimeseriesPoint]) -> Vec<(f64, f64)> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (x_for(i, points.len()), y_for(p.risk_percent)))
        .collect()
}

/// Indices of the x labels that fit without crowding their kept neighbour.
pub fn visible_labels(points: &[TimeseriesPoint]) -> Vec<usize> {
    let mut kept = Vec::new();
    let mut prev_right: Option<f64> = None;

    for (i, p) in points.iter().enumerate() {
        let half = p.ts.chars().count() as f64 * CHAR_WIDTH / 2.0;
        let x = x_for(i, points.len());
        let fits = match prev_right {
            Some(right) => x - half - right >= MIN_TICK_GAP,
            None => true,
        };
        if fits {
            kept.push(i);
            prev_right = Some(x + half);
        }
    }
    kept
}

pub fn render_timeseries_chart(points: &[TimeseriesPoint]) -> String {
    let mut out = String::new();
    let left = MARGIN_LEFT;
    let right = WIDTH - MARGIN_RIGHT;
    let bottom = HEIGHT - MARGIN_BOTTOM;

    out.push_str(r#"<div class="chart">"#);
    out.push_str(&format!(
        r#"<svg width="100%" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Risk over time">"#
    ));

    out.push_str(r##"<g class="grid" stroke="#e5e7eb" stroke-dasharray="3 3">"##);
    for tick in Y_TICKS {
        let y = y_for(tick);
        out.push_str(&format!(r#"<line x1="{left}" y1="{y:.2}" x2="{right}" y2="{y:.2}"/>"#));
    }
    for i in 0..points.len() {
        let x = x_for(i, points.len());
        out.push_str(&format!(r#"<line x1="{x:.2}" y1="{MARGIN_TOP}" x2="{x:.2}" y2="{bottom}"/>"#));
    }
    out.push_str("</g>");

    out.push_str(r##"<g class="y-axis" font-size="12" fill="#6b7280" text-anchor="end">"##);
    for tick in Y_TICKS {
        out.push_str(&format!(
            r#"<text x="{x}" y="{y:.2}" dy="4">{label}</text>"#,
            x = left - 6.0,
            y = y_for(tick),
            label = format_number(tick),
        ));
    }
    out.push_str("</g>");

    out.push_str(r##"<g class="x-axis" font-size="12" fill="#6b7280" text-anchor="middle">"##);
    for i in visible_labels(points) {
        out.push_str(&format!(
            r#"<text x="{x:.2}" y="{y}">{label}</text>"#,
            x = x_for(i, points.len()),
            y = bottom + 18.0,
            label = escape(&points[i].ts),
        ));
    }
    out.push_str("</g>");

    let projected = project(points);
    if !projected.is_empty() {
        let coords: Vec<String> = projected
            .iter()
            .map(|(x, y)| format!("{x:.2},{y:.2}"))
            .collect();
        out.push_str(&format!(
            r#"<polyline points="{}" fill="none" stroke="{LINE_COLOR}" stroke-width="2"/>"#,
            coords.join(" ")
        ));

        out.push_str(r#"<g class="tooltips" fill="transparent">"#);
        for ((x, y), p) in projected.iter().zip(points) {
            out.push_str(&format!(
                r#"<circle cx="{x:.2}" cy="{y:.2}" r="6"><title>{}: {}</title></circle>"#,
                escape(&p.ts),
                format_number(p.risk_percent),
            ));
        }
        out.push_str("</g>");
    }

    out.push_str("</svg></div>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(ts: &str, risk_percent: f64) -> TimeseriesPoint {
        TimeseriesPoint {
            ts: ts.to_string(),
            risk_percent,
        }
    }

    #[test]
    fn y_domain_is_fixed() {
        assert_eq!(y_for(100.0), MARGIN_TOP);
        assert_eq!(y_for(0.0), HEIGHT - MARGIN_BOTTOM);
        assert!(y_for(50.0) > y_for(75.0));
    }

    #[test]
    fn projection_keeps_input_order() {
        let pts = vec![point("c", 10.0), point("a", 90.0), point("b", 50.0)];
        let projected = project(&pts);
        assert_eq!(projected.len(), 3);
        assert_eq!(projected[0].0, MARGIN_LEFT);
        assert_eq!(projected[2].0, WIDTH - MARGIN_RIGHT);
        assert!(projected[0].0 < projected[1].0 && projected[1].0 < projected[2].0);
        assert_eq!(projected[1].1, y_for(90.0));
    }

    #[test]
    fn single_point_is_centered() {
        let projected = project(&[point("only", 40.0)]);
        assert_eq!(projected[0].0, MARGIN_LEFT + plot_width() / 2.0);
    }

    #[test]
    fn thins_crowded_labels() {
        let pts: Vec<_> = (0..60)
            .map(|i| point(&format!("2025-10-{i:02}"), 50.0))
            .collect();
        let kept = visible_labels(&pts);
        assert_eq!(kept[0], 0);
        assert!(kept.len() < pts.len());
        for pair in kept.windows(2) {
            assert!(pair[1] > pair[0]);
        }

        let sparse = vec![point("Mon", 1.0), point("Tue", 2.0)];
        assert_eq!(visible_labels(&sparse), vec![0, 1]);
    }

    #[test]
    fn renders_line_and_tooltips() {
        let html = render_timeseries_chart(&[point("09:30", 20.0), point("10:00", 35.5)]);
        assert!(html.contains("<polyline"));
        assert!(html.contains(LINE_COLOR));
        assert!(html.contains("<title>10:00: 35.5</title>"));
        assert!(html.contains(r#"stroke-dasharray="3 3""#));
    }

    #[test]
    fn empty_series_has_no_line() {
        let html = render_timeseries_chart(&[]);
        assert!(html.contains("<svg"));
        assert!(!html.contains("<polyline"));
    }
}
