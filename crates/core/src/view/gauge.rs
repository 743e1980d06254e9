use super::format_number;
use std::f64::consts::PI;

pub const RADIUS: f64 = 54.0;
const SIZE: u32 = 140;
const STROKE_WIDTH: u32 = 12;
const TRACK_COLOR: &str = "#e5e7eb";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    Low,
    Elevated,
    High,
}

impl RiskTier {
    /// Expects an already clamped value.
    pub fn from_value(clamped: f64) -> Self {
        if clamped > 66.0 {
            Self::High
        } else if clamped > 33.0 {
            Self::Elevated
        } else {
            Self::Low
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Low => "#10b981",
            Self::Elevated => "#f59e0b",
            Self::High => "#ef4444",
        }
    }
}

/// Clamps to `[0, 100]`; NaN counts as 0.
pub fn clamp_risk(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gauge {
    pub value: f64,
    pub tier: RiskTier,
    pub progress: f64,
    pub remaining: f64,
}

impl Gauge {
    pub fn new(value: f64) -> Self {
        let value = clamp_risk(value);
        let circumference = 2.0 * PI * RADIUS;
        let progress = value / 100.0 * circumference;
        Self {
            value,
            tier: RiskTier::from_value(value),
            progress,
            remaining: circumference - progress,
        }
    }

    pub fn render(&self) -> String {
        let center = SIZE / 2;
        let label = format_number(self.value);
        let mut out = String::new();

        out.push_str(r#"<div class="gauge">"#);
        out.push_str(&format!(
            r#"<svg width="{SIZE}" height="{SIZE}" viewBox="0 0 {SIZE} {SIZE}" role="img" aria-label="Risk {label}">"#
        ));
        out.push_str(&format!(
            r#"<circle cx="{center}" cy="{center}" r="{RADIUS}" stroke="{TRACK_COLOR}" stroke-width="{STROKE_WIDTH}" fill="none"/>"#
        ));
        out.push_str(&format!(
            r#"<circle cx="{center}" cy="{center}" r="{RADIUS}" stroke="{color}" stroke-width="{STROKE_WIDTH}" fill="none" stroke-dasharray="{progress:.3} {remaining:.3}" transform="rotate(-90 {center} {center})" stroke-linecap="round"/>"#,
            color = self.tier.color(),
            progress = self.progress,
            remaining = self.remaining,
        ));
        out.push_str(&format!(
            r##"<text x="{center}" y="78" text-anchor="middle" font-size="22" font-weight="700" fill="#111827">{label}</text>"##
        ));
        out.push_str("</svg>");
        out.push_str(&format!(
            r#"<div><div class="muted small">Composite Risk</div><div class="gauge-value">{label}</div></div>"#
        ));
        out.push_str("</div>");
        out
    }
}

pub fn render_risk_gauge(value: f64) -> String {
    Gauge::new(value).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_into_range() {
        assert_eq!(clamp_risk(-5.0), 0.0);
        assert_eq!(clamp_risk(120.0), 100.0);
        assert_eq!(clamp_risk(42.5), 42.5);
        assert_eq!(clamp_risk(f64::NAN), 0.0);
        assert_eq!(clamp_risk(f64::INFINITY), 100.0);
    }

    #[test]
    fn tiers_follow_thresholds() {
        for v in [0.0, 10.0, 33.0] {
            assert_eq!(Gauge::new(v).tier, RiskTier::Low, "value {v}");
        }
        for v in [33.01, 50.0, 66.0] {
            assert_eq!(Gauge::new(v).tier, RiskTier::Elevated, "value {v}");
        }
        for v in [66.01, 90.0, 250.0] {
            assert_eq!(Gauge::new(v).tier, RiskTier::High, "value {v}");
        }
        assert_eq!(RiskTier::Low.color(), "#10b981");
        assert_eq!(RiskTier::Elevated.color(), "#f59e0b");
        assert_eq!(RiskTier::High.color(), "#ef4444");
    }

    #[test]
    fn arc_is_proportional() {
        let circumference = 2.0 * PI * RADIUS;
        let g = Gauge::new(25.0);
        assert!((g.progress - circumference / 4.0).abs() < 1e-9);
        assert!((g.progress + g.remaining - circumference).abs() < 1e-9);

        let empty = Gauge::new(f64::NAN);
        assert_eq!(empty.progress, 0.0);
    }

    #[test]
    fn renders_clamped_value() {
        let html = render_risk_gauge(120.0);
        assert!(html.contains("<svg"));
        assert_eq!(html.matches(">100<").count(), 2);
        assert!(html.contains("#ef4444"));
        assert!(html.contains("Composite Risk"));
    }
}
