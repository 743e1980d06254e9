use super::{escape, format_number};
use crate::domain::risk::Headline;

const NEUTRAL_CLASS: &str = "bg-gray-100 text-gray-700";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentTone {
    Positive,
    Negative,
    Neutral,
}

impl SentimentTone {
    pub fn from_value(sentiment: Option<f64>) -> Self {
        match sentiment {
            Some(s) if s > 0.0 => Self::Positive,
            Some(s) if s < 0.0 => Self::Negative,
            _ => Self::Neutral,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Positive => "bg-emerald-100 text-emerald-700",
            Self::Negative => "bg-red-100 text-red-700",
            Self::Neutral => NEUTRAL_CLASS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrgencyTier {
    High,
    Medium,
    Low,
}

impl UrgencyTier {
    pub fn from_value(urgency: Option<f64>) -> Self {
        let u = urgency.unwrap_or(0.0);
        if u > 0.66 {
            Self::High
        } else if u > 0.33 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::High => "bg-orange-100 text-orange-700",
            Self::Medium => "bg-yellow-100 text-yellow-700",
            Self::Low => NEUTRAL_CLASS,
        }
    }
}

pub fn sentiment_label(sentiment: Option<f64>) -> String {
    match sentiment {
        Some(s) => format!("Sent {s:.2}"),
        None => "Sent".to_string(),
    }
}

pub fn urgency_label(urgency: Option<f64>) -> String {
    // Half-up: 0.125 shows as 13%.
    let pct = (urgency.unwrap_or(0.0) * 100.0 + 0.5).floor();
    format!("Urg {}%", format_number(pct))
}

pub fn render_headline(item: &Headline) -> String {
    let tone = SentimentTone::from_value(item.sentiment);
    let tier = UrgencyTier::from_value(item.urgency);
    let mut out = String::new();

    match &item.id {
        Some(id) => {
            let key = match id {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            out.push_str(&format!(r#"<div class="headline" data-id="{}">"#, escape(&key)));
        }
        None => out.push_str(r#"<div class="headline">"#),
    }

    out.push_str(&format!(r#"<div><div class="headline-title">{}</div>"#, escape(&item.title)));
    if let Some(source) = item.source.as_deref().filter(|s| !s.is_empty()) {
        out.push_str(&format!(r#"<div class="muted tiny">{}</div>"#, escape(source)));
    }
    out.push_str("</div>");

    out.push_str(&format!(
        r#"<div class="badges"><span class="badge {}">{}</span><span class="badge {}">{}</span></div>"#,
        tone.class(),
        sentiment_label(item.sentiment),
        tier.class(),
        urgency_label(item.urgency),
    ));
    out.push_str("</div>");
    out
}

pub fn render_headline_list(items: &[Headline]) -> String {
    let mut out = String::from(r#"<div class="headline-list">"#);
    for item in items {
        out.push_str(&render_headline(item));
    }
    out.push_str("</div>");
    out
}
