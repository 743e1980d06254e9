use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskSnapshot {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub risk_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesPoint {
    #[serde(default, deserialize_with = "lenient_string")]
    pub ts: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub risk_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    /// Opaque upstream identifier (number or string).
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub sentiment: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub urgency: Option<f64>,
}

/// Everything the detail page shows for one ticker.
///
/// Built from a possibly partial upstream body. Each field is decoded on its own: a missing,
/// `null` or mistyped field falls back to its empty value, and list entries that are not
/// objects are skipped, so one bad entry never discards the rest. `TickerRiskResponse::default()`
/// doubles as the "backend failed" response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerRiskResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub risk: RiskSnapshot,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub timeseries: Vec<TimeseriesPoint>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub headlines: Vec<Headline>,
}

impl TickerRiskResponse {
    pub fn from_json(raw: Value) -> anyhow::Result<Self> {
        Ok(serde_json::from_value(raw)?)
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let v = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(v).unwrap_or_default())
}

fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_from_value(Value::deserialize(deserializer)?))
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from_value(&Value::deserialize(deserializer)?).unwrap_or(0.0))
}

fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from_value(&Value::deserialize(deserializer)?))
}

// Scalars are shown as text; null, arrays and objects are "no text".
fn string_from_value(v: Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// Numbers pass through, numeric strings are parsed, everything else is "no number".
fn number_from_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}
