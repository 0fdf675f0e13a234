use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A weather or road station along the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One sensor reading from a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub station_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub temp_c: Option<f64>,
    #[serde(default)]
    pub wind_ms: Option<f64>,
    #[serde(default)]
    pub gust_ms: Option<f64>,
    #[serde(default)]
    pub visibility_m: Option<f64>,
}

/// Official warning issued for a station (CAP alert).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(default)]
    pub headline: Option<String>,
    /// "Minor", "Moderate", "Severe", "Extreme"
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Alert {
    /// Short text for a badge tooltip: headline, else event type, else description.
    pub fn summary(&self) -> Option<&str> {
        self.headline
            .as_deref()
            .or(self.event_type.as_deref())
            .or(self.description.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Structured fields recovered from one advisory line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAdvice {
    pub station_name: String,
    pub official_alert: Option<String>,
    pub temperature: Option<String>,
    pub wind: Option<String>,
    pub gusts: Option<String>,
    /// Never empty when the advisory line was non-empty.
    pub road_conditions: String,
}

/// Display severity of a station badge, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    None,
    Caution,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "NONE",
            Severity::Caution => "CAUTION",
            Severity::Warning => "WARNING",
        }
    }

    /// Badge text shown next to a station, if any.
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            Severity::None => None,
            Severity::Caution => Some("Caution"),
            Severity::Warning => Some("Official warning"),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed advisory merged with live data for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedAdvice {
    #[serde(flatten)]
    pub advice: ParsedAdvice,
    pub severity: Severity,
    pub latest_observation: Option<Observation>,
    pub station_alerts: Vec<Alert>,
}

/// Input document for one engine run.
///
/// `lines[i]` belongs to `stations[i]`; observations and alerts are keyed by
/// station id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdviceBatch {
    pub lines: Vec<String>,
    pub stations: Vec<Station>,
    #[serde(default)]
    pub observations: HashMap<String, Vec<Observation>>,
    #[serde(default)]
    pub alerts: HashMap<String, Vec<Alert>>,
}
