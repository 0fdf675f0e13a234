//! Station severity for display badges.
//!
//! An official alert always means [`Severity::Warning`]. Without one, the
//! station's most recent observation is checked against the caution
//! thresholds. All comparisons are strict.

use serde::{Deserialize, Serialize};

use crate::model::{Alert, ClassifiedAdvice, Observation, ParsedAdvice, Severity};

/// Sensor limits beyond which a station is flagged for caution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CautionThresholds {
    /// Caution when mean wind is above this (m/s).
    pub wind_ms: f64,
    /// Caution when gusts are above this (m/s).
    pub gust_ms: f64,
    /// Caution when visibility is below this (m).
    pub visibility_m: f64,
    /// Caution when temperature is below this (°C).
    pub temp_c: f64,
}

impl Default for CautionThresholds {
    fn default() -> Self {
        Self {
            wind_ms: 15.0,
            gust_ms: 20.0,
            visibility_m: 1000.0,
            temp_c: -10.0,
        }
    }
}

/// Which threshold an observation crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CautionReason {
    Wind,
    Gusts,
    Visibility,
    Cold,
}

impl CautionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            CautionReason::Wind => "strong wind",
            CautionReason::Gusts => "strong gusts",
            CautionReason::Visibility => "low visibility",
            CautionReason::Cold => "severe cold",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HazardClassifier {
    thresholds: CautionThresholds,
}

impl HazardClassifier {
    pub fn new(thresholds: CautionThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &CautionThresholds {
        &self.thresholds
    }

    pub fn classify(
        &self,
        parsed: ParsedAdvice,
        observations: &[Observation],
        alerts: &[Alert],
    ) -> ClassifiedAdvice {
        let latest = latest_observation(observations);

        let severity = if !alerts.is_empty() {
            Severity::Warning
        } else if latest.is_some_and(|obs| !self.reasons(obs).is_empty()) {
            Severity::Caution
        } else {
            Severity::None
        };

        ClassifiedAdvice {
            advice: parsed,
            severity,
            latest_observation: latest.cloned(),
            station_alerts: alerts.to_vec(),
        }
    }

    /// Every caution threshold the observation crosses, in a fixed order.
    pub fn reasons(&self, obs: &Observation) -> Vec<CautionReason> {
        let t = &self.thresholds;
        let checks = [
            (CautionReason::Wind, obs.wind_ms.is_some_and(|v| v > t.wind_ms)),
            (CautionReason::Gusts, obs.gust_ms.is_some_and(|v| v > t.gust_ms)),
            (
                CautionReason::Visibility,
                obs.visibility_m.is_some_and(|v| v < t.visibility_m),
            ),
            (CautionReason::Cold, obs.temp_c.is_some_and(|v| v < t.temp_c)),
        ];

        checks
            .into_iter()
            .filter_map(|(reason, hit)| hit.then_some(reason))
            .collect()
    }
}

/// The observation with the latest timestamp; the first one wins on ties.
pub fn latest_observation(observations: &[Observation]) -> Option<&Observation> {
    observations
        .iter()
        .reduce(|best, obs| if obs.timestamp > best.timestamp { obs } else { best })
}
