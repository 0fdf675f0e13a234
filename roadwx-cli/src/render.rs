//! Plain-text output for the terminal.

use roadwx_core::{
    ClassifiedAdvice, HazardClassifier, Observation, ParsedAdvice, Severity, Station,
};

pub fn parsed(advice: &ParsedAdvice) -> String {
    let name = if advice.station_name.is_empty() {
        "(unnamed station)"
    } else {
        advice.station_name.as_str()
    };

    let mut lines = vec![name.to_string()];
    lines.extend(field_lines(advice));
    block(lines)
}

pub fn classified(
    station: &Station,
    record: &ClassifiedAdvice,
    classifier: &HazardClassifier,
) -> String {
    let name = if record.advice.station_name.is_empty() {
        &station.name
    } else {
        &record.advice.station_name
    };

    let heading = match record.severity.badge() {
        Some(badge) => format!("{name} [{}]", badge_marker(record.severity, badge)),
        None => name.to_string(),
    };

    let mut lines = vec![heading];
    lines.extend(field_lines(&record.advice));

    lines.extend(record.station_alerts.iter().map(|alert| {
        let summary = alert.summary().unwrap_or("official alert");
        match alert.severity.as_deref() {
            Some(level) => format!("  ! {summary} ({level})"),
            None => format!("  ! {summary}"),
        }
    }));

    if let Some(obs) = &record.latest_observation {
        lines.push(format!(
            "  Observed {}: {}",
            obs.timestamp.format("%Y-%m-%d %H:%M UTC"),
            observation_summary(obs)
        ));

        let reasons: Vec<&str> = classifier
            .reasons(obs)
            .iter()
            .map(|r| r.as_str())
            .collect();
        if !reasons.is_empty() {
            lines.push(format!("  Caution: {}", reasons.join(", ")));
        }
    }

    block(lines)
}

/// Newline-terminated lines.
fn block(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

fn badge_marker(severity: Severity, badge: &str) -> String {
    match severity {
        Severity::Warning => format!("!! {badge}"),
        Severity::Caution => format!("! {badge}"),
        Severity::None => badge.to_string(),
    }
}

fn field_lines(advice: &ParsedAdvice) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(alert) = &advice.official_alert {
        lines.push(format!("  Official alert: {alert}"));
    }
    let fields = [
        ("Temperature", &advice.temperature),
        ("Wind", &advice.wind),
        ("Gusts", &advice.gusts),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            lines.push(format!("  {label}: {value}"));
        }
    }
    lines.push(format!("  Road: {}", advice.road_conditions));
    lines
}

fn observation_summary(obs: &Observation) -> String {
    let mut parts = Vec::new();
    if let Some(t) = obs.temp_c {
        parts.push(format!("{t:.1}°C"));
    }
    if let Some(w) = obs.wind_ms {
        parts.push(format!("wind {w:.1} m/s"));
    }
    if let Some(g) = obs.gust_ms {
        parts.push(format!("gusts {g:.1} m/s"));
    }
    if let Some(v) = obs.visibility_m {
        parts.push(format!("visibility {v:.0} m"));
    }

    if parts.is_empty() {
        "no readings".to_string()
    } else {
        parts.join(", ")
    }
}
