//! Advisory line interpretation.
//!
//! A line looks like `STEHE (Steingrímsfjarðarheiði): OFFICIAL ALERT: Road
//! closed. Temperature -5.0°C, wind 12 m/s, gusts 22 m/s, icy patches`. It is
//! split into an identity and a content segment, the content is run through
//! the extraction stages in a fixed order (alert, temperature, wind, gusts),
//! and whatever is left becomes the road-condition narrative.

pub mod extract;
pub mod station;
pub mod vocabulary;

use tracing::debug;

use crate::model::ParsedAdvice;

pub use station::normalize_station_name;
pub use vocabulary::{Vocabulary, VocabularyConfig};

/// Identity and content parts of an advisory line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    pub identity: &'a str,
    pub content: &'a str,
}

/// Splits at the first colon. Lines without one are all content.
pub fn segment(line: &str) -> Segments<'_> {
    match line.split_once(':') {
        Some((identity, content)) => Segments {
            identity,
            content: content.trim(),
        },
        None => Segments {
            identity: "",
            content: line,
        },
    }
}

/// The narrative left after extraction, or the untouched line if nothing is
/// left.
pub fn resolve_road_conditions(remaining: &str, original_line: &str) -> String {
    let narrative =
        remaining.trim_matches(|c: char| c == ',' || c == '.' || c.is_whitespace());

    if narrative.is_empty() {
        original_line.to_string()
    } else {
        narrative.to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdviceParser {
    vocabulary: Vocabulary,
}

impl AdviceParser {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Parses one advisory line. Never fails; unrecognized fields are `None`.
    pub fn parse(&self, line: &str) -> ParsedAdvice {
        let vocab = &self.vocabulary;
        let Segments { identity, content } = segment(line);

        let station_name = normalize_station_name(vocab, identity);
        let (official_alert, rest) = extract::extract_alert(vocab, content);
        let (temperature, rest) = extract::extract_temperature(vocab, &rest);
        let (wind, rest) = extract::extract_wind(vocab, &rest);
        let (gusts, rest) = extract::extract_gusts(vocab, &rest);
        let road_conditions = resolve_road_conditions(&rest, line);

        debug!(
            station = %station_name,
            alert = official_alert.is_some(),
            temperature = ?temperature,
            wind = ?wind,
            gusts = ?gusts,
            "parsed advisory line"
        );

        ParsedAdvice {
            station_name,
            official_alert,
            temperature,
            wind,
            gusts,
            road_conditions,
        }
    }
}
