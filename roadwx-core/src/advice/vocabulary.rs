//! Phrasing vocabulary for advisory lines.
//!
//! The upstream advisory generator does not commit to fixed wording, so every
//! label the extractors key on comes from [`VocabularyConfig`] and is compiled
//! once into a [`Vocabulary`].

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::VocabularyError;

const NUMBER: &str = r"\d+(?:[.,]\d+)?";
const SIGNED_NUMBER: &str = r"[-+−]?\d+(?:[.,]\d+)?";
const CELSIUS: &str = r"(?:°\s?C|º\s?C|℃)";
const SPEED: &str = r"m/s";

/// Word lists as stored in the `[vocabulary]` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    pub alert_labels: Vec<String>,
    pub temperature_labels: Vec<String>,
    pub temperature_connectors: Vec<String>,
    pub wind_labels: Vec<String>,
    pub gust_labels: Vec<String>,
    pub calm_words: Vec<String>,
    pub source_tags: Vec<String>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        fn words(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        Self {
            alert_labels: words(&["OFFICIAL ALERT"]),
            temperature_labels: words(&["temperatures", "temperature", "temp"]),
            temperature_connectors: words(&["at"]),
            wind_labels: words(&["winds", "wind"]),
            gust_labels: words(&["gusts", "gusting", "gust"]),
            calm_words: words(&["calm"]),
            source_tags: words(&[
                "vedur.is",
                "vedur",
                "vegagerdin",
                "vegagerðin",
                "veg",
                "imo",
                "yr",
            ]),
        }
    }
}

/// Compiled matchers, one field per extraction rule.
///
/// Where a rule has several patterns they are listed in the order they are
/// tried.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub(crate) alert: Regex,
    pub(crate) temperature: Vec<Regex>,
    pub(crate) calm: Regex,
    pub(crate) wind_label_before: Regex,
    pub(crate) wind_label_after: Regex,
    pub(crate) unlabelled_speed: Regex,
    /// Text preceding a speed ends in a gust label.
    pub(crate) gust_label_ends: Regex,
    /// Text following a speed starts with a gust label.
    pub(crate) gust_label_starts: Regex,
    pub(crate) gusts: Vec<Regex>,
    pub(crate) source_tag: Regex,
    pub(crate) station_code: Regex,
    pub(crate) alias: Regex,
}

impl Vocabulary {
    pub fn compile(config: &VocabularyConfig) -> Result<Self, VocabularyError> {
        let alert = alternation("alert_labels", &config.alert_labels)?;
        let temp_label = alternation("temperature_labels", &config.temperature_labels)?;
        let wind = alternation("wind_labels", &config.wind_labels)?;
        let gust = alternation("gust_labels", &config.gust_labels)?;
        let calm = alternation("calm_words", &config.calm_words)?;
        let tags = alternation("source_tags", &config.source_tags)?;
        // connectors may legitimately be empty
        let connector = match alternation("temperature_connectors", &config.temperature_connectors)
        {
            Ok(alt) => format!(r"(?:{alt}\s+)?"),
            Err(VocabularyError::Empty(_)) => String::new(),
            Err(e) => return Err(e),
        };

        let temp_value = format!(r"(?P<value>{SIGNED_NUMBER}\s?{CELSIUS})");
        let speed = format!(r"\(?\s*(?P<value>{NUMBER})\s*\)?\s*{SPEED}\)?");
        let speed_label_gap = r"(?:\s*:)?\s*(?:of\s+|at\s+|to\s+|up\s+to\s+)?";

        Ok(Self {
            alert: build(
                "alert_labels",
                // a period only ends the alert when a space or the line end follows it
                &format!(r"\b{alert}\s*:\s*(?P<value>.*?)(?:\.(?:\s|$)|$)"),
            )?,
            temperature: vec![
                build(
                    "temperature_labels",
                    &format!(r"\b{temp_label}\b(?:\s*:)?\s*{connector}{temp_value}"),
                )?,
                build("temperature_labels", &temp_value)?,
            ],
            calm: build(
                "calm_words",
                &format!(r"(?:\b{wind}\s+)?\b{calm}\b(?:\s+{wind}\b)?"),
            )?,
            wind_label_before: build(
                "wind_labels",
                &format!(r"\b{wind}\b{speed_label_gap}{speed}"),
            )?,
            wind_label_after: build("wind_labels", &format!(r"{speed}\s+{wind}\b"))?,
            unlabelled_speed: build("wind_labels", &speed)?,
            gust_label_ends: build(
                "gust_labels",
                &format!(r"\b{gust}\b{speed_label_gap}\(?\s*$"),
            )?,
            gust_label_starts: build("gust_labels", &format!(r"^\s*{gust}\b"))?,
            gusts: vec![
                build(
                    "gust_labels",
                    &format!(r"\b{gust}\b{speed_label_gap}{speed}"),
                )?,
                build("gust_labels", &format!(r"{speed}\s+{gust}\b"))?,
            ],
            source_tag: build(
                "source_tags",
                &format!(r"^\s*{tags}\s*:\s*(?-i:[A-Z0-9]{{1,8}}\b)?\s*"),
            )?,
            station_code: Regex::new(r"^[A-Z]+\s+").map_err(|source| VocabularyError::Pattern {
                field: "station_code",
                source,
            })?,
            alias: Regex::new(r"\(([^()]*)\)").map_err(|source| VocabularyError::Pattern {
                field: "alias",
                source,
            })?,
        })
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::compile(&VocabularyConfig::default()).expect("built-in vocabulary must compile")
    }
}

/// `(?:a|b|c)` over regex-escaped, non-empty entries.
fn alternation(field: &'static str, words: &[String]) -> Result<String, VocabularyError> {
    let escaped: Vec<String> = words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .map(|w| regex::escape(w).replace(' ', r"\s+"))
        .collect();

    if escaped.is_empty() {
        return Err(VocabularyError::Empty(field));
    }

    Ok(format!("(?:{})", escaped.join("|")))
}

fn build(field: &'static str, pattern: &str) -> Result<Regex, VocabularyError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| VocabularyError::Pattern { field, source })
}
