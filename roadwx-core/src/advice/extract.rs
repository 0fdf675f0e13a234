//! Field extraction stages.
//!
//! Each stage takes the working content and returns the extracted value (if
//! any) together with the content left after the matched span is removed.
//! Stages never fail: an unmatched field is `None` and the text is returned
//! unchanged.

use regex::{Captures, Regex};
use std::ops::Range;

use super::vocabulary::Vocabulary;

/// Value recovered by one stage and the working content that remains.
pub type Extraction = (Option<String>, String);

pub fn extract_alert(vocab: &Vocabulary, text: &str) -> Extraction {
    let Some((value, span)) = capture_value(vocab.alert.captures(text)) else {
        return (None, text.to_string());
    };

    if value.is_empty() {
        // a bare label is left in place for the narrative
        return (None, text.to_string());
    }

    (Some(value), splice(text, span))
}

pub fn extract_temperature(vocab: &Vocabulary, text: &str) -> Extraction {
    let found = vocab
        .temperature
        .iter()
        .find_map(|re| capture_value(re.captures(text)));

    match found {
        Some((value, span)) => (Some(value), remove_with_trailing(text, span)),
        None => (None, text.to_string()),
    }
}

pub fn extract_wind(vocab: &Vocabulary, text: &str) -> Extraction {
    if let Some(calm) = vocab.calm.find(text) {
        return (Some("calm".to_string()), remove_with_trailing(text, calm.range()));
    }

    let found = capture_value(vocab.wind_label_before.captures(text))
        .or_else(|| {
            let caps = first_where(&vocab.wind_label_after, text, |span| {
                !vocab.gust_label_ends.is_match(&text[..span.start])
            });
            capture_value(caps)
        })
        .or_else(|| {
            let caps = first_where(&vocab.unlabelled_speed, text, |span| {
                !vocab.gust_label_ends.is_match(&text[..span.start])
                    && !vocab.gust_label_starts.is_match(&text[span.end..])
            });
            capture_value(caps)
        });

    match found {
        Some((value, span)) => {
            let span = with_open_bracket(text, span);
            (Some(speed(&value)), remove_with_trailing(text, span))
        }
        None => (None, text.to_string()),
    }
}

pub fn extract_gusts(vocab: &Vocabulary, text: &str) -> Extraction {
    let found = vocab
        .gusts
        .iter()
        .find_map(|re| capture_value(re.captures(text)));

    match found {
        Some((value, span)) => {
            let span = with_open_bracket(text, span);
            (Some(speed(&value)), remove_with_trailing(text, span))
        }
        None => (None, text.to_string()),
    }
}

fn speed(number: &str) -> String {
    format!("{number} m/s")
}

/// Trimmed `value` group and the span of the whole match.
fn capture_value(caps: Option<Captures<'_>>) -> Option<(String, Range<usize>)> {
    let caps = caps?;
    let whole = caps.get(0)?;
    let value = caps.name("value")?;
    Some((value.as_str().trim().to_string(), whole.range()))
}

fn first_where<'t>(
    re: &Regex,
    text: &'t str,
    keep: impl Fn(&Range<usize>) -> bool,
) -> Option<Captures<'t>> {
    re.captures_iter(text)
        .find(|caps| caps.get(0).is_some_and(|m| keep(&m.range())))
}

/// Widens `span` back over a `(` that opens the bracket its match closes,
/// as in `(gusts 25 m/s)`.
fn with_open_bracket(text: &str, span: Range<usize>) -> Range<usize> {
    let matched = &text[span.clone()];
    if matched.matches(')').count() <= matched.matches('(').count() {
        return span;
    }

    let before = text[..span.start].trim_end();
    match before.strip_suffix('(') {
        Some(head) => head.len()..span.end,
        None => span,
    }
}

/// Removes `span` plus any directly following run of commas, periods and
/// whitespace.
fn remove_with_trailing(text: &str, span: Range<usize>) -> String {
    let tail = &text[span.end..];
    let rest = tail.trim_start_matches(|c: char| c == ',' || c == '.' || c.is_whitespace());
    let end = span.end + (tail.len() - rest.len());
    splice(text, span.start..end)
}

/// Cuts `span` out of `text`, joining what is left on both sides with a
/// single space.
fn splice(text: &str, span: Range<usize>) -> String {
    let before = text[..span.start].trim_end();
    let after = text[span.end..].trim_start();

    match (before.is_empty(), after.is_empty()) {
        (true, _) => after.to_string(),
        (_, true) => before.to_string(),
        _ => format!("{before} {after}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::default()
    }

    #[test]
    fn alert_is_cut_up_to_and_including_the_period() {
        let (alert, rest) =
            extract_alert(&vocab(), "OFFICIAL ALERT: Road closed due to snow. Temperature -5°C");

        assert_eq!(alert.as_deref(), Some("Road closed due to snow"));
        assert_eq!(rest, "Temperature -5°C");
    }

    #[test]
    fn alert_label_is_case_insensitive_and_may_sit_mid_line() {
        let (alert, rest) = extract_alert(&vocab(), "icy roads, official alert: strong winds");

        assert_eq!(alert.as_deref(), Some("strong winds"));
        assert_eq!(rest, "icy roads,");
    }

    #[test]
    fn decimal_point_does_not_end_the_alert() {
        let (alert, rest) = extract_alert(
            &vocab(),
            "OFFICIAL ALERT: Winds up to 25.5 m/s expected. Temperature 1°C",
        );

        assert_eq!(alert.as_deref(), Some("Winds up to 25.5 m/s expected"));
        assert_eq!(rest, "Temperature 1°C");
    }

    #[test]
    fn alert_ending_the_line_keeps_its_last_word() {
        let (alert, rest) = extract_alert(&vocab(), "OFFICIAL ALERT: pass closed at km 3.5.");
        assert_eq!(alert.as_deref(), Some("pass closed at km 3.5"));
        assert_eq!(rest, "");
    }

    #[test]
    fn missing_alert_leaves_text_untouched() {
        let (alert, rest) = extract_alert(&vocab(), "dry roads");
        assert_eq!(alert, None);
        assert_eq!(rest, "dry roads");
    }

    #[test]
    fn empty_alert_text_is_not_extracted() {
        let (alert, rest) = extract_alert(&vocab(), "OFFICIAL ALERT: . dry roads");
        assert_eq!(alert, None);
        assert_eq!(rest, "OFFICIAL ALERT: . dry roads");
    }

    #[test]
    fn labelled_temperature_with_connector() {
        let (temp, rest) = extract_temperature(&vocab(), "temperatures at -12.5°C, blowing snow");

        assert_eq!(temp.as_deref(), Some("-12.5°C"));
        assert_eq!(rest, "blowing snow");
    }

    #[test]
    fn bare_temperature_is_found() {
        let (temp, rest) = extract_temperature(&vocab(), "slush, 2°C. Drive carefully");

        assert_eq!(temp.as_deref(), Some("2°C"));
        assert_eq!(rest, "slush, Drive carefully");
    }

    #[test]
    fn labelled_temperature_wins_over_earlier_bare_value() {
        let (temp, _) = extract_temperature(&vocab(), "yesterday 4°C, temp 1°C now");
        assert_eq!(temp.as_deref(), Some("1°C"));
    }

    #[test]
    fn number_without_celsius_is_not_a_temperature() {
        let (temp, rest) = extract_temperature(&vocab(), "wind 12 m/s");
        assert_eq!(temp, None);
        assert_eq!(rest, "wind 12 m/s");
    }

    #[test]
    fn calm_consumes_adjacent_wind_label() {
        let (wind, rest) = extract_wind(&vocab(), "calm winds, dry roads");

        assert_eq!(wind.as_deref(), Some("calm"));
        assert_eq!(rest, "dry roads");
    }

    #[test]
    fn calm_takes_precedence_over_numbers() {
        let (wind, _) = extract_wind(&vocab(), "Calm now, later wind 14 m/s");
        assert_eq!(wind.as_deref(), Some("calm"));
    }

    #[test]
    fn wind_label_before_value() {
        let (wind, rest) = extract_wind(&vocab(), "wind 12 m/s, gusts 22 m/s, icy");

        assert_eq!(wind.as_deref(), Some("12 m/s"));
        assert_eq!(rest, "gusts 22 m/s, icy");
    }

    #[test]
    fn wind_label_after_value_with_parentheses() {
        let (wind, rest) = extract_wind(&vocab(), "strong (18) m/s winds expected");

        assert_eq!(wind.as_deref(), Some("18 m/s"));
        assert_eq!(rest, "strong expected");
    }

    #[test]
    fn wind_label_found_after_gust_value() {
        let (wind, rest) = extract_wind(&vocab(), "gusts 25 m/s, wind 10 m/s");

        assert_eq!(wind.as_deref(), Some("10 m/s"));
        assert_eq!(rest, "gusts 25 m/s,");
    }

    #[test]
    fn unlabelled_speed_is_wind() {
        let (wind, rest) = extract_wind(&vocab(), "expect 9 m/s on the pass");

        assert_eq!(wind.as_deref(), Some("9 m/s"));
        assert_eq!(rest, "expect on the pass");
    }

    #[test]
    fn gust_values_are_never_taken_as_wind() {
        let (wind, rest) = extract_wind(&vocab(), "gusts 22 m/s and 30 m/s gusts later");

        assert_eq!(wind, None);
        assert_eq!(rest, "gusts 22 m/s and 30 m/s gusts later");
    }

    #[test]
    fn gusts_label_before_and_after() {
        let (gusts, rest) = extract_gusts(&vocab(), "gusting up to 31.5 m/s near the tunnel");
        assert_eq!(gusts.as_deref(), Some("31.5 m/s"));
        assert_eq!(rest, "near the tunnel");

        let (gusts, rest) = extract_gusts(&vocab(), "expect (27 m/s) gusts");
        assert_eq!(gusts.as_deref(), Some("27 m/s"));
        assert_eq!(rest, "expect");
    }

    #[test]
    fn bracketed_speeds_are_removed_whole() {
        let (gusts, rest) = extract_gusts(&vocab(), "wet (gusts 25 m/s) later");
        assert_eq!(gusts.as_deref(), Some("25 m/s"));
        assert_eq!(rest, "wet later");

        let (wind, rest) = extract_wind(&vocab(), "( wind 12 m/s)");
        assert_eq!(wind.as_deref(), Some("12 m/s"));
        assert_eq!(rest, "");
    }

    #[test]
    fn unrelated_brackets_are_kept() {
        assert_eq!(with_open_bracket("(a) wind 3 m/s", 4..14), 4..14);
        assert_eq!(with_open_bracket("x (18) m/s", 2..10), 2..10);
    }

    #[test]
    fn gusts_require_a_label() {
        let (gusts, rest) = extract_gusts(&vocab(), "12 m/s, icy");
        assert_eq!(gusts, None);
        assert_eq!(rest, "12 m/s, icy");
    }

    #[test]
    fn splice_joins_remaining_sides() {
        assert_eq!(splice("a X b", 2..3), "a b");
        assert_eq!(splice("X b", 0..1), "b");
        assert_eq!(splice("a X", 2..3), "a");
        assert_eq!(splice("X", 0..1), "");
    }
}
