use super::vocabulary::Vocabulary;

/// Reduces the identity part of an advisory line to a display name.
///
/// A bracketed alias wins (`STEHE (Steingrímsfjarðarheiði)`). Otherwise a
/// source tag such as `vedur: 31392` and a leading upper-case station code are
/// dropped.
pub fn normalize_station_name(vocab: &Vocabulary, identity: &str) -> String {
    let alias = vocab
        .alias
        .captures(identity)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|alias| !alias.is_empty());

    if let Some(alias) = alias {
        return alias.to_string();
    }

    let untagged = vocab.source_tag.replace(identity, "");
    let uncoded = vocab.station_code.replace(untagged.trim_start(), "");
    uncoded.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(identity: &str) -> String {
        normalize_station_name(&Vocabulary::default(), identity)
    }

    #[test]
    fn bracketed_alias_is_preferred() {
        assert_eq!(normalize("STEHE (Steingrímsfjarðarheiði)"), "Steingrímsfjarðarheiði");
        assert_eq!(normalize("31392 ( Hellisheiði ) (old)"), "Hellisheiði");
    }

    #[test]
    fn empty_alias_falls_through() {
        assert_eq!(normalize("HOLTA Holtavörðuheiði ()"), "Holtavörðuheiði ()");
    }

    #[test]
    fn source_tag_and_code_are_stripped() {
        assert_eq!(normalize("Vedur: 31392 Þröskuldar"), "Þröskuldar");
        assert_eq!(normalize("vegagerðin:HFJ Hafnarfjall"), "Hafnarfjall");
    }

    #[test]
    fn short_source_tags_are_stripped() {
        assert_eq!(normalize("veg: HFJ Hafnarfjall"), "Hafnarfjall");
        assert_eq!(normalize("imo: 31392 Ögur"), "Ögur");
        assert_eq!(normalize("vedur.is: 31392 Þröskuldar"), "Þröskuldar");
    }

    #[test]
    fn leading_station_code_is_stripped() {
        assert_eq!(normalize("  OGUR Ögur "), "Ögur");
    }

    #[test]
    fn plain_names_are_kept() {
        assert_eq!(normalize("Reykjavík Airport"), "Reykjavík Airport");
        assert_eq!(normalize(""), "");
    }
}
