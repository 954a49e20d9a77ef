/// Station selection by name pattern.
///
/// Users pick stations with free-form fragments of their names
/// ("göteborg", "malmö"). A station is selected when any fragment occurs
/// anywhere in its name, ignoring case.

use crate::model::Station;

/// True when any pattern is a case-insensitive substring of `name`.
///
/// An empty pattern list selects nothing. An empty pattern selects
/// everything, since the empty string is a substring of every name.
pub fn matches<S: AsRef<str>>(name: &str, patterns: &[S]) -> bool {
    let name = name.to_lowercase();
    patterns
        .iter()
        .any(|p| name.contains(&p.as_ref().to_lowercase()))
}

/// Keeps the stations whose names match, in the order the API returned them.
pub fn filter_stations<S: AsRef<str>>(stations: Vec<Station>, patterns: &[S]) -> Vec<Station> {
    stations
        .into_iter()
        .filter(|s| matches(&s.name, patterns))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::fixture_stations_json;
    use crate::ingest::viva::parse_stations_response;

    fn stations() -> Vec<Station> {
        parse_stations_response(fixture_stations_json()).expect("fixture should parse")
    }

    #[test]
    fn test_match_ignores_case() {
        assert!(matches("Göteborg - Torshamnen", &["torshamnen"]));
        assert!(matches("Göteborg - Torshamnen", &["TORSHAMNEN"]));
        assert!(matches("stockholm", &["StockHolm"]));
    }

    #[test]
    fn test_match_ignores_case_outside_ascii() {
        assert!(matches("GÖTEBORG - Lilla Bommen", &["göteborg"]));
        assert!(matches("Malmö hamn", &["MALMÖ"]));
    }

    #[test]
    fn test_match_is_substring_based() {
        assert!(matches("Göteborg - Torshamnen", &["borg - tors"]));
        assert!(!matches("Stockholm", &["stockholms"]));
    }

    #[test]
    fn test_match_any_of_several_patterns() {
        assert!(matches("Malmö hamn", &["stockholm", "hamn"]));
        assert!(!matches("Malmö hamn", &["stockholm", "göteborg"]));
    }

    #[test]
    fn test_empty_pattern_list_matches_nothing() {
        let none: [&str; 0] = [];
        assert!(!matches("Stockholm", &none));
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        assert!(matches("Stockholm", &[""]));
    }

    #[test]
    fn test_filter_keeps_api_order() {
        let selected = filter_stations(stations(), &["göteborg"]);
        let ids: Vec<i64> = selected.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![114, 115]);
    }

    #[test]
    fn test_filter_accepts_owned_patterns() {
        let patterns = vec!["stockholm".to_string()];
        let selected = filter_stations(stations(), &patterns);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, 1);
    }
}
