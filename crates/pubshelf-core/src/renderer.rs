use std::cmp::Reverse;

use crate::{FormattedEntry, PublicationState};

/// Order formatted entries newest first.
///
/// The unknown year 0 sorts after every known year, negative ones included.
/// The sort is stable, so entries with equal years keep their document order.
/// An empty input becomes [`PublicationState::Empty`].
pub fn arrange(mut entries: Vec<FormattedEntry>) -> PublicationState {
    if entries.is_empty() {
        return PublicationState::Empty;
    }
    entries.sort_by_key(|e| (e.year == 0, Reverse(e.year)));
    PublicationState::Ready { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe(key: &str, year: i32) -> FormattedEntry {
        FormattedEntry {
            key: key.to_string(),
            year,
            title: key.to_string(),
            authors: String::new(),
            venue: "Publication".to_string(),
            links: vec![],
        }
    }

    fn keys(state: &PublicationState) -> Vec<&str> {
        state.entries().iter().map(|e| e.key.as_str()).collect()
    }

    #[test]
    fn test_newest_first() {
        let state = arrange(vec![fe("a", 2019), fe("b", 2023), fe("c", 2021)]);
        assert_eq!(keys(&state), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_document_order() {
        let state = arrange(vec![
            fe("first", 2020),
            fe("unknown1", 0),
            fe("second", 2020),
            fe("unknown2", 0),
            fe("third", 2020),
        ]);
        assert_eq!(
            keys(&state),
            vec!["first", "second", "third", "unknown1", "unknown2"]
        );
    }

    #[test]
    fn test_unknown_year_after_negative_years() {
        let state = arrange(vec![fe("unknown", 0), fe("bc", -44), fe("new", 2020)]);
        assert_eq!(keys(&state), vec!["new", "bc", "unknown"]);
    }

    #[test]
    fn test_empty_is_not_an_error() {
        assert_eq!(arrange(vec![]), PublicationState::Empty);
    }
}
