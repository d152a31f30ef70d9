//! Autocomplete
//!
//! Keystroke-driven place suggestions.

use serde::Serialize;

use crate::api::PlaceMatch;
use crate::view::sanitize_location;

/// Shortest query that reaches the search endpoint
pub const MIN_QUERY_LEN: usize = 2;

/// The query to send for a keystroke, or `None` if it is too short to search
pub fn searchable(input: &str) -> Option<&str> {
    let q = input.trim();
    (q.chars().count() >= MIN_QUERY_LEN).then_some(q)
}

/// One selectable entry of the suggestion list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    /// Cleaned place name; this is what fills the search field on select
    pub label: String,
    pub country: Option<String>,
}

impl Suggestion {
    /// `"<label>, <country>"` as shown in the list
    pub fn display(&self) -> String {
        format!("{}, {}", self.label, self.country.as_deref().unwrap_or(""))
    }
}

impl From<PlaceMatch> for Suggestion {
    fn from(place: PlaceMatch) -> Self {
        Self {
            label: sanitize_location(&place.name),
            country: place.country,
        }
    }
}

/// Turn search matches into list entries, dropping ones with no usable name
pub fn suggestions(matches: Vec<PlaceMatch>) -> Vec<Suggestion> {
    matches
        .into_iter()
        .map(Suggestion::from)
        .filter(|s| !s.label.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_searchable_threshold() {
        assert_eq!(searchable(""), None);
        assert_eq!(searchable("d"), None);
        assert_eq!(searchable("  d  "), None);
        assert_eq!(searchable("de"), Some("de"));
        assert_eq!(searchable(" del "), Some("del"));
        // Counted in characters, not bytes
        assert_eq!(searchable("é"), None);
        assert_eq!(searchable("éa"), Some("éa"));
    }

    #[test]
    fn test_suggestion_labels_cleaned() {
        let list = suggestions(vec![
            PlaceMatch { name: "Delhi, null".to_string(), country: Some("IN".to_string()) },
            PlaceMatch { name: "null".to_string(), country: Some("XX".to_string()) },
            PlaceMatch { name: "Dehradun,".to_string(), country: None },
        ]);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].label, "Delhi");
        assert_eq!(list[0].display(), "Delhi, IN");
        assert_eq!(list[1].display(), "Dehradun, ");
    }
}
