//! Case-insensitive substring search over record names.

use serde::{Deserialize, Serialize};

/// A name search term. The empty query matches every name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameQuery {
    needle: String,
}

impl NameQuery {
    /// Build a query. Whitespace is part of the needle.
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// Whether this query matches everything.
    pub fn is_match_all(&self) -> bool {
        self.needle.is_empty()
    }

    /// Case-insensitive substring match.
    pub fn matches(&self, name: &str) -> bool {
        self.is_match_all() || name.to_lowercase().contains(&self.needle)
    }

    /// `ILIKE` pattern with `%`, `_` and `\` escaped, wrapped in wildcards.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.needle.len() + 2);
        pattern.push('%');
        for ch in self.needle.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_matches_everything() {
        let q = NameQuery::new("");
        assert!(q.is_match_all());
        assert!(q.matches("anything"));
        assert!(q.matches(""));
    }

    #[test]
    fn test_whitespace_is_searched_literally() {
        let space = NameQuery::new(" ");
        assert!(!space.is_match_all());
        assert!(space.matches("lab notes"));
        assert!(!space.matches("lab_notes"));

        let leading = NameQuery::new(" notes");
        assert!(leading.matches("Lab Notes.md"));
        assert!(!leading.matches("notes.md"));
        assert_eq!(leading.like_pattern(), "% notes%");
    }

    #[test]
    fn test_case_insensitive_substring() {
        let q = NameQuery::new("report");
        assert!(q.matches("Report_Final"));
        assert!(q.matches("q3-REPORT.pdf"));
        assert!(!q.matches("summary.pdf"));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(NameQuery::new("50%_a\\b").like_pattern(), "%50\\%\\_a\\\\b%");
        assert_eq!(NameQuery::new("").like_pattern(), "%%");
    }
}
