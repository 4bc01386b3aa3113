//! Named collections derived from the loaded document set

use glob::{MatchOptions, Pattern};

use crate::content::Document;

/// Build the posts collection: documents matching `pattern`, newest first
///
/// The glob requires literal path separators, so `src/blog/*.md` matches the
/// blog directory itself and never recurses into subdirectories. The sort is
/// stable; documents with equal dates keep their discovery order. Recomputed
/// fresh on every call, leaving the input untouched.
pub fn posts(documents: &[Document], pattern: &str) -> Vec<Document> {
    let pattern = match Pattern::new(pattern) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("Invalid collection glob {:?}: {}", pattern, e);
            return Vec::new();
        }
    };
    let options = MatchOptions {
        require_literal_separator: true,
        ..MatchOptions::default()
    };

    let mut selected: Vec<Document> = documents
        .iter()
        .filter(|d| pattern.matches_with(&d.source, options))
        .cloned()
        .collect();

    selected.sort_by(|a, b| b.date.cmp(&a.date));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn doc(source: &str, y: i32, m: u32, d: u32) -> Document {
        let date = Local.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap();
        Document::new(source.to_string(), date, source.to_string())
    }

    #[test]
    fn test_filters_and_sorts_descending() {
        let docs = vec![
            doc("src/blog/a.md", 2024, 1, 1),
            doc("src/blog/b.md", 2024, 6, 1),
            doc("src/other/c.md", 2024, 12, 1),
        ];

        let result = posts(&docs, "src/blog/*.md");
        let sources: Vec<_> = result.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(sources, vec!["src/blog/b.md", "src/blog/a.md"]);
    }

    #[test]
    fn test_glob_is_not_recursive() {
        let docs = vec![
            doc("src/blog/a.md", 2024, 1, 1),
            doc("src/blog/drafts/b.md", 2024, 6, 1),
            doc("src/blog/c.txt", 2024, 7, 1),
        ];

        let result = posts(&docs, "src/blog/*.md");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].source, "src/blog/a.md");
    }

    #[test]
    fn test_idempotent() {
        let docs = vec![
            doc("src/blog/a.md", 2023, 3, 14),
            doc("src/blog/b.md", 2024, 6, 1),
            doc("src/blog/c.md", 2022, 11, 30),
        ];

        let first = posts(&docs, "src/blog/*.md");
        let second = posts(&docs, "src/blog/*.md");
        let order = |v: &[Document]| v.iter().map(|d| d.source.clone()).collect::<Vec<_>>();
        assert_eq!(order(&first), order(&second));
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let docs = vec![
            doc("src/blog/first.md", 2024, 5, 5),
            doc("src/blog/second.md", 2024, 5, 5),
        ];

        let result = posts(&docs, "src/blog/*.md");
        let sources: Vec<_> = result.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(sources, vec!["src/blog/first.md", "src/blog/second.md"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(posts(&[], "src/blog/*.md").is_empty());
    }
}
