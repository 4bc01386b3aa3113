//! Content document model

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// One discoverable source file with its metadata
///
/// Immutable once loaded for a given build pass. The loader guarantees `date`
/// is always valid: a document without a parseable front-matter date falls
/// back to the file's modification time, and failing that the load instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document title
    pub title: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// Layout template from front matter, if any
    pub layout: Option<String>,

    /// Source file path relative to the project root, with `/` separators
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Output URL path (like "/blog/hello/")
    pub url: String,

    /// Body after front matter, before rendering
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Document {
    /// Create a new document with minimal required fields
    pub fn new(title: String, date: DateTime<Local>, source: String) -> Self {
        Self {
            title,
            date,
            layout: None,
            full_source: PathBuf::from(&source),
            source,
            url: String::new(),
            raw: String::new(),
            content: String::new(),
            extra: HashMap::new(),
        }
    }

    /// File extension of the source path, if any
    pub fn extension(&self) -> Option<&str> {
        self.source.rsplit_once('.').map(|(_, ext)| ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_document() {
        let date = Local.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        let doc = Document::new("Hello".to_string(), date, "src/blog/hello.md".to_string());
        assert_eq!(doc.source, "src/blog/hello.md");
        assert_eq!(doc.extension(), Some("md"));
        assert!(doc.layout.is_none());
    }
}
