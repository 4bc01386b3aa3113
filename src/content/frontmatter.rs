//! Front-matter parsing

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::helpers::date::{self, DateError};

/// Front-matter data from a content document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub layout: Option<String>,

    /// Additional custom fields, passed through to the template context
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front matter from content
    ///
    /// Returns `(front_matter, body)`. Supports YAML between `---` fences and
    /// JSON between `;;;` fences or as a leading object. Content with no
    /// front matter comes back untouched with defaults.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str)> {
        let rest = content[3..].trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // No closing fence, treat as no front matter
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // A markdown document may open with a `---` thematic break; only
        // treat the block as front matter when it has key/value structure.
        if !looks_like_yaml(yaml_content) {
            return Ok((FrontMatter::default(), content));
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => Ok((fm, remaining)),
            Err(e) => {
                tracing::warn!("Failed to parse YAML front matter, treating as content: {}", e);
                Ok((FrontMatter::default(), content))
            }
        }
    }

    fn parse_json(content: &str) -> Result<(Self, &str)> {
        if let Some(rest) = content.strip_prefix(";;;") {
            if let Some(end_pos) = rest.find(";;;") {
                let fm: FrontMatter = serde_json::from_str(&rest[..end_pos])
                    .map_err(|e| anyhow!("Failed to parse JSON front matter: {}", e))?;
                let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);
                return Ok((fm, remaining));
            }
        }

        if content.starts_with('{') {
            if let Some(end_pos) = matching_brace(content) {
                let fm: FrontMatter = serde_json::from_str(&content[..end_pos])
                    .map_err(|e| anyhow!("Failed to parse JSON front matter: {}", e))?;
                let remaining = content[end_pos..].trim_start_matches(['\n', '\r']);
                return Ok((fm, remaining));
            }
        }

        Err(anyhow!("Invalid JSON front matter"))
    }

    /// Parse the date field into a local datetime
    ///
    /// `Ok(None)` when no date is present; `Err` when a date is present but
    /// cannot be parsed, so the caller decides the fallback.
    pub fn parse_date(&self) -> Result<Option<DateTime<Local>>, DateError> {
        match &self.date {
            Some(s) => date::parse(s).map(Some),
            None => Ok(None),
        }
    }
}

/// Check whether a fenced block has at least one `key: value` line
fn looks_like_yaml(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        // Keys are plain identifiers; URL schemes like "https:" do not count
        let is_identifier = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after = &trimmed[colon_pos + 1..];
        is_identifier && (after.is_empty() || after.starts_with(' '))
    })
}

/// Byte offset just past the `}` matching a leading `{`
fn matching_brace(content: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in content.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}
