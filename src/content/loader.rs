//! Content loader - discovers and loads documents from the input directory

use anyhow::Result;
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{Document, FrontMatter};
use crate::Eleven;

/// Loads content documents from the input directory
pub struct ContentLoader<'a> {
    site: &'a Eleven,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Eleven) -> Self {
        Self { site }
    }

    /// Load all template-format documents under the input directory
    ///
    /// Documents come back in discovery order; collections apply their own
    /// ordering. Files that fail to load are logged and skipped.
    pub fn load_documents(&self) -> Result<Vec<Document>> {
        let input_dir = &self.site.input_dir;
        if !input_dir.exists() {
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(input_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !self.is_template_file(path) {
                continue;
            }
            if self.in_special_dir(path) || self.in_passthrough(path) {
                continue;
            }

            match self.load_document(path) {
                Ok(doc) => documents.push(doc),
                Err(e) => {
                    tracing::warn!("Failed to load document {:?}: {}", path, e);
                }
            }
        }

        Ok(documents)
    }

    /// Load a single document from a file
    fn load_document(&self, path: &Path) -> Result<Document> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let date = self.resolve_date(&fm, path);

        let title = fm.title.unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        // Source path relative to the project root, forward slashes
        let source = path
            .strip_prefix(&self.site.base_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        let url = self.derive_url(&source);

        let mut doc = Document::new(title, date, source);
        doc.layout = fm.layout.or_else(|| self.site.config.default_layout.clone());
        doc.full_source = path.to_path_buf();
        doc.url = url;
        doc.raw = body.to_string();
        doc.extra = fm.extra;

        Ok(doc)
    }

    /// Resolve a document's date, always producing a valid instant
    ///
    /// Front-matter date first; an unparseable one is logged and falls back
    /// to the file's modification time, then to the load instant. The
    /// collection sort can therefore assume every date is valid.
    fn resolve_date(&self, fm: &FrontMatter, path: &Path) -> DateTime<Local> {
        let file_modified = fs::metadata(path)
            .ok()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Local>::from);

        match fm.parse_date() {
            Ok(Some(date)) => date,
            Ok(None) => file_modified.unwrap_or_else(Local::now),
            Err(e) => {
                tracing::warn!("Invalid date in {:?} ({}), using file mtime", path, e);
                file_modified.unwrap_or_else(Local::now)
            }
        }
    }

    /// Derive the output URL path for a root-relative source path
    fn derive_url(&self, source: &str) -> String {
        let input_prefix = format!("{}/", self.site.config.input_dir);
        let relative = source.strip_prefix(&input_prefix).unwrap_or(source);

        let without_ext = match relative.rsplit_once('.') {
            Some((stem, _)) => stem,
            None => relative,
        };

        if without_ext == "index" {
            return "/".to_string();
        }
        if let Some(dir) = without_ext.strip_suffix("/index") {
            return format!("/{}/", dir);
        }
        format!("/{}/", without_ext)
    }

    /// Whether a file's extension names a renderable template format
    fn is_template_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.site.config.is_template_format(e))
            .unwrap_or(false)
    }

    /// Whether a path sits under a passthrough entry
    ///
    /// Passthrough content is copied verbatim, never rendered, even when its
    /// extension names a template format.
    fn in_passthrough(&self, path: &Path) -> bool {
        let source = path
            .strip_prefix(&self.site.base_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        self.site.config.passthrough.iter().any(|entry| {
            source == *entry || source.starts_with(&format!("{}/", entry))
        })
    }

    /// Whether a path sits under the includes/layouts/data directories or
    /// any other underscore-prefixed directory
    fn in_special_dir(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.site.input_dir).unwrap_or(path);
        let config = &self.site.config;

        relative.components().any(|c| {
            c.as_os_str()
                .to_str()
                .map(|s| {
                    s.starts_with('_')
                        || s == config.includes_dir
                        || s == config.layouts_dir
                        || s == config.data_dir
                })
                .unwrap_or(false)
        })
    }
}
