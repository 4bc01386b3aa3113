//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
///
/// Read once at startup; never re-evaluated during a build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub description: String,
    pub language: String,

    // URL
    pub url: String,

    // Directory
    pub input_dir: String,
    pub output_dir: String,
    pub includes_dir: String,
    pub layouts_dir: String,
    pub data_dir: String,

    // Rendering
    /// File extensions treated as renderable templates
    pub template_formats: Vec<String>,
    /// Engine used for markdown and HTML files
    pub template_engine: String,
    /// Layout applied when front matter names none
    pub default_layout: Option<String>,

    // Assets
    /// Directories and files copied verbatim from input to output,
    /// relative to the project root
    pub passthrough: Vec<String>,

    // Collections
    /// Glob selecting the blog posts, relative to the project root
    pub posts_glob: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Site".to_string(),
            author: String::new(),
            description: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),

            input_dir: "src".to_string(),
            output_dir: "_site".to_string(),
            includes_dir: "_includes".to_string(),
            layouts_dir: "_layouts".to_string(),
            data_dir: "_data".to_string(),

            template_formats: vec!["md".to_string(), "html".to_string()],
            template_engine: "tera".to_string(),
            default_layout: None,

            passthrough: vec![
                "src/css".to_string(),
                "src/images".to_string(),
                "src/files".to_string(),
                "src/assets".to_string(),
                "src/CNAME".to_string(),
            ],

            posts_glob: "src/blog/*.md".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Whether a file extension names a renderable template format
    pub fn is_template_format(&self, ext: &str) -> bool {
        self.template_formats.iter().any(|f| f == ext)
    }
}
