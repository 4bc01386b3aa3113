//! eleven-rs: a fast static site generator for Eleventy-style site layouts
//!
//! Builds a `src/` input tree (with `_includes`, `_layouts`, `_data`, a blog
//! directory, and passthrough asset directories) into a `_site/` output tree
//! using Tera templates.

pub mod collection;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The site handle: configuration plus resolved directories
#[derive(Clone)]
pub struct Eleven {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Project root
    pub base_dir: PathBuf,
    /// Input directory
    pub input_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
    /// Includes directory (inside the input directory)
    pub includes_dir: PathBuf,
    /// Layouts directory (inside the input directory)
    pub layouts_dir: PathBuf,
    /// Data directory (inside the input directory)
    pub data_dir: PathBuf,
}

impl Eleven {
    /// Create a site handle from a project directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let input_dir = base_dir.join(&config.input_dir);
        let output_dir = base_dir.join(&config.output_dir);
        let includes_dir = input_dir.join(&config.includes_dir);
        let layouts_dir = input_dir.join(&config.layouts_dir);
        let data_dir = input_dir.join(&config.data_dir);

        Ok(Self {
            config,
            base_dir,
            input_dir,
            output_dir,
            includes_dir,
            layouts_dir,
            data_dir,
        })
    }

    /// Build the static site
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Clean the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_with_defaults() {
        let tmp = TempDir::new().unwrap();
        let site = Eleven::new(tmp.path()).unwrap();
        assert_eq!(site.input_dir, tmp.path().join("src"));
        assert_eq!(site.output_dir, tmp.path().join("_site"));
        assert_eq!(site.includes_dir, tmp.path().join("src/_includes"));
        assert_eq!(site.layouts_dir, tmp.path().join("src/_layouts"));
        assert_eq!(site.data_dir, tmp.path().join("src/_data"));
    }

    #[test]
    fn test_new_reads_config() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("_config.yml"), "output_dir: public\n").unwrap();
        let site = Eleven::new(tmp.path()).unwrap();
        assert_eq!(site.output_dir, tmp.path().join("public"));
    }
}
