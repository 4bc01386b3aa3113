//! Template rendering via Tera, with the site's date filters registered
//!
//! Templates are loaded from the site's includes and layouts directories.
//! The date filters keep the names existing site layouts call them by:
//! `dateFormat`, `dateShort`, and `year`.

use anyhow::Result;
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tera::{Context, Tera, Value};
use walkdir::WalkDir;

use crate::helpers::date::{self, DateError};

/// Time source behind the `year` filter's `"now"` branch
pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// Template renderer over the includes and layouts directories
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a renderer with templates from the given directories
    pub fn new(includes_dir: &Path, layouts_dir: &Path) -> Result<Self> {
        Self::with_clock(includes_dir, layouts_dir, Arc::new(Local::now))
    }

    /// Create a renderer with an explicit time source
    ///
    /// `year("now")` reads the supplied clock, so tests can pin the instant.
    pub fn with_clock(includes_dir: &Path, layouts_dir: &Path, clock: Clock) -> Result<Self> {
        let mut tera = Tera::default();

        // Output is HTML assembled from trusted site templates; URLs and
        // rendered markdown must not be escaped again
        tera.autoescape_on(vec![]);

        add_templates_from(&mut tera, includes_dir)?;
        add_templates_from(&mut tera, layouts_dir)?;

        tera.register_filter("dateFormat", date_format_filter);
        tera.register_filter("dateShort", date_short_filter);
        tera.register_filter("year", move |value: &Value, _: &HashMap<String, Value>| {
            year_filter(value, clock())
        });

        Ok(Self { tera })
    }

    /// Render a named template with the given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render an inline template body with the given context
    pub fn render_str(&mut self, body: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render_str(body, context)?)
    }

    /// Whether a template with this name was loaded
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }
}

/// Register every file under `dir` as a template named by its relative path
fn add_templates_from(tera: &mut Tera, dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        tera.add_template_file(path, Some(name.as_str()))?;
    }

    Ok(())
}

/// Convert a filter input into a local date
fn value_to_date(value: &Value) -> Result<DateTime<Local>, DateError> {
    match value {
        Value::String(s) => date::parse(s),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| DateError::Invalid(n.to_string()))
            .and_then(date::from_epoch),
        other => Err(DateError::Invalid(other.to_string())),
    }
}

/// Tera filter: long date, like "January 5, 2024"
fn date_format_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let d = value_to_date(value).map_err(|e| tera::Error::msg(e.to_string()))?;
    Ok(Value::String(date::format_long(&d)))
}

/// Tera filter: short date, like "Jan 5, 2024"
fn date_short_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let d = value_to_date(value).map_err(|e| tera::Error::msg(e.to_string()))?;
    Ok(Value::String(date::format_short(&d)))
}

/// Tera filter: four-digit calendar year, with the `"now"` sentinel
fn year_filter(value: &Value, now: DateTime<Local>) -> tera::Result<Value> {
    let year = match value {
        Value::String(s) => date::year_of(s, now),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| DateError::Invalid(n.to_string()))
            .and_then(date::from_epoch)
            .map(|d| chrono::Datelike::year(&d)),
        other => Err(DateError::Invalid(other.to_string())),
    }
    .map_err(|e| tera::Error::msg(e.to_string()))?;
    Ok(Value::Number(year.into()))
}
