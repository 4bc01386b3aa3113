//! Clean the output directory

use anyhow::Result;
use std::fs;

use crate::Eleven;

/// Remove the output directory
pub fn run(site: &Eleven) -> Result<()> {
    if site.output_dir.exists() {
        fs::remove_dir_all(&site.output_dir)?;
        tracing::info!("Deleted: {:?}", site.output_dir);
    }

    Ok(())
}
