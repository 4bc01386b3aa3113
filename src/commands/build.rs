//! Build the static site

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Eleven;

/// Build the site: load documents, render, write output
pub fn run(site: &Eleven) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new(site);
    let documents = loader.load_documents()?;
    tracing::info!("Loaded {} documents", documents.len());

    let mut generator = Generator::new(site)?;
    generator.generate(&documents)?;

    let duration = start.elapsed();
    tracing::info!("Built in {:.2}s", duration.as_secs_f64());

    Ok(())
}
