//! CLI entry point for eleven-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "eleven-rs")]
#[command(version)]
#[command(about = "A fast static site generator for Eleventy-style site layouts", long_about = None)]
struct Cli {
    /// Set the project directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static site
    #[command(alias = "b")]
    Build,

    /// Clean the output directory
    Clean,

    /// List site content
    List {
        /// Type of content to list (post, document)
        #[arg(default_value = "post")]
        r#type: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "eleven_rs=debug,info"
    } else {
        "eleven_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let site = eleven_rs::Eleven::new(&base_dir)?;

    match cli.command {
        Commands::Build => {
            tracing::info!("Building site...");
            site.build()?;
            println!("Built successfully!");
        }

        Commands::Clean => {
            tracing::info!("Cleaning output directory...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            eleven_rs::commands::list::run(&site, &r#type)?;
        }
    }

    Ok(())
}
