//! List site content

use anyhow::Result;

use crate::collection;
use crate::content::loader::ContentLoader;
use crate::Eleven;

/// List site content by type
pub fn run(site: &Eleven, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(site);
    let documents = loader.load_documents()?;

    match content_type {
        "post" | "posts" => {
            let posts = collection::posts(&documents, &site.config.posts_glob);
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.source
                );
            }
        }
        "doc" | "docs" | "document" | "documents" => {
            println!("Documents ({}):", documents.len());
            for doc in documents {
                println!("  {} -> {} [{}]", doc.title, doc.url, doc.source);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, document", content_type);
        }
    }

    Ok(())
}
