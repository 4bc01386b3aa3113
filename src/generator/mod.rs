//! Generator module - renders documents and writes the output tree

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tera::Context;
use walkdir::WalkDir;

use crate::collection;
use crate::content::{data, Document, MarkdownRenderer};
use crate::templates::TemplateRenderer;
use crate::Eleven;

/// Static site generator over a loaded document set
pub struct Generator {
    site: Eleven,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

/// Per-page template context
#[derive(Debug, Clone, Serialize)]
struct PageData {
    title: String,
    date: String,
    url: String,
    source: String,
    #[serde(flatten)]
    extra: HashMap<String, serde_yaml::Value>,
}

impl PageData {
    fn from_document(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            date: doc.date.to_rfc3339(),
            url: doc.url.clone(),
            source: doc.source.clone(),
            extra: doc.extra.clone(),
        }
    }
}

/// Entry in the `collections.posts` template value
#[derive(Debug, Clone, Serialize)]
struct PostData {
    title: String,
    date: String,
    url: String,
    source: String,
    content: String,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Eleven) -> Result<Self> {
        let renderer = TemplateRenderer::new(&site.includes_dir, &site.layouts_dir)?;

        Ok(Self {
            site: site.clone(),
            renderer,
            markdown: MarkdownRenderer::new(),
        })
    }

    /// Render all documents and write the output tree
    pub fn generate(&mut self, documents: &[Document]) -> Result<()> {
        fs::create_dir_all(&self.site.output_dir)?;

        self.copy_passthrough()?;

        // Render markdown bodies first so collections carry rendered content
        let mut documents: Vec<Document> = documents.to_vec();
        for doc in &mut documents {
            if doc.extension() == Some("md") {
                doc.content = self.markdown.render(&doc.raw)?;
            }
        }

        let posts = collection::posts(&documents, &self.site.config.posts_glob);
        tracing::info!(
            "Rendering {} documents ({} posts)",
            documents.len(),
            posts.len()
        );

        let global_data = data::load_global_data(&self.site.data_dir)?;
        let post_data: Vec<PostData> = posts
            .iter()
            .map(|p| PostData {
                title: p.title.clone(),
                date: p.date.to_rfc3339(),
                url: p.url.clone(),
                source: p.source.clone(),
                content: p.content.clone(),
            })
            .collect();

        let mut base_context = Context::new();
        base_context.insert("site", &self.site.config);
        base_context.insert("data", &global_data);
        let mut collections = HashMap::new();
        collections.insert("posts", &post_data);
        base_context.insert("collections", &collections);

        for doc in &documents {
            let html = self.render_document(doc, &base_context)?;
            self.write_output(&doc.url, &html)?;
        }

        Ok(())
    }

    /// Render one document into its final HTML
    fn render_document(&mut self, doc: &Document, base_context: &Context) -> Result<String> {
        let mut context = base_context.clone();
        context.insert("page", &PageData::from_document(doc));

        // HTML sources are themselves templates; markdown arrives rendered
        let body = if doc.extension() == Some("html") {
            self.renderer.render_str(&doc.raw, &context)?
        } else {
            doc.content.clone()
        };

        let Some(layout) = self.resolve_layout(doc) else {
            return Ok(body);
        };

        context.insert("content", &body);
        self.renderer.render(&layout, &context)
    }

    /// Resolve a front-matter layout name to a loaded template
    ///
    /// Accepts both "post.html" and the bare "post" form.
    fn resolve_layout(&self, doc: &Document) -> Option<String> {
        let name = doc.layout.as_deref()?;

        if self.renderer.has_template(name) {
            return Some(name.to_string());
        }
        let with_ext = format!("{}.html", name);
        if self.renderer.has_template(&with_ext) {
            return Some(with_ext);
        }

        tracing::warn!("Layout {:?} not found for {:?}", name, doc.source);
        None
    }

    /// Write rendered HTML at the pretty-URL location for `url`
    fn write_output(&self, url: &str, html: &str) -> Result<()> {
        let trimmed = url.trim_matches('/');
        let dest = if trimmed.is_empty() {
            self.site.output_dir.join("index.html")
        } else {
            self.site.output_dir.join(trimmed).join("index.html")
        };

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, html)?;

        Ok(())
    }

    /// Copy passthrough entries verbatim from input to output
    ///
    /// Entries are project-root-relative; the input-directory prefix is
    /// stripped on the output side, so `src/css` lands at `_site/css`.
    fn copy_passthrough(&self) -> Result<()> {
        for entry in &self.site.config.passthrough {
            let source = self.site.base_dir.join(entry);
            if !source.exists() {
                continue;
            }

            if source.is_file() {
                let dest = self.site.output_dir.join(self.output_relative(&source));
                copy_file(&source, &dest)?;
                continue;
            }

            for file in WalkDir::new(&source)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = file.path();
                if path.is_file() {
                    let dest = self.site.output_dir.join(self.output_relative(path));
                    copy_file(path, &dest)?;
                }
            }
        }

        Ok(())
    }

    /// Output-side relative path for a passthrough source file
    fn output_relative(&self, path: &Path) -> std::path::PathBuf {
        path.strip_prefix(&self.site.input_dir)
            .or_else(|_| path.strip_prefix(&self.site.base_dir))
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| {
                Path::new(path.file_name().unwrap_or(path.as_os_str())).to_path_buf()
            })
    }
}

fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ContentLoader;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_file(base: &Path, rel: &str, content: &str) {
        let path = base.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn build_site(tmp: &TempDir) -> (Eleven, Vec<Document>) {
        let site = Eleven::new(tmp.path()).unwrap();
        let docs = ContentLoader::new(&site).load_documents().unwrap();
        (site, docs)
    }

    #[test]
    fn test_generate_markdown_with_layout() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "src/_layouts/post.html",
            "<article>{{ content }}</article>",
        );
        write_file(
            tmp.path(),
            "src/blog/hello.md",
            "---\ntitle: Hello\ndate: 2024-01-05\nlayout: post\n---\n\n# Hi\n",
        );

        let (site, docs) = build_site(&tmp);
        let mut generator = Generator::new(&site).unwrap();
        generator.generate(&docs).unwrap();

        let out = fs::read_to_string(tmp.path().join("_site/blog/hello/index.html")).unwrap();
        assert!(out.starts_with("<article>"));
        assert!(out.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn test_generate_html_template_with_collections() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "src/blog/a.md",
            "---\ntitle: First\ndate: 2024-01-01\n---\nA\n",
        );
        write_file(
            tmp.path(),
            "src/blog/b.md",
            "---\ntitle: Second\ndate: 2024-06-01\n---\nB\n",
        );
        write_file(
            tmp.path(),
            "src/index.html",
            "{% for post in collections.posts %}[{{ post.title }}]{% endfor %}",
        );

        let (site, docs) = build_site(&tmp);
        let mut generator = Generator::new(&site).unwrap();
        generator.generate(&docs).unwrap();

        let out = fs::read_to_string(tmp.path().join("_site/index.html")).unwrap();
        assert_eq!(out, "[Second][First]");
    }

    #[test]
    fn test_date_filter_in_layout() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "src/_layouts/post.html",
            "{{ page.date | dateShort }}",
        );
        write_file(
            tmp.path(),
            "src/blog/a.md",
            "---\ntitle: A\ndate: 2024-01-05\nlayout: post.html\n---\nbody\n",
        );

        let (site, docs) = build_site(&tmp);
        let mut generator = Generator::new(&site).unwrap();
        generator.generate(&docs).unwrap();

        let out = fs::read_to_string(tmp.path().join("_site/blog/a/index.html")).unwrap();
        assert_eq!(out, "Jan 5, 2024");
    }

    #[test]
    fn test_passthrough_copy() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "src/css/site.css", "body { margin: 0 }");
        write_file(tmp.path(), "src/CNAME", "example.com");
        write_file(tmp.path(), "src/index.md", "# Home");

        let (site, docs) = build_site(&tmp);
        let mut generator = Generator::new(&site).unwrap();
        generator.generate(&docs).unwrap();

        assert_eq!(
            fs::read_to_string(tmp.path().join("_site/css/site.css")).unwrap(),
            "body { margin: 0 }"
        );
        assert_eq!(
            fs::read_to_string(tmp.path().join("_site/CNAME")).unwrap(),
            "example.com"
        );
    }

    #[test]
    fn test_missing_layout_renders_bare() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "src/note.md",
            "---\ntitle: N\ndate: 2024-02-02\nlayout: nope\n---\ntext\n",
        );

        let (site, docs) = build_site(&tmp);
        let mut generator = Generator::new(&site).unwrap();
        generator.generate(&docs).unwrap();

        let out = fs::read_to_string(tmp.path().join("_site/note/index.html")).unwrap();
        assert!(out.contains("<p>text</p>"));
    }

    #[test]
    fn test_output_relative_strips_input_prefix() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "src/index.md", "# Home");
        let (site, _) = build_site(&tmp);
        let generator = Generator::new(&site).unwrap();

        assert_eq!(
            generator.output_relative(&tmp.path().join("src/css/site.css")),
            PathBuf::from("css/site.css")
        );
    }
}
