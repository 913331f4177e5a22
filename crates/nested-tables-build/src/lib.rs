//! File utilities for nested-tables.
//!
//! This crate provides tools for:
//! - Parsing TOML data documents (`[table]` settings plus a `[data]` tree)
//! - Rendering them to standalone HTML pages
//! - Comparing rendered markup against stored golden files
//!
//! # Usage
//!
//! ```ignore
//! // Render one document to a page.
//! nested_tables_build::render_file("prisons.toml", "prisons.html")?;
//!
//! // Optimal table followed by every other layout, with scores.
//! nested_tables_build::render_gallery_file("prisons.toml", "gallery.html")?;
//! ```
//!
//! # Golden files
//!
//! Rendering is byte-stable, so a table can be compared to a stored copy:
//!
//! ```ignore
//! let html = table.generate_html();
//! nested_tables_build::check_golden(&html, "tests/golden/level_2_hh.html", "target/failed")?;
//! ```
//!
//! On mismatch, `target/failed/level_2_hh.html` shows the control table
//! above the failed result, ready to open in a browser.

mod document;
mod golden;

pub use document::TableDocument;
pub use golden::check_golden;

use std::path::{Path, PathBuf};

use nested_tables::{HtmlRenderer, TableError};
use thiserror::Error;
use tracing::info;

/// Stylesheet written into generated pages. The table markup itself has none.
pub const PAGE_STYLE: &str =
    "table { border-collapse: collapse; } td, th { border: 1px solid grey; padding: 0 5px; }";

/// Errors from document loading, rendering and golden checks.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid TOML or does not match the expected shape.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The document parsed but cannot describe a table.
    #[error("invalid document: {0}")]
    Invalid(String),

    /// The data and structure cannot form a table.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Rendered markup differs from the golden file.
    #[error("output differs from {}; see {}", golden.display(), artifact.display())]
    GoldenMismatch { golden: PathBuf, artifact: PathBuf },
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, BuildError>;

/// A standalone HTML page with the document's table.
pub fn render_page(doc: &TableDocument) -> Result<String> {
    let table = doc.build()?;
    let renderer = HtmlRenderer::new(doc.options.clone());

    let mut body = String::new();
    if let Some(title) = &doc.title {
        body.push_str(&format!("<h1>{}</h1>", html_escape::encode_text(title)));
    }
    body.push_str(&renderer.render(&table));

    Ok(wrap_page(doc.title.as_deref(), &body))
}

/// The optimal table, then every layout the data accepts with its ugliness.
pub fn render_gallery(doc: &TableDocument) -> Result<String> {
    let renderer = HtmlRenderer::new(doc.options.clone());
    let optimal = nested_tables::build_optimal_table(&doc.data)?;

    let mut body = String::new();
    if let Some(title) = &doc.title {
        body.push_str(&format!("<h1>{}</h1>", html_escape::encode_text(title)));
    }
    body.push_str("<h2>Optimal table</h2>");
    body.push_str(&renderer.render(&optimal));
    body.push_str("<h2>All possible tables</h2>");
    for candidate in nested_tables::rank(&doc.data)? {
        body.push_str(&format!(
            "<h3>{} ugliness: {}</h3>",
            candidate.table.structure(),
            candidate.ugliness
        ));
        body.push_str(&renderer.render(&candidate.table));
    }

    Ok(wrap_page(doc.title.as_deref(), &body))
}

/// Read a TOML document and write its page to `output_path`.
pub fn render_file(input_path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Result<()> {
    let doc = TableDocument::from_file(input_path.as_ref())?;
    let page = render_page(&doc)?;
    write_page(output_path.as_ref(), &page)
}

/// Read a TOML document and write its gallery page to `output_path`.
pub fn render_gallery_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let doc = TableDocument::from_file(input_path.as_ref())?;
    let page = render_gallery(&doc)?;
    write_page(output_path.as_ref(), &page)
}

fn wrap_page(title: Option<&str>, body: &str) -> String {
    let title = html_escape::encode_text(title.unwrap_or("Table"));
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head><body>{}</body></html>\n",
        title, PAGE_STYLE, body
    )
}

/// Write a rendered page to `path`.
pub fn write_page(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, content).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = content.len(), "wrote page");
    Ok(())
}
