//! # troffdown
//!
//! Markdown to troff `ms` macro converter.
//!
//! Markdown is parsed into a document tree, the tree is walked by a small
//! renderer that emits `ms` macros, and the resulting source can optionally
//! be piped through the troff toolchain to produce PDF.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> troffdown::Result<()> {
//!     let source = std::fs::read_to_string("post.md")?;
//!     let ms = troffdown::to_troff(&source)?;
//!     println!("{}", ms);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Title blocks**: `%`-prefixed YAML front matter becomes `.TL`/`.AU`/`.AB`
//! - **Tables**: pipe tables become `tbl` blocks with aligned columns
//! - **Nested lists**: hierarchical `1.2.` labels for ordered lists
//! - **Render passes**: `troff`, `tr2post` and `ps2pdf` as external tools
//! - **Batch rendering**: independent documents rendered in parallel with Rayon

pub mod convert;
pub mod error;
pub mod model;
pub mod ms;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{Pipeline, RenderPass, ToolPass};
pub use error::{Error, Result};
pub use model::{
    Author, CellAlignment, CellData, CodeBlockData, HeadingData, LinkData, ListData, Node,
    NodeKind, PostDate, TitleBlock,
};
pub use parser::{parse_markdown, ParseOptions};
pub use render::{NodeRenderer, RenderOptions, TroffRenderer, WalkStatus};

use rayon::prelude::*;

/// Convert markdown source to ms macro source.
///
/// # Example
///
/// ```
/// let ms = troffdown::to_troff("# Hello\n\nworld\n").unwrap();
/// assert_eq!(ms, ".SH\nHello\n\nworld\n.SG\n");
/// ```
pub fn to_troff(markdown: &str) -> Result<String> {
    to_troff_with_options(markdown, &ParseOptions::default(), &RenderOptions::default())
}

/// Convert markdown source to ms macro source with custom options.
///
/// # Example
///
/// ```
/// use troffdown::{to_troff_with_options, ParseOptions, RenderOptions};
///
/// let render = RenderOptions::new().with_preamble(".nr PS 11\n");
/// let ms = to_troff_with_options("text\n", &ParseOptions::default(), &render).unwrap();
/// assert!(ms.starts_with(".nr PS 11\n"));
/// ```
pub fn to_troff_with_options(
    markdown: &str,
    parse_options: &ParseOptions,
    render_options: &RenderOptions,
) -> Result<String> {
    let doc = parse_markdown(markdown, parse_options)?;
    render_tree(&doc, render_options)
}

/// Render an already built document tree.
pub fn render_tree(doc: &Node, options: &RenderOptions) -> Result<String> {
    render::to_troff(doc, options)
}

/// Render many markdown documents in parallel.
///
/// Each document gets its own renderer, and results come back in input
/// order. One failing document does not affect the others.
pub fn render_batch(documents: &[&str]) -> Vec<Result<String>> {
    log::debug!("Rendering batch of {} documents", documents.len());
    documents.par_iter().map(|md| to_troff(md)).collect()
}

/// Read the title block of a markdown document without rendering it.
///
/// Returns `Ok(None)` when the document has no `%` front matter.
pub fn title_block(markdown: &str) -> Result<Option<TitleBlock>> {
    let Some((front, _)) = parser::split_title_block(markdown) else {
        return Ok(None);
    };
    TitleBlock::from_yaml(&front).map(Some)
}

/// Convert markdown to PDF with the troff toolchain.
///
/// Requires `troff`, `tr2post` and `ps2pdf` on `PATH`.
pub fn to_pdf(markdown: &str) -> Result<Vec<u8>> {
    let ms = to_troff(markdown)?;
    Pipeline::pdf().run(ms.as_bytes())
}
