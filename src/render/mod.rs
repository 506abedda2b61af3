//! Rendering of parsed document elements into deliverable formats.
//!
//! Both renderers draw from the same [`StyleSheet`], so a heading or a
//! table header looks the same whether the export target is DOCX or PDF.

mod docx;
mod pdf;
mod style;

pub use docx::WordDocumentRenderer;
pub use pdf::PdfRenderer;
pub use style::{generation_footer, Color, HeadingStyle, StyleSheet};

use crate::error::Result;
use crate::markdown::MarkdownParser;

/// Render markdown straight to DOCX bytes.
pub fn to_docx(markdown: &str, title: &str) -> Result<Vec<u8>> {
    let elements = MarkdownParser::new().parse(markdown);
    WordDocumentRenderer::new().render(&elements, title)
}

/// Render markdown straight to PDF bytes.
pub fn to_pdf(markdown: &str, title: &str) -> Result<Vec<u8>> {
    let elements = MarkdownParser::new().parse(markdown);
    PdfRenderer::new().render(&elements, title)
}

/// Package markdown for download as-is, with the title prepended as a
/// top-level heading.
pub fn to_markdown_bytes(markdown: &str, title: &str) -> Vec<u8> {
    format!("# {}\n\n{}", title, markdown).into_bytes()
}
