//! # foreword
//!
//! Document pipeline for turning full-length PDF manuscripts into
//! polished appendix documents.
//!
//! The ingestion side probes a PDF for viability, extracts its text with
//! per-page markers, and bounds oversized content to a character budget
//! while preserving the opening and closing chapters. The export side
//! parses generated markdown into structured elements and renders them
//! to DOCX, PDF, or plain markdown with a shared visual style.
//!
//! ## Quick Start
//!
//! ```no_run
//! use foreword::{render, Ingestion};
//!
//! fn main() -> foreword::Result<()> {
//!     // Probe, extract, and bound a manuscript in one pass
//!     let data = std::fs::read("manuscript.pdf")?;
//!     let report = Ingestion::new().run_bytes(&data)?;
//!     println!(
//!         "{} pages, {:.1}% of text kept",
//!         report.pages_seen, report.outcome.kept_percentage
//!     );
//!
//!     // Export generated markdown as a Word document
//!     let docx = render::to_docx("## Findings\n\nSome **bold** text.", "Appendix A")?;
//!     std::fs::write("appendix.docx", docx)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Fast probing**: page-sampled word and character estimates, no full decode
//! - **Resilient extraction**: password, corruption, and scan detection with
//!   actionable messages
//! - **Budgeted content**: head-and-tail truncation aligned to page boundaries
//! - **Dual export**: DOCX and PDF renderers driven by one style sheet
//! - **Lenient JSON**: recovers fenced or lightly malformed model output

pub mod detect;
pub mod error;
pub mod ingest;
pub mod json;
pub mod markdown;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use ingest::{
    ContentTruncator, IngestOptions, PdfExtractor, PdfProbe, DEFAULT_CHAR_BUDGET,
    TRUNCATION_MARKER,
};
pub use markdown::{InlineFormatter, MarkdownParser};
pub use model::{
    DocumentElement, ExtractionResult, IngestReport, InlineSpan, PdfMetadata, SpanStyle,
    TruncationOutcome,
};
pub use render::{to_docx, to_markdown_bytes, to_pdf, PdfRenderer, StyleSheet, WordDocumentRenderer};

use std::io::{Read, Seek};

/// Probe a PDF held in memory.
///
/// Never fails: an uninspectable file yields zeroed metadata with the
/// classification message in `error`.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("book.pdf").unwrap();
/// let meta = foreword::probe_pdf(&data);
/// println!("{} pages, ~{} words", meta.page_count, meta.estimated_word_count);
/// ```
pub fn probe_pdf(data: &[u8]) -> PdfMetadata {
    PdfProbe::new().probe_bytes(data)
}

/// Extract the full text of a PDF with `[Page N]` markers.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("book.pdf").unwrap();
/// let result = foreword::extract_text(&data).unwrap();
/// println!("{} chars over {} pages", result.char_count(), result.pages_seen);
/// ```
pub fn extract_text(data: &[u8]) -> Result<ExtractionResult> {
    PdfExtractor::new().extract_bytes(data)
}

/// Bound text to the default character budget.
pub fn truncate_text(text: &str) -> TruncationOutcome {
    ContentTruncator::new().truncate(text)
}

/// Parse markdown into a flat sequence of document elements.
pub fn parse_markdown(markdown: &str) -> Vec<DocumentElement> {
    MarkdownParser::new().parse(markdown)
}

/// Builder running the whole ingestion pipeline: probe, extract, truncate.
///
/// # Example
///
/// ```no_run
/// use foreword::Ingestion;
///
/// let data = std::fs::read("book.pdf").unwrap();
/// let report = Ingestion::new()
///     .with_char_budget(200_000)
///     .with_sample_pages(5)
///     .run_bytes(&data)
///     .unwrap();
/// println!("kept {:.1}%", report.outcome.kept_percentage);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ingestion {
    options: IngestOptions,
}

impl Ingestion {
    /// Create an ingestion builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the truncation character budget.
    pub fn with_char_budget(mut self, budget: usize) -> Self {
        self.options = self.options.with_char_budget(budget);
        self
    }

    /// Set the number of pages the probe samples.
    pub fn with_sample_pages(mut self, pages: u32) -> Self {
        self.options = self.options.with_sample_pages(pages);
        self
    }

    /// Set the extractable-text length threshold.
    pub fn with_min_text_chars(mut self, chars: usize) -> Self {
        self.options = self.options.with_min_text_chars(chars);
        self
    }

    /// Run the pipeline over an in-memory PDF.
    pub fn run_bytes(&self, data: &[u8]) -> Result<IngestReport> {
        let metadata = PdfProbe::with_options(self.options.clone()).probe_bytes(data);
        let extraction = PdfExtractor::new().extract_bytes(data)?;
        let outcome =
            ContentTruncator::with_budget(self.options.char_budget).truncate(&extraction.text);

        Ok(IngestReport {
            metadata,
            outcome,
            pages_seen: extraction.pages_seen,
        })
    }

    /// Run the pipeline over a seekable stream.
    ///
    /// The stream is rewound before reading and again afterwards.
    pub fn run_reader<R: Read + Seek>(&self, reader: &mut R) -> Result<IngestReport> {
        use std::io::SeekFrom;

        reader.seek(SeekFrom::Start(0))?;
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        reader.seek(SeekFrom::Start(0))?;

        self.run_bytes(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Builder Tests ====================

    #[test]
    fn test_ingestion_builder_defaults() {
        let ingestion = Ingestion::new();
        assert_eq!(ingestion.options.char_budget, DEFAULT_CHAR_BUDGET);
        assert_eq!(ingestion.options.sample_pages, 10);
    }

    #[test]
    fn test_ingestion_builder_chained() {
        let ingestion = Ingestion::new()
            .with_char_budget(50_000)
            .with_sample_pages(3)
            .with_min_text_chars(25);

        assert_eq!(ingestion.options.char_budget, 50_000);
        assert_eq!(ingestion.options.sample_pages, 3);
        assert_eq!(ingestion.options.min_text_chars, 25);
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_run_bytes_rejects_non_pdf() {
        let result = Ingestion::new().run_bytes(b"<!DOCTYPE html><html></html>");
        assert!(result.is_err());
    }

    #[test]
    fn test_probe_pdf_never_panics_on_junk() {
        let meta = probe_pdf(&[0xFF, 0xFE, 0x00, 0x01, 0x02]);
        assert_eq!(meta.page_count, 0);
        assert!(meta.error.is_some());
    }

    #[test]
    fn test_extract_text_rejects_junk() {
        assert!(extract_text(b"Not a PDF file").is_err());
    }

    // ==================== Convenience Function Tests ====================

    #[test]
    fn test_truncate_text_passthrough() {
        let outcome = truncate_text("small enough");
        assert!(!outcome.was_truncated);
        assert_eq!(outcome.text, "small enough");
    }

    #[test]
    fn test_parse_markdown_smoke() {
        let elements = parse_markdown("## Heading\n\nBody.");
        assert_eq!(elements.len(), 3);
        assert!(matches!(
            elements[0],
            DocumentElement::Heading { level: 2, .. }
        ));
    }
}
