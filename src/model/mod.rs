//! Data model shared by the ingestion and export pipelines.
//!
//! Parsed documents are flat, ordered sequences of [`DocumentElement`]s;
//! block text decomposes further into [`InlineSpan`]s. The ingestion side
//! produces the probe, extraction, and truncation records.

mod element;
mod report;
mod span;

pub use element::DocumentElement;
pub use report::{ExtractionResult, IngestReport, PdfMetadata, TruncationOutcome};
pub use span::{InlineSpan, SpanStyle};
