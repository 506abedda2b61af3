//! PDF ingestion: probe, extract, truncate.
//!
//! The three stages are independent and composable. [`PdfProbe`] samples a
//! document cheaply to decide whether it is worth processing,
//! [`PdfExtractor`] walks every page into `[Page N]`-tagged text, and
//! [`ContentTruncator`] bounds the result to a character budget while
//! keeping the material at both ends of the book.

mod extract;
mod options;
mod probe;
mod truncate;

pub use extract::PdfExtractor;
pub use options::{IngestOptions, DEFAULT_MIN_TEXT_CHARS, DEFAULT_SAMPLE_PAGES};
pub use probe::PdfProbe;
pub use truncate::{ContentTruncator, DEFAULT_CHAR_BUDGET, TRUNCATION_MARKER};
