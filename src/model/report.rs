//! Result records produced by the ingestion pipeline.

use serde::{Deserialize, Serialize};

/// Metadata sampled from a PDF without fully decoding it.
///
/// Word and character counts are linear extrapolations from a bounded page
/// sample, not exact totals. When a file cannot be inspected at all, every
/// numeric field is zero, `has_extractable_text` is false, and `error`
/// holds the classification message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfMetadata {
    /// Total number of pages in the document
    pub page_count: u32,

    /// Whether the sampled pages yielded more than a minimal amount of text
    pub has_extractable_text: bool,

    /// Estimated total word count (sampled extrapolation)
    pub estimated_word_count: u64,

    /// Estimated total character count (sampled extrapolation)
    pub estimated_char_count: u64,

    /// Classification message when the file could not be inspected
    pub error: Option<String>,
}

impl PdfMetadata {
    /// Metadata for a file that could not be inspected.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Whether the document is worth sending through full extraction.
    pub fn is_usable(&self) -> bool {
        self.error.is_none() && self.has_extractable_text
    }
}

/// Output of a full-document text extraction.
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// `[Page N]`-tagged blocks joined by blank lines
    pub text: String,

    /// Pages visited, including pages that yielded no text
    pub pages_seen: u32,
}

impl ExtractionResult {
    /// Character count of the extracted text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Whitespace-delimited word count of the extracted text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Check if extraction yielded no usable text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Result of bounding text to a character budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruncationOutcome {
    /// The bounded text
    pub text: String,

    /// Whether anything was cut
    pub was_truncated: bool,

    /// Character count before truncation
    pub original_chars: usize,

    /// Character count after truncation
    pub final_chars: usize,

    /// Share of the original retained, percent rounded to one decimal
    pub kept_percentage: f64,
}

impl TruncationOutcome {
    /// Outcome for input that fit the budget unchanged.
    pub fn unchanged(text: String) -> Self {
        let chars = text.chars().count();
        Self {
            text,
            was_truncated: false,
            original_chars: chars,
            final_chars: chars,
            kept_percentage: 100.0,
        }
    }
}

/// Combined output of the probe → extract → truncate pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Sampled metadata from the probe pass
    pub metadata: PdfMetadata,

    /// Truncation outcome over the extracted text
    pub outcome: TruncationOutcome,

    /// Pages visited during extraction
    pub pages_seen: u32,
}

impl IngestReport {
    /// The bounded text payload, ready for prompt embedding.
    pub fn text(&self) -> &str {
        &self.outcome.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_metadata_defaults() {
        let meta = PdfMetadata::failed("no PDF header");
        assert_eq!(meta.page_count, 0);
        assert!(!meta.has_extractable_text);
        assert_eq!(meta.estimated_word_count, 0);
        assert_eq!(meta.error.as_deref(), Some("no PDF header"));
        assert!(!meta.is_usable());
    }

    #[test]
    fn test_extraction_counts() {
        let result = ExtractionResult {
            text: "[Page 1]\nalpha beta gamma".to_string(),
            pages_seen: 1,
        };
        assert_eq!(result.word_count(), 5);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_unchanged_outcome() {
        let outcome = TruncationOutcome::unchanged("short text".to_string());
        assert!(!outcome.was_truncated);
        assert_eq!(outcome.original_chars, outcome.final_chars);
        assert_eq!(outcome.kept_percentage, 100.0);
    }
}
