//! Ingestion options and configuration.

use super::truncate::DEFAULT_CHAR_BUDGET;

/// Default number of pages sampled by the probe.
pub const DEFAULT_SAMPLE_PAGES: u32 = 10;

/// Default minimum sampled characters for text to count as extractable.
pub const DEFAULT_MIN_TEXT_CHARS: usize = 100;

/// Options for the ingestion pipeline.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Maximum characters kept after truncation
    pub char_budget: usize,

    /// Maximum pages sampled by the probe
    pub sample_pages: u32,

    /// Minimum sampled characters for `has_extractable_text`
    pub min_text_chars: usize,
}

impl IngestOptions {
    /// Create new ingestion options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the truncation character budget.
    pub fn with_char_budget(mut self, budget: usize) -> Self {
        self.char_budget = budget;
        self
    }

    /// Set the number of pages the probe samples.
    pub fn with_sample_pages(mut self, pages: u32) -> Self {
        self.sample_pages = pages;
        self
    }

    /// Set the extractable-text length threshold.
    pub fn with_min_text_chars(mut self, chars: usize) -> Self {
        self.min_text_chars = chars;
        self
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            char_budget: DEFAULT_CHAR_BUDGET,
            sample_pages: DEFAULT_SAMPLE_PAGES,
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
        }
    }
}
