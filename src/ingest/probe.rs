//! Sampled PDF inspection.

use std::io::{Read, Seek, SeekFrom};

use lopdf::Document;

use crate::detect;
use crate::error::Error;
use crate::model::PdfMetadata;

use super::IngestOptions;

/// Inspects a PDF and estimates its text volume without a full decode.
///
/// The probe never fails: an uninspectable file produces a metadata record
/// with zeroed fields and the classification message in `error`. Word and
/// character totals are per-page averages over a bounded sample, scaled to
/// the full page count.
#[derive(Debug, Clone, Default)]
pub struct PdfProbe {
    options: IngestOptions,
}

impl PdfProbe {
    /// Create a probe with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a probe with the given options.
    pub fn with_options(options: IngestOptions) -> Self {
        Self { options }
    }

    /// Probe a PDF held in memory.
    pub fn probe_bytes(&self, data: &[u8]) -> PdfMetadata {
        if !detect::is_pdf_bytes(data) {
            return PdfMetadata::failed(
                Error::Unreadable("no PDF header".to_string()).to_string(),
            );
        }

        let doc = match Document::load_mem(data) {
            Ok(doc) => doc,
            Err(e) => return PdfMetadata::failed(Error::from(e).to_string()),
        };

        let page_count = doc.get_pages().len() as u32;

        if doc.is_encrypted() {
            return PdfMetadata {
                page_count,
                ..PdfMetadata::failed(Error::PasswordProtected.to_string())
            };
        }

        let sampled_pages = self.options.sample_pages.min(page_count);
        let mut sample = String::new();
        for page_num in 1..=sampled_pages {
            match doc.extract_text(&[page_num]) {
                Ok(text) => sample.push_str(&text),
                Err(e) => log::debug!("page {} not sampled: {}", page_num, e),
            }
        }

        let sample_words = sample.split_whitespace().count() as u64;
        let sample_chars = sample.chars().count() as u64;

        PdfMetadata {
            page_count,
            has_extractable_text: sample.chars().count() > self.options.min_text_chars,
            estimated_word_count: extrapolate(sample_words, sampled_pages, page_count),
            estimated_char_count: extrapolate(sample_chars, sampled_pages, page_count),
            error: None,
        }
    }

    /// Probe a PDF from a seekable stream.
    ///
    /// The stream is rewound to the start before reading and again after,
    /// so the caller can hand the same handle to full extraction.
    pub fn probe_reader<R: Read + Seek>(&self, reader: &mut R) -> PdfMetadata {
        if let Err(e) = reader.seek(SeekFrom::Start(0)) {
            return PdfMetadata::failed(Error::Io(e).to_string());
        }

        let mut data = Vec::new();
        if let Err(e) = reader.read_to_end(&mut data) {
            return PdfMetadata::failed(Error::Io(e).to_string());
        }

        let metadata = self.probe_bytes(&data);

        if let Err(e) = reader.seek(SeekFrom::Start(0)) {
            log::warn!("could not rewind stream after probe: {}", e);
        }

        metadata
    }
}

/// Scale a sampled count to the whole document: per-page average over the
/// sample, multiplied by the total page count.
fn extrapolate(sample_count: u64, sampled_pages: u32, total_pages: u32) -> u64 {
    if sampled_pages == 0 {
        return 0;
    }
    sample_count * u64::from(total_pages) / u64::from(sampled_pages)
}
