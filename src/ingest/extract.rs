//! Full-document text extraction.

use std::io::{Read, Seek, SeekFrom};

use lopdf::Document;

use crate::detect;
use crate::error::{Error, Result};
use crate::model::ExtractionResult;

/// Walks every page of a PDF and concatenates page-tagged text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract all text from a PDF held in memory.
    ///
    /// Each page that yields text contributes a block of the form
    /// `[Page N]\n{text}` (1-indexed); blocks are joined by blank lines.
    /// Pages with no text are skipped entirely, so page numbers in the
    /// output may be non-contiguous. A page that fails to decode is
    /// skipped too; only when every page fails does the whole call fail.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<ExtractionResult> {
        if !detect::is_pdf_bytes(data) {
            return Err(Error::Unreadable("no PDF header".to_string()));
        }

        let doc = Document::load_mem(data)?;
        if doc.is_encrypted() {
            return Err(Error::PasswordProtected);
        }

        let pages = doc.get_pages();
        let pages_seen = pages.len() as u32;

        let mut blocks: Vec<String> = Vec::with_capacity(pages.len());
        let mut failed_pages = 0u32;
        for &page_num in pages.keys() {
            match doc.extract_text(&[page_num]) {
                Ok(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        blocks.push(format!("[Page {}]\n{}", page_num, text));
                    }
                }
                Err(e) => {
                    failed_pages += 1;
                    log::warn!("skipping page {}: {}", page_num, e);
                }
            }
        }

        if pages_seen > 0 && failed_pages == pages_seen {
            return Err(Error::ExtractionFailed(
                "no page could be decoded".to_string(),
            ));
        }

        Ok(ExtractionResult {
            text: blocks.join("\n\n"),
            pages_seen,
        })
    }

    /// Extract from a seekable stream, restoring its position afterwards.
    pub fn extract_reader<R: Read + Seek>(&self, reader: &mut R) -> Result<ExtractionResult> {
        reader.seek(SeekFrom::Start(0))?;
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        let result = self.extract_bytes(&data);

        reader.seek(SeekFrom::Start(0))?;
        result
    }
}
