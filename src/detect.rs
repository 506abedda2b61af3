//! PDF signature detection.
//!
//! Classification only looks at the file header; structural validation is
//! left to the parser so that a damaged-but-recognizable PDF reports as
//! corrupted rather than unreadable.

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Check whether the bytes begin with a PDF signature.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// Extract the header version string (e.g., "1.7" from "%PDF-1.7").
///
/// Returns `None` when the signature is absent or the version field is not
/// the expected `digit.digit` shape.
pub fn pdf_version(data: &[u8]) -> Option<String> {
    if !is_pdf_bytes(data) || data.len() < PDF_MAGIC.len() + VERSION_LEN {
        return None;
    }

    let version_bytes = &data[PDF_MAGIC.len()..PDF_MAGIC.len() + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    let chars: Vec<char> = version.chars().collect();
    if chars[0].is_ascii_digit() && chars[1] == '.' && chars[2].is_ascii_digit() {
        Some(version)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
        assert!(!is_pdf_bytes(b"Not a PDF"));
        assert!(!is_pdf_bytes(b""));
    }

    #[test]
    fn test_version_from_header() {
        assert_eq!(
            pdf_version(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").as_deref(),
            Some("1.7")
        );
        assert_eq!(
            pdf_version(b"%PDF-2.0\n%\xe2\xe3\xcf\xd3").as_deref(),
            Some("2.0")
        );
    }

    #[test]
    fn test_version_rejects_garbage() {
        assert_eq!(pdf_version(b"<!DOCTYPE html>"), None);
        assert_eq!(pdf_version(b"%PDF"), None);
        assert_eq!(pdf_version(b"%PDF-abc"), None);
    }
}
