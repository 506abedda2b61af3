//! Error types for the foreword library.

use std::io;
use thiserror::Error;

/// Result type alias for foreword operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during ingestion or export.
///
/// Extraction failures are classified so a caller can show a specific
/// remediation message instead of a generic one; the display text of each
/// variant carries that hint.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The PDF is encrypted and cannot be read without a password.
    #[error("PDF is password-protected: remove the password with your PDF tool and upload again")]
    PasswordProtected,

    /// The file claims to be a PDF but its structure cannot be parsed.
    #[error("PDF appears to be corrupted ({0}): try re-exporting or re-downloading the file")]
    Corrupted(String),

    /// The input is not recognizable as a PDF at all.
    #[error("file is not a readable PDF ({0}): upload a text-based PDF, not a scan or another format")]
    Unreadable(String),

    /// Text extraction failed for a reason outside the taxonomy above.
    #[error("text extraction failed: {0}")]
    ExtractionFailed(String),

    /// A rendering primitive failed while producing output bytes.
    #[error("rendering error: {0}")]
    Render(String),

    /// A model response could not be parsed as JSON, even after repair.
    #[error("response is not valid JSON ({message}); response began: {snippet}")]
    JsonParse {
        /// Parser message from the first (unrepaired) attempt.
        message: String,
        /// Leading slice of the offending response, at most 500 chars.
        snippet: String,
    },
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::PasswordProtected,
            _ => Error::Corrupted(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_hint() {
        let err = Error::PasswordProtected;
        assert!(err.to_string().contains("remove the password"));

        let err = Error::Unreadable("no PDF header".to_string());
        assert!(err.to_string().contains("text-based PDF"));

        let err = Error::Corrupted("xref table missing".to_string());
        assert!(err.to_string().contains("xref table missing"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_lopdf_decryption_maps_to_password_protected() {
        let err: Error = lopdf::Error::Decryption(lopdf::encryption::DecryptionError::IncorrectPassword).into();
        assert!(matches!(err, Error::PasswordProtected));
    }

    #[test]
    fn test_json_parse_display() {
        let err = Error::JsonParse {
            message: "expected value at line 1".to_string(),
            snippet: "not json".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("expected value"));
        assert!(text.contains("not json"));
    }
}
