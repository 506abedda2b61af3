//! Inline spans and their formatting attributes.

use serde::{Deserialize, Serialize};

/// A contiguous run of text sharing one formatting attribute set.
///
/// A block's text decomposes into an ordered sequence of spans covering the
/// original text with no gaps or overlaps; marker characters are removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineSpan {
    /// The text content, marker characters stripped.
    pub text: String,

    /// Formatting attributes for this run.
    pub style: SpanStyle,
}

impl InlineSpan {
    /// Create an unformatted span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::default(),
        }
    }

    /// Create a span with the given formatting.
    pub fn styled(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Check if this span carries no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Formatting attributes of an inline span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Strikethrough text
    pub strikethrough: bool,

    /// Superscript
    pub superscript: bool,

    /// Subscript
    pub subscript: bool,

    /// Inline code (fixed-width)
    pub code: bool,
}

impl SpanStyle {
    /// Bold style.
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    /// Italic style.
    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Default::default()
        }
    }

    /// Combined bold + italic style.
    pub fn bold_italic() -> Self {
        Self {
            bold: true,
            italic: true,
            ..Default::default()
        }
    }

    /// Strikethrough style.
    pub fn strikethrough() -> Self {
        Self {
            strikethrough: true,
            ..Default::default()
        }
    }

    /// Underline style.
    pub fn underline() -> Self {
        Self {
            underline: true,
            ..Default::default()
        }
    }

    /// Superscript style.
    pub fn superscript() -> Self {
        Self {
            superscript: true,
            ..Default::default()
        }
    }

    /// Subscript style.
    pub fn subscript() -> Self {
        Self {
            subscript: true,
            ..Default::default()
        }
    }

    /// Inline code style.
    pub fn code() -> Self {
        Self {
            code: true,
            ..Default::default()
        }
    }

    /// Check if any attribute is set.
    pub fn has_styling(&self) -> bool {
        self.bold
            || self.italic
            || self.underline
            || self.strikethrough
            || self.superscript
            || self.subscript
            || self.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_span_has_no_styling() {
        let span = InlineSpan::plain("hello");
        assert_eq!(span.text, "hello");
        assert!(!span.style.has_styling());
    }

    #[test]
    fn test_style_constructors() {
        assert!(SpanStyle::bold().bold);
        assert!(SpanStyle::italic().italic);

        let both = SpanStyle::bold_italic();
        assert!(both.bold && both.italic);
        assert!(!both.underline);

        assert!(SpanStyle::code().has_styling());
    }

    #[test]
    fn test_is_empty() {
        assert!(InlineSpan::plain("").is_empty());
        assert!(!InlineSpan::styled("x", SpanStyle::bold()).is_empty());
    }
}
