//! Inline emphasis resolution.

use regex::Regex;

use crate::model::{InlineSpan, SpanStyle};

/// Resolves inline formatting markers into styled spans.
///
/// Scanning is earliest-match-wins across all marker patterns; at equal
/// start positions the longer marker takes precedence, so `***x***` is a
/// single bold+italic span. Overlapping or nested markers have no deeper
/// precedence than that, which means `*a **b** c*` resolves as three
/// italic spans rather than a nested emphasis tree.
pub struct InlineFormatter {
    patterns: Vec<(Regex, SpanStyle)>,
}

impl InlineFormatter {
    /// Create a formatter with its marker patterns compiled.
    ///
    /// Pattern order only matters for ties at the same start position:
    /// longer markers come first.
    pub fn new() -> Self {
        let patterns = vec![
            (
                Regex::new(r"\*\*\*(.+?)\*\*\*").unwrap(),
                SpanStyle::bold_italic(),
            ),
            (Regex::new(r"\*\*(.+?)\*\*").unwrap(), SpanStyle::bold()),
            (Regex::new(r"__(.+?)__").unwrap(), SpanStyle::bold()),
            (Regex::new(r"~~(.+?)~~").unwrap(), SpanStyle::strikethrough()),
            (Regex::new(r"<u>(.+?)</u>").unwrap(), SpanStyle::underline()),
            (
                Regex::new(r"<sup>(.+?)</sup>").unwrap(),
                SpanStyle::superscript(),
            ),
            (
                Regex::new(r"<sub>(.+?)</sub>").unwrap(),
                SpanStyle::subscript(),
            ),
            (Regex::new(r"\*([^*]+?)\*").unwrap(), SpanStyle::italic()),
            (Regex::new(r"_([^_]+?)_").unwrap(), SpanStyle::italic()),
            (Regex::new(r"\^(.+?)\^").unwrap(), SpanStyle::superscript()),
            (Regex::new(r"~([^~]+?)~").unwrap(), SpanStyle::subscript()),
            (Regex::new(r"`([^`]+?)`").unwrap(), SpanStyle::code()),
        ];
        Self { patterns }
    }

    /// Decompose text into an ordered span sequence covering it with no
    /// gaps or overlaps; marker characters are removed, content is kept.
    pub fn format(&self, text: &str) -> Vec<InlineSpan> {
        let mut spans = Vec::new();
        let mut rest = text;

        while !rest.is_empty() {
            match self.earliest_match(rest) {
                Some((start, end, content, style)) => {
                    if start > 0 {
                        spans.push(InlineSpan::plain(&rest[..start]));
                    }
                    spans.push(InlineSpan::styled(content, style));
                    rest = &rest[end..];
                }
                None => {
                    spans.push(InlineSpan::plain(rest));
                    break;
                }
            }
        }

        spans
    }

    /// Find the earliest-starting marker match; returns the match byte
    /// range, the captured content, and the style it assigns.
    fn earliest_match(&self, text: &str) -> Option<(usize, usize, String, SpanStyle)> {
        let mut best: Option<(usize, usize, String, SpanStyle)> = None;

        for (pattern, style) in &self.patterns {
            let caps = match pattern.captures(text) {
                Some(caps) => caps,
                None => continue,
            };
            let (whole, content) = match (caps.get(0), caps.get(1)) {
                (Some(whole), Some(content)) => (whole, content),
                _ => continue,
            };

            // Strictly-earlier only: ties keep the first (longer) pattern.
            let replace = match &best {
                Some((best_start, ..)) => whole.start() < *best_start,
                None => true,
            };
            if replace {
                best = Some((
                    whole.start(),
                    whole.end(),
                    content.as_str().to_string(),
                    *style,
                ));
            }
        }

        best
    }
}

impl Default for InlineFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(text: &str) -> Vec<InlineSpan> {
        InlineFormatter::new().format(text)
    }

    fn concat(spans: &[InlineSpan]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_plain_text_single_span() {
        let spans = format("nothing special here");
        assert_eq!(spans, vec![InlineSpan::plain("nothing special here")]);
    }

    #[test]
    fn test_bold_and_italic_coverage() {
        let spans = format("**bold** and *italic* and plain");
        assert_eq!(
            spans,
            vec![
                InlineSpan::styled("bold", SpanStyle::bold()),
                InlineSpan::plain(" and "),
                InlineSpan::styled("italic", SpanStyle::italic()),
                InlineSpan::plain(" and plain"),
            ]
        );
        assert_eq!(concat(&spans), "bold and italic and plain");
    }

    #[test]
    fn test_triple_asterisk_is_one_span() {
        let spans = format("***all three***");
        assert_eq!(
            spans,
            vec![InlineSpan::styled("all three", SpanStyle::bold_italic())]
        );
    }

    #[test]
    fn test_underscore_markers() {
        let spans = format("__strong__ and _soft_");
        assert_eq!(spans[0], InlineSpan::styled("strong", SpanStyle::bold()));
        assert_eq!(spans[2], InlineSpan::styled("soft", SpanStyle::italic()));
    }

    #[test]
    fn test_strikethrough_and_underline() {
        let spans = format("~~gone~~ but <u>kept</u>");
        assert_eq!(
            spans[0],
            InlineSpan::styled("gone", SpanStyle::strikethrough())
        );
        assert_eq!(spans[2], InlineSpan::styled("kept", SpanStyle::underline()));
    }

    #[test]
    fn test_superscript_both_forms() {
        let spans = format("x<sup>2</sup> and y^3^");
        assert_eq!(spans[1], InlineSpan::styled("2", SpanStyle::superscript()));
        assert_eq!(spans[3], InlineSpan::styled("3", SpanStyle::superscript()));
    }

    #[test]
    fn test_subscript_both_forms() {
        let spans = format("H<sub>2</sub>O and CO~2~");
        assert_eq!(spans[1], InlineSpan::styled("2", SpanStyle::subscript()));
        assert_eq!(spans[3], InlineSpan::styled("2", SpanStyle::subscript()));
    }

    #[test]
    fn test_inline_code() {
        let spans = format("run `cargo doc` twice");
        assert_eq!(
            spans,
            vec![
                InlineSpan::plain("run "),
                InlineSpan::styled("cargo doc", SpanStyle::code()),
                InlineSpan::plain(" twice"),
            ]
        );
    }

    #[test]
    fn test_overlapping_markers_keep_earliest_match() {
        // The leading single asterisk starts earlier than the double, so
        // the whole run resolves as italics and the inner bold is lost.
        let spans = format("*italic **bold** still italic*");
        assert_eq!(
            spans,
            vec![
                InlineSpan::styled("italic ", SpanStyle::italic()),
                InlineSpan::styled("bold", SpanStyle::italic()),
                InlineSpan::styled(" still italic", SpanStyle::italic()),
            ]
        );
    }

    #[test]
    fn test_no_marker_characters_survive() {
        let spans = format("**a** _b_ ~~c~~ `d` ^e^ ~f~ <u>g</u>");
        let joined = concat(&spans);
        for marker in ["*", "_", "~", "`", "^", "<u>", "</u>"] {
            assert!(!joined.contains(marker), "marker {:?} survived", marker);
        }
        assert_eq!(joined, "a b c d e f g");
    }

    #[test]
    fn test_empty_input_yields_no_spans() {
        assert!(format("").is_empty());
    }

    #[test]
    fn test_unpaired_marker_stays_plain() {
        let spans = format("a lone * star");
        assert_eq!(spans, vec![InlineSpan::plain("a lone * star")]);
    }
}
