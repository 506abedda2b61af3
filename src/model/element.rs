//! Block-level document elements.

use serde::{Deserialize, Serialize};

/// A structurally distinct unit of a parsed document.
///
/// The Markdown parser produces elements in source order; a renderer
/// consumes the sequence once. Elements are plain values and are never
/// mutated after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentElement {
    /// A blank line in the source.
    Empty,

    /// A heading with level 1 through 5.
    Heading {
        /// Heading level (1 = largest)
        level: u8,
        /// Heading text with marker characters stripped
        text: String,
    },

    /// A run of contiguous prose lines joined with single spaces.
    Paragraph {
        /// Paragraph text
        text: String,
    },

    /// A pipe-delimited table. Every row has exactly `headers.len()` cells.
    Table {
        /// Header row cells
        headers: Vec<String>,
        /// Data rows, normalized to the header width
        rows: Vec<Vec<String>>,
    },

    /// An unordered list.
    BulletList {
        /// Item texts with bullet markers stripped
        items: Vec<String>,
    },

    /// An ordered list.
    NumberedList {
        /// Item texts with number markers stripped
        items: Vec<String>,
    },

    /// Contiguous quote lines joined with single spaces.
    Blockquote {
        /// Quote text with `>` markers stripped
        text: String,
    },

    /// A fenced code block.
    CodeBlock {
        /// Language tag from the opening fence, may be empty
        language: String,
        /// Verbatim content between the fences
        content: String,
    },
}

impl DocumentElement {
    /// Build a table, normalizing every row to the header width: short rows
    /// are padded with empty cells, long rows are truncated.
    pub fn table(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        DocumentElement::Table { headers, rows }
    }

    /// Check whether this element renders any visible content.
    pub fn is_empty(&self) -> bool {
        matches!(self, DocumentElement::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_table_pads_short_rows() {
        let table = DocumentElement::table(
            cells(&["A", "B", "C"]),
            vec![cells(&["1", "2"])],
        );
        match table {
            DocumentElement::Table { rows, .. } => {
                assert_eq!(rows[0], cells(&["1", "2", ""]));
            }
            _ => panic!("expected table"),
        }
    }

    #[test]
    fn test_table_truncates_long_rows() {
        let table = DocumentElement::table(
            cells(&["A", "B"]),
            vec![cells(&["1", "2", "3", "4"])],
        );
        match table {
            DocumentElement::Table { rows, .. } => {
                assert_eq!(rows[0], cells(&["1", "2"]));
            }
            _ => panic!("expected table"),
        }
    }

    #[test]
    fn test_serde_tagging() {
        let heading = DocumentElement::Heading {
            level: 2,
            text: "Overview".to_string(),
        };
        let json = serde_json::to_string(&heading).unwrap();
        assert!(json.contains("\"type\":\"heading\""));

        let back: DocumentElement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, heading);
    }
}
