//! Line-oriented block tokenizer.

use regex::Regex;

use crate::model::DocumentElement;

/// Parses the constrained Markdown dialect into block elements.
///
/// Parsing is line-by-line with at most one line of look-ahead (to confirm
/// a table separator). Block kinds are checked in a fixed precedence
/// order: blank, heading, table, code fence, blockquote, bullet list,
/// numbered list, then paragraph as the fallthrough.
pub struct MarkdownParser {
    heading: Regex,
    bullet: Regex,
    numbered: Regex,
}

impl MarkdownParser {
    /// Create a parser with its patterns compiled.
    pub fn new() -> Self {
        Self {
            heading: Regex::new(r"^(#{1,5})\s+(.*)$").unwrap(),
            bullet: Regex::new(r"^[-*]\s+(.*)$").unwrap(),
            numbered: Regex::new(r"^\d+\.\s+(.*)$").unwrap(),
        }
    }

    /// Parse raw text into an ordered element sequence.
    pub fn parse(&self, text: &str) -> Vec<DocumentElement> {
        let lines: Vec<&str> = text.lines().collect();
        let mut elements = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let trimmed = lines[i].trim();

            if trimmed.is_empty() {
                elements.push(DocumentElement::Empty);
                i += 1;
            } else if let Some(caps) = self.heading.captures(trimmed) {
                elements.push(DocumentElement::Heading {
                    level: caps[1].len() as u8,
                    text: caps[2].trim().to_string(),
                });
                i += 1;
            } else if starts_table(&lines, i) {
                let (table, next) = parse_table(&lines, i);
                elements.push(table);
                i = next;
            } else if trimmed.starts_with("```") {
                let (block, next) = parse_code_block(&lines, i);
                elements.push(block);
                i = next;
            } else if trimmed.starts_with('>') {
                let (quote, next) = parse_blockquote(&lines, i);
                elements.push(quote);
                i = next;
            } else if self.bullet.is_match(trimmed) {
                let (list, next) = self.parse_list(&lines, i, &self.bullet);
                elements.push(DocumentElement::BulletList { items: list });
                i = next;
            } else if self.numbered.is_match(trimmed) {
                let (list, next) = self.parse_list(&lines, i, &self.numbered);
                elements.push(DocumentElement::NumberedList { items: list });
                i = next;
            } else {
                let (paragraph, next) = self.parse_paragraph(&lines, i);
                elements.push(paragraph);
                i = next;
            }
        }

        elements
    }

    fn parse_list(&self, lines: &[&str], start: usize, marker: &Regex) -> (Vec<String>, usize) {
        let mut items = Vec::new();
        let mut i = start;
        while i < lines.len() {
            let trimmed = lines[i].trim();
            match marker.captures(trimmed) {
                Some(caps) => items.push(caps[1].trim().to_string()),
                None => break,
            }
            i += 1;
        }
        (items, i)
    }

    fn parse_paragraph(&self, lines: &[&str], start: usize) -> (DocumentElement, usize) {
        let mut parts = vec![lines[start].trim()];
        let mut i = start + 1;
        while i < lines.len() && !self.starts_new_block(lines, i) {
            parts.push(lines[i].trim());
            i += 1;
        }
        (
            DocumentElement::Paragraph {
                text: parts.join(" "),
            },
            i,
        )
    }

    /// Whether the line at `i` opens some non-paragraph block (or is
    /// blank), ending a paragraph run.
    fn starts_new_block(&self, lines: &[&str], i: usize) -> bool {
        let trimmed = lines[i].trim();
        trimmed.is_empty()
            || self.heading.is_match(trimmed)
            || trimmed.starts_with("```")
            || trimmed.starts_with('>')
            || self.bullet.is_match(trimmed)
            || self.numbered.is_match(trimmed)
            || starts_table(lines, i)
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A table needs a `|` line with a separator row directly beneath it; a
/// lone `|` line falls through to paragraph handling.
fn starts_table(lines: &[&str], i: usize) -> bool {
    lines[i].contains('|') && i + 1 < lines.len() && is_separator(lines[i + 1])
}

/// Separator rows contain only pipes, dashes, colons and whitespace, with
/// at least one of each structural character.
fn is_separator(line: &str) -> bool {
    let t = line.trim();
    !t.is_empty()
        && t.contains('-')
        && t.contains('|')
        && t.chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

/// Split a table line into trimmed cells, dropping the outer empty fields
/// produced by leading/trailing pipes. Interior empty cells survive.
fn split_row(line: &str) -> Vec<String> {
    let t = line.trim();
    let t = t.strip_prefix('|').unwrap_or(t);
    let t = t.strip_suffix('|').unwrap_or(t);
    t.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn parse_table(lines: &[&str], start: usize) -> (DocumentElement, usize) {
    let headers = split_row(lines[start]);

    // start + 1 is the separator row, already confirmed; data rows are the
    // contiguous pipe-containing lines after it.
    let mut rows = Vec::new();
    let mut i = start + 2;
    while i < lines.len() && lines[i].contains('|') {
        rows.push(split_row(lines[i]));
        i += 1;
    }

    (DocumentElement::table(headers, rows), i)
}

fn parse_code_block(lines: &[&str], start: usize) -> (DocumentElement, usize) {
    let language = lines[start].trim()[3..].trim().to_string();

    let mut content = Vec::new();
    let mut i = start + 1;
    while i < lines.len() {
        if lines[i].trim().starts_with("```") {
            i += 1;
            break;
        }
        // An unterminated fence consumes to end of input.
        content.push(lines[i]);
        i += 1;
    }

    (
        DocumentElement::CodeBlock {
            language,
            content: content.join("\n"),
        },
        i,
    )
}

fn parse_blockquote(lines: &[&str], start: usize) -> (DocumentElement, usize) {
    let mut parts = Vec::new();
    let mut i = start;
    while i < lines.len() {
        let trimmed = lines[i].trim();
        match trimmed.strip_prefix('>') {
            Some(rest) => {
                let rest = rest.trim();
                if !rest.is_empty() {
                    parts.push(rest);
                }
            }
            None => break,
        }
        i += 1;
    }
    (
        DocumentElement::Blockquote {
            text: parts.join(" "),
        },
        i,
    )
}
