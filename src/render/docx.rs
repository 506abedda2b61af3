//! Word-processor document rendering.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, AlignmentType, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText,
    NumberFormat, Numbering, NumberingId, Paragraph, Run, RunFonts, Shading, ShdType,
    SpecialIndentType, Start, Style, StyleType, Table, TableCell, TableRow, VertAlignType,
};

use crate::error::{Error, Result};
use crate::markdown::InlineFormatter;
use crate::model::{DocumentElement, InlineSpan};

use super::style::{generation_footer, StyleSheet};

/// Fixed-width font for inline code and code blocks.
const CODE_FONT: &str = "Courier New";

/// Numbering definition ids. Bullets share one concrete instance; each
/// numbered list gets its own concrete instance so numbering restarts.
const BULLET_ABSTRACT_ID: usize = 1;
const DECIMAL_ABSTRACT_ID: usize = 2;
const BULLET_NUMBERING_ID: usize = 1;
const FIRST_DECIMAL_NUMBERING_ID: usize = 2;

/// Indents in twips (720 = half an inch).
const QUOTE_INDENT: i32 = 720;
const CODE_INDENT: i32 = 360;
const LIST_INDENT: i32 = 720;
const LIST_HANGING: i32 = 360;

/// Renders parsed elements into a DOCX byte buffer.
///
/// Headings map onto named paragraph styles registered from the shared
/// [`StyleSheet`], lists onto real numbering definitions, and tables onto
/// bordered grids with a shaded header row. The generation footer lands on
/// its own page behind an explicit page break.
pub struct WordDocumentRenderer {
    styles: StyleSheet,
    formatter: InlineFormatter,
}

impl WordDocumentRenderer {
    /// Create a renderer with the default style sheet.
    pub fn new() -> Self {
        Self::with_styles(StyleSheet::default())
    }

    /// Create a renderer with a custom style sheet.
    pub fn with_styles(styles: StyleSheet) -> Self {
        Self {
            styles,
            formatter: InlineFormatter::new(),
        }
    }

    /// Render the element sequence into a complete document.
    pub fn render(&self, elements: &[DocumentElement], title: &str) -> Result<Vec<u8>> {
        let mut docx = self.base_document();
        let mut decimal_lists = 0;

        docx = docx.add_paragraph(
            Paragraph::new()
                .style("Title")
                .align(AlignmentType::Center)
                .add_run(Run::new().add_text(title)),
        );

        for element in elements {
            docx = match element {
                DocumentElement::Empty => docx.add_paragraph(Paragraph::new()),
                DocumentElement::Heading { level, text } => {
                    let level = (*level).clamp(1, 5);
                    docx.add_paragraph(self.paragraph_of(text).style(&format!("Heading{}", level)))
                }
                DocumentElement::Paragraph { text } => docx.add_paragraph(self.paragraph_of(text)),
                DocumentElement::Table { headers, rows } => docx.add_table(self.table(headers, rows)),
                DocumentElement::BulletList { items } => {
                    let mut d = docx;
                    for item in items {
                        d = d.add_paragraph(
                            self.paragraph_of(item)
                                .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0)),
                        );
                    }
                    d
                }
                DocumentElement::NumberedList { items } => {
                    let numbering_id = FIRST_DECIMAL_NUMBERING_ID + decimal_lists;
                    decimal_lists += 1;
                    let mut d =
                        docx.add_numbering(Numbering::new(numbering_id, DECIMAL_ABSTRACT_ID));
                    for item in items {
                        d = d.add_paragraph(
                            self.paragraph_of(item)
                                .numbering(NumberingId::new(numbering_id), IndentLevel::new(0)),
                        );
                    }
                    d
                }
                DocumentElement::Blockquote { text } => {
                    let mut paragraph = Paragraph::new().indent(Some(QUOTE_INDENT), None, None, None);
                    for span in self.formatter.format(text) {
                        paragraph = paragraph.add_run(
                            self.run_of(&span)
                                .italic()
                                .color(self.styles.muted_color.hex()),
                        );
                    }
                    docx.add_paragraph(paragraph)
                }
                DocumentElement::CodeBlock { content, .. } => {
                    let mut d = docx;
                    for line in content.lines() {
                        d = d.add_paragraph(
                            Paragraph::new()
                                .indent(Some(CODE_INDENT), None, None, None)
                                .add_run(
                                    Run::new()
                                        .add_text(line)
                                        .fonts(RunFonts::new().ascii(CODE_FONT))
                                        .size(half_points(self.styles.code_size_pt)),
                                ),
                        );
                    }
                    d
                }
            };
        }

        // Footer on its own page.
        docx = docx
            .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
            .add_paragraph(
                Paragraph::new().align(AlignmentType::Center).add_run(
                    Run::new()
                        .add_text(generation_footer(title))
                        .size(half_points(self.styles.footer_size_pt))
                        .color(self.styles.muted_color.hex()),
                ),
            );

        let mut cursor = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut cursor)
            .map_err(|e| Error::Render(e.to_string()))?;
        Ok(cursor.into_inner())
    }

    /// Register the named styles and list definitions the body refers to.
    fn base_document(&self) -> Docx {
        let mut docx = Docx::new()
            .default_size(half_points(self.styles.body_size_pt))
            .add_style(
                Style::new("Title", StyleType::Paragraph)
                    .name("Title")
                    .size(half_points(self.styles.title.size_pt))
                    .bold()
                    .color(self.styles.title.color.hex()),
            );

        for level in 1..=5u8 {
            let heading = self.styles.heading(level);
            docx = docx.add_style(
                Style::new(format!("Heading{}", level), StyleType::Paragraph)
                    .name(format!("Heading {}", level))
                    .size(half_points(heading.size_pt))
                    .bold()
                    .color(heading.color.hex()),
            );
        }

        docx.add_abstract_numbering(
            AbstractNumbering::new(BULLET_ABSTRACT_ID).add_level(
                Level::new(
                    0,
                    Start::new(1),
                    NumberFormat::new("bullet"),
                    LevelText::new("•"),
                    LevelJc::new("left"),
                )
                .indent(
                    Some(LIST_INDENT),
                    Some(SpecialIndentType::Hanging(LIST_HANGING)),
                    None,
                    None,
                ),
            ),
        )
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_ABSTRACT_ID))
        .add_abstract_numbering(
            AbstractNumbering::new(DECIMAL_ABSTRACT_ID).add_level(
                Level::new(
                    0,
                    Start::new(1),
                    NumberFormat::new("decimal"),
                    LevelText::new("%1."),
                    LevelJc::new("left"),
                )
                .indent(
                    Some(LIST_INDENT),
                    Some(SpecialIndentType::Hanging(LIST_HANGING)),
                    None,
                    None,
                ),
            ),
        )
    }

    /// Paragraph whose runs carry the text's inline formatting.
    fn paragraph_of(&self, text: &str) -> Paragraph {
        let mut paragraph = Paragraph::new();
        for span in self.formatter.format(text) {
            paragraph = paragraph.add_run(self.run_of(&span));
        }
        paragraph
    }

    /// Map one span onto run properties.
    fn run_of(&self, span: &InlineSpan) -> Run {
        let mut run = Run::new().add_text(span.text.as_str());
        if span.style.bold {
            run = run.bold();
        }
        if span.style.italic {
            run = run.italic();
        }
        if span.style.underline {
            run = run.underline("single");
        }
        if span.style.strikethrough {
            run = run.strike();
        }
        // Vertical alignment has no Run-level builder; set it on the
        // run properties directly.
        if span.style.superscript {
            run.run_property = run.run_property.vert_align(VertAlignType::SuperScript);
        }
        if span.style.subscript {
            run.run_property = run.run_property.vert_align(VertAlignType::SubScript);
        }
        if span.style.code {
            run = run
                .fonts(RunFonts::new().ascii(CODE_FONT))
                .size(half_points(self.styles.code_size_pt));
        }
        run
    }

    /// Bordered grid with a bold, shaded header row.
    fn table(&self, headers: &[String], rows: &[Vec<String>]) -> Table {
        let mut table_rows = Vec::with_capacity(rows.len() + 1);

        let header_cells = headers
            .iter()
            .map(|text| {
                let mut paragraph = Paragraph::new();
                for span in self.formatter.format(text) {
                    paragraph = paragraph.add_run(self.run_of(&span).bold());
                }
                TableCell::new().add_paragraph(paragraph).shading(
                    Shading::new()
                        .shd_type(ShdType::Clear)
                        .fill(self.styles.table_header_fill.hex()),
                )
            })
            .collect();
        table_rows.push(TableRow::new(header_cells));

        for row in rows {
            let cells = row
                .iter()
                .map(|text| TableCell::new().add_paragraph(self.paragraph_of(text)))
                .collect();
            table_rows.push(TableRow::new(cells));
        }

        Table::new(table_rows)
    }
}

impl Default for WordDocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// DOCX sizes are half-points.
fn half_points(pt: f32) -> usize {
    (pt * 2.0).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_element_kinds() -> Vec<DocumentElement> {
        vec![
            DocumentElement::Heading {
                level: 1,
                text: "Overview".to_string(),
            },
            DocumentElement::Empty,
            DocumentElement::Paragraph {
                text: "Some **bold** and `code` with H~2~O and E=mc^2^.".to_string(),
            },
            DocumentElement::table(
                vec!["A".to_string(), "B".to_string()],
                vec![vec!["1".to_string(), "2".to_string()]],
            ),
            DocumentElement::BulletList {
                items: vec!["one".to_string(), "two".to_string()],
            },
            DocumentElement::NumberedList {
                items: vec!["first".to_string(), "second".to_string()],
            },
            DocumentElement::Blockquote {
                text: "quoted wisdom".to_string(),
            },
            DocumentElement::CodeBlock {
                language: "rust".to_string(),
                content: "fn main() {}\nlet x = 1;".to_string(),
            },
        ]
    }

    #[test]
    fn test_render_produces_zip_container() {
        let renderer = WordDocumentRenderer::new();
        let bytes = renderer.render(&all_element_kinds(), "Test Document").unwrap();

        // DOCX is a zip archive.
        assert_eq!(&bytes[..2], b"PK");
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn test_render_empty_sequence_still_has_title_and_footer() {
        let renderer = WordDocumentRenderer::new();
        let bytes = renderer.render(&[], "Bare").unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_half_points() {
        assert_eq!(half_points(11.0), 22);
        assert_eq!(half_points(9.5), 19);
    }
}
