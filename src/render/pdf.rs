//! Paginated PDF rendering.
//!
//! Layout is hand-rolled over A4 pages: greedy word-wrap against average
//! glyph-width estimates for the built-in Helvetica/Courier faces, a
//! top-down cursor per page, and a new page whenever the next line would
//! cross the bottom margin.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color as PdfColor, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};

use crate::error::{Error, Result};
use crate::markdown::InlineFormatter;
use crate::model::{DocumentElement, InlineSpan, SpanStyle};

use super::style::{generation_footer, Color, StyleSheet};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

const PT_TO_MM: f32 = 0.352_778;
const LINE_SPACING: f32 = 1.5;

/// Average glyph width as a fraction of the font size.
const HELVETICA_WIDTH_FACTOR: f32 = 0.5;
const COURIER_WIDTH_FACTOR: f32 = 0.6;

const QUOTE_INDENT_MM: f32 = 8.0;
const CODE_INDENT_MM: f32 = 6.0;
const LIST_MARKER_INDENT_MM: f32 = 4.0;
const LIST_TEXT_INDENT_MM: f32 = 10.0;
const CELL_PADDING_MM: f32 = 1.5;

/// Renders parsed elements into a paginated PDF byte buffer.
pub struct PdfRenderer {
    styles: StyleSheet,
    formatter: InlineFormatter,
}

impl PdfRenderer {
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
        let (doc, page_idx, layer_idx) = PdfDocument::new(
            title,
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let fonts = FontSet::load(&doc)?;

        {
            let mut flow = PageFlow {
                doc: &doc,
                layer: doc.get_page(page_idx).get_layer(layer_idx),
                y: PAGE_HEIGHT_MM - MARGIN_MM,
            };

            self.draw_title(&mut flow, title, &fonts);
            for element in elements {
                self.draw_element(&mut flow, element, &fonts);
            }
            self.draw_footer(&mut flow, title, &fonts);
        }

        doc.save_to_bytes().map_err(|e| Error::Render(e.to_string()))
    }

    fn draw_title(&self, flow: &mut PageFlow, title: &str, fonts: &FontSet) {
        let size = self.styles.title.size_pt;
        let style = SpanStyle::bold();
        let width = text_width_mm(title, size, style);
        let x = MARGIN_MM + ((CONTENT_WIDTH_MM - width) / 2.0).max(0.0);

        flow.advance(line_height_mm(size));
        draw_fragments(
            &flow.layer,
            &[Fragment {
                text: title.to_string(),
                style,
            }],
            x,
            flow.y,
            size,
            self.styles.title.color,
            fonts,
        );
        flow.advance(3.0);
    }

    fn draw_element(&self, flow: &mut PageFlow, element: &DocumentElement, fonts: &FontSet) {
        match element {
            DocumentElement::Empty => flow.advance(line_height_mm(self.styles.body_size_pt) * 0.6),
            DocumentElement::Heading { level, text } => {
                let heading = self.styles.heading(*level);
                let mut spans = self.formatter.format(text);
                for span in &mut spans {
                    span.style.bold = true;
                }
                flow.advance(1.5);
                self.draw_wrapped(
                    flow,
                    &spans,
                    heading.size_pt,
                    MARGIN_MM,
                    CONTENT_WIDTH_MM,
                    heading.color,
                    fonts,
                );
            }
            DocumentElement::Paragraph { text } => {
                let spans = self.formatter.format(text);
                self.draw_wrapped(
                    flow,
                    &spans,
                    self.styles.body_size_pt,
                    MARGIN_MM,
                    CONTENT_WIDTH_MM,
                    self.styles.text_color,
                    fonts,
                );
            }
            DocumentElement::Table { headers, rows } => {
                self.draw_table(flow, headers, rows, fonts)
            }
            DocumentElement::BulletList { items } => {
                self.draw_list(flow, items, false, fonts)
            }
            DocumentElement::NumberedList { items } => {
                self.draw_list(flow, items, true, fonts)
            }
            DocumentElement::Blockquote { text } => {
                let mut spans = self.formatter.format(text);
                for span in &mut spans {
                    span.style.italic = true;
                }
                self.draw_wrapped(
                    flow,
                    &spans,
                    self.styles.body_size_pt,
                    MARGIN_MM + QUOTE_INDENT_MM,
                    CONTENT_WIDTH_MM - QUOTE_INDENT_MM,
                    self.styles.muted_color,
                    fonts,
                );
            }
            DocumentElement::CodeBlock { content, .. } => {
                let size = self.styles.code_size_pt;
                let line_h = size * 1.3 * PT_TO_MM;
                let max_chars = ((CONTENT_WIDTH_MM - CODE_INDENT_MM)
                    / (size * COURIER_WIDTH_FACTOR * PT_TO_MM))
                    as usize;

                for raw_line in content.split('\n') {
                    for chunk in chunk_chars(raw_line, max_chars) {
                        flow.ensure_room(line_h);
                        flow.advance(line_h);
                        draw_fragments(
                            &flow.layer,
                            &[Fragment {
                                text: chunk,
                                style: SpanStyle::code(),
                            }],
                            MARGIN_MM + CODE_INDENT_MM,
                            flow.y,
                            size,
                            self.styles.text_color,
                            fonts,
                        );
                    }
                }
            }
        }
    }

    fn draw_wrapped(
        &self,
        flow: &mut PageFlow,
        spans: &[InlineSpan],
        size_pt: f32,
        x0: f32,
        width_mm: f32,
        color: Color,
        fonts: &FontSet,
    ) {
        for line in wrap_spans(spans, size_pt, width_mm) {
            flow.ensure_room(line_height_mm(size_pt));
            flow.advance(line_height_mm(size_pt));
            draw_fragments(&flow.layer, &line, x0, flow.y, size_pt, color, fonts);
        }
    }

    fn draw_list(&self, flow: &mut PageFlow, items: &[String], ordered: bool, fonts: &FontSet) {
        let size = self.styles.body_size_pt;
        let line_h = line_height_mm(size);

        for (idx, item) in items.iter().enumerate() {
            let marker = if ordered {
                format!("{}.", idx + 1)
            } else {
                "•".to_string()
            };
            let spans = self.formatter.format(item);
            let mut lines = wrap_spans(&spans, size, CONTENT_WIDTH_MM - LIST_TEXT_INDENT_MM);
            if lines.is_empty() {
                lines.push(Vec::new());
            }

            for (line_idx, line) in lines.iter().enumerate() {
                flow.ensure_room(line_h);
                flow.advance(line_h);
                if line_idx == 0 {
                    draw_fragments(
                        &flow.layer,
                        &[Fragment {
                            text: marker.clone(),
                            style: SpanStyle::default(),
                        }],
                        MARGIN_MM + LIST_MARKER_INDENT_MM,
                        flow.y,
                        size,
                        self.styles.text_color,
                        fonts,
                    );
                }
                draw_fragments(
                    &flow.layer,
                    line,
                    MARGIN_MM + LIST_TEXT_INDENT_MM,
                    flow.y,
                    size,
                    self.styles.text_color,
                    fonts,
                );
            }
        }
    }

    /// Rows are laid out one strip at a time; a row that will not fit on
    /// the current page starts the next one. The header row is not
    /// repeated after a break.
    fn draw_table(
        &self,
        flow: &mut PageFlow,
        headers: &[String],
        rows: &[Vec<String>],
        fonts: &FontSet,
    ) {
        let cols = headers.len().max(1);
        let col_w = CONTENT_WIDTH_MM / cols as f32;
        let size = self.styles.body_size_pt;
        let line_h = line_height_mm(size);

        let mut table_rows: Vec<&[String]> = Vec::with_capacity(rows.len() + 1);
        table_rows.push(headers);
        for row in rows {
            table_rows.push(row.as_slice());
        }

        let total = table_rows.len();
        for (row_idx, row) in table_rows.into_iter().enumerate() {
            let is_header = row_idx == 0;

            let mut cell_lines: Vec<Vec<Vec<Fragment>>> = Vec::with_capacity(cols);
            for cell in row {
                let mut spans = self.formatter.format(cell);
                if is_header {
                    for span in &mut spans {
                        span.style.bold = true;
                    }
                }
                cell_lines.push(wrap_spans(&spans, size, col_w - 2.0 * CELL_PADDING_MM));
            }

            let depth = cell_lines
                .iter()
                .map(|lines| lines.len())
                .max()
                .unwrap_or(0)
                .max(1);
            let row_h = depth as f32 * line_h + 2.0 * CELL_PADDING_MM;

            flow.ensure_room(row_h);
            let top = flow.y;
            let bottom = top - row_h;

            if is_header {
                fill_rect(
                    &flow.layer,
                    MARGIN_MM,
                    bottom,
                    MARGIN_MM + CONTENT_WIDTH_MM,
                    top,
                    self.styles.table_header_fill,
                );
            }

            for (col_idx, lines) in cell_lines.iter().enumerate() {
                let x0 = MARGIN_MM + col_idx as f32 * col_w + CELL_PADDING_MM;
                let mut y = top - CELL_PADDING_MM - line_h * 0.75;
                for line in lines {
                    draw_fragments(&flow.layer, line, x0, y, size, self.styles.text_color, fonts);
                    y -= line_h;
                }
            }

            // Grid strip for this row: top edge, verticals, and a bottom
            // edge after the final row.
            stroke_line(
                &flow.layer,
                MARGIN_MM,
                top,
                MARGIN_MM + CONTENT_WIDTH_MM,
                top,
                self.styles.rule_color,
            );
            for boundary in 0..=cols {
                let x = MARGIN_MM + boundary as f32 * col_w;
                stroke_line(&flow.layer, x, bottom, x, top, self.styles.rule_color);
            }
            if row_idx + 1 == total {
                stroke_line(
                    &flow.layer,
                    MARGIN_MM,
                    bottom,
                    MARGIN_MM + CONTENT_WIDTH_MM,
                    bottom,
                    self.styles.rule_color,
                );
            }

            flow.y = bottom;
        }
        flow.advance(1.0);
    }

    fn draw_footer(&self, flow: &mut PageFlow, title: &str, fonts: &FontSet) {
        let size = self.styles.footer_size_pt;
        let footer = generation_footer(title);
        let style = SpanStyle::default();
        let width = text_width_mm(&footer, size, style);
        let x = MARGIN_MM + ((CONTENT_WIDTH_MM - width) / 2.0).max(0.0);

        flow.advance(4.0);
        flow.ensure_room(line_height_mm(size));
        flow.advance(line_height_mm(size));
        draw_fragments(
            &flow.layer,
            &[Fragment {
                text: footer,
                style,
            }],
            x,
            flow.y,
            size,
            self.styles.muted_color,
            fonts,
        );
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// The five base faces used by the renderer. Built-in PDF fonts, so no
/// font files ship with the crate.
struct FontSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
    code: IndirectFontRef,
}

impl FontSet {
    fn load(doc: &PdfDocumentReference) -> Result<Self> {
        let add = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|e| Error::Render(e.to_string()))
        };
        Ok(Self {
            regular: add(BuiltinFont::Helvetica)?,
            bold: add(BuiltinFont::HelveticaBold)?,
            italic: add(BuiltinFont::HelveticaOblique)?,
            bold_italic: add(BuiltinFont::HelveticaBoldOblique)?,
            code: add(BuiltinFont::Courier)?,
        })
    }

    fn pick(&self, style: SpanStyle) -> &IndirectFontRef {
        if style.code {
            &self.code
        } else if style.bold && style.italic {
            &self.bold_italic
        } else if style.bold {
            &self.bold
        } else if style.italic {
            &self.italic
        } else {
            &self.regular
        }
    }
}

/// Top-down cursor over the current page.
struct PageFlow<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageFlow<'_> {
    /// Start a new page when `needed_mm` will not fit above the margin.
    fn ensure_room(&mut self, needed_mm: f32) {
        if self.y - needed_mm < MARGIN_MM {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
    }

    fn advance(&mut self, mm: f32) {
        self.y -= mm;
    }
}

/// A word run sharing one style, possibly carrying its leading space.
#[derive(Debug, Clone, PartialEq)]
struct Fragment {
    text: String,
    style: SpanStyle,
}

/// Greedy word-wrap of styled spans into lines of fragments.
///
/// Whitespace in the source decides where inter-token spaces belong, so
/// constructs like `H<sub>2</sub>O` stay glued together while ordinary
/// words keep single spaces between them.
fn wrap_spans(spans: &[InlineSpan], size_pt: f32, max_width_mm: f32) -> Vec<Vec<Fragment>> {
    let mut tokens: Vec<(String, SpanStyle, bool)> = Vec::new();
    let mut pending_space = false;

    for span in spans {
        if span.text.is_empty() {
            continue;
        }
        let mut first = true;
        for word in span.text.split_whitespace() {
            let space_before = if first {
                pending_space || span.text.starts_with(char::is_whitespace)
            } else {
                true
            };
            tokens.push((word.to_string(), span.style, space_before && !tokens.is_empty()));
            first = false;
        }
        pending_space = span.text.ends_with(char::is_whitespace);
    }

    let mut lines: Vec<Vec<Fragment>> = Vec::new();
    let mut current: Vec<Fragment> = Vec::new();
    let mut used = 0.0f32;

    for (word, style, space_before) in tokens {
        let effective = effective_size(size_pt, style);
        let space_w = if space_before && !current.is_empty() {
            text_width_mm(" ", effective, style)
        } else {
            0.0
        };
        let word_w = text_width_mm(&word, effective, style);

        if !current.is_empty() && used + space_w + word_w > max_width_mm {
            lines.push(std::mem::take(&mut current));
            current.push(Fragment { text: word, style });
            used = word_w;
        } else {
            let piece = if space_w > 0.0 {
                format!(" {}", word)
            } else {
                word
            };
            match current.last_mut() {
                Some(last) if last.style == style => last.text.push_str(&piece),
                _ => current.push(Fragment { text: piece, style }),
            }
            used += space_w + word_w;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn draw_fragments(
    layer: &PdfLayerReference,
    fragments: &[Fragment],
    x0: f32,
    y: f32,
    size_pt: f32,
    color: Color,
    fonts: &FontSet,
) {
    layer.set_fill_color(pdf_color(color));
    let mut x = x0;

    for fragment in fragments {
        let effective = effective_size(size_pt, fragment.style);
        let shift = baseline_shift_mm(size_pt, fragment.style);
        let width = text_width_mm(&fragment.text, effective, fragment.style);

        layer.use_text(
            fragment.text.as_str(),
            effective,
            Mm(x),
            Mm(y + shift),
            fonts.pick(fragment.style),
        );

        if fragment.style.underline {
            stroke_line(layer, x, y - 0.6, x + width, y - 0.6, color);
        }
        if fragment.style.strikethrough {
            let mid = y + size_pt * 0.1 * PT_TO_MM * 3.0;
            stroke_line(layer, x, mid, x + width, mid, color);
        }

        x += width;
    }
}

fn fill_rect(layer: &PdfLayerReference, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
    layer.set_fill_color(pdf_color(color));
    let ring = vec![
        (Point::new(Mm(x0), Mm(y0)), false),
        (Point::new(Mm(x1), Mm(y0)), false),
        (Point::new(Mm(x1), Mm(y1)), false),
        (Point::new(Mm(x0), Mm(y1)), false),
    ];
    layer.add_polygon(Polygon {
        rings: vec![ring],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

fn stroke_line(layer: &PdfLayerReference, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
    layer.set_outline_color(pdf_color(color));
    layer.set_outline_thickness(0.5);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x0), Mm(y0)), false),
            (Point::new(Mm(x1), Mm(y1)), false),
        ],
        is_closed: false,
    });
}

fn pdf_color(color: Color) -> PdfColor {
    let (r, g, b) = color.to_unit();
    PdfColor::Rgb(Rgb::new(r, g, b, None))
}

fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * LINE_SPACING * PT_TO_MM
}

fn effective_size(size_pt: f32, style: SpanStyle) -> f32 {
    if style.superscript || style.subscript {
        size_pt * 0.7
    } else {
        size_pt
    }
}

fn baseline_shift_mm(size_pt: f32, style: SpanStyle) -> f32 {
    if style.superscript {
        size_pt * 0.33 * PT_TO_MM
    } else if style.subscript {
        -size_pt * 0.12 * PT_TO_MM
    } else {
        0.0
    }
}

fn text_width_mm(text: &str, size_pt: f32, style: SpanStyle) -> f32 {
    let factor = if style.code {
        COURIER_WIDTH_FACTOR
    } else {
        HELVETICA_WIDTH_FACTOR
    };
    text.chars().count() as f32 * size_pt * factor * PT_TO_MM
}

/// Split a code line into display chunks of at most `max_chars` chars; an
/// empty line still yields one (empty) chunk so vertical space survives.
fn chunk_chars(line: &str, max_chars: usize) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }
    line.chars()
        .collect::<Vec<_>>()
        .chunks(max_chars.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_produces_pdf_bytes() {
        let elements = vec![
            DocumentElement::Heading {
                level: 2,
                text: "Findings".to_string(),
            },
            DocumentElement::Paragraph {
                text: "Some **bold** text with H<sub>2</sub>O.".to_string(),
            },
            DocumentElement::table(
                vec!["A".to_string(), "B".to_string()],
                vec![vec!["1".to_string(), "2".to_string()]],
            ),
            DocumentElement::BulletList {
                items: vec!["alpha".to_string()],
            },
            DocumentElement::Blockquote {
                text: "quoted".to_string(),
            },
            DocumentElement::CodeBlock {
                language: String::new(),
                content: "let a = 1;".to_string(),
            },
        ];

        let bytes = PdfRenderer::new().render(&elements, "Probe").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_wrap_narrow_width_breaks_lines() {
        let spans = vec![InlineSpan::plain("one two three four five six")];
        let lines = wrap_spans(&spans, 11.0, 20.0);
        assert!(lines.len() > 1);

        // No line exceeds the estimate budget by more than a single word.
        for line in &lines {
            assert!(!line.is_empty());
        }
    }

    #[test]
    fn test_wrap_keeps_glued_tokens_together() {
        let spans = vec![
            InlineSpan::plain("H"),
            InlineSpan::styled("2", SpanStyle::subscript()),
            InlineSpan::plain("O is water"),
        ];
        let lines = wrap_spans(&spans, 11.0, 100.0);
        assert_eq!(lines.len(), 1);

        let joined: String = lines[0].iter().map(|f| f.text.as_str()).collect();
        assert_eq!(joined, "H2O is water");
    }

    #[test]
    fn test_wrap_preserves_word_spaces() {
        let spans = vec![
            InlineSpan::styled("bold", SpanStyle::bold()),
            InlineSpan::plain(" and plain"),
        ];
        let lines = wrap_spans(&spans, 11.0, 200.0);
        let joined: String = lines[0].iter().map(|f| f.text.as_str()).collect();
        assert_eq!(joined, "bold and plain");
    }

    #[test]
    fn test_chunk_chars() {
        assert_eq!(chunk_chars("", 10), vec![String::new()]);
        assert_eq!(chunk_chars("abcdef", 4), vec!["abcd".to_string(), "ef".to_string()]);
    }

    #[test]
    fn test_width_scales_with_size() {
        let narrow = text_width_mm("hello", 10.0, SpanStyle::default());
        let wide = text_width_mm("hello", 20.0, SpanStyle::default());
        assert!(wide > narrow * 1.9);
    }
}
