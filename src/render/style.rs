//! Shared styling for the document renderers.
//!
//! Both renderers consume one [`StyleSheet`] so the DOCX and PDF output
//! stay visually in step; neither carries its own constant table.

use chrono::Local;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Six-digit uppercase hex without a leading `#`, the form DOCX run
    /// properties take.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels scaled to `0.0..=1.0`, the form PDF color operators take.
    pub fn to_unit(&self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

/// Deep blue-gray used for the title and top-level headings.
const INK: Color = Color::new(0x1E, 0x3A, 0x5F);

/// Lighter step of the same ramp for mid-level headings.
const INK_LIGHT: Color = Color::new(0x2E, 0x5A, 0x7C);

/// Slate for the smallest headings.
const SLATE: Color = Color::new(0x44, 0x54, 0x6A);

/// Size and color for one heading level. All headings render bold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingStyle {
    /// Font size in points
    pub size_pt: f32,
    /// Text color
    pub color: Color,
}

/// Style table consumed by both renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    /// Document title line
    pub title: HeadingStyle,

    /// Heading levels 1 through 5, largest first
    pub headings: [HeadingStyle; 5],

    /// Body text size in points
    pub body_size_pt: f32,

    /// Code text size in points
    pub code_size_pt: f32,

    /// Generation footer size in points
    pub footer_size_pt: f32,

    /// Body text color
    pub text_color: Color,

    /// Muted color for blockquotes and the footer
    pub muted_color: Color,

    /// Fill behind table header rows
    pub table_header_fill: Color,

    /// Table grid line color
    pub rule_color: Color,
}

impl StyleSheet {
    /// Style for a heading level; out-of-range levels clamp to 1..=5.
    pub fn heading(&self, level: u8) -> HeadingStyle {
        self.headings[(level.clamp(1, 5) - 1) as usize]
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            title: HeadingStyle {
                size_pt: 24.0,
                color: INK,
            },
            headings: [
                HeadingStyle {
                    size_pt: 20.0,
                    color: INK,
                },
                HeadingStyle {
                    size_pt: 16.0,
                    color: INK_LIGHT,
                },
                HeadingStyle {
                    size_pt: 14.0,
                    color: INK_LIGHT,
                },
                HeadingStyle {
                    size_pt: 12.0,
                    color: SLATE,
                },
                HeadingStyle {
                    size_pt: 11.0,
                    color: SLATE,
                },
            ],
            body_size_pt: 11.0,
            code_size_pt: 9.5,
            footer_size_pt: 9.0,
            text_color: Color::new(0x1A, 0x1A, 0x1A),
            muted_color: Color::new(0x66, 0x66, 0x66),
            table_header_fill: Color::new(0xE8, 0xF4, 0xF8),
            rule_color: Color::new(0xA0, 0xA0, 0xA0),
        }
    }
}

/// Footer line appended to every rendered document.
pub fn generation_footer(title: &str) -> String {
    format!("{} | Generated {}", title, Local::now().format("%B %d, %Y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Color::new(0x1E, 0x3A, 0x5F).hex(), "1E3A5F");
        assert_eq!(Color::new(0, 0, 0).hex(), "000000");
    }

    #[test]
    fn test_unit_channels() {
        let (r, g, b) = Color::new(255, 0, 102).to_unit();
        assert!((r - 1.0).abs() < f32::EPSILON);
        assert_eq!(g, 0.0);
        assert!((b - 0.4).abs() < 0.01);
    }

    #[test]
    fn test_heading_scale_descends() {
        let styles = StyleSheet::default();
        for level in 1..5 {
            assert!(styles.heading(level).size_pt >= styles.heading(level + 1).size_pt);
        }
    }

    #[test]
    fn test_heading_level_clamps() {
        let styles = StyleSheet::default();
        assert_eq!(styles.heading(0), styles.heading(1));
        assert_eq!(styles.heading(9), styles.heading(5));
    }

    #[test]
    fn test_footer_carries_title_and_date() {
        let footer = generation_footer("Annual Review");
        assert!(footer.starts_with("Annual Review | Generated "));
    }
}
