//! Size-bounded head/tail truncation.

use regex::Regex;

use crate::model::TruncationOutcome;

/// Default character budget, sized for a large model input window.
pub const DEFAULT_CHAR_BUDGET: usize = 900_000;

/// Notice inserted between the head and tail segments. Distinct in shape
/// from the `[Page N]` markers so downstream parsing cannot confuse them.
pub const TRUNCATION_MARKER: &str = "\n\n[NOTE: Content truncated due to length. The opening and closing chapters are preserved; the middle of the book is omitted.]\n\n";

/// Share of the budget given to the head segment; the rest keeps the tail.
const HEAD_SHARE: f64 = 0.6;

/// Fraction of each segment window searched for a page-marker boundary.
const BOUNDARY_WINDOW: f64 = 0.2;

/// Bounds text to a character budget while preserving both ends.
///
/// A book's front matter carries its table of contents and framing, and
/// its final chapters carry the conclusions, so both survive truncation:
/// the head keeps 60% of the budget and the tail the remaining 40%, with
/// the cut points pulled to nearby `[Page N]` boundaries when possible.
/// All arithmetic is in characters, never bytes, so multi-byte text is
/// never split mid-code-point.
#[derive(Debug, Clone)]
pub struct ContentTruncator {
    budget: usize,
    page_marker: Regex,
}

impl ContentTruncator {
    /// Create a truncator with the default budget.
    pub fn new() -> Self {
        Self::with_budget(DEFAULT_CHAR_BUDGET)
    }

    /// Create a truncator with a custom character budget.
    pub fn with_budget(budget: usize) -> Self {
        Self {
            budget,
            page_marker: Regex::new(r"\[Page \d+\]").unwrap(),
        }
    }

    /// The configured character budget.
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Bound `text` to the budget.
    ///
    /// Input at or under the budget is returned unchanged with
    /// `was_truncated` false. Otherwise the result is head + notice + tail
    /// and its character count never exceeds the budget, which makes a
    /// second pass over the output a no-op.
    pub fn truncate(&self, text: &str) -> TruncationOutcome {
        let original_chars = text.chars().count();
        if original_chars <= self.budget {
            return TruncationOutcome::unchanged(text.to_string());
        }

        let marker_chars = TRUNCATION_MARKER.chars().count();
        let usable = self.budget.saturating_sub(marker_chars);

        // A budget smaller than the notice itself degenerates to a hard
        // head cut with no notice.
        if usable == 0 {
            let end = char_to_byte(text, self.budget);
            return self.outcome(text[..end].to_string(), original_chars);
        }

        let head_budget = (usable as f64 * HEAD_SHARE) as usize;
        let tail_budget = usable - head_budget;

        let head = self.head_segment(text, head_budget);
        let tail = self.tail_segment(text, original_chars, tail_budget);

        let bounded = format!(
            "{}{}{}",
            head.trim_end(),
            TRUNCATION_MARKER,
            tail.trim_start()
        );
        self.outcome(bounded, original_chars)
    }

    fn outcome(&self, text: String, original_chars: usize) -> TruncationOutcome {
        let final_chars = text.chars().count();
        let kept_percentage =
            (1000.0 * final_chars as f64 / original_chars as f64).round() / 10.0;
        TruncationOutcome {
            text,
            was_truncated: true,
            original_chars,
            final_chars,
            kept_percentage,
        }
    }

    /// First `budget` chars, pulled back to the last page marker inside the
    /// final fifth of the window when one exists there.
    fn head_segment<'a>(&self, text: &'a str, budget: usize) -> &'a str {
        let end = char_to_byte(text, budget);
        let window_start =
            char_to_byte(text, budget - (budget as f64 * BOUNDARY_WINDOW) as usize);

        match self.page_marker.find_iter(&text[window_start..end]).last() {
            Some(m) => &text[..window_start + m.start()],
            None => &text[..end],
        }
    }

    /// Last `budget` chars, pushed forward to the first page marker inside
    /// the leading fifth of the window when one exists there.
    fn tail_segment<'a>(&self, text: &'a str, original_chars: usize, budget: usize) -> &'a str {
        let start = char_to_byte(text, original_chars - budget);
        let window_end = char_to_byte(
            text,
            original_chars - budget + (budget as f64 * BOUNDARY_WINDOW) as usize,
        );

        match self.page_marker.find(&text[start..window_end]) {
            Some(m) => &text[start + m.start()..],
            None => &text[start..],
        }
    }
}

impl Default for ContentTruncator {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte offset of the `n`-th character, clamped to the end of the string.
fn char_to_byte(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}
