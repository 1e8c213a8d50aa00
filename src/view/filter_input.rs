//! Filter bar widget: `> pattern [mode]`.

use super::constants::FILTER_PROMPT;
use super::styles::TableStyles;
use crate::state::{FilterMode, PatternInput};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Filter bar widget.
///
/// Shows the edit cursor only while `editing`; otherwise the pattern is
/// read-only text. An `invalid regex` marker follows the mode tag when the
/// last pattern failed to compile.
pub struct FilterInput<'a> {
    input: &'a PatternInput,
    mode: FilterMode,
    editing: bool,
    invalid: bool,
    styles: &'a TableStyles,
}

impl<'a> FilterInput<'a> {
    /// Create a new filter bar.
    pub fn new(input: &'a PatternInput, mode: FilterMode, styles: &'a TableStyles) -> Self {
        Self {
            input,
            mode,
            editing: false,
            invalid: false,
            styles,
        }
    }

    /// Draw the edit cursor.
    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    /// Append the invalid-pattern marker.
    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    fn line(&self) -> Line<'static> {
        let text = self.input.text();
        let mut spans = vec![Span::raw(FILTER_PROMPT)];

        if self.editing {
            // Split text into before/after cursor for rendering cursor
            let cursor = self.input.cursor();
            let before: String = text.chars().take(cursor).collect();
            let mut after = text.chars().skip(cursor);
            let under = after.next().map(String::from).unwrap_or_else(|| " ".to_string());
            let rest: String = after.collect();

            spans.push(Span::raw(before));
            spans.push(Span::styled(under, self.styles.edit_cursor));
            spans.push(Span::raw(rest));
        } else {
            spans.push(Span::raw(text.to_string()));
        }

        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[{}]", self.mode.label()),
            self.styles.mode_tag,
        ));

        if self.invalid {
            spans.push(Span::raw(" "));
            spans.push(Span::styled("invalid regex", self.styles.error));
        }

        Line::from(spans)
    }
}

impl Widget for FilterInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}
