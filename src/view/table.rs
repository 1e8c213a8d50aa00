//! Result table widget.
//!
//! Draws the current page of filtered rows inside a bordered block. Only the
//! columns in the viewport's column window are drawn; the frozen leading
//! column is always part of that window. The header row is drawn even when
//! no row matches the filter.

use super::styles::TableStyles;
use crate::state::BrowserState;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Line,
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Result table for a [`BrowserState`].
pub struct ResultTable<'a> {
    state: &'a BrowserState,
    styles: &'a TableStyles,
}

impl<'a> ResultTable<'a> {
    /// Create the table widget.
    pub fn new(state: &'a BrowserState, styles: &'a TableStyles) -> Self {
        Self { state, styles }
    }

    /// ` page 2/3 · 45/120 rows `
    fn page_indicator(&self) -> String {
        let viewport = self.state.viewport();
        let filtered = self.state.filtered_len();
        format!(
            " page {}/{} · {}/{} rows ",
            viewport.current_page() + 1,
            viewport.page_count(filtered),
            filtered,
            self.state.dataset().len()
        )
    }
}

impl Widget for ResultTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = self.state.layout();
        let visible = self.state.visible_columns();
        let viewport = self.state.viewport();
        let fit = layout.columns_that_fit(area.width);
        let window: Vec<&str> = viewport
            .column_window(visible.len(), fit)
            .into_iter()
            .filter_map(|i| visible.get(i).map(String::as_str))
            .collect();
        let width = layout.column_width as usize;

        let header = Row::new(
            window
                .iter()
                .map(|name| Cell::from(truncate(name, width))),
        )
        .style(self.styles.header);

        let rows = self.state.page_rows().into_iter().map(|(pos, row)| {
            let cells = window
                .iter()
                .map(|name| Cell::from(truncate(row.get(name), width)));
            let mut table_row = Row::new(cells);
            if viewport.is_focused() && pos == viewport.cursor() {
                table_row = table_row.style(self.styles.highlight);
            }
            table_row
        });

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.styles.border)
            .title_bottom(Line::styled(self.page_indicator(), self.styles.muted).right_aligned());

        Table::new(rows, window.iter().map(|_| Constraint::Length(layout.column_width)))
            .header(header)
            .column_spacing(layout.column_spacing)
            .block(block)
            .render(area, buf);
    }
}

/// Cut `text` to at most `width` display cells, ending in `…` when shortened.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let room = width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > room {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}
