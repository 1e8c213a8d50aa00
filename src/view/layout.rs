//! Screen layout for the result browser.
//!
//! Pure layout logic: splits the frame and hands each area to its widget.
//!
//! ```text
//! > pattern [substring]      filter bar
//! . visible columns • ...    help (1 line, or full help)
//! ┌──────────────────────┐
//! │ table                │   result table
//! └──────────────────────┘
//! ```
//!
//! While a picker is open it replaces the filter bar and the table, and its
//! help line moves below it.

use super::column_picker::ColumnPicker;
use super::constants::FILTER_BAR_HEIGHT;
use super::filter_input::FilterInput;
use super::help::{help_height, help_lines};
use super::styles::TableStyles;
use super::table::ResultTable;
use crate::state::{BrowserState, ViewState};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Paragraph,
    Frame,
};

/// Picker titles by view state.
pub fn picker_title(view_state: ViewState) -> Option<&'static str> {
    match view_state {
        ViewState::SelectingVisibleColumns => Some("Visible Columns"),
        ViewState::SelectingFilterColumns => Some("Filter Columns"),
        ViewState::Navigating | ViewState::Filtering => None,
    }
}

/// Render the whole browser for `state`.
pub fn render_browser(frame: &mut Frame, state: &BrowserState, styles: &TableStyles) {
    let area = frame.area();
    let help = help_lines(state, styles);
    let help_rows = help.len() as u16;

    if let (Some(title), Some(list)) = (picker_title(state.view_state()), state.active_picker()) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(help_rows)])
            .split(area);
        frame.render_widget(ColumnPicker::new(title, list, styles), chunks[0]);
        frame.render_widget(Paragraph::new(help), chunks[1]);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FILTER_BAR_HEIGHT),
            Constraint::Length(help_rows),
            Constraint::Length(table_height(state, area.height, help_rows)),
            Constraint::Min(0),
        ])
        .split(area);

    let editing = state.view_state() == ViewState::Filtering;
    frame.render_widget(
        FilterInput::new(state.input(), state.filter_mode(), styles)
            .editing(editing)
            .invalid(state.is_invalid_pattern()),
        chunks[0],
    );
    frame.render_widget(Paragraph::new(help), chunks[1]);
    frame.render_widget(ResultTable::new(state, styles), chunks[2]);
}

/// Header row plus top and bottom border.
const TABLE_CHROME_HEIGHT: u16 = 3;

/// Table body rows left on a screen `height` rows tall once the filter bar,
/// the help for `state` and the table chrome are drawn.
pub fn table_body_rows(state: &BrowserState, height: u16) -> usize {
    let chrome = FILTER_BAR_HEIGHT + help_height(state) + TABLE_CHROME_HEIGHT;
    height.saturating_sub(chrome) as usize
}

/// Table height: one page of rows plus header and borders, never below the
/// layout's minimum body height. Shrinks to what is left under the filter bar
/// and `help_rows` of help on a short screen.
fn table_height(state: &BrowserState, height: u16, help_rows: u16) -> u16 {
    let layout = state.layout();
    let page = state.viewport().page_size().min(u16::MAX as usize) as u16;
    let body = page.max(layout.min_height);
    let available = height.saturating_sub(FILTER_BAR_HEIGHT + help_rows);
    body.saturating_add(TABLE_CHROME_HEIGHT).min(available)
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
