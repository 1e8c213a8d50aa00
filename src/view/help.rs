//! Help lines displaying keyboard shortcuts.
//!
//! Navigation shows a one-line summary or, after `?`, a full help grouped
//! in side-by-side columns. Filtering and the column pickers each have a
//! fixed one-line help.

use super::constants::{HELP_COLUMN_GAP, HELP_SEPARATOR};
use super::styles::TableStyles;
use crate::state::{BrowserState, ViewState};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// One key and what it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpBinding {
    /// Key label, e.g. `↑/k`.
    pub keys: &'static str,
    /// Short description.
    pub desc: &'static str,
}

const fn binding(keys: &'static str, desc: &'static str) -> HelpBinding {
    HelpBinding { keys, desc }
}

/// Summary shown under the filter bar while navigating.
pub const NAVIGATION_SHORT: [HelpBinding; 4] = [
    binding(".", "visible columns"),
    binding("/", "substring filter"),
    binding("?", "toggle help"),
    binding("q", "quit"),
];

/// Full navigation help: movement, columns & filters, application.
pub const NAVIGATION_FULL: [&[HelpBinding]; 3] = [
    &[
        binding("↑/k", "move up"),
        binding("↓/j", "move down"),
        binding("←/h", "move left"),
        binding("→/l", "move right"),
        binding("pgup/pgdn", "page"),
        binding("g/G", "first/last row"),
    ],
    &[
        binding(".", "visible columns"),
        binding(",", "filter columns"),
        binding("/", "substring filter"),
        binding("\\", "regex filter"),
    ],
    &[binding("?", "toggle help"), binding("q", "quit")],
];

/// Help while typing a filter pattern.
pub const FILTERING: [HelpBinding; 2] = [binding("↵", "apply"), binding("esc", "exit")];

/// Help inside a column picker.
pub const PICKER: [HelpBinding; 7] = [
    binding("↑/k", "up"),
    binding("↓/j", "down"),
    binding("space", "toggle"),
    binding("a", "all"),
    binding("c", "clear"),
    binding("↵", "commit"),
    binding("esc", "cancel"),
];

/// `key desc • key desc` on one line.
pub fn short_help_line(bindings: &[HelpBinding], styles: &TableStyles) -> Line<'static> {
    let mut spans = Vec::with_capacity(bindings.len() * 4);
    for (i, b) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(HELP_SEPARATOR, styles.muted));
        }
        spans.push(Span::styled(b.keys, styles.help_key));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(b.desc, styles.help_desc));
    }
    Line::from(spans)
}

/// Groups rendered as aligned columns, one line per row.
pub fn full_help_lines(groups: &[&[HelpBinding]], styles: &TableStyles) -> Vec<Line<'static>> {
    let widths: Vec<(usize, usize)> = groups
        .iter()
        .map(|group| {
            let key_w = group.iter().map(|b| b.keys.width()).max().unwrap_or(0);
            let desc_w = group.iter().map(|b| b.desc.width()).max().unwrap_or(0);
            (key_w, desc_w)
        })
        .collect();
    let rows = groups.iter().map(|group| group.len()).max().unwrap_or(0);

    (0..rows)
        .map(|row| {
            let mut spans = Vec::new();
            for (col, (group, &(key_w, desc_w))) in groups.iter().zip(&widths).enumerate() {
                if col > 0 {
                    spans.push(Span::raw(" ".repeat(HELP_COLUMN_GAP)));
                }
                match group.get(row) {
                    Some(b) => {
                        spans.push(Span::styled(pad(b.keys, key_w), styles.help_key));
                        spans.push(Span::raw(" "));
                        spans.push(Span::styled(pad(b.desc, desc_w), styles.help_desc));
                    }
                    None => spans.push(Span::raw(" ".repeat(key_w + 1 + desc_w))),
                }
            }
            Line::from(spans)
        })
        .collect()
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// Help lines for the active view state.
pub fn help_lines(state: &BrowserState, styles: &TableStyles) -> Vec<Line<'static>> {
    match state.view_state() {
        ViewState::Navigating if state.is_full_help() => full_help_lines(&NAVIGATION_FULL, styles),
        ViewState::Navigating => vec![short_help_line(&NAVIGATION_SHORT, styles)],
        ViewState::Filtering => vec![short_help_line(&FILTERING, styles)],
        ViewState::SelectingVisibleColumns | ViewState::SelectingFilterColumns => {
            vec![short_help_line(&PICKER, styles)]
        }
    }
}

/// Number of lines [`help_lines`] returns for `state`.
pub fn help_height(state: &BrowserState) -> u16 {
    match state.view_state() {
        ViewState::Navigating if state.is_full_help() => {
            NAVIGATION_FULL.iter().map(|group| group.len()).max().unwrap_or(0) as u16
        }
        _ => 1,
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
