//! Layout dimension constants for TUI rendering.
//!
//! Table geometry (column width, page size, frozen columns) lives in
//! [`crate::state::TableLayout`]; these values only shape the chrome
//! around the table.

/// Height of the filter bar in lines.
pub const FILTER_BAR_HEIGHT: u16 = 1;

/// Gap between help columns in full help.
pub const HELP_COLUMN_GAP: usize = 4;

/// Width of the column picker box in cells, borders included.
pub const PICKER_WIDTH: u16 = 50;

/// Marker drawn in front of the picker item under the cursor.
pub const PICKER_CURSOR: &str = "> ";

/// Prompt shown before the filter pattern.
pub const FILTER_PROMPT: &str = "> ";

/// Separator between short help entries.
pub const HELP_SEPARATOR: &str = " • ";
