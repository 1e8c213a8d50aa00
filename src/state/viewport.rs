//! Table viewport: horizontal column window and vertical paging.
//!
//! The leading `frozen_columns` visible columns are always rendered. The
//! remaining columns form a window that scrolls one column per step; the
//! offset is clamped so the window never scrolls past the point where the
//! last column is already on screen.
//!
//! Rows are paged. The page size starts at the layout's and shrinks when
//! the terminal is too short to draw a whole page. The row cursor indexes
//! the filtered rows; the page shown is the one containing the cursor.

use std::ops::Range;

// ===== TableLayout =====

/// Fixed geometry for the result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// Width of every column in cells.
    pub column_width: u16,
    /// Gap between adjacent columns in cells.
    pub column_spacing: u16,
    /// Rows per page on a tall enough terminal.
    pub page_size: usize,
    /// Minimum height of the table body in rows.
    pub min_height: u16,
    /// Leading columns pinned against horizontal scroll.
    pub frozen_columns: usize,
    /// Width assumed when the terminal size cannot be queried.
    pub fallback_width: u16,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            column_width: 20,
            column_spacing: 1,
            page_size: 20,
            min_height: 10,
            frozen_columns: 1,
            fallback_width: 120,
        }
    }
}

impl TableLayout {
    /// Number of whole columns that fit in `width` cells, inside a bordered block.
    ///
    /// Always at least 1 so the frozen column is drawn on tiny terminals.
    pub fn columns_that_fit(&self, width: u16) -> usize {
        let inner = width.saturating_sub(2) as usize;
        let per_column = (self.column_width + self.column_spacing).max(1) as usize;
        ((inner + self.column_spacing as usize) / per_column).max(1)
    }

    /// Total width of `count` rendered columns, spacing included.
    pub fn total_width(&self, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        count * self.column_width as usize + (count - 1) * self.column_spacing as usize
    }
}

// ===== Viewport =====

/// Scroll and cursor state for the result table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    horizontal_offset: usize,
    frozen_columns: usize,
    page_size: usize,
    cursor: usize,
    focused: bool,
}

impl Viewport {
    /// Fresh viewport at the top-left, focused.
    pub fn new(layout: &TableLayout) -> Self {
        Self {
            horizontal_offset: 0,
            frozen_columns: layout.frozen_columns,
            page_size: layout.page_size.max(1),
            cursor: 0,
            focused: true,
        }
    }

    /// Columns scrolled past, not counting frozen ones.
    pub fn horizontal_offset(&self) -> usize {
        self.horizontal_offset
    }

    /// Number of frozen leading columns.
    pub fn frozen_columns(&self) -> usize {
        self.frozen_columns
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change the rows per page (at least 1). The cursor stays on its row.
    pub fn set_page_size(&mut self, rows: usize) {
        self.page_size = rows.max(1);
    }

    /// Row cursor as an index into the filtered rows.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the table has keyboard focus (cursor highlighted).
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Give or take keyboard focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    // ----- horizontal -----

    /// Largest allowed offset for `visible_count` columns when `fit` columns fit.
    pub fn max_horizontal_offset(&self, visible_count: usize, fit: usize) -> usize {
        let frozen = self.frozen_columns.min(visible_count);
        let scrollable = visible_count - frozen;
        let slots = fit.saturating_sub(frozen).max(1);
        scrollable.saturating_sub(slots)
    }

    /// Shift the scrollable window one column left.
    pub fn scroll_left(&mut self) {
        self.horizontal_offset = self.horizontal_offset.saturating_sub(1);
    }

    /// Shift the scrollable window one column right, clamped.
    pub fn scroll_right(&mut self, visible_count: usize, fit: usize) {
        let max = self.max_horizontal_offset(visible_count, fit);
        self.horizontal_offset = (self.horizontal_offset + 1).min(max);
    }

    /// Re-clamp the offset after the column set or terminal width changed.
    pub fn clamp_horizontal(&mut self, visible_count: usize, fit: usize) {
        let max = self.max_horizontal_offset(visible_count, fit);
        self.horizontal_offset = self.horizontal_offset.min(max);
    }

    /// Indices (into the visible columns) to render, frozen columns first.
    pub fn column_window(&self, visible_count: usize, fit: usize) -> Vec<usize> {
        let frozen = self.frozen_columns.min(visible_count);
        let slots = fit.saturating_sub(frozen);
        let offset = self
            .horizontal_offset
            .min(self.max_horizontal_offset(visible_count, fit));
        let start = frozen + offset;
        let end = (start + slots).min(visible_count);

        (0..frozen).chain(start..end).collect()
    }

    // ----- vertical -----

    /// Move the cursor up one row.
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor down one row, stopping at the last row.
    pub fn move_down(&mut self, row_count: usize) {
        self.cursor = (self.cursor + 1).min(row_count.saturating_sub(1));
    }

    /// Move the cursor one page up.
    pub fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.page_size);
    }

    /// Move the cursor one page down, stopping at the last row.
    pub fn page_down(&mut self, row_count: usize) {
        self.cursor = (self.cursor + self.page_size).min(row_count.saturating_sub(1));
    }

    /// Jump to the first row.
    pub fn first_row(&mut self) {
        self.cursor = 0;
    }

    /// Jump to the last row.
    pub fn last_row(&mut self, row_count: usize) {
        self.cursor = row_count.saturating_sub(1);
    }

    /// Zero-based page holding the cursor.
    pub fn current_page(&self) -> usize {
        self.cursor / self.page_size
    }

    /// Number of pages for `row_count` rows (at least 1).
    pub fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size).max(1)
    }

    /// Filtered-row range shown on the current page.
    pub fn page_range(&self, row_count: usize) -> Range<usize> {
        let start = (self.current_page() * self.page_size).min(row_count);
        let end = (start + self.page_size).min(row_count);
        start..end
    }

    /// Reset the row cursor after the filtered rows were recomputed.
    pub fn reset_rows(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
#[path = "viewport_tests.rs"]
mod tests;
