//! Selectable column list backing both column pickers.
//!
//! One instance decides which columns are rendered, a second one which
//! columns are searched. Toggling items only changes the list itself; the
//! browser picks up a new column set solely through [`SelectableColumnList::commit`].
//!
//! Toggles survive leaving the picker without committing. The next time the
//! picker opens it shows those uncommitted toggles again.

/// One picker row: a column name and whether it is ticked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnItem {
    /// Column name.
    pub name: String,
    /// Whether the column is ticked.
    pub selected: bool,
}

impl ColumnItem {
    /// Checkbox label, e.g. `[x] name`.
    pub fn label(&self) -> String {
        let mark = if self.selected { "[x]" } else { "[ ]" };
        format!("{} {}", mark, self.name)
    }
}

/// Ordered, fixed list of columns with per-item selection and a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableColumnList {
    items: Vec<ColumnItem>,
    cursor: usize,
}

impl SelectableColumnList {
    /// Create a list with every column selected, in the given order.
    pub fn new(columns: &[String]) -> Self {
        Self {
            items: columns
                .iter()
                .map(|name| ColumnItem {
                    name: name.clone(),
                    selected: true,
                })
                .collect(),
            cursor: 0,
        }
    }

    /// Items in display order.
    pub fn items(&self) -> &[ColumnItem] {
        &self.items
    }

    /// Index of the item under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Flip `selected` for the item at `index`. Out-of-range is a no-op.
    pub fn toggle_at(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.selected = !item.selected;
        }
    }

    /// Flip the item under the cursor.
    pub fn toggle_current(&mut self) {
        self.toggle_at(self.cursor);
    }

    /// Tick every item.
    pub fn select_all(&mut self) {
        self.items.iter_mut().for_each(|item| item.selected = true);
    }

    /// Untick every item.
    pub fn clear_all(&mut self) {
        self.items.iter_mut().for_each(|item| item.selected = false);
    }

    /// Move the cursor up one item. Saturates at the first item.
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor down one item. Saturates at the last item.
    pub fn cursor_down(&mut self) {
        let last = self.items.len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
    }

    /// Names of the ticked items, in display order.
    ///
    /// Does not reset the list.
    pub fn commit(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.selected)
            .map(|item| item.name.clone())
            .collect()
    }
}

#[cfg(test)]
#[path = "column_selection_tests.rs"]
mod tests;
