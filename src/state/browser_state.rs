//! Browser state and derived view.
//!
//! `BrowserState` is the root state of the result browser. It owns the
//! immutable dataset, both column pickers, the committed column sets, the
//! filter input and the derived list of filtered rows. Transitions live in
//! [`crate::state::event_handler`]; this module only holds data and the
//! recompute step they share.

use crate::model::{Dataset, Row};
use crate::state::column_selection::SelectableColumnList;
use crate::state::filter::{apply_filter, FilterCriterion, FilterMode};
use crate::state::pattern_input::PatternInput;
use crate::state::viewport::{TableLayout, Viewport};
use tracing::{debug, warn};

// ===== ViewState =====

/// Which part of the browser receives input. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Moving around the table.
    #[default]
    Navigating,
    /// Typing a filter pattern.
    Filtering,
    /// Choosing which columns are rendered.
    SelectingVisibleColumns,
    /// Choosing which columns are searched.
    SelectingFilterColumns,
}

// ===== BrowserState =====

/// Root state of the result browser. Pure data, no terminal access.
#[derive(Debug, Clone)]
pub struct BrowserState {
    dataset: Dataset,
    layout: TableLayout,

    view_state: ViewState,

    /// Interpretation of `input` while filtering.
    mode: FilterMode,

    /// Pattern being typed. Kept after Enter so the filter stays applied.
    input: PatternInput,

    /// Committed output of `visible_picker`.
    visible_columns: Vec<String>,

    /// Committed output of `filter_picker`.
    filter_columns: Vec<String>,

    visible_picker: SelectableColumnList,
    filter_picker: SelectableColumnList,

    /// Dataset row indices passing the current filter, in dataset order.
    filtered: Vec<usize>,

    viewport: Viewport,

    /// Full help instead of the one-line summary.
    full_help: bool,

    /// Set when the last regex did not compile; cleared by the next good one.
    invalid_pattern: bool,
}

impl BrowserState {
    /// Start browsing `dataset` with every column visible and searched.
    pub fn new(dataset: Dataset, layout: TableLayout) -> Self {
        let columns = dataset.columns().to_vec();
        let filtered = (0..dataset.len()).collect();

        Self {
            visible_picker: SelectableColumnList::new(&columns),
            filter_picker: SelectableColumnList::new(&columns),
            visible_columns: columns.clone(),
            filter_columns: columns,
            filtered,
            viewport: Viewport::new(&layout),
            dataset,
            layout,
            view_state: ViewState::Navigating,
            mode: FilterMode::Substring,
            input: PatternInput::default(),
            full_help: false,
            invalid_pattern: false,
        }
    }

    // ===== Accessors =====

    /// The dataset being browsed.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Table geometry.
    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    /// Active view state.
    pub fn view_state(&self) -> ViewState {
        self.view_state
    }

    /// Current filter mode.
    pub fn filter_mode(&self) -> FilterMode {
        self.mode
    }

    /// Filter input (pattern and edit cursor).
    pub fn input(&self) -> &PatternInput {
        &self.input
    }

    /// The criterion the filtered rows were computed from.
    pub fn criterion(&self) -> FilterCriterion {
        FilterCriterion::new(self.mode, self.input.text())
    }

    /// Columns currently rendered, in dataset order.
    pub fn visible_columns(&self) -> &[String] {
        &self.visible_columns
    }

    /// Columns currently searched, in dataset order.
    pub fn filter_columns(&self) -> &[String] {
        &self.filter_columns
    }

    /// Picker for rendered columns.
    pub fn visible_picker(&self) -> &SelectableColumnList {
        &self.visible_picker
    }

    /// Picker for searched columns.
    pub fn filter_picker(&self) -> &SelectableColumnList {
        &self.filter_picker
    }

    /// Picker matching the current view state, if a picker is open.
    pub fn active_picker(&self) -> Option<&SelectableColumnList> {
        match self.view_state {
            ViewState::SelectingVisibleColumns => Some(&self.visible_picker),
            ViewState::SelectingFilterColumns => Some(&self.filter_picker),
            ViewState::Navigating | ViewState::Filtering => None,
        }
    }

    /// Dataset indices of the filtered rows.
    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    /// Number of filtered rows.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Filtered rows in dataset order.
    pub fn filtered_rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.filtered.iter().filter_map(|&idx| self.dataset.row(idx))
    }

    /// Rows on the current page, paired with their filtered index.
    pub fn page_rows(&self) -> Vec<(usize, &Row)> {
        self.viewport
            .page_range(self.filtered.len())
            .filter_map(|pos| {
                let idx = *self.filtered.get(pos)?;
                self.dataset.row(idx).map(|row| (pos, row))
            })
            .collect()
    }

    /// Scroll and cursor state.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Whether the full help is shown.
    pub fn is_full_help(&self) -> bool {
        self.full_help
    }

    /// Whether the last regex failed to compile.
    pub fn is_invalid_pattern(&self) -> bool {
        self.invalid_pattern
    }

    // ===== Crate-internal mutation (used by event_handler) =====

    pub(crate) fn set_view_state(&mut self, view_state: ViewState) {
        debug!(from = ?self.view_state, to = ?view_state, "View state transition");
        self.view_state = view_state;
    }

    pub(crate) fn set_mode(&mut self, mode: FilterMode) {
        self.mode = mode;
    }

    /// Replace the filter input with `f(input)`.
    pub(crate) fn update_input(&mut self, f: impl FnOnce(PatternInput) -> PatternInput) {
        self.input = f(std::mem::take(&mut self.input));
    }

    pub(crate) fn active_picker_mut(&mut self) -> Option<&mut SelectableColumnList> {
        match self.view_state {
            ViewState::SelectingVisibleColumns => Some(&mut self.visible_picker),
            ViewState::SelectingFilterColumns => Some(&mut self.filter_picker),
            ViewState::Navigating | ViewState::Filtering => None,
        }
    }

    pub(crate) fn set_visible_columns(&mut self, columns: Vec<String>) {
        self.visible_columns = columns;
    }

    pub(crate) fn set_filter_columns(&mut self, columns: Vec<String>) {
        self.filter_columns = columns;
    }

    pub(crate) fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub(crate) fn toggle_full_help(&mut self) {
        self.full_help = !self.full_help;
    }

    /// Rebuild the derived view for a terminal `terminal_width` cells wide.
    ///
    /// A regex that does not compile leaves the filtered rows untouched and
    /// raises the invalid-pattern flag instead.
    pub(crate) fn recompute(&mut self, terminal_width: u16) {
        let criterion = self.criterion();
        match apply_filter(&self.dataset, &self.filter_columns, &criterion) {
            Ok(rows) => {
                debug!(
                    mode = criterion.mode.label(),
                    pattern = %criterion.pattern,
                    matched = rows.len(),
                    total = self.dataset.len(),
                    "Recomputed filtered rows"
                );
                self.filtered = rows;
                self.invalid_pattern = false;
                self.viewport.reset_rows();
            }
            Err(e) => {
                warn!(error = %e, "Keeping previous rows");
                self.invalid_pattern = true;
            }
        }

        self.resize(terminal_width);
    }

    /// Re-clamp horizontal scroll for a terminal `terminal_width` cells wide.
    pub fn resize(&mut self, terminal_width: u16) {
        let fit = self.layout.columns_that_fit(terminal_width);
        self.viewport.clamp_horizontal(self.visible_columns.len(), fit);
    }

    /// Page by at most `body_rows` rows, the height of the table body on
    /// screen. Never pages by more than the layout's page size.
    pub fn fit_rows(&mut self, body_rows: usize) {
        let rows = self.layout.page_size.min(body_rows).max(1);
        if rows != self.viewport.page_size() {
            debug!(rows, "Page size changed");
            self.viewport.set_page_size(rows);
        }
    }
}
