//! Result browser state machine (pure).
//!
//! All state transitions are pure functions testable without a terminal.

pub mod browser_state;
pub mod column_selection;
pub mod event_handler;
pub mod filter;
pub mod pattern_input;
pub mod viewport;

// Re-export for convenience
pub use browser_state::{BrowserState, ViewState};
pub use column_selection::{ColumnItem, SelectableColumnList};
pub use event_handler::{handle_event, BrowserEvent, Effect, TextEdit};
pub use filter::{apply_filter, FilterCriterion, FilterError, FilterMode};
pub use pattern_input::{PatternInput, PATTERN_CHAR_LIMIT};
pub use viewport::{TableLayout, Viewport};
