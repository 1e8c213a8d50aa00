//! Browser event dispatch (pure state transitions).
//!
//! `handle_event` routes one input event according to the active
//! [`ViewState`] and returns the new state plus the side effect the shell
//! must perform. It never touches the terminal; the terminal width is
//! passed in so horizontal clamping stays deterministic under test.
//!
//! Quit is global: it ends the browser from every view state.

use crate::model::KeyAction;
use crate::state::browser_state::{BrowserState, ViewState};
use crate::state::filter::FilterMode;
use crate::state::pattern_input::{
    clear, handle_backspace, handle_char_input, handle_cursor_left, handle_cursor_right,
};
use tracing::debug;

// ===== Events and effects =====

/// Text-editing keystroke while a filter pattern is being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    /// Insert a character at the edit cursor.
    Insert(char),
    /// Erase the character before the edit cursor.
    Backspace,
    /// Move the edit cursor left.
    CursorLeft,
    /// Move the edit cursor right.
    CursorRight,
}

/// One input event after key decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserEvent {
    /// A bound key action.
    Action(KeyAction),
    /// A text edit (only meaningful while filtering).
    Edit(TextEdit),
}

impl From<KeyAction> for BrowserEvent {
    fn from(action: KeyAction) -> Self {
        BrowserEvent::Action(action)
    }
}

impl From<TextEdit> for BrowserEvent {
    fn from(edit: TextEdit) -> Self {
        BrowserEvent::Edit(edit)
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Keep running and redraw.
    None,
    /// Leave the browser.
    Quit,
}

// ===== Dispatch =====

/// Apply `event` to `state`.
///
/// `terminal_width` is the current width in cells, used to clamp horizontal
/// scrolling after the visible columns change.
pub fn handle_event(
    state: BrowserState,
    event: BrowserEvent,
    terminal_width: u16,
) -> (BrowserState, Effect) {
    if event == BrowserEvent::Action(KeyAction::Quit) {
        debug!(view_state = ?state.view_state(), "Quit requested");
        return (state, Effect::Quit);
    }

    let state = match state.view_state() {
        ViewState::Navigating => handle_navigating(state, event, terminal_width),
        ViewState::Filtering => handle_filtering(state, event, terminal_width),
        ViewState::SelectingVisibleColumns | ViewState::SelectingFilterColumns => {
            handle_picker(state, event, terminal_width)
        }
    };
    (state, Effect::None)
}

// ===== Navigating =====

fn handle_navigating(
    mut state: BrowserState,
    event: BrowserEvent,
    terminal_width: u16,
) -> BrowserState {
    let BrowserEvent::Action(action) = event else {
        return state;
    };

    let rows = state.filtered_len();
    let visible = state.visible_columns().len();
    let fit = state.layout().columns_that_fit(terminal_width);

    match action {
        KeyAction::StartSubstringFilter => {
            start_filtering(state, FilterMode::Substring, terminal_width)
        }
        KeyAction::StartRegexFilter => start_filtering(state, FilterMode::Regex, terminal_width),
        KeyAction::OpenVisibleColumns => {
            state.set_view_state(ViewState::SelectingVisibleColumns);
            state
        }
        KeyAction::OpenFilterColumns => {
            state.set_view_state(ViewState::SelectingFilterColumns);
            state
        }
        KeyAction::ScrollLeft => {
            state.viewport_mut().scroll_left();
            state
        }
        KeyAction::ScrollRight => {
            state.viewport_mut().scroll_right(visible, fit);
            state
        }
        KeyAction::MoveUp => {
            state.viewport_mut().move_up();
            state
        }
        KeyAction::MoveDown => {
            state.viewport_mut().move_down(rows);
            state
        }
        KeyAction::PageUp => {
            state.viewport_mut().page_up();
            state
        }
        KeyAction::PageDown => {
            state.viewport_mut().page_down(rows);
            state
        }
        KeyAction::FirstRow => {
            state.viewport_mut().first_row();
            state
        }
        KeyAction::LastRow => {
            state.viewport_mut().last_row(rows);
            state
        }
        KeyAction::ToggleHelp => {
            state.toggle_full_help();
            state
        }
        KeyAction::ToggleItem
        | KeyAction::SelectAll
        | KeyAction::ClearAll
        | KeyAction::Confirm
        | KeyAction::Cancel
        | KeyAction::Quit => state,
    }
}

fn start_filtering(mut state: BrowserState, mode: FilterMode, terminal_width: u16) -> BrowserState {
    state.update_input(clear);
    state.set_mode(mode);
    state.recompute(terminal_width);
    state.viewport_mut().set_focused(false);
    state.set_view_state(ViewState::Filtering);
    state
}

// ===== Filtering =====

fn handle_filtering(
    mut state: BrowserState,
    event: BrowserEvent,
    terminal_width: u16,
) -> BrowserState {
    match event {
        BrowserEvent::Edit(edit) => {
            state.update_input(|input| match edit {
                TextEdit::Insert(ch) => handle_char_input(input, ch),
                TextEdit::Backspace => handle_backspace(input),
                TextEdit::CursorLeft => handle_cursor_left(input),
                TextEdit::CursorRight => handle_cursor_right(input),
            });
            if matches!(edit, TextEdit::Insert(_) | TextEdit::Backspace) {
                state.recompute(terminal_width);
            }
            state
        }
        BrowserEvent::Action(KeyAction::Cancel) => {
            state.update_input(clear);
            finish_filtering(state, terminal_width)
        }
        BrowserEvent::Action(KeyAction::Confirm) => finish_filtering(state, terminal_width),
        BrowserEvent::Action(_) => state,
    }
}

fn finish_filtering(mut state: BrowserState, terminal_width: u16) -> BrowserState {
    state.recompute(terminal_width);
    state.viewport_mut().set_focused(true);
    state.set_view_state(ViewState::Navigating);
    state
}

// ===== Column pickers =====

fn handle_picker(
    mut state: BrowserState,
    event: BrowserEvent,
    terminal_width: u16,
) -> BrowserState {
    let BrowserEvent::Action(action) = event else {
        return state;
    };

    match action {
        KeyAction::Confirm => commit_picker(state, terminal_width),
        KeyAction::Cancel => {
            state.update_input(clear);
            state.recompute(terminal_width);
            state.set_view_state(ViewState::Navigating);
            state
        }
        _ => {
            if let Some(picker) = state.active_picker_mut() {
                match action {
                    KeyAction::MoveUp => picker.cursor_up(),
                    KeyAction::MoveDown => picker.cursor_down(),
                    KeyAction::ToggleItem => picker.toggle_current(),
                    KeyAction::SelectAll => picker.select_all(),
                    KeyAction::ClearAll => picker.clear_all(),
                    _ => {}
                }
            }
            state
        }
    }
}

fn commit_picker(mut state: BrowserState, terminal_width: u16) -> BrowserState {
    match state.view_state() {
        ViewState::SelectingVisibleColumns => {
            let columns = state.visible_picker().commit();
            debug!(columns = ?columns, "Committed visible columns");
            state.set_visible_columns(columns);
        }
        ViewState::SelectingFilterColumns => {
            let columns = state.filter_picker().commit();
            debug!(columns = ?columns, "Committed filter columns");
            state.set_filter_columns(columns);
        }
        ViewState::Navigating | ViewState::Filtering => return state,
    }
    state.recompute(terminal_width);
    state.set_view_state(ViewState::Navigating);
    state
}

#[cfg(test)]
#[path = "event_handler_tests.rs"]
mod tests;
