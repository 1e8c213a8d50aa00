//! Tests for browser event dispatch.
//!
//! Covers every row of the transition table plus the commit-isolation and
//! invalid-regex behaviour.

use super::*;
use crate::model::{Dataset, Row};
use crate::state::viewport::TableLayout;

const WIDTH: u16 = 120;

fn two_row_state() -> BrowserState {
    let dataset = Dataset::new(
        vec!["a".to_string(), "b".to_string()],
        vec![
            Row::from_pairs([("a", "FOO"), ("b", "1")]),
            Row::from_pairs([("a", "bar"), ("b", "2")]),
        ],
    )
    .unwrap();
    BrowserState::new(dataset, TableLayout::default())
}

fn wide_state(columns: usize, rows: usize) -> BrowserState {
    let names: Vec<String> = (1..=columns).map(|i| format!("c{i}")).collect();
    let data = (0..rows)
        .map(|r| {
            Row::from_pairs(
                names
                    .iter()
                    .map(|name| (name.as_str(), format!("{name}-{r}")))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    BrowserState::new(Dataset::new(names, data).unwrap(), TableLayout::default())
}

fn send(state: BrowserState, events: &[BrowserEvent]) -> BrowserState {
    events.iter().fold(state, |state, &event| {
        let (state, effect) = handle_event(state, event, WIDTH);
        assert_eq!(effect, Effect::None);
        state
    })
}

fn act(action: KeyAction) -> BrowserEvent {
    BrowserEvent::Action(action)
}

fn type_text(text: &str) -> Vec<BrowserEvent> {
    text.chars()
        .map(|ch| BrowserEvent::Edit(TextEdit::Insert(ch)))
        .collect()
}

fn filtered_values(state: &BrowserState, column: &str) -> Vec<String> {
    state
        .filtered_rows()
        .map(|row| row.get(column).to_string())
        .collect()
}

// ===== Initial state =====

#[test]
fn starts_navigating_with_everything_selected() {
    let state = two_row_state();
    assert_eq!(state.view_state(), ViewState::Navigating);
    assert_eq!(state.visible_columns(), ["a", "b"]);
    assert_eq!(state.filter_columns(), ["a", "b"]);
    assert_eq!(state.filtered_indices(), [0, 1]);
    assert!(state.viewport().is_focused());
}

// ===== Quit =====

#[test]
fn quit_works_from_every_state() {
    let entries = [
        vec![],
        vec![act(KeyAction::StartSubstringFilter)],
        vec![act(KeyAction::OpenVisibleColumns)],
        vec![act(KeyAction::OpenFilterColumns)],
    ];
    for prefix in entries {
        let state = send(two_row_state(), &prefix);
        let (_, effect) = handle_event(state, act(KeyAction::Quit), WIDTH);
        assert_eq!(effect, Effect::Quit);
    }
}

// ===== Filtering =====

#[test]
fn scenario_a_substring_filter_matches_case_insensitively() {
    let mut events = vec![act(KeyAction::StartSubstringFilter)];
    events.extend(type_text("foo"));
    let state = send(two_row_state(), &events);

    assert_eq!(state.view_state(), ViewState::Filtering);
    assert_eq!(filtered_values(&state, "a"), ["FOO"]);
}

#[test]
fn entering_filter_resets_pattern_and_unfocuses_table() {
    let mut events = vec![act(KeyAction::StartSubstringFilter)];
    events.extend(type_text("foo"));
    events.push(act(KeyAction::Confirm));
    events.push(act(KeyAction::StartRegexFilter));
    let state = send(two_row_state(), &events);

    assert_eq!(state.input().text(), "");
    assert_eq!(state.filter_mode(), FilterMode::Regex);
    assert_eq!(state.filtered_len(), 2);
    assert!(!state.viewport().is_focused());
}

#[test]
fn enter_keeps_pattern_and_returns_to_navigation() {
    let mut events = vec![act(KeyAction::StartSubstringFilter)];
    events.extend(type_text("bar"));
    events.push(act(KeyAction::Confirm));
    let state = send(two_row_state(), &events);

    assert_eq!(state.view_state(), ViewState::Navigating);
    assert_eq!(state.input().text(), "bar");
    assert_eq!(filtered_values(&state, "a"), ["bar"]);
    assert!(state.viewport().is_focused());
}

#[test]
fn escape_clears_pattern_and_restores_all_rows() {
    let mut events = vec![act(KeyAction::StartSubstringFilter)];
    events.extend(type_text("bar"));
    events.push(act(KeyAction::Cancel));
    let state = send(two_row_state(), &events);

    assert_eq!(state.view_state(), ViewState::Navigating);
    assert_eq!(state.input().text(), "");
    assert_eq!(state.filtered_len(), 2);
    assert!(state.viewport().is_focused());
}

#[test]
fn backspace_recomputes_immediately() {
    let mut events = vec![act(KeyAction::StartSubstringFilter)];
    events.extend(type_text("foox"));
    let state = send(two_row_state(), &events);
    assert_eq!(state.filtered_len(), 0);

    let state = send(state, &[BrowserEvent::Edit(TextEdit::Backspace)]);
    assert_eq!(filtered_values(&state, "a"), ["FOO"]);
}

#[test]
fn navigation_keys_are_ignored_while_filtering() {
    let events = [act(KeyAction::StartSubstringFilter), act(KeyAction::OpenVisibleColumns)];
    let state = send(two_row_state(), &events);
    assert_eq!(state.view_state(), ViewState::Filtering);
}

#[test]
fn text_edits_are_ignored_while_navigating() {
    let state = send(two_row_state(), &type_text("foo"));
    assert_eq!(state.input().text(), "");
    assert_eq!(state.filtered_len(), 2);
}

#[test]
fn scenario_b_invalid_regex_keeps_previous_rows() {
    let mut events = vec![act(KeyAction::StartRegexFilter)];
    events.extend(type_text("["));
    let state = send(two_row_state(), &events);

    assert_eq!(state.filtered_indices(), [0, 1]);
    assert!(state.is_invalid_pattern());
}

#[test]
fn invalid_regex_keeps_narrowed_rows_and_recovers() {
    let mut events = vec![act(KeyAction::StartRegexFilter)];
    events.extend(type_text("ba"));
    let state = send(two_row_state(), &events);
    assert_eq!(state.filtered_indices(), [1]);

    let state = send(state, &type_text("["));
    assert_eq!(state.filtered_indices(), [1], "'ba[' does not compile");
    assert!(state.is_invalid_pattern());

    let state = send(state, &type_text("r]"));
    assert_eq!(state.filtered_indices(), [1], "'ba[r]' matches bar");
    assert!(!state.is_invalid_pattern());
}

#[test]
fn regex_is_case_sensitive() {
    let mut events = vec![act(KeyAction::StartRegexFilter)];
    events.extend(type_text("foo"));
    let state = send(two_row_state(), &events);
    assert_eq!(state.filtered_len(), 0);
}

// ===== Column pickers =====

#[test]
fn scenario_c_hidden_column_is_still_searched() {
    let events = [
        act(KeyAction::OpenVisibleColumns),
        act(KeyAction::MoveDown),
        act(KeyAction::ToggleItem),
        act(KeyAction::Confirm),
    ];
    let state = send(two_row_state(), &events);
    assert_eq!(state.view_state(), ViewState::Navigating);
    assert_eq!(state.visible_columns(), ["a"]);
    assert_eq!(state.filter_columns(), ["a", "b"]);

    let mut events = vec![act(KeyAction::StartSubstringFilter)];
    events.extend(type_text("2"));
    let state = send(state, &events);
    assert_eq!(filtered_values(&state, "a"), ["bar"]);
}

#[test]
fn toggling_without_commit_leaves_committed_sets_alone() {
    let events = [
        act(KeyAction::OpenVisibleColumns),
        act(KeyAction::ClearAll),
    ];
    let state = send(two_row_state(), &events);
    assert_eq!(state.view_state(), ViewState::SelectingVisibleColumns);
    assert_eq!(state.visible_columns(), ["a", "b"]);

    let events = [
        act(KeyAction::Cancel),
        act(KeyAction::OpenFilterColumns),
        act(KeyAction::ToggleItem),
    ];
    let state = send(state, &events);
    assert_eq!(state.filter_columns(), ["a", "b"]);
}

#[test]
fn cancelled_toggles_persist_in_the_picker() {
    let events = [
        act(KeyAction::OpenVisibleColumns),
        act(KeyAction::ToggleItem),
        act(KeyAction::Cancel),
    ];
    let state = send(two_row_state(), &events);
    assert_eq!(state.visible_columns(), ["a", "b"]);
    assert!(!state.visible_picker().items()[0].selected);

    let state = send(state, &[act(KeyAction::OpenVisibleColumns), act(KeyAction::Confirm)]);
    assert_eq!(state.visible_columns(), ["b"]);
}

#[test]
fn picker_cancel_clears_active_filter() {
    let mut events = vec![act(KeyAction::StartSubstringFilter)];
    events.extend(type_text("bar"));
    events.push(act(KeyAction::Confirm));
    events.push(act(KeyAction::OpenFilterColumns));
    events.push(act(KeyAction::Cancel));
    let state = send(two_row_state(), &events);

    assert_eq!(state.input().text(), "");
    assert_eq!(state.filtered_len(), 2);
}

#[test]
fn filter_picker_commit_recomputes_with_kept_pattern() {
    let mut events = vec![act(KeyAction::StartSubstringFilter)];
    events.extend(type_text("2"));
    events.push(act(KeyAction::Confirm));
    let state = send(two_row_state(), &events);
    assert_eq!(state.filtered_indices(), [1]);

    let events = [
        act(KeyAction::OpenFilterColumns),
        act(KeyAction::MoveDown),
        act(KeyAction::ToggleItem),
        act(KeyAction::Confirm),
    ];
    let state = send(state, &events);
    assert_eq!(state.filter_columns(), ["a"]);
    assert!(state.filtered_indices().is_empty());
}

#[test]
fn pickers_are_independent() {
    let events = [
        act(KeyAction::OpenVisibleColumns),
        act(KeyAction::ClearAll),
        act(KeyAction::Confirm),
    ];
    let state = send(two_row_state(), &events);
    assert!(state.visible_columns().is_empty());
    assert!(state.filter_picker().items().iter().all(|item| item.selected));
}

#[test]
fn select_all_after_clear_all() {
    let events = [
        act(KeyAction::OpenFilterColumns),
        act(KeyAction::ClearAll),
        act(KeyAction::SelectAll),
        act(KeyAction::Confirm),
    ];
    let state = send(two_row_state(), &events);
    assert_eq!(state.filter_columns(), ["a", "b"]);
}

#[test]
fn active_picker_follows_view_state() {
    let state = two_row_state();
    assert!(state.active_picker().is_none());

    let state = send(state, &[act(KeyAction::OpenFilterColumns)]);
    assert!(std::ptr::eq(
        state.active_picker().unwrap(),
        state.filter_picker()
    ));
}

// ===== Viewport =====

#[test]
fn scenario_d_scroll_right_clamps_and_keeps_frozen_column() {
    // 64 cells fit three 20-cell columns.
    let width = 64;
    let mut state = wide_state(5, 3);
    let fit = state.layout().columns_that_fit(width);

    for _ in 0..10 {
        let (next, _) = handle_event(state, act(KeyAction::ScrollRight), width);
        state = next;
        let window = state.viewport().column_window(5, fit);
        assert_eq!(window[0], 0, "frozen column must stay visible");
    }
    assert_eq!(state.viewport().horizontal_offset(), 2);

    let (state, _) = handle_event(state, act(KeyAction::ScrollLeft), width);
    assert_eq!(state.viewport().horizontal_offset(), 1);
}

#[test]
fn hiding_columns_clamps_horizontal_offset() {
    let width = 64;
    let mut state = wide_state(5, 3);
    for _ in 0..2 {
        state = handle_event(state, act(KeyAction::ScrollRight), width).0;
    }
    assert_eq!(state.viewport().horizontal_offset(), 2);

    for action in [
        KeyAction::OpenVisibleColumns,
        KeyAction::MoveDown,
        KeyAction::ToggleItem,
        KeyAction::MoveDown,
        KeyAction::ToggleItem,
        KeyAction::Confirm,
    ] {
        state = handle_event(state, act(action), width).0;
    }
    assert_eq!(state.visible_columns(), ["c1", "c4", "c5"]);
    assert_eq!(state.viewport().horizontal_offset(), 0);
}

#[test]
fn widening_terminal_clamps_offset_and_keeps_cursor() {
    let width = 64;
    let mut state = wide_state(5, 3);
    for action in [KeyAction::ScrollRight, KeyAction::ScrollRight, KeyAction::MoveDown] {
        state = handle_event(state, act(action), width).0;
    }
    assert_eq!(state.viewport().horizontal_offset(), 2);

    state.resize(WIDTH);
    assert_eq!(state.viewport().horizontal_offset(), 0);
    assert_eq!(state.viewport().cursor(), 1);
}

#[test]
fn row_cursor_moves_and_pages() {
    let state = wide_state(2, 45);
    let state = send(state, &[act(KeyAction::MoveDown), act(KeyAction::MoveDown)]);
    assert_eq!(state.viewport().cursor(), 2);

    let state = send(state, &[act(KeyAction::PageDown)]);
    assert_eq!(state.viewport().cursor(), 22);
    assert_eq!(state.page_rows().first().map(|(pos, _)| *pos), Some(20));

    let state = send(state, &[act(KeyAction::LastRow)]);
    assert_eq!(state.viewport().cursor(), 44);
    assert_eq!(state.page_rows().len(), 5);

    let state = send(state, &[act(KeyAction::FirstRow), act(KeyAction::MoveUp)]);
    assert_eq!(state.viewport().cursor(), 0);
}

#[test]
fn short_screen_pages_by_body_rows() {
    let mut state = wide_state(2, 30);
    state.fit_rows(9);
    assert_eq!(state.viewport().page_size(), 9);

    let state = send(state, &[act(KeyAction::PageDown), act(KeyAction::PageDown)]);
    assert_eq!(state.viewport().cursor(), 18);
    let positions: Vec<usize> = state.page_rows().iter().map(|(pos, _)| *pos).collect();
    assert_eq!(positions, (18..27).collect::<Vec<_>>());
}

#[test]
fn tall_screen_keeps_layout_page_size() {
    let mut state = wide_state(2, 30);
    state.fit_rows(9);
    state.fit_rows(200);
    assert_eq!(state.viewport().page_size(), 20);
    state.fit_rows(0);
    assert_eq!(state.viewport().page_size(), 1);
}

#[test]
fn new_filter_result_resets_cursor() {
    let state = send(wide_state(2, 30), &[act(KeyAction::LastRow)]);
    assert_eq!(state.viewport().cursor(), 29);

    let mut events = vec![act(KeyAction::StartSubstringFilter)];
    events.extend(type_text("-1"));
    let state = send(state, &events);
    assert_eq!(state.viewport().cursor(), 0);
    assert_eq!(state.filtered_len(), 11, "-1 and -10..-19");
}

// ===== Help =====

#[test]
fn toggle_help_flips_in_navigation_only() {
    let state = send(two_row_state(), &[act(KeyAction::ToggleHelp)]);
    assert!(state.is_full_help());

    let state = send(state, &[act(KeyAction::ToggleHelp)]);
    assert!(!state.is_full_help());

    let state = send(
        state,
        &[act(KeyAction::OpenVisibleColumns), act(KeyAction::ToggleHelp)],
    );
    assert!(!state.is_full_help());
}
