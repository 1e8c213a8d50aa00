//! Tests for the TUI shell: key decoding, dispatch and drawing.

use super::*;
use crate::model::Row;
use ratatui::backend::TestBackend;

// ===== Test Helpers =====

fn dataset() -> Dataset {
    Dataset::new(
        vec!["id".to_string(), "name".to_string(), "city".to_string()],
        vec![
            Row::from_pairs([("id", "1"), ("name", "Alice"), ("city", "Oslo")]),
            Row::from_pairs([("id", "2"), ("name", "bob"), ("city", "Lima")]),
            Row::from_pairs([("id", "3"), ("name", "carol"), ("city", "Rome")]),
        ],
    )
    .unwrap()
}

fn create_test_app(width: u16, height: u16) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    TuiApp::new_for_test(terminal, BrowserState::new(dataset(), TableLayout::default()))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

fn press(app: &mut TuiApp<TestBackend>, keys: &[KeyEvent]) -> bool {
    keys.iter().any(|&k| app.handle_key_test(k))
}

fn type_str(app: &mut TuiApp<TestBackend>, text: &str) {
    for ch in text.chars() {
        assert!(!app.handle_key_test(key(KeyCode::Char(ch))));
    }
}

fn buffer_to_string(app: &TuiApp<TestBackend>) -> String {
    let buffer = app.terminal().backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        let line: String = (0..buffer.area.width)
            .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

// ===== Tests =====

#[test]
fn tui_error_from_io_error() {
    let io_err = io::Error::other("test error");
    let tui_err: TuiError = io_err.into();
    assert!(matches!(tui_err, TuiError::Io(_)));
}

#[test]
fn q_quits_while_navigating() {
    let mut app = create_test_app(80, 24);
    assert!(app.handle_key_test(key(KeyCode::Char('q'))));
}

#[test]
fn q_is_typed_while_filtering() {
    let mut app = create_test_app(80, 24);
    press(&mut app, &[key(KeyCode::Char('/'))]);
    assert!(!app.handle_key_test(key(KeyCode::Char('q'))));
    assert_eq!(app.state().input().text(), "q");
}

#[test]
fn ctrl_c_quits_from_every_state() {
    for opener in [None, Some('/'), Some('\\'), Some('.'), Some(',')] {
        let mut app = create_test_app(80, 24);
        if let Some(ch) = opener {
            press(&mut app, &[key(KeyCode::Char(ch))]);
        }
        assert!(app.handle_key_test(ctrl('c')), "opener {opener:?}");
    }
}

#[test]
fn q_quits_from_picker() {
    let mut app = create_test_app(80, 24);
    press(&mut app, &[key(KeyCode::Char('.'))]);
    assert!(app.handle_key_test(key(KeyCode::Char('q'))));
}

#[test]
fn typing_filters_rows_live() {
    let mut app = create_test_app(80, 24);
    press(&mut app, &[key(KeyCode::Char('/'))]);
    type_str(&mut app, "li");
    assert_eq!(app.state().filtered_len(), 2, "Alice and Lima");

    press(&mut app, &[key(KeyCode::Backspace)]);
    assert_eq!(app.state().input().text(), "l");
    press(&mut app, &[key(KeyCode::Enter)]);
    assert_eq!(app.state().view_state(), ViewState::Navigating);
    assert_eq!(app.state().input().text(), "l");
}

#[test]
fn arrow_keys_move_edit_cursor_while_filtering() {
    let mut app = create_test_app(80, 24);
    press(&mut app, &[key(KeyCode::Char('/'))]);
    type_str(&mut app, "ac");
    press(&mut app, &[key(KeyCode::Left)]);
    type_str(&mut app, "b");
    assert_eq!(app.state().input().text(), "abc");
}

#[test]
fn esc_clears_filter() {
    let mut app = create_test_app(80, 24);
    press(&mut app, &[key(KeyCode::Char('\\'))]);
    type_str(&mut app, "^b");
    assert_eq!(app.state().filtered_len(), 1);
    press(&mut app, &[key(KeyCode::Esc)]);
    assert_eq!(app.state().filtered_len(), 3);
    assert_eq!(app.state().input().text(), "");
}

#[test]
fn control_chars_are_not_typed() {
    let mut app = create_test_app(80, 24);
    press(&mut app, &[key(KeyCode::Char('/')), ctrl('a')]);
    assert_eq!(app.state().input().text(), "");
}

#[test]
fn shifted_keys_navigate() {
    let mut app = create_test_app(80, 24);
    press(
        &mut app,
        &[KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)],
    );
    assert_eq!(app.state().viewport().cursor(), 2);
}

#[test]
fn key_release_is_ignored() {
    let mut app = create_test_app(80, 24);
    let mut release = key(KeyCode::Char('q'));
    release.kind = KeyEventKind::Release;
    assert!(!app.handle_key_test(release));
}

#[test]
fn picker_keys_commit_visible_columns() {
    let mut app = create_test_app(80, 24);
    press(
        &mut app,
        &[
            key(KeyCode::Char('.')),
            key(KeyCode::Char('j')),
            key(KeyCode::Char(' ')),
            key(KeyCode::Enter),
        ],
    );
    assert_eq!(app.state().visible_columns(), ["id", "city"]);
    assert_eq!(app.state().view_state(), ViewState::Navigating);
}

#[test]
fn picker_clear_and_all() {
    let mut app = create_test_app(80, 24);
    press(&mut app, &[key(KeyCode::Char(',')), key(KeyCode::Char('c'))]);
    assert!(app.state().filter_picker().items().iter().all(|i| !i.selected));
    press(&mut app, &[key(KeyCode::Char('a'))]);
    assert!(app.state().filter_picker().items().iter().all(|i| i.selected));
    press(&mut app, &[key(KeyCode::Esc)]);
    assert_eq!(app.state().view_state(), ViewState::Navigating);
}

#[test]
fn render_shows_filter_bar_and_rows() {
    let mut app = create_test_app(80, 30);
    app.render_test().unwrap();
    let screen = buffer_to_string(&app);
    assert!(screen.starts_with(">  [substring]\n"));
    assert!(screen.contains("Alice"));
    assert!(screen.contains("carol"));
}

#[test]
fn render_after_regex_filter() {
    let mut app = create_test_app(80, 30);
    press(&mut app, &[key(KeyCode::Char('\\'))]);
    type_str(&mut app, "o$");
    app.render_test().unwrap();
    let screen = buffer_to_string(&app);
    assert!(screen.starts_with("> o$  [regex]\n"));
    assert!(screen.contains("Oslo"));
    assert!(!screen.contains("Lima"));
    assert!(!screen.contains("Rome"));
}

#[test]
fn render_marks_invalid_regex() {
    let mut app = create_test_app(80, 30);
    press(&mut app, &[key(KeyCode::Char('\\'))]);
    type_str(&mut app, "(");
    app.render_test().unwrap();
    let screen = buffer_to_string(&app);
    assert!(screen.lines().next().unwrap().ends_with("invalid regex"));
    assert!(screen.contains("Alice"), "previous rows are kept");
}

#[test]
fn narrow_terminal_scrolls_with_frozen_id_column() {
    // 43 cells fit two 20-cell columns: id + one scrollable column
    let mut app = create_test_app(43, 30);
    press(&mut app, &[key(KeyCode::Char('l'))]);
    app.render_test().unwrap();
    let screen = buffer_to_string(&app);
    assert!(screen.contains("Oslo"));
    assert!(!screen.contains("Alice"));

    press(&mut app, &[key(KeyCode::Char('l'))]);
    assert_eq!(app.state().viewport().horizontal_offset(), 1);
}

#[test]
fn resize_reclamps_horizontal_offset() {
    let mut app = create_test_app(43, 30);
    press(&mut app, &[key(KeyCode::Char('l'))]);
    assert_eq!(app.state().viewport().horizontal_offset(), 1);
    app.handle_resize_test(120, 30);
    assert_eq!(app.state().viewport().horizontal_offset(), 0);
}

// ===== Short Terminals =====

fn create_long_app(rows: usize, width: u16, height: u16) -> TuiApp<TestBackend> {
    let data = (0..rows)
        .map(|r| Row::from_pairs([("id", r.to_string()), ("label", format!("row{r:02}"))]))
        .collect();
    let dataset = Dataset::new(vec!["id".to_string(), "label".to_string()], data).unwrap();
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    TuiApp::new_for_test(terminal, BrowserState::new(dataset, TableLayout::default()))
}

fn assert_cursor_row_drawn(app: &mut TuiApp<TestBackend>) {
    app.render_test().unwrap();
    let screen = buffer_to_string(app);
    let label = format!("row{:02}", app.state().viewport().cursor());
    assert!(screen.contains(&label), "{label} missing:\n{screen}");
}

#[test]
fn every_row_is_drawn_on_standard_terminal() {
    let mut app = create_long_app(30, 80, 24);
    assert_eq!(app.state().viewport().page_size(), 19);

    assert_cursor_row_drawn(&mut app);
    for _ in 0..29 {
        press(&mut app, &[key(KeyCode::Down)]);
        assert_cursor_row_drawn(&mut app);
    }
}

#[test]
fn twentieth_row_starts_second_page() {
    let mut app = create_long_app(30, 80, 24);
    for _ in 0..19 {
        press(&mut app, &[key(KeyCode::Down)]);
    }
    app.render_test().unwrap();
    let screen = buffer_to_string(&app);
    assert!(screen.contains("row19"));
    assert!(!screen.contains("row18"));
    assert!(screen.contains("page 2/2 · 30/30 rows"), "{screen}");
}

#[test]
fn tiny_terminal_keeps_cursor_row_visible() {
    let mut app = create_long_app(30, 60, 14);
    for _ in 0..12 {
        press(&mut app, &[key(KeyCode::Char('j'))]);
    }
    assert_cursor_row_drawn(&mut app);
    press(&mut app, &[key(KeyCode::PageDown)]);
    assert_cursor_row_drawn(&mut app);
    press(&mut app, &[key(KeyCode::Char('G'))]);
    assert_cursor_row_drawn(&mut app);
}

#[test]
fn full_help_shrinks_page_until_closed() {
    let mut app = create_long_app(30, 80, 24);
    press(&mut app, &[key(KeyCode::Char('?'))]);
    assert_eq!(app.state().viewport().page_size(), 14);
    for _ in 0..29 {
        press(&mut app, &[key(KeyCode::Down)]);
        assert_cursor_row_drawn(&mut app);
    }

    press(&mut app, &[key(KeyCode::Char('?'))]);
    assert_eq!(app.state().viewport().page_size(), 19);
    assert_cursor_row_drawn(&mut app);
}

#[test]
fn resize_refits_page_to_height() {
    let mut app = create_long_app(30, 80, 40);
    assert_eq!(app.state().viewport().page_size(), 20);

    app.handle_resize_test(80, 24);
    assert_eq!(app.state().viewport().page_size(), 19);
    app.handle_resize_test(80, 0);
    assert_eq!(app.state().viewport().page_size(), 20);
}
