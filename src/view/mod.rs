//! TUI rendering and terminal management (impure shell)

mod column_picker;
pub mod constants;
mod filter_input;
pub mod help;
mod layout;
pub mod styles;
mod table;

pub use column_picker::ColumnPicker;
pub use filter_input::FilterInput;
pub use layout::{render_browser, table_body_rows};
pub use styles::{ColorConfig, TableStyles};
pub use table::{truncate, ResultTable};

use crate::config::{BindingContext, KeyBindings};
use crate::model::Dataset;
use crate::state::{
    handle_event, BrowserEvent, BrowserState, Effect, TableLayout, TextEdit, ViewState,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    /// Taken out for the duration of each transition.
    state: Option<BrowserState>,
    key_bindings: KeyBindings,
    styles: TableStyles,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        dataset: Dataset,
        layout: TableLayout,
        styles: TableStyles,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(
            terminal,
            BrowserState::new(dataset, layout),
            KeyBindings::default(),
            styles,
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (q or Ctrl+C). Blocks on input; there is
    /// nothing to redraw between key presses.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            match event::read()? {
                Event::Key(key) => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                    self.draw()?;
                }
                Event::Resize(width, height) => {
                    self.handle_resize(width, height);
                    self.draw()?;
                }
                _ => {}
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn with_terminal(
        terminal: Terminal<B>,
        mut state: BrowserState,
        key_bindings: KeyBindings,
        styles: TableStyles,
    ) -> Self {
        let (width, height) = screen_size(&terminal);
        fit_to_screen(&mut state, width, height);

        Self {
            terminal,
            state: Some(state),
            key_bindings,
            styles,
        }
    }

    /// Translate a key press into a browser event for the active view state.
    ///
    /// While filtering, bound keys (Enter, Esc, Ctrl+C) win; other printable
    /// characters are typed into the pattern.
    fn decode_key(&self, key: KeyEvent) -> Option<BrowserEvent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let state = self.state.as_ref()?;

        let context = match state.view_state() {
            ViewState::Navigating => BindingContext::Navigation,
            ViewState::Filtering => BindingContext::Filtering,
            ViewState::SelectingVisibleColumns | ViewState::SelectingFilterColumns => {
                BindingContext::Picker
            }
        };

        if let Some(action) = self.key_bindings.get(context, key) {
            return Some(action.into());
        }

        if context != BindingContext::Filtering {
            return None;
        }

        match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(TextEdit::Insert(ch).into())
            }
            KeyCode::Backspace => Some(TextEdit::Backspace.into()),
            KeyCode::Left => Some(TextEdit::CursorLeft.into()),
            KeyCode::Right => Some(TextEdit::CursorRight.into()),
            _ => None,
        }
    }

    /// Handle a keyboard event.
    ///
    /// Returns true if app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(event) = self.decode_key(key) else {
            return false;
        };
        let (width, height) = screen_size(&self.terminal);
        let Some(state) = self.state.take() else {
            return true;
        };

        let event_width = known_width(width, state.layout());
        let (mut state, effect) = handle_event(state, event, event_width);
        // help may have grown or shrunk
        fit_to_screen(&mut state, width, height);
        self.state = Some(state);
        effect == Effect::Quit
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "Terminal resized");
        if let Some(state) = self.state.as_mut() {
            fit_to_screen(state, width, height);
        }
    }

    fn draw(&mut self) -> Result<(), TuiError> {
        let Some(state) = self.state.as_ref() else {
            return Ok(());
        };
        let styles = &self.styles;
        self.terminal.draw(|frame| render_browser(frame, state, styles))?;
        Ok(())
    }
}

/// Terminal size, or zero when it cannot be queried.
fn screen_size<B: ratatui::backend::Backend>(terminal: &Terminal<B>) -> (u16, u16) {
    match terminal.size() {
        Ok(size) => (size.width, size.height),
        Err(_) => (0, 0),
    }
}

fn known_width(width: u16, layout: &TableLayout) -> u16 {
    if width > 0 {
        width
    } else {
        layout.fallback_width
    }
}

/// Clamp horizontal scroll to `width` and page by the rows the table body
/// can show on a `height`-row screen. An unknown height keeps the layout's
/// page size.
fn fit_to_screen(state: &mut BrowserState, width: u16, height: u16) {
    state.resize(known_width(width, state.layout()));
    let body_rows = if height > 0 {
        table_body_rows(state, height)
    } else {
        state.layout().page_size
    };
    state.fit_rows(body_rows);
}

// ===== Test Helpers =====
//
// These methods expose internal state for testing purposes only.
// DO NOT use these in production code.

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing (test-only constructor)
    pub(crate) fn new_for_test(terminal: Terminal<B>, state: BrowserState) -> Self {
        Self::with_terminal(
            terminal,
            state,
            KeyBindings::default(),
            TableStyles::with_color_config(ColorConfig::fixed(false)),
        )
    }

    pub(crate) fn state(&self) -> &BrowserState {
        self.state.as_ref().expect("state is only taken during a transition")
    }

    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    pub(crate) fn handle_resize_test(&mut self, width: u16, height: u16) {
        self.handle_resize(width, height)
    }

    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Browse `dataset` until the user quits.
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails. Must not be called with an empty dataset;
/// [`Dataset::new`] already refuses one.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_browser(
    dataset: Dataset,
    layout: TableLayout,
    styles: TableStyles,
) -> Result<(), TuiError> {
    info!(
        rows = dataset.len(),
        columns = dataset.columns().len(),
        "Starting result browser"
    );
    let mut app = match TuiApp::new(dataset, layout, styles) {
        Ok(app) => app,
        Err(e) => {
            // raw mode may already be on
            let _ = restore_terminal();
            return Err(e);
        }
    };

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
pub fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
