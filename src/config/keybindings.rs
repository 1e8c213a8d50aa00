//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Input context a key is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingContext {
    /// Moving around the result table.
    Navigation,
    /// A column picker is open.
    Picker,
    /// A filter pattern is being typed. Only non-text keys are bound here.
    Filtering,
}

/// Maps keyboard events to domain actions, one table per context.
///
/// Provides default vim-style bindings. Ctrl+C is bound to
/// [`KeyAction::Quit`] in every context.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    navigation: HashMap<KeyEvent, KeyAction>,
    picker: HashMap<KeyEvent, KeyAction>,
    filtering: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event in `context`.
    ///
    /// Shifted characters also match a binding registered without SHIFT,
    /// since terminals disagree on whether they report the modifier.
    pub fn get(&self, context: BindingContext, key: KeyEvent) -> Option<KeyAction> {
        let table = match context {
            BindingContext::Navigation => &self.navigation,
            BindingContext::Picker => &self.picker,
            BindingContext::Filtering => &self.filtering,
        };

        let key = KeyEvent::new(key.code, key.modifiers);
        table.get(&key).copied().or_else(|| {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                let unshifted = KeyEvent::new(key.code, key.modifiers - KeyModifiers::SHIFT);
                table.get(&unshifted).copied()
            } else {
                None
            }
        })
    }
}

fn bind(table: &mut HashMap<KeyEvent, KeyAction>, code: KeyCode, action: KeyAction) {
    table.insert(KeyEvent::new(code, KeyModifiers::NONE), action);
}

impl Default for KeyBindings {
    fn default() -> Self {
        let interrupt = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        let mut navigation = HashMap::new();

        // Application controls
        bind(&mut navigation, KeyCode::Char('q'), KeyAction::Quit);
        bind(&mut navigation, KeyCode::Char('?'), KeyAction::ToggleHelp);

        // Filters
        bind(&mut navigation, KeyCode::Char('/'), KeyAction::StartSubstringFilter);
        bind(&mut navigation, KeyCode::Char('\\'), KeyAction::StartRegexFilter);

        // Column pickers
        bind(&mut navigation, KeyCode::Char('.'), KeyAction::OpenVisibleColumns);
        bind(&mut navigation, KeyCode::Char(','), KeyAction::OpenFilterColumns);

        // Vim-style movement
        bind(&mut navigation, KeyCode::Char('k'), KeyAction::MoveUp);
        bind(&mut navigation, KeyCode::Char('j'), KeyAction::MoveDown);
        bind(&mut navigation, KeyCode::Char('h'), KeyAction::ScrollLeft);
        bind(&mut navigation, KeyCode::Char('l'), KeyAction::ScrollRight);
        bind(&mut navigation, KeyCode::Char('g'), KeyAction::FirstRow);
        bind(&mut navigation, KeyCode::Char('G'), KeyAction::LastRow);

        // Arrow and page keys
        bind(&mut navigation, KeyCode::Up, KeyAction::MoveUp);
        bind(&mut navigation, KeyCode::Down, KeyAction::MoveDown);
        bind(&mut navigation, KeyCode::Left, KeyAction::ScrollLeft);
        bind(&mut navigation, KeyCode::Right, KeyAction::ScrollRight);
        bind(&mut navigation, KeyCode::PageUp, KeyAction::PageUp);
        bind(&mut navigation, KeyCode::PageDown, KeyAction::PageDown);
        bind(&mut navigation, KeyCode::Home, KeyAction::FirstRow);
        bind(&mut navigation, KeyCode::End, KeyAction::LastRow);

        navigation.insert(interrupt, KeyAction::Quit);

        let mut picker = HashMap::new();
        bind(&mut picker, KeyCode::Char('k'), KeyAction::MoveUp);
        bind(&mut picker, KeyCode::Char('j'), KeyAction::MoveDown);
        bind(&mut picker, KeyCode::Up, KeyAction::MoveUp);
        bind(&mut picker, KeyCode::Down, KeyAction::MoveDown);
        bind(&mut picker, KeyCode::Char(' '), KeyAction::ToggleItem);
        bind(&mut picker, KeyCode::Char('a'), KeyAction::SelectAll);
        bind(&mut picker, KeyCode::Char('c'), KeyAction::ClearAll);
        bind(&mut picker, KeyCode::Enter, KeyAction::Confirm);
        bind(&mut picker, KeyCode::Esc, KeyAction::Cancel);
        bind(&mut picker, KeyCode::Char('q'), KeyAction::Quit);
        picker.insert(interrupt, KeyAction::Quit);

        let mut filtering = HashMap::new();
        bind(&mut filtering, KeyCode::Enter, KeyAction::Confirm);
        bind(&mut filtering, KeyCode::Esc, KeyAction::Cancel);
        filtering.insert(interrupt, KeyAction::Quit);

        Self {
            navigation,
            picker,
            filtering,
        }
    }
}
