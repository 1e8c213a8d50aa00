//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`,
/// which keeps one table per input context (table navigation, column picker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Row and column movement
    /// Move the row cursor (or picker cursor) up one. Default: k/↑
    MoveUp,
    /// Move the row cursor (or picker cursor) down one. Default: j/↓
    MoveDown,
    /// Scroll the non-frozen columns one column left. Default: h/←
    ScrollLeft,
    /// Scroll the non-frozen columns one column right. Default: l/→
    ScrollRight,
    /// Jump the row cursor one page up. Default: Page Up
    PageUp,
    /// Jump the row cursor one page down. Default: Page Down
    PageDown,
    /// Jump to the first filtered row. Default: g/Home
    FirstRow,
    /// Jump to the last filtered row. Default: G/End
    LastRow,

    // Filtering
    /// Enter filtering mode with case-insensitive substring matching. Default: /
    StartSubstringFilter,
    /// Enter filtering mode with regular-expression matching. Default: \
    StartRegexFilter,

    // Column pickers
    /// Open the picker controlling which columns are rendered. Default: .
    OpenVisibleColumns,
    /// Open the picker controlling which columns are searched. Default: ,
    OpenFilterColumns,
    /// Flip the selection of the picker item under the cursor. Default: Space
    ToggleItem,
    /// Select every picker item. Default: a
    SelectAll,
    /// Deselect every picker item. Default: c
    ClearAll,

    // Context-dependent
    /// Apply the filter or commit the picker selection. Default: Enter
    Confirm,
    /// Clear the filter or cancel the picker. Default: Esc
    Cancel,

    // Application
    /// Flip between short and full help. Default: ?
    ToggleHelp,
    /// Exit the browser. Default: q (Ctrl+C works in every state)
    Quit,
}
