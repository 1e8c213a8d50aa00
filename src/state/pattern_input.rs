//! Filter pattern input (pure state transitions).
//!
//! Holds the pattern text being typed and an edit cursor counted in
//! characters. All functions consume the input and return the updated value.

/// Pattern text plus edit cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatternInput {
    text: String,
    cursor: usize,
}

/// Maximum pattern length in characters.
pub const PATTERN_CHAR_LIMIT: usize = 128;

impl PatternInput {
    /// Current pattern text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters, `0..=text.chars().count()`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }
}

/// Insert `ch` at the cursor and advance the cursor.
///
/// Ignored once the pattern holds [`PATTERN_CHAR_LIMIT`] characters.
pub fn handle_char_input(mut input: PatternInput, ch: char) -> PatternInput {
    if input.char_len() >= PATTERN_CHAR_LIMIT {
        return input;
    }
    let at = input.byte_index(input.cursor);
    input.text.insert(at, ch);
    input.cursor += 1;
    input
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(mut input: PatternInput) -> PatternInput {
    if input.cursor == 0 {
        return input;
    }
    let at = input.byte_index(input.cursor - 1);
    input.text.remove(at);
    input.cursor -= 1;
    input
}

/// Move the cursor one character left, saturating at 0.
pub fn handle_cursor_left(mut input: PatternInput) -> PatternInput {
    input.cursor = input.cursor.saturating_sub(1);
    input
}

/// Move the cursor one character right, saturating at the end.
pub fn handle_cursor_right(mut input: PatternInput) -> PatternInput {
    input.cursor = (input.cursor + 1).min(input.char_len());
    input
}

/// Empty the pattern and reset the cursor.
pub fn clear(_input: PatternInput) -> PatternInput {
    PatternInput::default()
}
