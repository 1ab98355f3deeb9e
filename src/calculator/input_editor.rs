//! The expression field: a text buffer and a cursor.
//!
//! The cursor is counted in characters, not bytes, and always satisfies
//! `0 <= cursor <= len`.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputEditor {
    buffer: String,
    cursor: usize,
}

impl InputEditor {
    pub fn new() -> Self {
        InputEditor::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// length in characters
    pub fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_offset)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    /// Keyboard typing: insert `text` at the cursor and move the cursor past all of it.
    pub fn type_at_cursor(&mut self, text: &str) {
        let at = self.byte_offset(self.cursor);
        self.buffer.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// Keypad insertion: insert a key label at the cursor.
    ///
    /// A single character moves the cursor past it. A longer key label such as
    /// `sin()` leaves the cursor in front of its last character, i.e. between
    /// the parentheses, so the argument can be typed right away.
    pub fn insert_at_cursor(&mut self, text: &str) {
        let inserted = text.chars().count();
        if inserted == 0 {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.buffer.insert_str(at, text);
        self.cursor += if inserted > 1 { inserted - 1 } else { 1 };
    }

    /// Remove the character in front of the cursor. Returns whether anything was removed.
    ///
    /// Nothing happens on an empty buffer or with the cursor at the very start.
    pub fn delete_one_before_cursor(&mut self) -> bool {
        if self.buffer.is_empty() || self.cursor == 0 {
            return false;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.buffer.remove(at);
        self.cursor -= 1;
        true
    }

    pub fn clear_all(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Put the cursor at `offset`, clamped to the buffer length.
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.len());
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.set_cursor(self.cursor + 1);
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    /// The buffer with a `|` marking the cursor, as printed by the terminal front end.
    pub fn display_with_cursor(&self) -> String {
        let at = self.byte_offset(self.cursor);
        format!("{}|{}", &self.buffer[..at], &self.buffer[at..])
    }
}

#[cfg(test)]
impl InputEditor {
    /// Editor holding `text` with the cursor at its end.
    pub fn with_text(text: &str) -> Self {
        InputEditor {
            buffer: text.to_string(),
            cursor: text.chars().count(),
        }
    }
}
