//! Single-line text buffer with a cursor.

use super::Key;

/// Editable text with a byte-offset cursor kept on char boundaries.
///
/// When `selected_all` is set, the next insertion replaces the whole text
/// and the next deletion clears it, the way a freshly focused input with its
/// text selected behaves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
    selected_all: bool,
}

impl TextBuffer {
    /// Create a buffer with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self {
            text,
            cursor,
            selected_all: false,
        }
    }

    /// Select the whole text.
    pub fn select_all(mut self) -> Self {
        self.selected_all = !self.text.is_empty();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_selected_all(&self) -> bool {
        self.selected_all
    }

    /// Replace the text, cursor to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
        self.selected_all = false;
    }

    /// Apply an editing key. Returns `true` if the text changed.
    ///
    /// Keys that do not edit text (Enter, Escape, Tab, Up, Down) are ignored.
    pub fn apply(&mut self, key: Key) -> bool {
        match key {
            Key::Char(c) => {
                self.insert_char(c);
                true
            }
            Key::Space => {
                self.insert_char(' ');
                true
            }
            Key::Backspace => self.delete_char_before(),
            Key::Delete => self.delete_char_at(),
            Key::Left => {
                self.cursor_left();
                false
            }
            Key::Right => {
                self.cursor_right();
                false
            }
            Key::Home => {
                self.selected_all = false;
                self.cursor = 0;
                false
            }
            Key::End => {
                self.selected_all = false;
                self.cursor = self.text.len();
                false
            }
            _ => false,
        }
    }

    fn take_selection(&mut self) -> bool {
        if self.selected_all {
            self.text.clear();
            self.cursor = 0;
            self.selected_all = false;
            true
        } else {
            false
        }
    }

    fn insert_char(&mut self, c: char) {
        self.take_selection();
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn delete_char_before(&mut self) -> bool {
        if self.take_selection() {
            return true;
        }
        if self.cursor == 0 {
            return false;
        }
        let prev = self.text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.text.remove(prev);
        self.cursor = prev;
        true
    }

    fn delete_char_at(&mut self) -> bool {
        if self.take_selection() {
            return true;
        }
        if self.cursor >= self.text.len() {
            return false;
        }
        self.text.remove(self.cursor);
        true
    }

    fn cursor_left(&mut self) {
        if self.selected_all {
            self.selected_all = false;
            self.cursor = 0;
            return;
        }
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    fn cursor_right(&mut self) {
        if self.selected_all {
            self.selected_all = false;
            self.cursor = self.text.len();
            return;
        }
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }
}
