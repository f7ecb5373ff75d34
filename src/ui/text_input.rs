use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Editable text buffer shared by the single-line and multi-line fields.
/// Cursor position is a char index (0 = before first char); all mutation
/// goes through byte-offset mapping so multibyte input stays intact.
#[derive(Clone, Debug, Default)]
struct EditBuffer {
    text: String,
    cursor: usize,
}

impl EditBuffer {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn insert(&mut self, ch: char) {
        let byte_offset = self.char_to_byte(self.cursor);
        self.text.insert(byte_offset, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let byte_offset = self.char_to_byte(self.cursor - 1);
        let ch = self.text[byte_offset..].chars().next().unwrap();
        self.text
            .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
        self.cursor -= 1;
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor >= self.text.chars().count() {
            return false;
        }
        let byte_offset = self.char_to_byte(self.cursor);
        let ch = self.text[byte_offset..].chars().next().unwrap();
        self.text
            .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
        true
    }

    /// Delete word before cursor (unix-word-rubout: skip whitespace, then
    /// non-whitespace).
    fn delete_word_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;

        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }

        let start_byte = self.char_to_byte(pos);
        let end_byte = self.char_to_byte(self.cursor);
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = pos;
        true
    }

    /// Shared movement/edit handling. Returns Some(changed) when the key was
    /// consumed, None when the caller should handle it.
    fn handle_common(&mut self, key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                Some(false)
            }
            KeyCode::Right => {
                if self.cursor < self.text.chars().count() {
                    self.cursor += 1;
                }
                Some(false)
            }
            KeyCode::Home => {
                self.cursor = 0;
                Some(false)
            }
            KeyCode::End => {
                self.cursor = self.text.chars().count();
                Some(false)
            }
            KeyCode::Backspace => Some(self.backspace()),
            KeyCode::Delete => Some(self.delete()),
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = 0;
                Some(false)
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = self.text.chars().count();
                Some(false)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let changed = !self.text.is_empty();
                self.text.clear();
                self.cursor = 0;
                Some(changed)
            }
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(self.delete_word_back())
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert(ch);
                Some(true)
            }
            _ => None,
        }
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for styled
    /// rendering. When cursor is at end of text, cursor_char is None.
    fn render_parts(&self) -> (&str, Option<char>, &str) {
        let byte_offset = self.char_to_byte(self.cursor);
        if self.cursor >= self.text.chars().count() {
            (&self.text, None, "")
        } else {
            let ch = self.text[byte_offset..].chars().next().unwrap();
            let next_byte = byte_offset + ch.len_utf8();
            (&self.text[..byte_offset], Some(ch), &self.text[next_byte..])
        }
    }
}

/// Single-line field (retype word, bounds, note title).
#[derive(Clone, Debug, Default)]
pub struct LineInput {
    buf: EditBuffer,
}

impl LineInput {
    pub fn new(text: &str) -> Self {
        Self {
            buf: EditBuffer::new(text),
        }
    }

    pub fn value(&self) -> &str {
        &self.buf.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.buf.set_text(text);
    }

    pub fn clear(&mut self) {
        self.buf.set_text("");
    }

    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        self.buf.render_parts()
    }

    /// Returns true if the text content changed.
    pub fn handle(&mut self, key: KeyEvent) -> bool {
        self.buf.handle_common(key).unwrap_or(false)
    }
}

/// Multi-line field for the practice text; Enter inserts a newline.
#[derive(Clone, Debug, Default)]
pub struct TextArea {
    buf: EditBuffer,
}

impl TextArea {
    pub fn new(text: &str) -> Self {
        Self {
            buf: EditBuffer::new(text),
        }
    }

    pub fn value(&self) -> &str {
        &self.buf.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.buf.set_text(text);
    }

    pub fn clear(&mut self) {
        self.buf.set_text("");
    }

    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        self.buf.render_parts()
    }

    /// Returns true if the text content changed.
    pub fn handle(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Enter {
            self.buf.insert('\n');
            return true;
        }
        self.buf.handle_common(key).unwrap_or(false)
    }
}
