use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Editable text with a cursor measured in chars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.len();
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let at = self.byte_index(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    fn line_start(&self, cursor: usize) -> usize {
        self.text
            .chars()
            .take(cursor)
            .collect::<Vec<_>>()
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1)
    }

    fn line_end(&self, cursor: usize) -> usize {
        self.text
            .chars()
            .skip(cursor)
            .position(|c| c == '\n')
            .map_or(self.len(), |i| cursor + i)
    }

    pub fn home(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    pub fn end(&mut self) {
        self.cursor = self.line_end(self.cursor);
    }

    /// Move to the same column on the previous logical line.
    pub fn up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            self.cursor = 0;
            return;
        }
        let column = self.cursor - start;
        let prev_start = self.line_start(start - 1);
        let prev_len = start - 1 - prev_start;
        self.cursor = prev_start + column.min(prev_len);
    }

    /// Move to the same column on the next logical line.
    pub fn down(&mut self) {
        let column = self.cursor - self.line_start(self.cursor);
        let end = self.line_end(self.cursor);
        if end >= self.len() {
            self.cursor = self.len();
            return;
        }
        let next_start = end + 1;
        let next_len = self.line_end(next_start) - next_start;
        self.cursor = next_start + column.min(next_len);
    }

    /// Apply a single-line editing key. Returns true if the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert(c);
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.left();
                false
            }
            KeyCode::Right => {
                self.right();
                false
            }
            KeyCode::Home => {
                self.home();
                false
            }
            KeyCode::End => {
                self.end();
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut buffer = TextBuffer::default();
        buffer.insert('H');
        buffer.insert('i');
        assert_eq!(buffer.text(), "Hi");
        assert!(buffer.backspace());
        assert_eq!(buffer.text(), "H");
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut buffer = TextBuffer::new("abc");
        buffer.home();
        assert!(!buffer.backspace());
        assert_eq!(buffer.text(), "abc");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut buffer = TextBuffer::new("héllo");
        buffer.left();
        buffer.left();
        buffer.left();
        buffer.insert('x');
        assert_eq!(buffer.text(), "héxllo");
        assert!(buffer.backspace());
        assert!(buffer.backspace());
        assert_eq!(buffer.text(), "hllo");
        assert!(buffer.delete());
        assert_eq!(buffer.text(), "hlo");
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut buffer = TextBuffer::new("ab");
        buffer.right();
        assert_eq!(buffer.cursor(), 2);
        buffer.left();
        buffer.left();
        buffer.left();
        assert_eq!(buffer.cursor(), 0);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_vertical_movement_keeps_column() {
        let mut buffer = TextBuffer::new("first line\nab\nthird line");
        buffer.up();
        assert_eq!(buffer.cursor(), 13);
        buffer.up();
        assert_eq!(buffer.cursor(), 2);
        buffer.down();
        assert_eq!(buffer.cursor(), 13);
        buffer.down();
        assert_eq!(buffer.cursor(), 16);
        buffer.down();
        assert_eq!(buffer.cursor(), buffer.len());
    }

    #[test]
    fn test_home_and_end_per_line() {
        let mut buffer = TextBuffer::new("one\ntwo");
        buffer.home();
        assert_eq!(buffer.cursor(), 4);
        buffer.up();
        buffer.end();
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_handle_key_reports_changes() {
        let mut buffer = TextBuffer::default();
        assert!(buffer.handle_key(key(KeyCode::Char('a'))));
        assert!(!buffer.handle_key(key(KeyCode::Left)));
        assert!(!buffer.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert_eq!(buffer.text(), "a");
    }
}
