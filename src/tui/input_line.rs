//! Single-line verse input with cursor.
//!
//! Stores a `String` and a character-offset cursor. A verse reference is
//! one line, so pasted line breaks become spaces. Handles insert, delete,
//! move, and clipboard paste (via `arboard`).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A single-line text buffer with cursor position (character offset).
#[derive(Debug, Default)]
pub struct InputLine {
    content: String,
    /// Cursor position as a character offset (0 = before first char).
    cursor: usize,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Set content and move cursor to end.
    pub fn set_content(&mut self, text: &str) {
        self.content = single_line(text);
        self.cursor = self.content.chars().count();
    }

    /// Insert a character at the cursor position. Control characters are
    /// dropped.
    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let byte_offset = self.byte_offset();
        self.content.insert(byte_offset, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position, flattening line breaks.
    pub fn insert_str(&mut self, s: &str) {
        let clean = single_line(s);
        let byte_offset = self.byte_offset();
        self.content.insert_str(byte_offset, &clean);
        self.cursor += clean.chars().count();
    }

    /// Delete the character before the cursor (Backspace).
    pub fn delete_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.remove_at_cursor();
    }

    /// Delete the character at the cursor (Delete key).
    pub fn delete_forward(&mut self) {
        self.remove_at_cursor();
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.content.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.chars().count();
    }

    /// Delete the word before the cursor (Ctrl+Backspace / Ctrl+W).
    pub fn delete_word_back(&mut self) {
        let chars: Vec<char> = self.content.chars().collect();
        let mut pos = self.cursor;
        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        let start_byte = self.char_to_byte(pos);
        let end_byte = self.byte_offset();
        self.content.replace_range(start_byte..end_byte, "");
        self.cursor = pos;
    }

    /// Delete from the start of the line to the cursor (Ctrl+U).
    pub fn delete_to_start(&mut self) {
        let end_byte = self.byte_offset();
        self.content.replace_range(..end_byte, "");
        self.cursor = 0;
    }

    /// Paste from system clipboard (Ctrl+V).
    pub fn paste_clipboard(&mut self) {
        match arboard::Clipboard::new().and_then(|mut clip| clip.get_text()) {
            Ok(text) => self.insert_str(&text),
            Err(e) => tracing::debug!("clipboard paste unavailable: {e}"),
        }
    }

    /// Handle an editing key. Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('v') if ctrl => self.paste_clipboard(),
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Char('u') if ctrl => self.delete_to_start(),
            KeyCode::Backspace if ctrl => self.delete_word_back(),
            KeyCode::Char(_) if ctrl => return false,
            KeyCode::Char(ch) => self.insert_char(ch),
            KeyCode::Backspace => self.delete_back(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    // ── Internal helpers ──

    fn remove_at_cursor(&mut self) {
        let byte_offset = self.byte_offset();
        if let Some(ch) = self.content[byte_offset..].chars().next() {
            self.content
                .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
        }
    }

    fn byte_offset(&self) -> usize {
        self.char_to_byte(self.cursor)
    }

    fn char_to_byte(&self, char_pos: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}

/// Replace line breaks and tabs with spaces.
fn single_line(s: &str) -> String {
    s.replace("\r\n", " ")
        .chars()
        .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect()
}
