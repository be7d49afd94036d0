use crossterm::event::{KeyCode, KeyEvent};
use unicode_width::UnicodeWidthStr;

/// Cursor editing for the search field.
///
/// The text itself lives in the page; the editor only tracks the cursor
/// (a byte offset on a char boundary) and applies keys to a copy of the
/// value.
#[derive(Debug, Default)]
pub struct FieldEditor {
    pub cursor_pos: usize,
}

impl FieldEditor {
    /// Keep the cursor inside `text` after it changed elsewhere
    pub fn clamp(&mut self, text: &str) {
        if self.cursor_pos > text.len() {
            self.cursor_pos = text.len();
        }
        while !text.is_char_boundary(self.cursor_pos) {
            self.cursor_pos -= 1;
        }
    }

    /// Display column of the cursor within the field text
    pub fn cursor_column(&self, text: &str) -> u16 {
        text.get(..self.cursor_pos)
            .map(|before| u16::try_from(before.width()).unwrap_or(u16::MAX))
            .unwrap_or(0)
    }

    /// Apply an editing key to `text`. Returns true if the text changed.
    pub fn apply(&mut self, key: KeyEvent, text: &mut String) -> bool {
        self.clamp(text);
        match key.code {
            KeyCode::Char(c) => {
                text.insert(self.cursor_pos, c);
                self.cursor_pos += c.len_utf8();
                true
            }
            KeyCode::Backspace => {
                if self.cursor_pos > 0 {
                    let prev = prev_boundary(text, self.cursor_pos);
                    text.remove(prev);
                    self.cursor_pos = prev;
                    true
                } else {
                    false
                }
            }
            KeyCode::Delete => {
                if self.cursor_pos < text.len() {
                    text.remove(self.cursor_pos);
                    true
                } else {
                    false
                }
            }
            KeyCode::Left => {
                self.cursor_pos = prev_boundary(text, self.cursor_pos);
                false
            }
            KeyCode::Right => {
                if self.cursor_pos < text.len() {
                    self.cursor_pos = text[self.cursor_pos..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor_pos + i)
                        .unwrap_or(text.len());
                }
                false
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                false
            }
            KeyCode::End => {
                self.cursor_pos = text.len();
                false
            }
            _ => false,
        }
    }
}

fn prev_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .last()
        .map(|(i, _)| i)
        .unwrap_or(0)
}
