//! Single-line text input.

use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Default)]
pub struct TextField {
    text: String,
}

impl TextField {
    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn insert_char(&mut self, c: char) {
        if !c.is_control() {
            self.text.push(c);
        }
    }

    pub fn insert_str(&mut self, s: &str) {
        self.text.extend(s.chars().filter(|c| !c.is_control()));
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Terminal columns occupied by the text, for cursor placement.
    pub fn display_width(&self) -> u16 {
        u16::try_from(self.text.width()).unwrap_or(u16::MAX)
    }

    /// The text with every character replaced by `mask`.
    pub fn masked(&self, mask: char) -> String {
        self.text.chars().map(|_| mask).collect()
    }
}
