use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthChar;

/// Single-line query input with cursor editing.
///
/// Owns the query string the filter derives from. `input` reports whether
/// the text changed so callers know when to re-derive; pure cursor movement
/// does not count as a change.
#[derive(Debug, Clone, Default)]
pub struct QueryInput {
    value: String,
    cursor: usize,
}

impl QueryInput {
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        let value = initial.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    /// Current query text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.value
    }

    /// Apply a key event; returns true when the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear_to_start()
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert(ch);
                true
            }
            KeyCode::Backspace => self.delete_before_cursor(),
            KeyCode::Delete => self.delete_at_cursor(),
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                if self.cursor < self.char_len() {
                    self.cursor += 1;
                }
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                false
            }
            _ => false,
        }
    }

    /// Render the text and place the terminal cursor, scrolling the window
    /// horizontally so the cursor stays visible in narrow areas.
    pub fn render(&self, frame: &mut Frame, area: Rect, style: Style) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let chars: Vec<char> = self.value.chars().collect();
        let mut window_start = 0;
        while window_start < self.cursor
            && display_width(&chars[window_start..self.cursor]) >= area.width
        {
            window_start += 1;
        }

        let visible: String = chars[window_start..].iter().collect();
        frame.render_widget(Paragraph::new(visible).style(style), area);

        let cursor_x = area.x + display_width(&chars[window_start..self.cursor]);
        frame.set_cursor_position(Position::new(cursor_x.min(area.right().saturating_sub(1)), area.y));
    }

    fn insert(&mut self, ch: char) {
        let offset = self.byte_offset(self.cursor);
        self.value.insert(offset, ch);
        self.cursor += 1;
    }

    fn delete_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.byte_offset(self.cursor - 1);
        let end = self.byte_offset(self.cursor);
        self.value.replace_range(start..end, "");
        self.cursor -= 1;
        true
    }

    fn delete_at_cursor(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let start = self.byte_offset(self.cursor);
        let end = self.byte_offset(self.cursor + 1);
        self.value.replace_range(start..end, "");
        true
    }

    fn clear_to_start(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let end = self.byte_offset(self.cursor);
        self.value.replace_range(0..end, "");
        self.cursor = 0;
        true
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(offset, _)| offset)
    }
}

fn display_width(chars: &[char]) -> u16 {
    chars
        .iter()
        .map(|ch| ch.width().unwrap_or(0) as u16)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn typing_appends_at_the_cursor() {
        let mut input = QueryInput::default();
        assert!(input.input(key(KeyCode::Char('d'))));
        assert!(input.input(key(KeyCode::Char('o'))));
        assert_eq!(input.text(), "do");
    }

    #[test]
    fn editing_in_the_middle_respects_the_cursor() {
        let mut input = QueryInput::new("doge");
        input.input(key(KeyCode::Left));
        input.input(key(KeyCode::Left));
        assert!(input.input(key(KeyCode::Char('!'))));
        assert_eq!(input.text(), "do!ge");

        assert!(input.input(key(KeyCode::Backspace)));
        assert_eq!(input.text(), "doge");
    }

    #[test]
    fn cursor_movement_is_not_a_text_change() {
        let mut input = QueryInput::new("drake");
        assert!(!input.input(key(KeyCode::Left)));
        assert!(!input.input(key(KeyCode::Home)));
        assert!(!input.input(key(KeyCode::End)));
        assert_eq!(input.text(), "drake");
    }

    #[test]
    fn delete_removes_under_the_cursor() {
        let mut input = QueryInput::new("ab");
        input.input(key(KeyCode::Home));
        assert!(input.input(key(KeyCode::Delete)));
        assert_eq!(input.text(), "b");
    }

    #[test]
    fn ctrl_u_clears_to_line_start() {
        let mut input = QueryInput::new("distracted");
        assert!(input.input(ctrl('u')));
        assert_eq!(input.text(), "");
        assert!(!input.input(ctrl('u')));
    }

    #[test]
    fn multibyte_input_keeps_byte_offsets_straight() {
        let mut input = QueryInput::new("mémé");
        input.input(key(KeyCode::Left));
        assert!(input.input(key(KeyCode::Backspace)));
        assert_eq!(input.text(), "mém");
    }
}
