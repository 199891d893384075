//! Responsive card grid for the populated view.
//!
//! Cards flow left-to-right, top-to-bottom in collection order. The column
//! count follows the terminal width, and only the rows scrolled into view
//! are laid out. Each card shows the image URL above the name caption; the
//! terminal cannot decode the remote bitmap itself.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::theme::Theme;
use crate::types::TemplateRecord;

/// Rendered height of one card row: border plus URL and caption lines.
pub const CARD_HEIGHT: u16 = 4;
/// Narrowest card worth drawing; the column count derives from this.
const CARD_MIN_WIDTH: u16 = 24;

/// Selection and scroll position of the grid.
///
/// `columns` is refreshed on every render pass so key handling can move the
/// selection row-wise with the layout the user actually sees.
#[derive(Debug, Clone)]
pub struct GridState {
    selected: Option<usize>,
    row_offset: usize,
    columns: usize,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            selected: Some(0),
            row_offset: 0,
            columns: 1,
        }
    }
}

impl GridState {
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Move the highlight to the previous card.
    pub fn move_previous(&mut self) {
        if let Some(selected) = self.selected
            && selected > 0
        {
            self.selected = Some(selected - 1);
        }
    }

    /// Move the highlight to the next card.
    pub fn move_next(&mut self, len: usize) {
        if let Some(selected) = self.selected
            && selected + 1 < len
        {
            self.selected = Some(selected + 1);
        }
    }

    /// Move the highlight one row up.
    pub fn move_up(&mut self) {
        if let Some(selected) = self.selected {
            self.selected = Some(selected.saturating_sub(self.columns));
        }
    }

    /// Move the highlight one row down, clamping to the last card.
    pub fn move_down(&mut self, len: usize) {
        if let Some(selected) = self.selected
            && len > 0
            && selected < len - 1
        {
            self.selected = Some((selected + self.columns).min(len - 1));
        }
    }

    /// Reconcile the highlight with the current result length.
    pub fn ensure_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
        } else if self.selected.is_none() {
            self.selected = Some(0);
        } else if let Some(selected) = self.selected
            && selected >= len
        {
            self.selected = Some(len - 1);
        }
    }

    fn ensure_visible(&mut self, total_rows: usize, visible_rows: usize) {
        let selected_row = self.selected.map_or(0, |selected| selected / self.columns);
        if selected_row < self.row_offset {
            self.row_offset = selected_row;
        } else if selected_row >= self.row_offset + visible_rows {
            self.row_offset = selected_row + 1 - visible_rows;
        }
        self.row_offset = self
            .row_offset
            .min(total_rows.saturating_sub(visible_rows));
    }
}

/// Render the filtered templates as a card grid.
pub fn render_grid(
    frame: &mut Frame,
    area: Rect,
    state: &mut GridState,
    filtered: &[usize],
    templates: &[TemplateRecord],
    theme: &Theme,
) {
    if area.width == 0 || area.height == 0 || filtered.is_empty() {
        return;
    }

    state.columns = ((area.width / CARD_MIN_WIDTH).max(1)) as usize;
    let visible_rows = ((area.height / CARD_HEIGHT).max(1)) as usize;
    let total_rows = filtered.len().div_ceil(state.columns);
    state.ensure_visible(total_rows, visible_rows);

    let column_constraints =
        vec![Constraint::Ratio(1, state.columns as u32); state.columns];

    let last_row = total_rows.min(state.row_offset + visible_rows);
    for (screen_row, row) in (state.row_offset..last_row).enumerate() {
        let row_area = Rect {
            x: area.x,
            y: area.y + screen_row as u16 * CARD_HEIGHT,
            width: area.width,
            height: CARD_HEIGHT,
        };
        let cells = Layout::horizontal(column_constraints.clone()).split(row_area);

        for (column, cell) in cells.iter().enumerate() {
            let position = row * state.columns + column;
            let Some(&template_index) = filtered.get(position) else {
                break;
            };
            let Some(template) = templates.get(template_index) else {
                break;
            };
            let selected = state.selected == Some(position);
            render_card(frame, *cell, template, selected, theme);
        }
    }
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    template: &TemplateRecord,
    selected: bool,
    theme: &Theme,
) {
    let border_style = if selected {
        theme.card_selected_style()
    } else {
        theme.card_style()
    };
    let block = Block::bordered().border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    // Image slot first, caption below. URLs keep their tail, names their
    // head.
    let url_area = Rect { height: 1, ..inner };
    let url = truncate_left(&template.url, url_area.width);
    frame.render_widget(Paragraph::new(url).style(theme.url_style()), url_area);

    if inner.height > 1 {
        let caption_area = Rect {
            y: inner.y + 1,
            height: 1,
            ..inner
        };
        let caption = truncate_right(&template.name, caption_area.width);
        frame.render_widget(
            Paragraph::new(caption).style(theme.caption_style()),
            caption_area,
        );
    }
}

/// Keep the head of `text`, ending with an ellipsis when it overflows.
fn truncate_right(text: &str, width: u16) -> String {
    if fits(text, width) {
        return text.to_string();
    }
    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut kept = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0) as u16;
        if used + ch_width > budget {
            break;
        }
        used += ch_width;
        kept.push(ch);
    }
    format!("{kept}…")
}

/// Keep the tail of `text`, starting with an ellipsis when it overflows.
fn truncate_left(text: &str, width: u16) -> String {
    if fits(text, width) {
        return text.to_string();
    }
    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut kept = Vec::new();
    for ch in text.chars().rev() {
        let ch_width = ch.width().unwrap_or(0) as u16;
        if used + ch_width > budget {
            break;
        }
        used += ch_width;
        kept.push(ch);
    }
    let tail: String = kept.into_iter().rev().collect();
    format!("…{tail}")
}

fn fits(text: &str, width: u16) -> bool {
    let text_width: u16 = text.chars().map(|ch| ch.width().unwrap_or(0) as u16).sum();
    text_width <= width
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn sample_templates(count: usize) -> Vec<TemplateRecord> {
        (0..count)
            .map(|index| {
                TemplateRecord::new(
                    index.to_string(),
                    format!("Template {index}"),
                    format!("https://i.imgflip.com/{index}.jpg"),
                )
            })
            .collect()
    }

    fn draw(width: u16, height: u16, state: &mut GridState, templates: &[TemplateRecord]) -> String {
        let filtered: Vec<usize> = (0..templates.len()).collect();
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_grid(frame, area, state, &filtered, templates, &Theme::default());
            })
            .unwrap();
        terminal.backend().to_string()
    }

    #[test]
    fn column_count_follows_terminal_width() {
        let templates = sample_templates(8);
        let mut state = GridState::default();

        draw(30, 12, &mut state, &templates);
        assert_eq!(state.columns(), 1);

        draw(100, 12, &mut state, &templates);
        assert_eq!(state.columns(), 4);
    }

    #[test]
    fn only_visible_rows_are_laid_out() {
        let templates = sample_templates(12);
        let mut state = GridState::default();

        // One column, two visible rows: cards 0 and 1 only.
        let view = draw(30, 8, &mut state, &templates);
        assert!(view.contains("Template 0"));
        assert!(view.contains("Template 1"));
        assert!(!view.contains("Template 2"));
    }

    #[test]
    fn moving_the_selection_scrolls_it_into_view() {
        let templates = sample_templates(12);
        let mut state = GridState::default();
        draw(30, 8, &mut state, &templates);

        state.select(Some(5));
        let view = draw(30, 8, &mut state, &templates);
        assert!(view.contains("Template 5"));
        assert!(!view.contains("Template 0"));
    }

    #[test]
    fn row_movement_uses_the_rendered_column_count() {
        let templates = sample_templates(8);
        let mut state = GridState::default();
        draw(100, 12, &mut state, &templates);
        assert_eq!(state.columns(), 4);

        state.move_down(8);
        assert_eq!(state.selected(), Some(4));
        state.move_up();
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn next_and_previous_clamp_at_the_ends() {
        let mut state = GridState::default();
        state.move_previous();
        assert_eq!(state.selected(), Some(0));
        state.move_next(2);
        assert_eq!(state.selected(), Some(1));
        state.move_next(2);
        assert_eq!(state.selected(), Some(1));
    }

    #[test]
    fn ensure_selection_clears_and_clamps() {
        let mut state = GridState::default();
        state.ensure_selection(0);
        assert_eq!(state.selected(), None);

        state.ensure_selection(3);
        assert_eq!(state.selected(), Some(0));

        state.select(Some(9));
        state.ensure_selection(3);
        assert_eq!(state.selected(), Some(2));
    }

    #[test]
    fn truncation_keeps_the_expected_end() {
        assert_eq!(truncate_right("Distracted Boyfriend", 10), "Distracte…");
        assert_eq!(truncate_left("https://i.imgflip.com/1bij.jpg", 9), "…1bij.jpg");
        assert_eq!(truncate_right("Doge", 10), "Doge");
    }
}
