use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use throbber_widgets_tui::{Throbber, ThrobberState};
use unicode_width::UnicodeWidthStr;

use crate::input::QueryInput;
use crate::theme::Theme;

/// Everything the header row needs about the input side.
pub struct InputContext<'a> {
    pub query_input: &'a QueryInput,
    pub input_title: &'a Option<String>,
    pub area: Rect,
    pub theme: &'a Theme,
}

/// Load status rendered at the right edge of the header row.
pub struct StatusState<'a> {
    pub text: &'a str,
    pub complete: bool,
    pub throbber_state: &'a ThrobberState,
}

/// Render the prompt, the query input, and the right-aligned status label on
/// the single header line.
pub fn render_header(frame: &mut Frame, input: InputContext<'_>, status: StatusState<'_>) {
    let prompt = input.input_title.as_deref().unwrap_or("");
    let prompt_width = if prompt.is_empty() {
        0
    } else {
        // " > " separator
        UnicodeWidthStr::width(prompt) as u16 + 3
    };

    let constraints = if prompt.is_empty() {
        vec![Constraint::Min(1)]
    } else {
        vec![Constraint::Length(prompt_width), Constraint::Min(1)]
    };

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(input.area);

    if !prompt.is_empty() {
        let prompt_widget =
            Paragraph::new(format!("{prompt} > ")).style(input.theme.prompt_style());
        frame.render_widget(prompt_widget, horizontal[0]);
    }

    let input_area = horizontal[horizontal.len() - 1];
    input.query_input.render(frame, input_area, Style::default());
    render_status(frame, input_area, status, input.theme);
}

/// Overlay the status label at the right edge of the input area without
/// covering typed text; the throbber spins while the load is in flight.
fn render_status(frame: &mut Frame, area: Rect, status: StatusState<'_>, theme: &Theme) {
    if area.width == 0 || area.height == 0 || status.text.is_empty() {
        return;
    }

    let muted_style = theme.empty_style();
    let label_span = Span::styled(status.text.to_string(), muted_style);
    let mut line = Line::default();
    if !status.complete {
        let spinner = Throbber::default()
            .style(muted_style)
            .throbber_style(muted_style);
        let spinner_span = spinner.to_symbol_span(status.throbber_state);
        line.spans.push(spinner_span);
    }
    line.spans.push(label_span);

    let line_width = line.width() as u16;
    if line_width == 0 {
        return;
    }

    let buffer = frame.buffer_mut();
    let mut start_x = if line_width >= area.width {
        area.left()
    } else {
        area.right().saturating_sub(line_width)
    };

    let input_row = area.top();
    let mut last_char_x: Option<u16> = None;
    for x in area.left()..area.right() {
        if let Some(cell) = buffer.cell((x, input_row))
            && !cell.symbol().trim().is_empty()
        {
            last_char_x = Some(x);
        }
    }

    if let Some(last_x) = last_char_x {
        let min_start = last_x.saturating_add(3); // 1 column for the last char + 2 columns padding
        if min_start > start_x {
            start_x = min_start;
        }
    }

    if start_x >= area.right() {
        return;
    }

    let max_width = area
        .right()
        .saturating_sub(start_x)
        .min(line_width)
        .min(area.width);

    if max_width == 0 {
        return;
    }

    buffer.set_line(start_x, input_row, &line, max_width);
}
