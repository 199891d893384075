use ratatui::style::{Color, Modifier, Style};

use super::Theme;

pub const SLATE: Theme = Theme {
    prompt: Style::new().fg(Color::LightCyan),
    caption: Style::new()
        .fg(Color::Rgb(226, 232, 240))
        .add_modifier(Modifier::BOLD),
    url: Style::new().fg(Color::DarkGray),
    card: Style::new().fg(Color::Rgb(71, 85, 105)),
    card_selected: Style::new()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD),
    empty: Style::new().fg(Color::DarkGray),
    error: Style::new().fg(Color::Rgb(251, 113, 133)),
};
