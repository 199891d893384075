use ratatui::style::{Color, Modifier, Style};

use super::Theme;

pub const LIGHT: Theme = Theme {
    prompt: Style::new().fg(Color::Rgb(0, 102, 153)),
    caption: Style::new()
        .fg(Color::Rgb(15, 23, 42))
        .add_modifier(Modifier::BOLD),
    url: Style::new().fg(Color::Rgb(100, 100, 100)),
    card: Style::new().fg(Color::Rgb(148, 163, 184)),
    card_selected: Style::new()
        .fg(Color::Rgb(120, 120, 0))
        .add_modifier(Modifier::BOLD),
    empty: Style::new().fg(Color::Rgb(100, 100, 100)),
    error: Style::new().fg(Color::Rgb(190, 18, 60)),
};
