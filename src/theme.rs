use ratatui::style::{Color, Modifier, Style};

use crate::colors::Rgb;

// Chrome colors. RGB values go through `Rgb::to_terminal_color` so they
// degrade to the 256-color cube on terminals without truecolor.

pub const ACCENT_RGB: Rgb = Rgb::new(200, 100, 0);
pub const CANVAS_RGB: Rgb = Rgb::new(38, 38, 42);

pub fn accent() -> Color {
    ACCENT_RGB.to_terminal_color()
}

pub fn canvas_bg() -> Color {
    CANVAS_RGB.to_terminal_color()
}

pub fn header_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(accent())
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn focused_control_style() -> Style {
    Style::default()
        .bg(Color::White)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

pub fn snap_preview_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

pub fn bar_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(Color::Gray)
}
