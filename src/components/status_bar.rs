use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::ui::UiFrame;

/// One-row bar with left- and right-aligned text. The right side is dropped
/// when it would overlap the left.
#[derive(Debug, Clone, Default)]
pub struct StatusBar {
    left: String,
    right: String,
    style: Style,
}

impl StatusBar {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn set_left<T: Into<String>>(&mut self, value: T) {
        self.left = value.into();
    }

    pub fn set_right<T: Into<String>>(&mut self, value: T) {
        self.right = value.into();
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn right(&self) -> &str {
        &self.right
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let width = area.width as usize;
        let fill = " ".repeat(width);
        frame.put_str(area.x, area.y, &fill, self.style);

        let left: String = self.left.chars().take(width).collect();
        let left_width = left.chars().count();
        frame.put_str(area.x, area.y, &left, self.style);

        let right_width = self.right.chars().count();
        if right_width > 0 && left_width + 1 + right_width <= width {
            let start = area.x + (width - right_width) as u16;
            frame.put_str(start, area.y, &self.right, self.style);
        }
    }
}
