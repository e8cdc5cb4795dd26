use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::components::{Component, SelectList};
use crate::layout::Point;
use crate::theme;
use crate::ui::UiFrame;

const BRUSHES: [(&str, &str); 6] = [
    ("●", "Round"),
    ("■", "Square"),
    ("◉", "Soft Round"),
    ("◈", "Textured"),
    ("⋯", "Scatter"),
    ("◐", "Chalk"),
];
const MAX_SIZE: u16 = 500;

#[derive(Debug)]
pub struct BrushesPanel {
    list: SelectList,
    size: u16,
}

impl Default for BrushesPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl BrushesPanel {
    pub fn new() -> Self {
        Self {
            list: SelectList::new(BRUSHES.iter().map(|(glyph, name)| format!("{glyph} {name}"))),
            size: 20,
        }
    }

    pub fn brush(&self) -> &'static str {
        BRUSHES[self.list.selected()].1
    }

    pub fn size(&self) -> u16 {
        self.size
    }
}

impl Component for BrushesPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.height == 0 {
            return;
        }
        let list_area = Rect {
            height: area.height - 1,
            ..area
        };
        self.list
            .render_with(frame, list_area, focused, |_, item| (item.to_string(), Style::default()));
        let footer: String = format!("Size {}px  (+/-)", self.size)
            .chars()
            .take(area.width as usize)
            .collect();
        frame.put_str(area.x, area.y + area.height - 1, &footer, theme::muted_style());
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.size = (self.size + 1).min(MAX_SIZE);
                true
            }
            KeyCode::Char('-') => {
                self.size = self.size.saturating_sub(1).max(1);
                true
            }
            _ => self.list.handle_key(key),
        }
    }

    fn handle_click(&mut self, local: Point) -> bool {
        self.list.handle_click(local)
    }
}
