use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;

use crate::components::{Component, ToggleItem, ToggleList};
use crate::layout::Point;
use crate::theme;
use crate::ui::UiFrame;

/// Layer stack with visibility toggles. `n` adds a layer.
#[derive(Debug)]
pub struct LayersPanel {
    layers: ToggleList,
    created: usize,
}

impl Default for LayersPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl LayersPanel {
    pub fn new() -> Self {
        Self {
            layers: ToggleList::new(vec![
                ToggleItem::new("Background", true),
                ToggleItem::new("Layer 1", true),
                ToggleItem::new("Layer 2", true),
                ToggleItem::new("Text Layer", false),
            ]),
            created: 2,
        }
    }

    pub fn layers(&self) -> &[ToggleItem] {
        self.layers.items()
    }

    pub fn visible_count(&self) -> usize {
        self.layers.items().iter().filter(|l| l.checked).count()
    }

    pub fn add_layer(&mut self) {
        self.created += 1;
        self.layers
            .push(ToggleItem::new(format!("Layer {}", self.created), true));
        self.layers.set_selected(self.layers.items().len() - 1);
    }
}

impl Component for LayersPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.height == 0 {
            return;
        }
        let list_area = Rect {
            height: area.height - 1,
            ..area
        };
        self.layers.render(frame, list_area, focused);
        let footer: String = format!("{} visible  n: new", self.visible_count())
            .chars()
            .take(area.width as usize)
            .collect();
        frame.put_str(area.x, area.y + area.height - 1, &footer, theme::muted_style());
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind != KeyEventKind::Release && key.code == KeyCode::Char('n') {
            self.add_layer();
            return true;
        }
        self.layers.handle_key(key)
    }

    fn handle_click(&mut self, local: Point) -> bool {
        self.layers.handle_click(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn toggles_and_new_layers() {
        let mut panel = LayersPanel::new();
        assert_eq!(panel.visible_count(), 3);
        assert!(panel.handle_click(Point::new(0, 3)));
        assert_eq!(panel.visible_count(), 4);
        panel.handle_key(&KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE));
        assert_eq!(panel.layers().last().map(|l| l.label.as_str()), Some("Layer 3"));
        assert_eq!(panel.visible_count(), 5);
    }
}
