use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::layout::Point;
use crate::ui::UiFrame;

/// Width of the `[x] ` marker; clicks inside it flip the item.
const MARKER_WIDTH: i32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleItem {
    pub label: String,
    pub checked: bool,
}

impl ToggleItem {
    pub fn new(label: impl Into<String>, checked: bool) -> Self {
        Self {
            label: label.into(),
            checked,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ToggleList {
    items: Vec<ToggleItem>,
    selected: usize,
}

impl ToggleList {
    pub fn new(items: Vec<ToggleItem>) -> Self {
        Self { items, selected: 0 }
    }

    pub fn items(&self) -> &[ToggleItem] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn set_selected(&mut self, selected: usize) {
        self.selected = selected.min(self.items.len().saturating_sub(1));
    }

    pub fn push(&mut self, item: ToggleItem) {
        self.items.push(item);
    }

    pub fn toggle(&mut self, index: usize) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.checked = !item.checked;
                true
            }
            None => false,
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.items.is_empty() {
            self.selected = 0;
            return;
        }
        if delta.is_negative() {
            self.selected = self.selected.saturating_sub(delta.unsigned_abs());
        } else {
            self.selected = (self.selected + delta as usize).min(self.items.len() - 1);
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Char(' ') => return self.toggle(self.selected),
            _ => return false,
        }
        true
    }

    /// Rows map one to one onto items. A click on the marker flips the item;
    /// a click on the label selects it.
    pub fn handle_click(&mut self, local: Point) -> bool {
        if local.y < 0 || local.y as usize >= self.items.len() {
            return false;
        }
        let index = local.y as usize;
        self.selected = index;
        if (0..MARKER_WIDTH).contains(&local.x) {
            self.toggle(index);
        }
        true
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        for (row, item) in self.items.iter().enumerate().take(area.height as usize) {
            let marker = if item.checked { "[x]" } else { "[ ]" };
            let mut style = Style::default();
            if row == self.selected {
                style = style.add_modifier(if focused {
                    Modifier::REVERSED
                } else {
                    Modifier::BOLD
                });
            }
            let text: String = format!("{marker} {}", item.label)
                .chars()
                .take(area.width as usize)
                .collect();
            frame.put_str(area.x, area.y + row as u16, &text, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn layers() -> ToggleList {
        ToggleList::new(vec![
            ToggleItem::new("Background", true),
            ToggleItem::new("Layer 1", true),
            ToggleItem::new("Text", false),
        ])
    }

    #[test]
    fn space_flips_selected_item() {
        let mut list = layers();
        list.handle_key(&KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        assert!(list.handle_key(&KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(!list.items()[1].checked);
        assert!(list.items()[0].checked);
    }

    #[test]
    fn marker_click_toggles_label_click_selects() {
        let mut list = layers();
        assert!(list.handle_click(Point::new(1, 2)));
        assert!(list.items()[2].checked);
        assert!(list.handle_click(Point::new(8, 0)));
        assert_eq!(list.selected(), 0);
        assert!(list.items()[0].checked);
        assert!(!list.handle_click(Point::new(0, 3)));
    }
}
