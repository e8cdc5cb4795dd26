use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::components::{Component, SelectList};
use crate::layout::Point;
use crate::theme;
use crate::ui::UiFrame;

const INITIAL_STEPS: [&str; 8] = [
    "Open Document",
    "Create Layer",
    "Brush Tool",
    "Paint Stroke",
    "Add Text",
    "Apply Filter",
    "Adjust Levels",
    "Crop Image",
];

/// Undo history. Selecting a step rewinds to it; steps after the current
/// one stay listed (dimmed) until a new action replaces them.
#[derive(Debug)]
pub struct HistoryPanel {
    steps: SelectList,
}

impl Default for HistoryPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryPanel {
    pub fn new() -> Self {
        let mut steps = SelectList::new(INITIAL_STEPS);
        steps.set_selected(INITIAL_STEPS.len() - 1);
        Self { steps }
    }

    pub fn current(&self) -> usize {
        self.steps.selected()
    }

    pub fn len(&self) -> usize {
        self.steps.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn undo(&mut self) -> bool {
        let before = self.current();
        self.steps.move_selection(-1);
        before != self.current()
    }

    pub fn redo(&mut self) -> bool {
        let before = self.current();
        self.steps.move_selection(1);
        before != self.current()
    }

    /// Record a new action after the current step, dropping the redo tail.
    pub fn record(&mut self, action: impl Into<String>) {
        self.steps.truncate(self.current() + 1);
        self.steps.push(action);
        self.steps.set_selected(self.len() - 1);
    }
}

impl Component for HistoryPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        let current = self.current();
        self.steps.render_with(frame, area, focused, |index, step| {
            let style = if index > current {
                theme::muted_style()
            } else {
                Style::default()
            };
            (step.to_string(), style)
        });
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::Char('u') => self.undo(),
            KeyCode::Char('r') => self.redo(),
            _ => self.steps.handle_key(key),
        }
    }

    fn handle_click(&mut self, local: Point) -> bool {
        self.steps.handle_click(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_redo_and_record_drop_redo_tail() {
        let mut history = HistoryPanel::new();
        assert_eq!(history.current(), 7);
        assert!(history.undo());
        assert!(history.undo());
        assert_eq!(history.current(), 5);
        assert!(history.redo());
        history.record("Flip Canvas");
        assert_eq!(history.len(), 8);
        assert_eq!(history.current(), 7);
        assert!(!history.redo());
    }
}
