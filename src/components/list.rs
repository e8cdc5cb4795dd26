use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{List, ListItem, ListState, StatefulWidget};

use crate::layout::Point;
use crate::ui::UiFrame;

const PAGE: isize = 5;

/// Single-selection list with keyboard navigation and click-to-select.
#[derive(Debug, Clone, Default)]
pub struct SelectList {
    items: Vec<String>,
    selected: usize,
    offset: usize,
    view: usize,
}

impl SelectList {
    pub fn new<T: Into<String>>(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    pub fn set_selected(&mut self, selected: usize) {
        self.selected = selected.min(self.items.len().saturating_sub(1));
    }

    pub fn push(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
        self.set_selected(self.selected);
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

    /// Select the item drawn on `row` of the last render.
    pub fn select_row(&mut self, row: i32) -> bool {
        if row < 0 {
            return false;
        }
        let index = self.offset + row as usize;
        if index >= self.items.len() {
            return false;
        }
        self.selected = index;
        true
    }

    fn keep_selected_in_view(&mut self) {
        if self.view == 0 || self.items.is_empty() {
            self.offset = 0;
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.view {
            self.offset = self.selected + 1 - self.view;
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE),
            KeyCode::PageDown => self.move_selection(PAGE),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.items.len().saturating_sub(1),
            _ => return false,
        }
        true
    }

    /// Draw with `decorate` choosing each row's text and style.
    pub fn render_with<F>(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool, decorate: F)
    where
        F: Fn(usize, &str) -> (String, Style),
    {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.view = area.height as usize;
        self.keep_selected_in_view();
        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.view)
            .map(|(i, item)| {
                let (text, style) = decorate(i, item);
                ListItem::new(text).style(style)
            })
            .collect();
        let mut state = ListState::default();
        if !self.items.is_empty() {
            state.select(Some(self.selected - self.offset));
        }
        let highlight = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let list = List::new(items).highlight_style(highlight);
        let clipped = area.intersection(frame.area());
        if clipped.width > 0 && clipped.height > 0 {
            StatefulWidget::render(list, clipped, frame.buffer_mut(), &mut state);
        }
    }

    pub fn handle_click(&mut self, local: Point) -> bool {
        self.select_row(local.y)
    }
}
