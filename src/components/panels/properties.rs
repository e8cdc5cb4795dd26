use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::Component;
use crate::layout::Point;
use crate::theme;
use crate::ui::UiFrame;

/// Caller-side aspect-ratio policy: when locked, changing one side derives
/// the other from the ratio captured at lock time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AspectLock {
    ratio: Option<f64>,
}

impl AspectLock {
    pub fn unlocked() -> Self {
        Self::default()
    }

    /// Capture `width / height`. A zero height cannot be locked.
    pub fn locked(width: i32, height: i32) -> Self {
        Self {
            ratio: (height > 0 && width > 0).then(|| width as f64 / height as f64),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.ratio.is_some()
    }

    pub fn height_for(&self, width: i32, current_height: i32) -> i32 {
        self.ratio
            .map_or(current_height, |ratio| (width as f64 / ratio).round() as i32)
    }

    pub fn width_for(&self, height: i32, current_width: i32) -> i32 {
        self.ratio
            .map_or(current_width, |ratio| (height as f64 * ratio).round() as i32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    X,
    Y,
    Width,
    Height,
}

impl Field {
    const ORDER: [Field; 4] = [Field::X, Field::Y, Field::Width, Field::Height];

    fn label(self) -> &'static str {
        match self {
            Field::X => "X",
            Field::Y => "Y",
            Field::Width => "W",
            Field::Height => "H",
        }
    }
}

/// Transform of the selected layer.
#[derive(Debug)]
pub struct PropertiesPanel {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    lock: AspectLock,
    field: usize,
}

impl Default for PropertiesPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertiesPanel {
    pub fn new() -> Self {
        Self {
            x: 120,
            y: 80,
            width: 400,
            height: 300,
            lock: AspectLock::unlocked(),
            field: 0,
        }
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn field(&self) -> Field {
        Field::ORDER[self.field]
    }

    pub fn lock(&self) -> AspectLock {
        self.lock
    }

    pub fn toggle_lock(&mut self) {
        self.lock = if self.lock.is_locked() {
            AspectLock::unlocked()
        } else {
            AspectLock::locked(self.width, self.height)
        };
        tracing::debug!(locked = self.lock.is_locked(), "aspect lock toggled");
    }

    pub fn set_width(&mut self, width: i32) {
        self.width = width.max(1);
        self.height = self.lock.height_for(self.width, self.height).max(1);
    }

    pub fn set_height(&mut self, height: i32) {
        self.height = height.max(1);
        self.width = self.lock.width_for(self.height, self.width).max(1);
    }

    fn adjust(&mut self, delta: i32) {
        match self.field() {
            Field::X => self.x += delta,
            Field::Y => self.y += delta,
            Field::Width => self.set_width(self.width + delta),
            Field::Height => self.set_height(self.height + delta),
        }
    }

    fn value(&self, field: Field) -> i32 {
        match field {
            Field::X => self.x,
            Field::Y => self.y,
            Field::Width => self.width,
            Field::Height => self.height,
        }
    }
}

impl Component for PropertiesPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        let base = if focused {
            Style::default()
        } else {
            theme::muted_style()
        };
        let mut lines = vec![("Transform".to_string(), base.add_modifier(Modifier::BOLD))];
        for (index, field) in Field::ORDER.into_iter().enumerate() {
            let style = if index == self.field && focused {
                base.add_modifier(Modifier::REVERSED)
            } else {
                base
            };
            lines.push((format!("{}: {:>6}", field.label(), self.value(field)), style));
        }
        let marker = if self.lock.is_locked() { "[x]" } else { "[ ]" };
        lines.push((format!("{marker} lock aspect"), base));
        for (row, (text, style)) in lines.into_iter().enumerate().take(area.height as usize) {
            let text: String = text.chars().take(area.width as usize).collect();
            frame.put_str(area.x, area.y + row as u16, &text, style);
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::Up => self.field = self.field.saturating_sub(1),
            KeyCode::Down => self.field = (self.field + 1).min(Field::ORDER.len() - 1),
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::PageDown => self.adjust(-10),
            KeyCode::PageUp => self.adjust(10),
            KeyCode::Char(' ') => self.toggle_lock(),
            _ => return false,
        }
        true
    }

    fn handle_click(&mut self, local: Point) -> bool {
        match local.y {
            1..=4 => {
                self.field = (local.y - 1) as usize;
                true
            }
            5 => {
                self.toggle_lock();
                true
            }
            _ => false,
        }
    }
}
