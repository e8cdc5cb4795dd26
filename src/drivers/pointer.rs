//! One pointer notion for mouse and touch input.
//!
//! Controllers only ever see `PointerEvent`s; the mouse and touch bindings
//! are adapted here, once.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::layout::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point,
    pub source: PointerSource,
    /// Active touch points; always 1 for the mouse.
    pub touches: usize,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, position: Point) -> Self {
        Self {
            phase,
            position,
            source: PointerSource::Mouse,
            touches: 1,
        }
    }

    pub fn touch(phase: PointerPhase, position: Point, touches: usize) -> Self {
        Self {
            phase,
            position,
            source: PointerSource::Touch,
            touches,
        }
    }

    /// Map a terminal mouse event. Only the primary button and plain moves
    /// take part in window interactions.
    pub fn from_mouse(event: &MouseEvent) -> Option<Self> {
        let phase = match event.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerPhase::Down,
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => PointerPhase::Move,
            MouseEventKind::Up(MouseButton::Left) => PointerPhase::Up,
            _ => return None,
        };
        Some(Self::mouse(
            phase,
            Point::new(event.column as i32, event.row as i32),
        ))
    }

    /// Begin and move events must come from a single pointer; multi-touch
    /// gestures are left to the host. Releases always count.
    pub fn is_single_pointer(&self) -> bool {
        match self.phase {
            PointerPhase::Up => true,
            PointerPhase::Down | PointerPhase::Move => self.touches == 1,
        }
    }

    /// Same event shifted into a coordinate space whose origin is `origin`.
    pub fn translated(mut self, origin: Point) -> Self {
        self.position = self.position - origin;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn left_button_maps_to_pointer_phases() {
        let down = PointerEvent::from_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 3, 4));
        assert_eq!(down, Some(PointerEvent::mouse(PointerPhase::Down, Point::new(3, 4))));
        let drag = PointerEvent::from_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 5, 6));
        assert_eq!(drag.map(|e| e.phase), Some(PointerPhase::Move));
        let up = PointerEvent::from_mouse(&mouse(MouseEventKind::Up(MouseButton::Left), 5, 6));
        assert_eq!(up.map(|e| e.phase), Some(PointerPhase::Up));
    }

    #[test]
    fn other_buttons_and_scroll_are_ignored() {
        assert!(PointerEvent::from_mouse(&mouse(MouseEventKind::Down(MouseButton::Right), 0, 0)).is_none());
        assert!(PointerEvent::from_mouse(&mouse(MouseEventKind::ScrollUp, 0, 0)).is_none());
    }

    #[test]
    fn multi_touch_is_not_a_single_pointer_except_on_release() {
        let p = Point::new(1, 1);
        assert!(!PointerEvent::touch(PointerPhase::Down, p, 2).is_single_pointer());
        assert!(!PointerEvent::touch(PointerPhase::Move, p, 2).is_single_pointer());
        assert!(PointerEvent::touch(PointerPhase::Up, p, 0).is_single_pointer());
        assert!(PointerEvent::touch(PointerPhase::Move, p, 1).is_single_pointer());
    }

    #[test]
    fn translation_moves_into_viewport_space() {
        let ev = PointerEvent::mouse(PointerPhase::Down, Point::new(10, 5)).translated(Point::new(0, 1));
        assert_eq!(ev.position, Point::new(10, 4));
    }
}
