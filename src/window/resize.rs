use crate::drivers::{PointerEvent, PointerPhase};
use crate::layout::{Constraints, Point, Size, clamp_resize};
use crate::listeners::{GlobalListeners, ListenerKind, ListenerScope};

/// Compass position of a resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl ResizeDirection {
    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::N,
        ResizeDirection::NE,
        ResizeDirection::E,
        ResizeDirection::SE,
        ResizeDirection::S,
        ResizeDirection::SW,
        ResizeDirection::W,
        ResizeDirection::NW,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResizeDirection::N => "n",
            ResizeDirection::NE => "ne",
            ResizeDirection::E => "e",
            ResizeDirection::SE => "se",
            ResizeDirection::S => "s",
            ResizeDirection::SW => "sw",
            ResizeDirection::W => "w",
            ResizeDirection::NW => "nw",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.as_str() == value)
    }

    /// CSS-style cursor name for hosts that show one.
    pub fn cursor(self) -> &'static str {
        match self {
            ResizeDirection::N => "n-resize",
            ResizeDirection::NE => "ne-resize",
            ResizeDirection::E => "e-resize",
            ResizeDirection::SE => "se-resize",
            ResizeDirection::S => "s-resize",
            ResizeDirection::SW => "sw-resize",
            ResizeDirection::W => "w-resize",
            ResizeDirection::NW => "nw-resize",
        }
    }

    /// +1 when pointer motion to the right grows the width, -1 when it
    /// shrinks it, 0 when the handle does not touch the width.
    pub fn width_sign(self) -> i32 {
        match self {
            ResizeDirection::E | ResizeDirection::NE | ResizeDirection::SE => 1,
            ResizeDirection::W | ResizeDirection::NW | ResizeDirection::SW => -1,
            ResizeDirection::N | ResizeDirection::S => 0,
        }
    }

    pub fn height_sign(self) -> i32 {
        match self {
            ResizeDirection::S | ResizeDirection::SE | ResizeDirection::SW => 1,
            ResizeDirection::N | ResizeDirection::NE | ResizeDirection::NW => -1,
            ResizeDirection::E | ResizeDirection::W => 0,
        }
    }
}

#[derive(Debug, Default)]
enum ResizeState {
    #[default]
    Idle,
    Resizing {
        direction: ResizeDirection,
        start_size: Size,
        start_pointer: Point,
        _scope: ListenerScope,
    },
}

/// Handle drag for one window: `Idle -> Resizing(direction) -> Idle`.
/// Only the size changes; the top-left corner stays where it is.
#[derive(Debug, Default)]
pub struct ResizeController {
    state: ResizeState,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, ResizeState::Resizing { .. })
    }

    pub fn direction(&self) -> Option<ResizeDirection> {
        match self.state {
            ResizeState::Resizing { direction, .. } => Some(direction),
            ResizeState::Idle => None,
        }
    }

    pub fn begin(
        &mut self,
        owner: &str,
        event: &PointerEvent,
        direction: ResizeDirection,
        size: Size,
        listeners: &GlobalListeners,
    ) -> bool {
        if event.phase != PointerPhase::Down || !event.is_single_pointer() {
            return false;
        }
        let scope = listeners.acquire(owner, &[ListenerKind::PointerMove, ListenerKind::PointerUp]);
        self.state = ResizeState::Resizing {
            direction,
            start_size: size,
            start_pointer: event.position,
            _scope: scope,
        };
        tracing::debug!(window_id = %owner, direction = direction.as_str(), "resize started");
        true
    }

    pub fn update(
        &self,
        event: &PointerEvent,
        origin: Point,
        constraints: &Constraints,
        viewport: Size,
        constrain: bool,
    ) -> Option<Size> {
        let ResizeState::Resizing {
            direction,
            start_size,
            start_pointer,
            ..
        } = &self.state
        else {
            return None;
        };
        if event.phase != PointerPhase::Move || !event.is_single_pointer() {
            return None;
        }
        let delta = event.position - *start_pointer;
        let proposed = Size::new(
            start_size.width + direction.width_sign() * delta.x,
            start_size.height + direction.height_sign() * delta.y,
        );
        let size = clamp_resize(proposed, origin, constraints, viewport, constrain);
        tracing::trace!(width = size.width, height = size.height, "resize move");
        Some(size)
    }

    pub fn end(&mut self) -> bool {
        if !self.is_resizing() {
            return false;
        }
        self.state = ResizeState::Idle;
        tracing::debug!("resize ended");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1200, 800);

    fn start(dir: ResizeDirection, listeners: &GlobalListeners) -> ResizeController {
        let mut ctl = ResizeController::new();
        let down = PointerEvent::mouse(PointerPhase::Down, Point::new(500, 400));
        assert!(ctl.begin("w", &down, dir, Size::new(400, 300), listeners));
        ctl
    }

    fn move_by(ctl: &ResizeController, dx: i32, dy: i32, constraints: &Constraints) -> Size {
        let ev = PointerEvent::mouse(PointerPhase::Move, Point::new(500 + dx, 400 + dy));
        ctl.update(&ev, Point::new(100, 100), constraints, VIEWPORT, true)
            .unwrap()
    }

    #[test]
    fn signs_per_direction() {
        let listeners = GlobalListeners::new();
        let free = Constraints::new(0, 0);
        let cases = [
            (ResizeDirection::E, Size::new(410, 300)),
            (ResizeDirection::W, Size::new(390, 300)),
            (ResizeDirection::S, Size::new(400, 310)),
            (ResizeDirection::N, Size::new(400, 290)),
            (ResizeDirection::SE, Size::new(410, 310)),
            (ResizeDirection::NW, Size::new(390, 290)),
            (ResizeDirection::NE, Size::new(410, 290)),
            (ResizeDirection::SW, Size::new(390, 310)),
        ];
        for (dir, expected) in cases {
            let ctl = start(dir, &listeners);
            assert_eq!(move_by(&ctl, 10, 10, &free), expected, "{}", dir.as_str());
        }
    }

    #[test]
    fn shrinking_past_minimum_stops_at_minimum() {
        let listeners = GlobalListeners::new();
        let ctl = start(ResizeDirection::SE, &listeners);
        let constraints = Constraints::new(300, 250);
        assert_eq!(move_by(&ctl, -500, -500, &constraints), Size::new(300, 250));
    }

    #[test]
    fn growing_stops_at_max_and_viewport() {
        let listeners = GlobalListeners::new();
        let ctl = start(ResizeDirection::SE, &listeners);
        let constraints = Constraints::new(100, 100).with_max(Some(600), None);
        assert_eq!(move_by(&ctl, 5000, 5000, &constraints), Size::new(600, 700));
    }

    #[test]
    fn direction_names_round_trip() {
        for dir in ResizeDirection::ALL {
            assert_eq!(ResizeDirection::parse(dir.as_str()), Some(dir));
            assert!(dir.cursor().ends_with("-resize"));
        }
        assert_eq!(ResizeDirection::parse("up"), None);
    }

    #[test]
    fn end_releases_listeners() {
        let listeners = GlobalListeners::new();
        let mut ctl = start(ResizeDirection::E, &listeners);
        assert_eq!(ctl.direction(), Some(ResizeDirection::E));
        assert_eq!(listeners.active_count(), 2);
        assert!(ctl.end());
        assert_eq!(listeners.active_count(), 0);
        assert_eq!(ctl.direction(), None);
    }
}
