use crate::drivers::{PointerEvent, PointerPhase};
use crate::layout::{FloatRect, Point, Size, SnapTarget, clamp_position, resolve_snap};
use crate::listeners::{GlobalListeners, ListenerKind, ListenerScope};
use crate::z_order::ZSequence;

#[derive(Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        offset: Point,
        // Held only for its Drop: releasing the drag releases the listeners.
        _scope: ListenerScope,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOptions {
    pub constrain_to_viewport: bool,
    pub enable_snapping: bool,
    pub snap_threshold: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragUpdate {
    pub position: Point,
    pub snap: Option<SnapTarget>,
}

/// Header drag for one window: `Idle -> Dragging -> Idle`.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
    active_snap: Option<SnapTarget>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Snap target of the last move, for the preview outline.
    pub fn active_snap(&self) -> Option<SnapTarget> {
        self.active_snap
    }

    /// Grab the window. Captures the pointer offset into the window, starts
    /// listening for moves and releases anywhere on screen, and raises the
    /// window. Returns the new z-index, or `None` when the grab is refused.
    pub fn begin(
        &mut self,
        owner: &str,
        event: &PointerEvent,
        window: FloatRect,
        maximized: bool,
        sequence: &ZSequence,
        listeners: &GlobalListeners,
    ) -> Option<u64> {
        if maximized || event.phase != PointerPhase::Down || !event.is_single_pointer() {
            return None;
        }
        let offset = event.position - window.origin();
        let scope = listeners.acquire(owner, &[ListenerKind::PointerMove, ListenerKind::PointerUp]);
        self.state = DragState::Dragging {
            offset,
            _scope: scope,
        };
        self.active_snap = None;
        let z = sequence.advance();
        tracing::debug!(window_id = %owner, offset_x = offset.x, offset_y = offset.y, z, "drag started");
        Some(z)
    }

    /// Sanitized position for a pointer move: pointer minus grab offset,
    /// pulled to a nearby edge, then kept inside the viewport.
    pub fn update(
        &mut self,
        event: &PointerEvent,
        size: Size,
        viewport: Size,
        options: DragOptions,
    ) -> Option<DragUpdate> {
        let DragState::Dragging { offset, .. } = &self.state else {
            return None;
        };
        if event.phase != PointerPhase::Move || !event.is_single_pointer() {
            return None;
        }
        let candidate = event.position - *offset;
        let snap = if options.enable_snapping {
            resolve_snap(candidate, size, viewport, options.snap_threshold)
        } else {
            None
        };
        self.active_snap = snap;
        let mut position = snap.map_or(candidate, |target| target.position);
        if options.constrain_to_viewport {
            position = clamp_position(position, size, viewport, 0);
        }
        tracing::trace!(x = position.x, y = position.y, snapped = snap.is_some(), "drag move");
        Some(DragUpdate { position, snap })
    }

    /// Release. Drops the global listeners and the snap preview.
    pub fn end(&mut self) -> bool {
        self.active_snap = None;
        if !self.is_dragging() {
            return false;
        }
        self.state = DragState::Idle;
        tracing::debug!("drag ended");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1200, 800);
    const OPTIONS: DragOptions = DragOptions {
        constrain_to_viewport: true,
        enable_snapping: true,
        snap_threshold: 20,
    };

    fn down(x: i32, y: i32) -> PointerEvent {
        PointerEvent::mouse(PointerPhase::Down, Point::new(x, y))
    }

    fn moved(x: i32, y: i32) -> PointerEvent {
        PointerEvent::mouse(PointerPhase::Move, Point::new(x, y))
    }

    #[test]
    fn follows_pointer_minus_grab_offset() {
        let listeners = GlobalListeners::new();
        let seq = ZSequence::new(0);
        let mut drag = DragController::new();
        let window = FloatRect::new(100, 100, 300, 200);
        assert_eq!(drag.begin("w", &down(110, 105), window, false, &seq, &listeners), Some(1));
        let update = drag.update(&moved(510, 405), window.size(), VIEWPORT, OPTIONS).unwrap();
        assert_eq!(update.position, Point::new(500, 400));
        assert_eq!(update.snap, None);
    }

    #[test]
    fn near_top_left_snaps_left_first() {
        let listeners = GlobalListeners::new();
        let seq = ZSequence::new(0);
        let mut drag = DragController::new();
        let window = FloatRect::new(100, 100, 300, 200);
        drag.begin("w", &down(110, 101), window, false, &seq, &listeners);
        let update = drag.update(&moved(5, 5), window.size(), VIEWPORT, OPTIONS).unwrap();
        assert_eq!(update.position, Point::new(0, 4));
        assert!(drag.active_snap().is_some());
        drag.end();
        assert!(drag.active_snap().is_none());
    }

    #[test]
    fn unconstrained_without_snapping_can_leave_viewport() {
        let listeners = GlobalListeners::new();
        let seq = ZSequence::new(0);
        let mut drag = DragController::new();
        let window = FloatRect::new(100, 100, 300, 200);
        drag.begin("w", &down(100, 100), window, false, &seq, &listeners);
        let options = DragOptions {
            constrain_to_viewport: false,
            enable_snapping: false,
            snap_threshold: 20,
        };
        let update = drag.update(&moved(-50, 900), window.size(), VIEWPORT, options).unwrap();
        assert_eq!(update.position, Point::new(-50, 900));
    }

    #[test]
    fn constrained_moves_stay_inside() {
        let listeners = GlobalListeners::new();
        let seq = ZSequence::new(0);
        let mut drag = DragController::new();
        let window = FloatRect::new(100, 100, 300, 200);
        drag.begin("w", &down(250, 110), window, false, &seq, &listeners);
        for (x, y) in [(-900, -900), (5000, 40), (600, 5000), (1199, 799), (0, 0), (640, 300)] {
            let update = drag.update(&moved(x, y), window.size(), VIEWPORT, OPTIONS).unwrap();
            let rect = FloatRect::from_parts(update.position, window.size());
            assert!(rect.fits_within(VIEWPORT), "{x},{y} -> {rect:?}");
        }
    }

    #[test]
    fn maximized_and_multi_touch_grabs_are_refused() {
        let listeners = GlobalListeners::new();
        let seq = ZSequence::new(0);
        let mut drag = DragController::new();
        let window = FloatRect::new(0, 0, 300, 200);
        assert_eq!(drag.begin("w", &down(5, 5), window, true, &seq, &listeners), None);
        let pinch = PointerEvent::touch(PointerPhase::Down, Point::new(5, 5), 2);
        assert_eq!(drag.begin("w", &pinch, window, false, &seq, &listeners), None);
        assert!(!drag.is_dragging());
        assert_eq!(listeners.active_count(), 0);
        assert_eq!(seq.current(), 0);
    }

    #[test]
    fn listeners_live_exactly_as_long_as_the_drag() {
        let listeners = GlobalListeners::new();
        let seq = ZSequence::new(0);
        let window = FloatRect::new(0, 0, 300, 200);

        let mut drag = DragController::new();
        drag.begin("w", &down(5, 5), window, false, &seq, &listeners);
        assert!(listeners.is_listening("w", ListenerKind::PointerMove));
        assert!(drag.end());
        assert_eq!(listeners.active_count(), 0);
        assert!(!drag.end());

        let mut torn_down = DragController::new();
        torn_down.begin("w", &down(5, 5), window, false, &seq, &listeners);
        drop(torn_down);
        assert_eq!(listeners.active_count(), 0);
    }

    #[test]
    fn moves_without_grab_are_ignored() {
        let mut drag = DragController::new();
        assert!(drag.update(&moved(1, 1), Size::new(10, 10), VIEWPORT, OPTIONS).is_none());
    }
}
