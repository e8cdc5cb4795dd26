//! Pure geometry clamps. Every proposed position or size goes through one of
//! these before it is committed to a window.

use ratatui::layout::Rect;

use super::{Constraints, FloatRect, Point, Size};

fn clamp_axis_len(value: i32, min: i32, max: Option<i32>, viewport: i32, margin: i32) -> i32 {
    let room = viewport.saturating_sub(margin.saturating_mul(2)).max(0);
    let hi = max.map_or(room, |max| max.min(room));
    // A viewport smaller than the minimum keeps the window reachable instead.
    if min > hi { hi } else { value.clamp(min, hi) }
}

fn clamp_axis_pos(value: i32, len: i32, viewport: i32, margin: i32) -> i32 {
    let hi = viewport.saturating_sub(len).saturating_sub(margin);
    value.min(hi).max(margin)
}

/// Clamp a size into the constraints, with a missing max defaulting to the
/// viewport minus `margin` on both sides.
pub fn clamp_size(size: Size, constraints: &Constraints, viewport: Size, margin: i32) -> Size {
    Size::new(
        clamp_axis_len(
            size.width,
            constraints.min_width,
            constraints.max_width,
            viewport.width,
            margin,
        ),
        clamp_axis_len(
            size.height,
            constraints.min_height,
            constraints.max_height,
            viewport.height,
            margin,
        ),
    )
}

/// Keep a window of `size` at least `margin` away from every viewport edge.
pub fn clamp_position(origin: Point, size: Size, viewport: Size, margin: i32) -> Point {
    Point::new(
        clamp_axis_pos(origin.x, size.width, viewport.width, margin),
        clamp_axis_pos(origin.y, size.height, viewport.height, margin),
    )
}

/// Size first, then position against the clamped size. Idempotent.
pub fn clamp(rect: FloatRect, constraints: &Constraints, viewport: Size, margin: i32) -> FloatRect {
    let size = clamp_size(rect.size(), constraints, viewport, margin);
    let origin = clamp_position(rect.origin(), size, viewport, margin);
    FloatRect::from_parts(origin, size)
}

/// Clamp a size proposed by a resize drag. The window's top-left stays put,
/// so with `constrain` the space left between it and the far viewport edges
/// caps the size. The minimum is applied last: a resize never shrinks a
/// window below it.
pub fn clamp_resize(
    size: Size,
    origin: Point,
    constraints: &Constraints,
    viewport: Size,
    constrain: bool,
) -> Size {
    let axis = |value: i32, min: i32, max: Option<i32>, start: i32, extent: i32| {
        let mut value = value;
        if let Some(max) = max {
            value = value.min(max);
        }
        if constrain {
            value = value.min(extent.saturating_sub(start));
        }
        value.max(min)
    };
    Size::new(
        axis(
            size.width,
            constraints.min_width,
            constraints.max_width,
            origin.x,
            viewport.width,
        ),
        axis(
            size.height,
            constraints.min_height,
            constraints.max_height,
            origin.y,
            viewport.height,
        ),
    )
}

/// Starting position for a new window: `base` nudged by `jitter`, then
/// pulled inside the viewport margin.
pub fn safe_initial_position(
    base: Point,
    size: Size,
    viewport: Size,
    margin: i32,
    jitter: Point,
) -> Point {
    clamp_position(base + jitter, size, viewport, margin)
}

/// On-screen part of a viewport-relative rect, in `area` coordinates.
pub fn visible_rect(rect: FloatRect, area: Rect) -> Option<Rect> {
    let left = (area.x as i32).saturating_add(rect.x).max(area.x as i32);
    let top = (area.y as i32).saturating_add(rect.y).max(area.y as i32);
    let right = (area.x as i32)
        .saturating_add(rect.right())
        .min(area.x as i32 + area.width as i32);
    let bottom = (area.y as i32)
        .saturating_add(rect.bottom())
        .min(area.y as i32 + area.height as i32);
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect {
        x: left as u16,
        y: top as u16,
        width: (right - left) as u16,
        height: (bottom - top) as u16,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1200, 800);

    #[test]
    fn clamp_is_idempotent() {
        let constraints = Constraints::new(300, 200).with_max(Some(900), None);
        let samples = [
            FloatRect::new(-50, -50, 100, 100),
            FloatRect::new(1100, 700, 500, 500),
            FloatRect::new(10, 10, 5000, 5000),
            FloatRect::new(400, 300, 350, 250),
        ];
        for rect in samples {
            let once = clamp(rect, &constraints, VIEWPORT, 8);
            assert_eq!(clamp(once, &constraints, VIEWPORT, 8), once, "{rect:?}");
            assert!(once.fits_within(VIEWPORT));
        }
    }

    #[test]
    fn missing_max_defaults_to_viewport_minus_margins() {
        let size = clamp_size(Size::new(5000, 5000), &Constraints::new(10, 10), VIEWPORT, 8);
        assert_eq!(size, Size::new(1184, 784));
    }

    #[test]
    fn min_above_viewport_yields_to_viewport() {
        let tiny = Size::new(200, 100);
        let size = clamp_size(Size::new(400, 300), &Constraints::new(300, 200), tiny, 0);
        assert_eq!(size, tiny);
    }

    #[test]
    fn initial_placement_respects_right_and_bottom_edges() {
        let size = Size::new(280, 400);
        for jitter in [Point::new(40, 40), Point::new(-40, -40), Point::new(0, 0)] {
            let pos = safe_initial_position(Point::new(900, 100), size, VIEWPORT, 8, jitter);
            assert!(pos.x + 280 <= 1200);
            assert!(pos.y + 400 <= 800);
            assert!(pos.x <= 920 && pos.y <= 400);
            assert!(pos.x >= 8 && pos.y >= 8);
        }
    }

    #[test]
    fn resize_clamp_floors_at_min_last() {
        let constraints = Constraints::new(300, 200);
        let size = clamp_resize(
            Size::new(-200, -300),
            Point::new(100, 100),
            &constraints,
            VIEWPORT,
            true,
        );
        assert_eq!(size, Size::new(300, 200));
    }

    #[test]
    fn resize_clamp_caps_at_remaining_viewport() {
        let constraints = Constraints::new(100, 100);
        let size = clamp_resize(
            Size::new(2000, 2000),
            Point::new(1000, 500),
            &constraints,
            VIEWPORT,
            true,
        );
        assert_eq!(size, Size::new(200, 300));
        let free = clamp_resize(
            Size::new(2000, 2000),
            Point::new(1000, 500),
            &constraints,
            VIEWPORT,
            false,
        );
        assert_eq!(free, Size::new(2000, 2000));
    }

    #[test]
    fn visible_rect_clips_negative_origin() {
        let area = Rect {
            x: 0,
            y: 1,
            width: 80,
            height: 22,
        };
        let clipped = visible_rect(FloatRect::new(-5, 3, 20, 6), area);
        assert_eq!(
            clipped,
            Some(Rect {
                x: 0,
                y: 4,
                width: 15,
                height: 6
            })
        );
        assert_eq!(visible_rect(FloatRect::new(90, 0, 5, 5), area), None);
    }
}
