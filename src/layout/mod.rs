pub mod constrain;
pub mod snap;

pub use constrain::{
    clamp, clamp_position, clamp_resize, clamp_size, safe_initial_position, visible_rect,
};
pub use snap::{SnapEdge, SnapTarget, resolve_snap};

use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Signed floating rectangle. The origin may sit off-screen when a window
/// is not constrained to the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FloatRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        if self.width <= 0 || self.height <= 0 {
            return false;
        }
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// True when the whole rectangle lies inside `[0, width] x [0, height]`.
    pub fn fits_within(&self, viewport: Size) -> bool {
        self.x >= 0 && self.y >= 0 && self.right() <= viewport.width && self.bottom() <= viewport.height
    }
}

/// Size limits fixed for a window's lifetime. A missing max is derived from
/// the viewport at clamp time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: Option<i32>,
    pub max_height: Option<i32>,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_width: crate::constants::DEFAULT_MIN_WIDTH,
            min_height: crate::constants::DEFAULT_MIN_HEIGHT,
            max_width: None,
            max_height: None,
        }
    }
}

impl Constraints {
    pub const fn new(min_width: i32, min_height: i32) -> Self {
        Self {
            min_width,
            min_height,
            max_width: None,
            max_height: None,
        }
    }

    pub const fn with_max(mut self, max_width: Option<i32>, max_height: Option<i32>) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = FloatRect::new(2, 2, 3, 3);
        assert!(r.contains(Point::new(2, 2)));
        assert!(r.contains(Point::new(4, 4)));
        assert!(!r.contains(Point::new(5, 4)));
        assert!(!FloatRect::new(0, 0, 0, 5).contains(Point::new(0, 0)));
    }

    #[test]
    fn fits_within_rejects_negative_origin() {
        let viewport = Size::new(100, 50);
        assert!(FloatRect::new(0, 0, 100, 50).fits_within(viewport));
        assert!(!FloatRect::new(-1, 0, 10, 10).fits_within(viewport));
        assert!(!FloatRect::new(95, 0, 10, 10).fits_within(viewport));
    }

    #[test]
    fn point_arithmetic_saturates() {
        let p = Point::new(i32::MAX, 0) + Point::new(1, 2);
        assert_eq!(p, Point::new(i32::MAX, 2));
        assert_eq!(Point::new(5, 5) - Point::new(2, 7), Point::new(3, -2));
    }
}
