use super::{FloatRect, Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapEdge {
    Left,
    Top,
    Right,
    Bottom,
}

impl SnapEdge {
    /// Evaluation order; the first edge within threshold wins.
    pub const PRIORITY: [SnapEdge; 4] = [
        SnapEdge::Left,
        SnapEdge::Top,
        SnapEdge::Right,
        SnapEdge::Bottom,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapTarget {
    pub edge: SnapEdge,
    pub position: Point,
}

impl SnapTarget {
    /// Rectangle the window would occupy once snapped, for drawing a preview.
    pub fn preview_rect(&self, size: Size) -> FloatRect {
        FloatRect::from_parts(self.position, size)
    }
}

/// Report the first viewport edge the candidate rectangle is within
/// `threshold` of. A candidate already past an edge counts as within it.
/// Only one axis is ever adjusted.
pub fn resolve_snap(
    candidate: Point,
    size: Size,
    viewport: Size,
    threshold: i32,
) -> Option<SnapTarget> {
    SnapEdge::PRIORITY.into_iter().find_map(|edge| {
        let (distance, position) = match edge {
            SnapEdge::Left => (candidate.x, Point::new(0, candidate.y)),
            SnapEdge::Top => (candidate.y, Point::new(candidate.x, 0)),
            SnapEdge::Right => (
                viewport.width - (candidate.x + size.width),
                Point::new(viewport.width - size.width, candidate.y),
            ),
            SnapEdge::Bottom => (
                viewport.height - (candidate.y + size.height),
                Point::new(candidate.x, viewport.height - size.height),
            ),
        };
        (distance < threshold).then_some(SnapTarget { edge, position })
    })
}
