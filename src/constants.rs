//! Shared crate-wide constants.

/// Gap kept between a freshly placed window and the viewport edges. The
/// default upper size bound is the viewport minus this margin on both sides.
pub const VIEWPORT_MARGIN: i32 = 8;

/// Distance from a viewport edge under which a dragged window snaps to it.
pub const SNAP_THRESHOLD: i32 = 20;

/// Half-width of the random offset applied to the base position of a newly
/// opened window, so repeated opens do not stack exactly on top of each other.
pub const PLACEMENT_JITTER: i32 = 40;

/// First value handed out by the shared z-order sequence.
pub const Z_INDEX_BASE: u64 = 1000;

/// Base position used when a window config does not name one.
pub const DEFAULT_POSITION: (i32, i32) = (100, 100);

pub const DEFAULT_WIDTH: i32 = 400;
pub const DEFAULT_HEIGHT: i32 = 300;
pub const DEFAULT_MIN_WIDTH: i32 = 300;
pub const DEFAULT_MIN_HEIGHT: i32 = 200;

/// Separator between a base id and its instance suffix (`color-1712345678`).
pub const ID_SEPARATOR: char = '-';

/// Two header clicks within this window toggle maximize.
pub const DOUBLE_CLICK_MS: u64 = 500;
