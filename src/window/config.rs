use std::fmt;
use std::rc::Rc;

use crate::constants::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, PLACEMENT_JITTER, SNAP_THRESHOLD, VIEWPORT_MARGIN,
    Z_INDEX_BASE,
};
use crate::error::{WmError, WmResult};
use crate::layout::{Constraints, Point, Size};

/// Manager-wide tuning. Every distance is in the host's units (pixels in a
/// browser-style host, cells in the terminal shell).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WmConfig {
    pub margin: i32,
    pub snap_threshold: i32,
    pub enable_snapping: bool,
    pub jitter: i32,
    pub z_base: u64,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            margin: VIEWPORT_MARGIN,
            snap_threshold: SNAP_THRESHOLD,
            enable_snapping: true,
            jitter: PLACEMENT_JITTER,
            z_base: Z_INDEX_BASE,
        }
    }
}

impl WmConfig {
    /// Defaults scaled down for a character-cell viewport.
    pub fn cells() -> Self {
        Self {
            margin: 1,
            snap_threshold: 2,
            enable_snapping: true,
            jitter: 4,
            z_base: Z_INDEX_BASE,
        }
    }

    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin.max(0);
        self
    }

    pub fn with_snap_threshold(mut self, threshold: i32) -> Self {
        self.snap_threshold = threshold.max(0);
        self
    }

    pub fn with_snapping(mut self, enabled: bool) -> Self {
        self.enable_snapping = enabled;
        self
    }

    pub fn with_jitter(mut self, jitter: i32) -> Self {
        self.jitter = jitter.max(0);
        self
    }

    pub fn with_z_base(mut self, base: u64) -> Self {
        self.z_base = base;
        self
    }
}

/// What a click on the dimmed area behind a window does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backdrop {
    /// No backdrop; clicks fall through to whatever is underneath.
    #[default]
    None,
    BringToFront,
    Dismiss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOptions {
    pub resizable: bool,
    pub constrain_to_viewport: bool,
    pub show_minimize: bool,
    pub show_maximize: bool,
    pub backdrop: Backdrop,
    pub enable_snapping: bool,
    /// Per-window override of `WmConfig::snap_threshold`.
    pub snap_threshold: Option<i32>,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            resizable: false,
            constrain_to_viewport: true,
            show_minimize: true,
            show_maximize: false,
            backdrop: Backdrop::None,
            enable_snapping: true,
            snap_threshold: None,
        }
    }
}

pub type PositionCallback = Rc<dyn Fn(Point)>;
pub type SizeCallback = Rc<dyn Fn(Size)>;

#[derive(Clone, Default)]
pub struct WindowCallbacks {
    pub on_position_change: Option<PositionCallback>,
    pub on_size_change: Option<SizeCallback>,
}

impl fmt::Debug for WindowCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowCallbacks")
            .field("on_position_change", &self.on_position_change.is_some())
            .field("on_size_change", &self.on_size_change.is_some())
            .finish()
    }
}

impl WindowCallbacks {
    pub fn position_changed(&self, position: Point) {
        if let Some(cb) = &self.on_position_change {
            cb(position);
        }
    }

    pub fn size_changed(&self, size: Size) {
        if let Some(cb) = &self.on_size_change {
            cb(size);
        }
    }
}

/// Everything needed to open a window. `content` is a caller-owned handle
/// (an enum tag, an index, an `Rc`) that the registry only clones.
#[derive(Debug, Clone)]
pub struct WindowConfig<C> {
    pub id: String,
    pub panel_type: Option<String>,
    pub title: String,
    pub content: C,
    pub initial_position: Option<Point>,
    pub width: i32,
    pub height: i32,
    pub constraints: Constraints,
    pub options: WindowOptions,
    pub callbacks: WindowCallbacks,
}

impl<C> WindowConfig<C> {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: C) -> Self {
        Self {
            id: id.into(),
            panel_type: None,
            title: title.into(),
            content,
            initial_position: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            constraints: Constraints::default(),
            options: WindowOptions::default(),
            callbacks: WindowCallbacks::default(),
        }
    }

    pub fn panel_type(mut self, panel_type: impl Into<String>) -> Self {
        self.panel_type = Some(panel_type.into());
        self
    }

    pub fn initial_position(mut self, x: i32, y: i32) -> Self {
        self.initial_position = Some(Point::new(x, y));
        self
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn min_size(mut self, min_width: i32, min_height: i32) -> Self {
        self.constraints.min_width = min_width;
        self.constraints.min_height = min_height;
        self
    }

    pub fn max_size(mut self, max_width: Option<i32>, max_height: Option<i32>) -> Self {
        self.constraints.max_width = max_width;
        self.constraints.max_height = max_height;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.options.resizable = resizable;
        self
    }

    pub fn constrain_to_viewport(mut self, constrain: bool) -> Self {
        self.options.constrain_to_viewport = constrain;
        self
    }

    pub fn show_minimize(mut self, show: bool) -> Self {
        self.options.show_minimize = show;
        self
    }

    pub fn show_maximize(mut self, show: bool) -> Self {
        self.options.show_maximize = show;
        self
    }

    pub fn backdrop(mut self, backdrop: Backdrop) -> Self {
        self.options.backdrop = backdrop;
        self
    }

    pub fn snapping(mut self, enabled: bool) -> Self {
        self.options.enable_snapping = enabled;
        self
    }

    pub fn snap_threshold(mut self, threshold: i32) -> Self {
        self.options.snap_threshold = Some(threshold);
        self
    }

    pub fn on_position_change(mut self, f: impl Fn(Point) + 'static) -> Self {
        self.callbacks.on_position_change = Some(Rc::new(f));
        self
    }

    pub fn on_size_change(mut self, f: impl Fn(Size) + 'static) -> Self {
        self.callbacks.on_size_change = Some(Rc::new(f));
        self
    }

    /// Panel type used for grouping; the id when none was given.
    pub fn resolved_panel_type(&self) -> &str {
        self.panel_type.as_deref().unwrap_or(&self.id)
    }

    pub fn requested_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn validate(&self) -> WmResult<()> {
        let invalid = |reason: &str| WmError::InvalidConfig {
            id: self.id.clone(),
            reason: reason.to_string(),
        };
        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty"));
        }
        let c = &self.constraints;
        if c.min_width < 0 || c.min_height < 0 {
            return Err(invalid("minimum size must not be negative"));
        }
        if c.max_width.is_some_and(|max| max < c.min_width) {
            return Err(invalid("max width is below min width"));
        }
        if c.max_height.is_some_and(|max| max < c.min_height) {
            return Err(invalid("max height is below min height"));
        }
        Ok(())
    }
}
