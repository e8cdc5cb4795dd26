pub mod chrome;
pub mod config;
pub mod decorator;
pub mod drag;
pub mod focus_trap;
pub mod registry;
pub mod resize;
pub mod sources;
pub mod state;

mod window_manager;

pub use chrome::{ChromeButton, ChromeHit, ChromeLayout};
pub use config::{
    Backdrop, PositionCallback, SizeCallback, WindowCallbacks, WindowConfig, WindowOptions,
    WmConfig,
};
pub use decorator::{DefaultDecorator, WindowDecorator, WindowFocus};
pub use drag::{DragController, DragOptions, DragUpdate};
pub use focus_trap::{FocusTarget, FocusTrap, TrapAction};
pub use registry::WindowRegistry;
pub use resize::{ResizeController, ResizeDirection};
pub use sources::{Clock, FixedClock, JitterSource, NoJitter, RandomJitter, SystemClock};
pub use state::WindowState;
pub use window_manager::{PointerOutcome, WindowManager};

use crate::layout::Constraints;

/// One open window: identity, display payload and live state.
#[derive(Debug, Clone)]
pub struct WindowInstance<C> {
    pub id: String,
    pub panel_type: String,
    pub title: String,
    pub content: C,
    pub constraints: Constraints,
    pub options: WindowOptions,
    pub callbacks: WindowCallbacks,
    pub state: WindowState,
}

impl<C> WindowInstance<C> {
    pub fn is_visible_content(&self) -> bool {
        !self.state.is_minimized()
    }

    pub fn accepts_drag(&self) -> bool {
        !self.state.is_maximized()
    }

    pub fn accepts_resize(&self) -> bool {
        self.options.resizable && !self.state.is_minimized() && !self.state.is_maximized()
    }
}
