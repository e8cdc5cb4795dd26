use crate::layout::{Constraints, FloatRect, Point, Size, clamp};

/// Geometry and display mode of one window.
///
/// Minimized and maximized are tracked independently; a maximized window
/// that gets minimized still restores to its maximized rectangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    pub position: Point,
    pub size: Size,
    pub z_index: u64,
    minimized: bool,
    maximized: bool,
    pre_maximize: Option<FloatRect>,
}

impl WindowState {
    pub fn new(position: Point, size: Size, z_index: u64) -> Self {
        Self {
            position,
            size,
            z_index,
            minimized: false,
            maximized: false,
            pre_maximize: None,
        }
    }

    pub fn rect(&self) -> FloatRect {
        FloatRect::from_parts(self.position, self.size)
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    /// Rectangle saved when the window was maximized.
    pub fn pre_maximize(&self) -> Option<FloatRect> {
        self.pre_maximize
    }

    pub fn minimize(&mut self) -> bool {
        !std::mem::replace(&mut self.minimized, true)
    }

    pub fn restore(&mut self) -> bool {
        std::mem::replace(&mut self.minimized, false)
    }

    pub fn toggle_minimize(&mut self) {
        self.minimized = !self.minimized;
    }

    pub fn maximize(&mut self, viewport: Size) -> bool {
        if self.maximized {
            return false;
        }
        self.pre_maximize = Some(self.rect());
        self.position = Point::default();
        self.size = viewport;
        self.maximized = true;
        true
    }

    pub fn unmaximize(&mut self) -> bool {
        if !self.maximized {
            return false;
        }
        if let Some(prev) = self.pre_maximize.take() {
            self.position = prev.origin();
            self.size = prev.size();
        }
        self.maximized = false;
        true
    }

    pub fn toggle_maximize(&mut self, viewport: Size) {
        if self.maximized {
            self.unmaximize();
        } else {
            self.maximize(viewport);
        }
    }

    /// Re-fit after the viewport changed size. Returns true when the
    /// rectangle moved or resized.
    pub fn fit_viewport(
        &mut self,
        constraints: &Constraints,
        viewport: Size,
        margin: i32,
        constrain: bool,
    ) -> bool {
        let before = self.rect();
        if self.maximized {
            self.position = Point::default();
            self.size = viewport;
            if constrain && let Some(prev) = self.pre_maximize {
                self.pre_maximize = Some(clamp(prev, constraints, viewport, margin));
            }
        } else if constrain {
            let fitted = clamp(before, constraints, viewport, margin);
            self.position = fitted.origin();
            self.size = fitted.size();
        }
        self.rect() != before
    }
}
