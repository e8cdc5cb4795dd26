//! Chrome geometry of a floating window: where the header, controls,
//! content and resize handles sit, and what a pointer position lands on.
//!
//! Layout, in window-local rows:
//! - row 0: top border (north resize edge)
//! - row 1: header with grip, title and controls (drag handle)
//! - rows 2..h-1: content
//! - row h-1: bottom border (south resize edge)

use crate::layout::{FloatRect, Point};

use super::WindowInstance;
use super::config::WindowOptions;
use super::resize::ResizeDirection;
use super::state::WindowState;

/// Width of one header control, e.g. `[x]`.
pub const BUTTON_WIDTH: i32 = 3;
/// Height of a minimized window: borders plus the header row.
pub const MINIMIZED_HEIGHT: i32 = 3;
pub const GRIP: &str = "≡ ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeButton {
    /// Minimize, or restore when already minimized.
    Minimize,
    Maximize,
    Close,
}

impl ChromeButton {
    pub fn label(self, state: &WindowState) -> &'static str {
        match self {
            ChromeButton::Minimize if state.is_minimized() => "[▫]",
            ChromeButton::Minimize => "[_]",
            ChromeButton::Maximize if state.is_maximized() => "[▪]",
            ChromeButton::Maximize => "[□]",
            ChromeButton::Close => "[x]",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeHit {
    Button(ChromeButton),
    Resize(ResizeDirection),
    Header,
    Content,
    Frame,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeLayout {
    pub frame: FloatRect,
    pub header: FloatRect,
    pub title_origin: Point,
    pub title_width: i32,
    pub buttons: Vec<(ChromeButton, FloatRect)>,
    pub content: Option<FloatRect>,
    pub handles: Vec<(ResizeDirection, FloatRect)>,
}

impl ChromeLayout {
    pub fn for_instance<C>(instance: &WindowInstance<C>) -> Self {
        Self::compute(&instance.state, &instance.options)
    }

    pub fn compute(state: &WindowState, options: &WindowOptions) -> Self {
        let mut frame = state.rect();
        if state.is_minimized() {
            frame.height = frame.height.min(MINIMIZED_HEIGHT);
        }
        let inner_left = frame.x + 1;
        let inner_width = (frame.width - 2).max(0);
        let header = FloatRect::new(inner_left, frame.y + 1, inner_width, 1);

        let mut controls = Vec::with_capacity(3);
        if options.show_minimize {
            controls.push(ChromeButton::Minimize);
        }
        if options.show_maximize {
            controls.push(ChromeButton::Maximize);
        }
        controls.push(ChromeButton::Close);

        let mut buttons = Vec::with_capacity(controls.len());
        let mut cursor = header.right();
        for button in controls.into_iter().rev() {
            let x = cursor - BUTTON_WIDTH;
            if x < header.x {
                break;
            }
            buttons.push((button, FloatRect::new(x, header.y, BUTTON_WIDTH, 1)));
            cursor = x;
        }
        buttons.reverse();

        let title_origin = Point::new(header.x, header.y);
        let title_width = (cursor - header.x).max(0);

        let content = (!state.is_minimized() && frame.height > 3 && inner_width > 0).then(|| {
            FloatRect::new(inner_left, frame.y + 2, inner_width, frame.height - 3)
        });

        let resizable =
            options.resizable && !state.is_minimized() && !state.is_maximized();
        let handles = if resizable {
            resize_handles(frame)
        } else {
            Vec::new()
        };

        Self {
            frame,
            header,
            title_origin,
            title_width,
            buttons,
            content,
            handles,
        }
    }

    pub fn hit_test(&self, point: Point) -> Option<ChromeHit> {
        if !self.frame.contains(point) {
            return None;
        }
        if let Some((button, _)) = self.buttons.iter().find(|(_, r)| r.contains(point)) {
            return Some(ChromeHit::Button(*button));
        }
        if let Some((dir, _)) = self.handles.iter().find(|(_, r)| r.contains(point)) {
            return Some(ChromeHit::Resize(*dir));
        }
        if self.header.contains(point) {
            return Some(ChromeHit::Header);
        }
        if self.content.is_some_and(|c| c.contains(point)) {
            return Some(ChromeHit::Content);
        }
        Some(ChromeHit::Frame)
    }

    pub fn button_rect(&self, button: ChromeButton) -> Option<FloatRect> {
        self.buttons
            .iter()
            .find(|(b, _)| *b == button)
            .map(|(_, r)| *r)
    }
}

fn resize_handles(rect: FloatRect) -> Vec<(ResizeDirection, FloatRect)> {
    let mut handles = Vec::with_capacity(8);
    if rect.width <= 0 || rect.height <= 0 {
        return handles;
    }
    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;
    let corner = |x, y| FloatRect::new(x, y, 1, 1);
    handles.push((ResizeDirection::NW, corner(rect.x, rect.y)));
    handles.push((ResizeDirection::NE, corner(right, rect.y)));
    handles.push((ResizeDirection::SW, corner(rect.x, bottom)));
    handles.push((ResizeDirection::SE, corner(right, bottom)));
    if rect.width > 2 {
        let span = rect.width - 2;
        handles.push((ResizeDirection::N, FloatRect::new(rect.x + 1, rect.y, span, 1)));
        handles.push((ResizeDirection::S, FloatRect::new(rect.x + 1, bottom, span, 1)));
    }
    if rect.height > 2 {
        let span = rect.height - 2;
        handles.push((ResizeDirection::W, FloatRect::new(rect.x, rect.y + 1, 1, span)));
        handles.push((ResizeDirection::E, FloatRect::new(right, rect.y + 1, 1, span)));
    }
    handles
}
