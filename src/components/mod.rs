use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::layout::Point;
use crate::ui::UiFrame;

pub mod debug_log;
pub mod help_overlay;
pub mod list;
pub mod panels;
pub mod status_bar;
pub mod toggle_list;

pub use debug_log::{DebugLogComponent, DebugLogHandle};
pub use help_overlay::HelpOverlayComponent;
pub use list::SelectList;
pub use status_bar::StatusBar;
pub use toggle_list::{ToggleItem, ToggleList};

/// Something that draws into a window's content area and takes input while
/// that window holds focus.
pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool);

    fn handle_key(&mut self, _key: &KeyEvent) -> bool {
        false
    }

    /// Pointer press at `local`, relative to the content's top-left cell.
    fn handle_click(&mut self, _local: Point) -> bool {
        false
    }
}
