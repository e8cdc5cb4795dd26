use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Clear;

use crate::layout::{FloatRect, visible_rect};
use crate::theme;
use crate::ui::UiFrame;

use super::chrome::{ChromeButton, ChromeLayout, GRIP};
use super::state::WindowState;

/// Draws window chrome into the frame. Geometry is in viewport cells
/// relative to `area`; anything outside `area` is clipped.
pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        area: Rect,
        layout: &ChromeLayout,
        title: &str,
        state: &WindowState,
        focus: WindowFocus,
    );

    /// Outline where a dragged window would land when released.
    fn render_snap_preview(&self, frame: &mut UiFrame<'_>, area: Rect, rect: FloatRect);

    /// Dim everything beneath a modal window.
    fn render_backdrop(&self, frame: &mut UiFrame<'_>, area: Rect);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowFocus {
    pub window: bool,
    /// Header control holding keyboard focus, if any.
    pub button: Option<ChromeButton>,
}

#[derive(Debug, Default)]
pub struct DefaultDecorator;

impl DefaultDecorator {
    fn put(frame: &mut UiFrame<'_>, area: Rect, x: i32, y: i32, text: &str, style: Style) {
        if y < 0 || y >= area.height as i32 {
            return;
        }
        for (idx, ch) in text.chars().enumerate() {
            let cx = x + idx as i32;
            if cx < 0 {
                continue;
            }
            if cx >= area.width as i32 {
                break;
            }
            let mut tmp = [0u8; 4];
            frame.put_str(
                area.x + cx as u16,
                area.y + y as u16,
                ch.encode_utf8(&mut tmp),
                style,
            );
        }
    }

    fn outline(
        frame: &mut UiFrame<'_>,
        area: Rect,
        rect: FloatRect,
        glyphs: [&str; 6],
        style: Style,
    ) {
        let [horizontal, vertical, tl, tr, bl, br] = glyphs;
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;
        for x in rect.x + 1..right {
            Self::put(frame, area, x, rect.y, horizontal, style);
            Self::put(frame, area, x, bottom, horizontal, style);
        }
        for y in rect.y + 1..bottom {
            Self::put(frame, area, rect.x, y, vertical, style);
            Self::put(frame, area, right, y, vertical, style);
        }
        Self::put(frame, area, rect.x, rect.y, tl, style);
        Self::put(frame, area, right, rect.y, tr, style);
        Self::put(frame, area, rect.x, bottom, bl, style);
        Self::put(frame, area, right, bottom, br, style);
    }
}

impl WindowDecorator for DefaultDecorator {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        area: Rect,
        layout: &ChromeLayout,
        title: &str,
        state: &WindowState,
        focus: WindowFocus,
    ) {
        let Some(visible) = visible_rect(layout.frame, area) else {
            return;
        };
        frame.render_widget(Clear, visible);

        let border = theme::border_style(focus.window);
        Self::outline(
            frame,
            area,
            layout.frame,
            ["─", "│", "┌", "┐", "└", "┘"],
            border,
        );

        let header_style = theme::header_style(focus.window);
        let header = layout.header;
        for x in header.x..header.right() {
            Self::put(frame, area, x, header.y, " ", header_style);
        }

        let label: String = GRIP
            .chars()
            .chain(title.chars())
            .take(layout.title_width.max(0) as usize)
            .collect();
        Self::put(
            frame,
            area,
            layout.title_origin.x,
            layout.title_origin.y,
            &label,
            header_style,
        );

        for (button, rect) in &layout.buttons {
            let style = if focus.button == Some(*button) {
                theme::focused_control_style()
            } else {
                header_style
            };
            Self::put(frame, area, rect.x, rect.y, button.label(state), style);
        }

        // Corner grips advertise resizability.
        if !layout.handles.is_empty() {
            let grip = border.add_modifier(Modifier::BOLD);
            Self::put(
                frame,
                area,
                layout.frame.right() - 1,
                layout.frame.bottom() - 1,
                "┛",
                grip,
            );
        }
    }

    fn render_snap_preview(&self, frame: &mut UiFrame<'_>, area: Rect, rect: FloatRect) {
        Self::outline(
            frame,
            area,
            rect,
            ["═", "║", "╔", "╗", "╚", "╝"],
            theme::snap_preview_style(),
        );
    }

    fn render_backdrop(&self, frame: &mut UiFrame<'_>, area: Rect) {
        let buffer = frame.buffer_mut();
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.modifier.insert(Modifier::DIM);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Point, Size};
    use crate::window::WindowOptions;
    use ratatui::buffer::Buffer;

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn draws_border_title_and_close_control() {
        let area = Rect::new(0, 0, 20, 6);
        let mut buffer = Buffer::empty(area);
        let state = WindowState::new(Point::new(1, 0), Size::new(16, 5), 1);
        let layout = ChromeLayout::compute(&state, &WindowOptions::default());
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        DefaultDecorator.render_window(
            &mut frame,
            area,
            &layout,
            "Color",
            &state,
            WindowFocus::default(),
        );
        assert!(row(&buffer, 0).starts_with(" ┌──"));
        let header = row(&buffer, 1);
        assert!(header.contains("≡ Color"), "{header}");
        assert!(header.contains("[_][x]│"), "{header}");
        assert!(row(&buffer, 4).starts_with(" └"));
    }

    #[test]
    fn long_titles_stop_before_controls() {
        let area = Rect::new(0, 0, 14, 4);
        let mut buffer = Buffer::empty(area);
        let state = WindowState::new(Point::new(0, 0), Size::new(14, 4), 1);
        let layout = ChromeLayout::compute(&state, &WindowOptions::default());
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        DefaultDecorator.render_window(
            &mut frame,
            area,
            &layout,
            "A very long title",
            &state,
            WindowFocus::default(),
        );
        assert_eq!(row(&buffer, 1), "│≡ A ve[_][x]│");
    }

    #[test]
    fn offscreen_window_is_clipped() {
        let area = Rect::new(0, 0, 10, 4);
        let mut buffer = Buffer::empty(area);
        let state = WindowState::new(Point::new(-5, -1), Size::new(8, 4), 1);
        let layout = ChromeLayout::compute(&state, &WindowOptions::default());
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        DefaultDecorator.render_window(
            &mut frame,
            area,
            &layout,
            "t",
            &state,
            WindowFocus::default(),
        );
        assert_eq!(buffer[(0, 0)].symbol(), "x");
        assert_eq!(buffer[(1, 0)].symbol(), "]");
        assert_eq!(buffer[(2, 0)].symbol(), "│");
        assert_eq!(buffer[(2, 2)].symbol(), "┘");
        assert_eq!(buffer[(5, 0)].symbol(), " ");
    }
}
