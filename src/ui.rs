//! UiFrame: a thin wrapper around `ratatui::Frame` that clips drawing to the
//! visible area.
//!
//! Floating windows can be dragged partly off-screen when they are not
//! constrained to the viewport, so chrome and panel content regularly compute
//! rectangles that spill past the buffer. Routing every draw through
//! `UiFrame` keeps those writes inside the buffer.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer, for offscreen
    /// rendering and tests.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Write `text` starting at (`x`, `y`), dropping cells outside the area.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, style: ratatui::style::Style) {
        let right = self.area.x.saturating_add(self.area.width);
        let bottom = self.area.y.saturating_add(self.area.height);
        if y < self.area.y || y >= bottom {
            return;
        }
        for (idx, ch) in text.chars().enumerate() {
            let cx = x.saturating_add(idx as u16);
            if cx >= right {
                break;
            }
            if cx < self.area.x {
                continue;
            }
            if let Some(cell) = self.buffer.cell_mut((cx, y)) {
                cell.set_char(ch);
                cell.set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;
    use ratatui::widgets::Clear;

    #[test]
    fn put_str_clips_to_area() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 4,
            height: 1,
        };
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        frame.put_str(2, 0, "abcdef", Style::default());
        frame.put_str(0, 3, "zz", Style::default());
        assert_eq!(buffer[(2, 0)].symbol(), "a");
        assert_eq!(buffer[(3, 0)].symbol(), "b");
        assert_eq!(buffer[(0, 0)].symbol(), " ");
    }

    #[test]
    fn render_widget_outside_area_is_dropped() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 4,
            height: 2,
        };
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        frame.render_widget(
            Clear,
            Rect {
                x: 10,
                y: 10,
                width: 2,
                height: 2,
            },
        );
    }
}
