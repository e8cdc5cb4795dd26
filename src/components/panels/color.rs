use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::colors::Rgb;
use crate::components::Component;
use crate::error::WmResult;
use crate::layout::Point;
use crate::theme;
use crate::ui::UiFrame;

const SWATCHES: [&str; 30] = [
    "#000000", "#333333", "#666666", "#999999", "#cccccc", "#ffffff", //
    "#ff0000", "#ff6600", "#ffff00", "#66ff00", "#00ff00", "#00ff66", //
    "#00ffff", "#0066ff", "#0000ff", "#6600ff", "#ff00ff", "#ff0066", //
    "#800000", "#804000", "#808000", "#408000", "#008000", "#008040", //
    "#008080", "#004080", "#000080", "#400080", "#800080", "#800040",
];
const SWATCH_COLUMNS: i32 = 6;
const SWATCH_WIDTH: i32 = 3;
const SWATCH_TOP: i32 = 5;
const HUE_STEP: i16 = 15;
const PERCENT_STEP: i16 = 5;

/// Current color with hex entry, HSV nudging and a swatch grid.
///
/// Hue and saturation are kept alongside the RGB value so that passing
/// through black or grey does not lose them.
#[derive(Debug)]
pub struct ColorPanel {
    color: Rgb,
    hsv: (u16, u8, u8),
    input: Option<String>,
    error: Option<String>,
}

impl Default for ColorPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorPanel {
    pub fn new() -> Self {
        let color = Rgb::new(255, 0, 0);
        Self {
            color,
            hsv: color.to_hsv(),
            input: None,
            error: None,
        }
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn hsv(&self) -> (u16, u8, u8) {
        self.hsv
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.input.is_some()
    }

    /// Apply hex text. Malformed text leaves the current color in place.
    pub fn set_hex(&mut self, text: &str) -> WmResult<()> {
        match Rgb::parse_hex(text) {
            Ok(color) => {
                self.set_color(color);
                Ok(())
            }
            Err(err) => {
                tracing::debug!(%err, "rejected color input");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
        self.hsv = color.to_hsv();
        self.error = None;
    }

    fn nudge_hsv(&mut self, hue: i16, saturation: i16, value: i16) {
        let (h, s, v) = self.hsv;
        let h = (h as i16 + hue).rem_euclid(360) as u16;
        let s = (s as i16 + saturation).clamp(0, 100) as u8;
        let v = (v as i16 + value).clamp(0, 100) as u8;
        self.hsv = (h, s, v);
        self.color = Rgb::from_hsv(h, s, v);
        self.error = None;
    }

    fn edit_key(&mut self, code: KeyCode) -> bool {
        let Some(input) = self.input.as_mut() else {
            return false;
        };
        match code {
            KeyCode::Char(c) if c.is_ascii_hexdigit() && input.len() < 7 => {
                input.push(c.to_ascii_lowercase());
            }
            KeyCode::Backspace => {
                input.pop();
                if input.is_empty() {
                    self.input = None;
                }
            }
            KeyCode::Enter => {
                if let Some(text) = self.input.take() {
                    let _ = self.set_hex(&text);
                }
            }
            // Other keys are swallowed while typing.
            _ => {}
        }
        true
    }

    fn swatch_at(local: Point) -> Option<usize> {
        let row = local.y - SWATCH_TOP;
        let column = local.x / SWATCH_WIDTH;
        if row < 0 || local.x < 0 || column >= SWATCH_COLUMNS {
            return None;
        }
        let index = (row * SWATCH_COLUMNS + column) as usize;
        (index < SWATCHES.len()).then_some(index)
    }
}

impl Component for ColorPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let text_style = if focused {
            Style::default()
        } else {
            theme::muted_style()
        };
        let (h, s, v) = self.hsv;
        let mut lines = vec![
            format!("     {}", self.color.to_hex()),
            format!("RGB  {} {} {}", self.color.r, self.color.g, self.color.b),
            format!("HSV  {h}° {s}% {v}%"),
            match &self.input {
                Some(input) => format!("Hex: {input}_"),
                None => "# to type a hex value".to_string(),
            },
        ];
        if let Some(error) = &self.error {
            lines.push(error.clone());
        }
        for (row, line) in lines.iter().enumerate().take(area.height as usize) {
            let text: String = line.chars().take(area.width as usize).collect();
            frame.put_str(area.x, area.y + row as u16, &text, text_style);
        }
        let current = Style::default().bg(self.color.to_terminal_color());
        frame.put_str(area.x, area.y, "    ", current);

        for (index, hex) in SWATCHES.iter().enumerate() {
            let Ok(rgb) = Rgb::parse_hex(hex) else {
                continue;
            };
            let row = SWATCH_TOP + index as i32 / SWATCH_COLUMNS;
            let column = (index as i32 % SWATCH_COLUMNS) * SWATCH_WIDTH;
            if row >= area.height as i32 || column + SWATCH_WIDTH > area.width as i32 {
                continue;
            }
            let glyph = if rgb == self.color { " ● " } else { "   " };
            let style = Style::default()
                .bg(rgb.to_terminal_color())
                .fg(theme::accent());
            frame.put_str(area.x + column as u16, area.y + row as u16, glyph, style);
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        if self.edit_key(key.code) {
            return true;
        }
        match key.code {
            KeyCode::Char('#') => {
                self.input = Some("#".to_string());
                self.error = None;
            }
            KeyCode::Left => self.nudge_hsv(-HUE_STEP, 0, 0),
            KeyCode::Right => self.nudge_hsv(HUE_STEP, 0, 0),
            KeyCode::Up => self.nudge_hsv(0, 0, PERCENT_STEP),
            KeyCode::Down => self.nudge_hsv(0, 0, -PERCENT_STEP),
            KeyCode::PageUp => self.nudge_hsv(0, PERCENT_STEP, 0),
            KeyCode::PageDown => self.nudge_hsv(0, -PERCENT_STEP, 0),
            _ => return false,
        }
        true
    }

    fn handle_click(&mut self, local: Point) -> bool {
        let Some(index) = Self::swatch_at(local) else {
            return false;
        };
        match Rgb::parse_hex(SWATCHES[index]) {
            Ok(color) => {
                self.set_color(color);
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WmError;
    use crossterm::event::KeyModifiers;

    fn press(panel: &mut ColorPanel, code: KeyCode) -> bool {
        panel.handle_key(&KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(panel: &mut ColorPanel, text: &str) {
        for c in text.chars() {
            press(panel, KeyCode::Char(c));
        }
    }

    #[test]
    fn invalid_hex_keeps_previous_color() {
        let mut panel = ColorPanel::new();
        panel.set_hex("#00ff00").unwrap();
        assert_eq!(
            panel.set_hex("#xyz"),
            Err(WmError::InvalidHex("#xyz".into()))
        );
        assert_eq!(panel.color(), Rgb::new(0, 255, 0));
        assert!(panel.error().is_some());
    }

    #[test]
    fn typed_hex_commits_on_enter() {
        let mut panel = ColorPanel::new();
        type_text(&mut panel, "#0066FF");
        assert!(panel.is_editing());
        press(&mut panel, KeyCode::Enter);
        assert!(!panel.is_editing());
        assert_eq!(panel.color(), Rgb::new(0, 0x66, 0xff));
    }

    #[test]
    fn short_typed_hex_is_rejected_on_enter() {
        let mut panel = ColorPanel::new();
        type_text(&mut panel, "#12");
        press(&mut panel, KeyCode::Enter);
        assert_eq!(panel.color(), Rgb::new(255, 0, 0));
        assert!(panel.error().is_some());
    }

    #[test]
    fn hue_survives_dropping_to_black() {
        let mut panel = ColorPanel::new();
        press(&mut panel, KeyCode::Right);
        assert_eq!(panel.hsv().0, 15);
        for _ in 0..20 {
            press(&mut panel, KeyCode::Down);
        }
        assert_eq!(panel.color(), Rgb::new(0, 0, 0));
        press(&mut panel, KeyCode::Up);
        assert_eq!(panel.hsv().0, 15);
    }

    #[test]
    fn swatch_click_selects_color() {
        let mut panel = ColorPanel::new();
        // Row 1, column 2 of the grid: #ffff00.
        assert!(panel.handle_click(Point::new(7, SWATCH_TOP + 1)));
        assert_eq!(panel.color(), Rgb::new(255, 255, 0));
        assert!(!panel.handle_click(Point::new(40, SWATCH_TOP)));
        assert!(!panel.handle_click(Point::new(1, 0)));
    }
}
