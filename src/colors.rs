//! Small color helpers for panel swatches and the theme: hex parsing, HSV
//! conversion and mapping to what the terminal can show.

use ratatui::style::Color;

use crate::error::{WmError, WmResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `rrggbb` or the short `#rgb` form.
    pub fn parse_hex(text: &str) -> WmResult<Self> {
        let invalid = || WmError::InvalidHex(text.to_string());
        let digits = text.trim().strip_prefix('#').unwrap_or(text.trim());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Hue in degrees (0..360), saturation and value in percent (0..=100).
    pub fn to_hsv(self) -> (u16, u8, u8) {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (((g - b) / delta).rem_euclid(6.0))
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let saturation = if max == 0.0 { 0.0 } else { delta / max };
        (
            (hue.round() as u16) % 360,
            (saturation * 100.0).round() as u8,
            (max * 100.0).round() as u8,
        )
    }

    pub fn from_hsv(hue: u16, saturation: u8, value: u8) -> Self {
        let h = (hue % 360) as f32;
        let s = saturation.min(100) as f32 / 100.0;
        let v = value.min(100) as f32 / 100.0;
        let c = v * s;
        let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match (h / 60.0) as u8 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_u8 = |f: f32| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Truecolor when the terminal advertises it, else the nearest entry of
    /// the xterm 6x6x6 cube.
    pub fn to_terminal_color(self) -> Color {
        let truecolor = std::env::var("COLORTERM")
            .map(|v| {
                let v = v.to_lowercase();
                v.contains("truecolor") || v.contains("24bit")
            })
            .unwrap_or(false);
        if truecolor {
            Color::Rgb(self.r, self.g, self.b)
        } else {
            Color::Indexed(self.xterm_index())
        }
    }

    pub fn xterm_index(self) -> u8 {
        let level = |v: u8| ((v as u16 * 5 + 127) / 255) as u8;
        16 + 36 * level(self.r) + 6 * level(self.g) + level(self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb::parse_hex("#ff6600"), Ok(Rgb::new(255, 102, 0)));
        assert_eq!(Rgb::parse_hex("00ff66"), Ok(Rgb::new(0, 255, 102)));
        assert_eq!(Rgb::parse_hex("#0f8"), Ok(Rgb::new(0, 255, 136)));
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#", "#ff00", "#gg0000", "#ff00000", "red", "#ff 000"] {
            assert!(
                matches!(Rgb::parse_hex(bad), Err(WmError::InvalidHex(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn hsv_conversions_agree_on_primaries() {
        assert_eq!(Rgb::new(255, 0, 0).to_hsv(), (0, 100, 100));
        assert_eq!(Rgb::new(0, 255, 0).to_hsv(), (120, 100, 100));
        assert_eq!(Rgb::new(0, 0, 255).to_hsv(), (240, 100, 100));
        assert_eq!(Rgb::from_hsv(120, 100, 100), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::from_hsv(0, 0, 0), Rgb::new(0, 0, 0));
        assert_eq!(Rgb::new(0x80, 0x80, 0x80).to_hex(), "#808080");
    }

    #[test]
    fn xterm_cube_corners() {
        assert_eq!(Rgb::new(0, 0, 0).xterm_index(), 16);
        assert_eq!(Rgb::new(255, 255, 255).xterm_index(), 231);
        assert_eq!(Rgb::new(255, 0, 0).xterm_index(), 196);
    }
}
