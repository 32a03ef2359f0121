//! RGB colours parsed from CSS-style hex strings.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// An opaque 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fade towards black. `factor` is clamped to 0.0-1.0.
    pub fn faded(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * factor).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    /// Parse `#rrggbb`, `rrggbb` or the short `#rgb` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ConfigError::Color(s.to_string());
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let short = |digit: &str| channel(digit).map(|v| v * 17);
                Ok(Self::new(
                    short(&hex[0..1])?,
                    short(&hex[1..2])?,
                    short(&hex[2..3])?,
                ))
            }
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for Color {
    fn from(value: Rgb) -> Self {
        Color::Rgb(value.r, value.g, value.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!("#4a9eff".parse::<Rgb>(), Ok(Rgb::new(0x4a, 0x9e, 0xff)));
        assert_eq!("82CA9D".parse::<Rgb>(), Ok(Rgb::new(0x82, 0xca, 0x9d)));
        assert_eq!("#fff".parse::<Rgb>(), Ok(Rgb::WHITE));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
        assert!("".parse::<Rgb>().is_err());
        assert!("#+1+2+3".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let color = Rgb::new(0xff, 0xc6, 0x58);
        assert_eq!(color.to_string(), "#ffc658");
        assert_eq!(color.to_string().parse::<Rgb>(), Ok(color));
    }

    #[test]
    fn test_faded() {
        assert_eq!(Rgb::WHITE.faded(0.0), Rgb::BLACK);
        assert_eq!(Rgb::WHITE.faded(1.0), Rgb::WHITE);
        assert_eq!(Rgb::new(100, 200, 50).faded(0.5), Rgb::new(50, 100, 25));
        assert_eq!(Rgb::WHITE.faded(3.0), Rgb::WHITE);
    }
}
