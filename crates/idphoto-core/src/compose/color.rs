use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{IdPhotoError, Result};

/// Opaque RGB background color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BackgroundColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BackgroundColor {
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || IdPhotoError::InvalidColor(format!("'{s}' is not a hex color"));

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
                Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                // #abc expands to #aabbcc
                let channel = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::rgb(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, u8::MAX]
    }
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for BackgroundColor {
    type Err = IdPhotoError;

    /// Accepts a preset name (e.g. "light blue") or a hex color.
    fn from_str(s: &str) -> Result<Self> {
        match preset_by_name(s) {
            Some(preset) => Ok(preset.color),
            None => Self::from_hex(s),
        }
    }
}

impl TryFrom<String> for BackgroundColor {
    type Error = IdPhotoError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<BackgroundColor> for String {
    fn from(c: BackgroundColor) -> Self {
        c.to_string()
    }
}

/// A named background color offered to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorPreset {
    pub name: &'static str,
    pub color: BackgroundColor,
}

const fn preset(name: &'static str, r: u8, g: u8, b: u8) -> ColorPreset {
    ColorPreset {
        name,
        color: BackgroundColor::rgb(r, g, b),
    }
}

/// Standard ID-photo background colors.
pub const PRESET_COLORS: &[ColorPreset] = &[
    preset("White", 0xff, 0xff, 0xff),
    preset("Light Blue", 0xa6, 0xd8, 0xff),
    preset("Blue", 0x00, 0x7b, 0xff),
    preset("Red", 0xdc, 0x35, 0x45),
    preset("Gray", 0x6c, 0x75, 0x7d),
    preset("Light Gray", 0xf0, 0xf0, 0xf0),
    preset("Dark Blue", 0x00, 0x33, 0x66),
    preset("Light Red", 0xff, 0xcc, 0xcc),
    preset("Light Green", 0xcc, 0xff, 0xcc),
];

/// Look up a preset by name, ignoring case, spaces, dashes and underscores.
pub fn preset_by_name(name: &str) -> Option<&'static ColorPreset> {
    let wanted = normalize_name(name);
    PRESET_COLORS
        .iter()
        .find(|p| normalize_name(p.name) == wanted)
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_hex() {
        assert_eq!(
            BackgroundColor::from_hex("#a6d8ff").unwrap(),
            BackgroundColor::rgb(0xa6, 0xd8, 0xff)
        );
        assert_eq!(
            BackgroundColor::from_hex("F0F").unwrap(),
            BackgroundColor::rgb(0xff, 0x00, 0xff)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(BackgroundColor::from_hex("#12345").is_err());
        assert!(BackgroundColor::from_hex("#gg0000").is_err());
        assert!(BackgroundColor::from_hex("").is_err());
        // Multi-byte characters must not panic on slicing.
        assert!(BackgroundColor::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        assert_eq!(BackgroundColor::rgb(0xDC, 0x35, 0x45).to_string(), "#dc3545");
    }

    #[test]
    fn test_preset_lookup_is_lenient() {
        assert_eq!(
            preset_by_name("light-blue").map(|p| p.color),
            Some(BackgroundColor::rgb(0xa6, 0xd8, 0xff))
        );
        assert_eq!(preset_by_name("DARK_BLUE").map(|p| p.name), Some("Dark Blue"));
        assert!(preset_by_name("mauve").is_none());
    }

    #[test]
    fn test_from_str_accepts_names_and_hex() {
        assert_eq!("red".parse::<BackgroundColor>().unwrap().to_string(), "#dc3545");
        assert_eq!("#003366".parse::<BackgroundColor>().unwrap().to_string(), "#003366");
    }

    #[test]
    fn test_nine_presets() {
        assert_eq!(PRESET_COLORS.len(), 9);
        assert_eq!(PRESET_COLORS[0].color, BackgroundColor::WHITE);
    }
}
