//! sRGB colors and the WCAG 2.1 contrast ratio.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Minimum contrast ratio of normal text against its background (level AA).
pub const MIN_TEXT_CONTRAST: f64 = 4.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn relative_luminance(self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let value = f64::from(channel) / 255.0;
            if value <= 0.03928 {
                value / 12.92
            } else {
                ((value + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// Ratio between 1 (same luminance) and 21 (black on white).
    pub fn contrast_ratio(self, other: Self) -> f64 {
        let (a, b) = (self.relative_luminance(), other.relative_luminance());
        (a.max(b) + 0.05) / (a.min(b) + 0.05)
    }
}

/// Whether text in `foreground` is readable on `background`.
pub fn has_enough_contrast(foreground: Rgb, background: Rgb) -> bool {
    foreground.contrast_ratio(background) >= MIN_TEXT_CONTRAST
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Error)]
#[error("Invalid color {0:?}, expected #RRGGBB or #RGB")]
pub struct ParseRgbError(String);

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseRgbError(s.into());

        let hex = s.strip_prefix('#').ok_or_else(error)?;
        if !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(error());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| error())?;

        let channel = |shift: u32, mask: u32| ((value >> shift) & mask) as u8;
        match hex.len() {
            6 => Ok(Self::new(channel(16, 0xff), channel(8, 0xff), channel(0, 0xff))),
            3 => Ok(Self::new(
                channel(8, 0xf) * 0x11,
                channel(4, 0xf) * 0x11,
                channel(0, 0xf) * 0x11,
            )),
            _ => Err(error()),
        }
    }
}
