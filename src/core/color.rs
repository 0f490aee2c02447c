//! Terminal color decoding
//!
//! Turns the raw (mode, value) pairs captured from a terminal buffer into CSS
//! color strings. Palette indices follow the xterm layout:
//!
//! ```text
//!   0..16    base ANSI colors (xterm built-in defaults)
//!  16..232   6x6x6 RGB cube
//! 232..256   24-step grayscale ramp
//! ```

use tracing::warn;

/// Standard xterm ANSI colors (indices 0-15) as `(r, g, b)`.
pub const ANSI_COLORS: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00), // 0  Black
    (0xcd, 0x00, 0x00), // 1  Red
    (0x00, 0xcd, 0x00), // 2  Green
    (0xcd, 0xcd, 0x00), // 3  Yellow
    (0x00, 0x00, 0xee), // 4  Blue
    (0xcd, 0x00, 0xcd), // 5  Magenta
    (0x00, 0xcd, 0xcd), // 6  Cyan
    (0xe5, 0xe5, 0xe5), // 7  White
    (0x7f, 0x7f, 0x7f), // 8  Bright Black
    (0xff, 0x00, 0x00), // 9  Bright Red
    (0x00, 0xff, 0x00), // 10 Bright Green
    (0xff, 0xff, 0x00), // 11 Bright Yellow
    (0x5c, 0x5c, 0xff), // 12 Bright Blue
    (0xff, 0x00, 0xff), // 13 Bright Magenta
    (0x00, 0xff, 0xff), // 14 Bright Cyan
    (0xff, 0xff, 0xff), // 15 Bright White
];

/// First index of the 6x6x6 color cube
const CUBE_START: u8 = 16;
/// First index of the grayscale ramp
const GRAY_START: u8 = 232;

/// How a captured color value must be interpreted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Default,
    Palette,
    Rgb,
}

impl ColorMode {
    /// Decode the raw mode tag (0 = default, 1 = palette, 2 = rgb)
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(ColorMode::Default),
            1 => Some(ColorMode::Palette),
            2 => Some(ColorMode::Rgb),
            _ => None,
        }
    }

    /// Raw mode tag as reported by a terminal buffer
    pub fn to_raw(self) -> u8 {
        match self {
            ColorMode::Default => 0,
            ColorMode::Palette => 1,
            ColorMode::Rgb => 2,
        }
    }
}

/// Decoded color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Color {
    /// Inherit from the surrounding element
    #[default]
    Default,
    /// 256-color palette index
    Palette(u8),
    /// Packed 0xRRGGBB
    Rgb(u32),
}

impl Color {
    /// Decode a raw (mode, value) pair.
    ///
    /// Unknown modes decode to `Default`. Palette values past 255 are outside
    /// the xterm palette and are also treated as `Default`.
    pub fn decode(mode: u8, value: u32) -> Self {
        match ColorMode::from_raw(mode) {
            Some(ColorMode::Default) | None => Color::Default,
            Some(ColorMode::Palette) => match u8::try_from(value) {
                Ok(index) => Color::Palette(index),
                Err(_) => {
                    warn!("palette index {} out of range, using default color", value);
                    Color::Default
                }
            },
            Some(ColorMode::Rgb) => Color::Rgb(value),
        }
    }

    /// Mode tag of this color
    pub fn mode(&self) -> ColorMode {
        match self {
            Color::Default => ColorMode::Default,
            Color::Palette(_) => ColorMode::Palette,
            Color::Rgb(_) => ColorMode::Rgb,
        }
    }

    /// Raw value as a terminal buffer would report it
    pub fn value(&self) -> u32 {
        match self {
            Color::Default => 0,
            Color::Palette(n) => *n as u32,
            Color::Rgb(v) => *v,
        }
    }

    /// Concrete channels, or `None` for the default color
    pub fn to_rgb(&self) -> Option<(u8, u8, u8)> {
        match *self {
            Color::Default => None,
            Color::Palette(n) => Some(palette_rgb(n)),
            Color::Rgb(v) => Some((
                ((v >> 16) & 0xFF) as u8,
                ((v >> 8) & 0xFF) as u8,
                (v & 0xFF) as u8,
            )),
        }
    }

    /// CSS color (`#rrggbb`), or an empty string to inherit
    pub fn to_css(&self) -> String {
        match self.to_rgb() {
            Some((r, g, b)) => format!("#{:02x}{:02x}{:02x}", r, g, b),
            None => String::new(),
        }
    }

    /// Convert to crossterm color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        match self {
            Color::Default => crossterm::style::Color::Reset,
            Color::Palette(n) => crossterm::style::Color::AnsiValue(*n),
            Color::Rgb(_) => {
                let (r, g, b) = self.to_rgb().unwrap_or((0, 0, 0));
                crossterm::style::Color::Rgb { r, g, b }
            }
        }
    }
}

/// Channels for a 256-color palette index
pub fn palette_rgb(index: u8) -> (u8, u8, u8) {
    if index < CUBE_START {
        ANSI_COLORS[index as usize]
    } else if index < GRAY_START {
        let c = index - CUBE_START;
        (cube_level(c / 36), cube_level((c % 36) / 6), cube_level(c % 6))
    } else {
        let gray = (index - GRAY_START) * 10 + 8;
        (gray, gray, gray)
    }
}

/// 0, 95, 135, 175, 215, 255
fn cube_level(k: u8) -> u8 {
    if k == 0 {
        0
    } else {
        k * 40 + 55
    }
}

/// Resolve a raw (mode, value) pair to a CSS color string.
///
/// Returns `""` when the color should be inherited.
pub fn resolve(mode: u8, value: u32) -> String {
    Color::decode(mode, value).to_css()
}
