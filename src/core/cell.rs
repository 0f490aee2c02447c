//! Terminal cell capability set and the captured cell type.
//!
//! The style extractor only ever talks to a cell through the [`Cell`] trait, so
//! any terminal buffer can feed it. [`ScreenCell`] is the owned snapshot used
//! for captured frames.

use bitflags::bitflags;
use unicode_width::UnicodeWidthStr;

use super::color::Color;

/// Read-only view of one character position in a terminal buffer
pub trait Cell {
    fn is_bold(&self) -> bool;
    fn is_italic(&self) -> bool;
    fn is_dim(&self) -> bool;
    fn is_underline(&self) -> bool;
    fn is_strikethrough(&self) -> bool;
    fn is_blink(&self) -> bool;
    fn is_invisible(&self) -> bool;

    /// Raw foreground mode tag (0 = default, 1 = palette, 2 = rgb)
    fn fg_color_mode(&self) -> u8;
    /// Raw background mode tag (0 = default, 1 = palette, 2 = rgb)
    fn bg_color_mode(&self) -> u8;
    /// Raw foreground value, interpreted according to the mode
    fn fg_color(&self) -> u32;
    /// Raw background value, interpreted according to the mode
    fn bg_color(&self) -> u32;

    /// Character content: empty, one code point, or a grapheme cluster
    fn chars(&self) -> &str;
}

impl<C: Cell + ?Sized> Cell for &C {
    fn is_bold(&self) -> bool {
        (**self).is_bold()
    }
    fn is_italic(&self) -> bool {
        (**self).is_italic()
    }
    fn is_dim(&self) -> bool {
        (**self).is_dim()
    }
    fn is_underline(&self) -> bool {
        (**self).is_underline()
    }
    fn is_strikethrough(&self) -> bool {
        (**self).is_strikethrough()
    }
    fn is_blink(&self) -> bool {
        (**self).is_blink()
    }
    fn is_invisible(&self) -> bool {
        (**self).is_invisible()
    }
    fn fg_color_mode(&self) -> u8 {
        (**self).fg_color_mode()
    }
    fn bg_color_mode(&self) -> u8 {
        (**self).bg_color_mode()
    }
    fn fg_color(&self) -> u32 {
        (**self).fg_color()
    }
    fn bg_color(&self) -> u32 {
        (**self).bg_color()
    }
    fn chars(&self) -> &str {
        (**self).chars()
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct AttrFlags: u16 {
        const BOLD          = 0b0000_0000_0001;
        const DIM           = 0b0000_0000_0010;
        const ITALIC        = 0b0000_0000_0100;
        const UNDERLINE     = 0b0000_0000_1000;
        const BLINK         = 0b0000_0001_0000;
        const INVISIBLE     = 0b0000_0100_0000;
        const STRIKETHROUGH = 0b0000_1000_0000;
    }
}

/// A color exactly as captured, before decoding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawColor {
    pub mode: u8,
    pub value: u32,
}

impl RawColor {
    pub const fn new(mode: u8, value: u32) -> Self {
        Self { mode, value }
    }

    pub fn decode(&self) -> Color {
        Color::decode(self.mode, self.value)
    }
}

impl From<Color> for RawColor {
    fn from(color: Color) -> Self {
        Self::new(color.mode().to_raw(), color.value())
    }
}

/// Cell attributes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellAttrs {
    pub fg: RawColor,
    pub bg: RawColor,
    pub flags: AttrFlags,
}

/// A single captured cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenCell {
    pub grapheme: String,
    pub width: u16,
    pub attrs: CellAttrs,
}

impl Default for ScreenCell {
    fn default() -> Self {
        Self {
            grapheme: String::new(),
            width: 1,
            attrs: CellAttrs::default(),
        }
    }
}

impl ScreenCell {
    pub fn new(grapheme: impl Into<String>, attrs: CellAttrs) -> Self {
        let grapheme = grapheme.into();
        let width = grapheme_width(&grapheme);
        Self {
            grapheme,
            width,
            attrs,
        }
    }

    /// Right half of a double-width character
    pub fn continuation(attrs: CellAttrs) -> Self {
        Self {
            grapheme: String::new(),
            width: 0,
            attrs,
        }
    }

    pub fn is_continuation(&self) -> bool {
        self.width == 0
    }

    /// Get the display string (space if empty)
    pub fn display_char(&self) -> &str {
        if self.grapheme.is_empty() {
            " "
        } else {
            &self.grapheme
        }
    }
}

/// Column count of the content; empty and zero-width content still take one column
fn grapheme_width(grapheme: &str) -> u16 {
    let width = UnicodeWidthStr::width(grapheme).max(1);
    u16::try_from(width).unwrap_or(u16::MAX)
}

impl Cell for ScreenCell {
    fn is_bold(&self) -> bool {
        self.attrs.flags.contains(AttrFlags::BOLD)
    }
    fn is_italic(&self) -> bool {
        self.attrs.flags.contains(AttrFlags::ITALIC)
    }
    fn is_dim(&self) -> bool {
        self.attrs.flags.contains(AttrFlags::DIM)
    }
    fn is_underline(&self) -> bool {
        self.attrs.flags.contains(AttrFlags::UNDERLINE)
    }
    fn is_strikethrough(&self) -> bool {
        self.attrs.flags.contains(AttrFlags::STRIKETHROUGH)
    }
    fn is_blink(&self) -> bool {
        self.attrs.flags.contains(AttrFlags::BLINK)
    }
    fn is_invisible(&self) -> bool {
        self.attrs.flags.contains(AttrFlags::INVISIBLE)
    }
    fn fg_color_mode(&self) -> u8 {
        self.attrs.fg.mode
    }
    fn bg_color_mode(&self) -> u8 {
        self.attrs.bg.mode
    }
    fn fg_color(&self) -> u32 {
        self.attrs.fg.value
    }
    fn bg_color(&self) -> u32 {
        self.attrs.bg.value
    }
    fn chars(&self) -> &str {
        &self.grapheme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_width() {
        assert_eq!(ScreenCell::new("a", CellAttrs::default()).width, 1);
        assert_eq!(ScreenCell::new("日", CellAttrs::default()).width, 2);
        assert_eq!(ScreenCell::new("", CellAttrs::default()).width, 1);
        assert!(ScreenCell::continuation(CellAttrs::default()).is_continuation());
    }

    #[test]
    fn test_multi_column_content_keeps_full_width() {
        assert_eq!(ScreenCell::new("abc", CellAttrs::default()).width, 3);
        assert_eq!(ScreenCell::new("日本", CellAttrs::default()).width, 4);
        assert_eq!(ScreenCell::new("\u{301}", CellAttrs::default()).width, 1);
    }

    #[test]
    fn test_accessors_follow_flags() {
        let attrs = CellAttrs {
            fg: RawColor::new(1, 2),
            bg: RawColor::new(2, 0x102030),
            flags: AttrFlags::BOLD | AttrFlags::INVISIBLE,
        };
        let cell = ScreenCell::new("x", attrs);

        assert!(cell.is_bold());
        assert!(cell.is_invisible());
        assert!(!cell.is_italic());
        assert!(!cell.is_dim());
        assert_eq!(cell.fg_color_mode(), 1);
        assert_eq!(cell.fg_color(), 2);
        assert_eq!(cell.bg_color_mode(), 2);
        assert_eq!(cell.bg_color(), 0x102030);
        assert_eq!(cell.chars(), "x");
    }

    #[test]
    fn test_raw_color_from_decoded() {
        assert_eq!(RawColor::from(Color::Palette(7)), RawColor::new(1, 7));
        assert_eq!(RawColor::from(Color::Default), RawColor::new(0, 0));
        assert_eq!(RawColor::new(2, 0xFF8000).decode(), Color::Rgb(0xFF8000));
    }

    #[test]
    fn test_display_char() {
        assert_eq!(ScreenCell::default().display_char(), " ");
        assert_eq!(ScreenCell::new("e\u{301}", CellAttrs::default()).display_char(), "e\u{301}");
    }
}
