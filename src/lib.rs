//! cellstyle - terminal cells to DOM render primitives
//!
//! Decodes a terminal cell's attributes and colors into the three things a DOM
//! element needs: CSS class tokens, an inline style string and text content.
//!
//! ```
//! use cellstyle::core::{extract, CellAttrs, RawColor, ScreenCell};
//!
//! let cell = ScreenCell::new("x", CellAttrs {
//!     bg: RawColor::new(1, 1),
//!     ..CellAttrs::default()
//! });
//! let style = extract(&cell);
//! assert_eq!(style.style, "background-color: #cd0000");
//! ```
//!
//! Colors follow the xterm conventions: the 16 built-in ANSI colors, the
//! 6x6x6 cube, the 24-step grayscale ramp and direct 24-bit RGB.

pub mod config;
pub mod core;
pub mod frame;
pub mod ui;
