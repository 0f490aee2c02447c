//! Core cell-to-style decomposition.
//!
//! - **color**: (mode, value) pairs to CSS colors
//! - **cell**: the `Cell` capability trait and the captured `ScreenCell`
//! - **style**: `extract`, turning a cell into a `RenderStyle`
//!
//! # Data Flow
//!
//! ```text
//! Cell ──extract──> RenderStyle { class_list, style, text_content }
//!  │                      ▲
//!  └─(mode, value)──resolve──> "#rrggbb" | ""
//! ```

pub mod cell;
pub mod color;
pub mod style;

pub use cell::{AttrFlags, Cell, CellAttrs, RawColor, ScreenCell};
pub use color::{resolve, Color, ColorMode};
pub use style::{extract, RenderStyle};
