//! Cell style extraction
//!
//! Decomposes one terminal cell into the pieces a DOM element needs: a class
//! attribute, an inline style attribute and a text node.

use super::cell::Cell;
use super::color::resolve;

pub const CLASS_BOLD: &str = "xterm-bold";
pub const CLASS_ITALIC: &str = "xterm-italic";
pub const CLASS_DIM: &str = "xterm-dim";
pub const CLASS_UNDERLINE: &str = "xterm-underline";
pub const CLASS_STRIKETHROUGH: &str = "xterm-strikethrough";
pub const CLASS_BLINK: &str = "xterm-blink";
pub const CLASS_INVISIBLE: &str = "xterm-invisible";

/// Every class token the extractor can emit, in check order
pub const CLASS_TOKENS: [&str; 7] = [
    CLASS_BOLD,
    CLASS_ITALIC,
    CLASS_DIM,
    CLASS_UNDERLINE,
    CLASS_STRIKETHROUGH,
    CLASS_BLINK,
    CLASS_INVISIBLE,
];

/// CSS decomposition of a cell
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderStyle {
    /// Space-separated class tokens
    pub class_list: String,
    /// `"; "`-separated declarations, foreground first
    pub style: String,
    /// Cell content, unmodified
    pub text_content: String,
}

impl RenderStyle {
    /// Same class list and inline style, text ignored
    pub fn same_look(&self, other: &RenderStyle) -> bool {
        self.class_list == other.class_list && self.style == other.style
    }
}

/// Extract the render style of a cell
pub fn extract<C: Cell + ?Sized>(cell: &C) -> RenderStyle {
    let checks = [
        cell.is_bold(),
        cell.is_italic(),
        cell.is_dim(),
        cell.is_underline(),
        cell.is_strikethrough(),
        cell.is_blink(),
        cell.is_invisible(),
    ];
    let classes: Vec<&str> = CLASS_TOKENS
        .iter()
        .zip(checks)
        .filter_map(|(token, on)| on.then_some(*token))
        .collect();

    let mut styles = Vec::with_capacity(2);
    let fg = resolve(cell.fg_color_mode(), cell.fg_color());
    if !fg.is_empty() {
        styles.push(format!("color: {}", fg));
    }
    let bg = resolve(cell.bg_color_mode(), cell.bg_color());
    if !bg.is_empty() {
        styles.push(format!("background-color: {}", bg));
    }

    RenderStyle {
        class_list: classes.join(" "),
        style: styles.join("; "),
        text_content: cell.chars().to_string(),
    }
}
