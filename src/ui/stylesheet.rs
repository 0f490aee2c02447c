//! CSS rules for the cell class tokens

use std::fmt::Write;

use crate::config::StylesheetConfig;
use crate::core::style::{
    CLASS_BLINK, CLASS_BOLD, CLASS_DIM, CLASS_INVISIBLE, CLASS_ITALIC, CLASS_STRIKETHROUGH,
    CLASS_UNDERLINE,
};

/// Build the stylesheet defining every class the extractor can emit
pub fn stylesheet(config: &StylesheetConfig) -> String {
    let mut css = String::new();
    let _ = writeln!(css, ".{} {{ font-weight: bold; }}", CLASS_BOLD);
    let _ = writeln!(css, ".{} {{ font-style: italic; }}", CLASS_ITALIC);
    let _ = writeln!(
        css,
        ".{} {{ opacity: {}; }}",
        CLASS_DIM,
        config.dim_opacity.clamp(0.0, 1.0)
    );
    let _ = writeln!(css, ".{} {{ text-decoration: underline; }}", CLASS_UNDERLINE);
    let _ = writeln!(
        css,
        ".{} {{ text-decoration: line-through; }}",
        CLASS_STRIKETHROUGH
    );
    // Both decorations on one element would otherwise override each other
    let _ = writeln!(
        css,
        ".{}.{} {{ text-decoration: underline line-through; }}",
        CLASS_UNDERLINE, CLASS_STRIKETHROUGH
    );
    let _ = writeln!(
        css,
        ".{} {{ animation: xterm-blink {}ms step-end infinite; }}",
        CLASS_BLINK, config.blink_period_ms
    );
    let _ = writeln!(css, "@keyframes xterm-blink {{ 50% {{ visibility: hidden; }} }}");
    let _ = writeln!(css, ".{} {{ visibility: hidden; }}", CLASS_INVISIBLE);
    css
}
