//! Terminal preview of captured frames
//!
//! Replays a frame to a terminal stream with crossterm so a capture can be
//! inspected without a browser.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{
        Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
};

use crate::core::{AttrFlags, CellAttrs};
use crate::frame::Frame;

/// Write the frame to `out`, one line per row
pub fn preview<W: Write>(out: &mut W, frame: &Frame) -> io::Result<()> {
    for row in &frame.rows {
        let mut line_buffer = String::new();
        let mut current_attrs: Option<CellAttrs> = None;

        for cell in row.visible_cells() {
            if current_attrs != Some(cell.attrs) {
                if let Some(attrs) = current_attrs {
                    apply_attrs(out, &attrs)?;
                    queue!(out, Print(&line_buffer))?;
                    line_buffer.clear();
                }
                current_attrs = Some(cell.attrs);
            }
            line_buffer.push_str(cell.display_char());
        }

        if let Some(attrs) = current_attrs {
            apply_attrs(out, &attrs)?;
            queue!(out, Print(&line_buffer))?;
        }
        queue!(out, ResetColor, SetAttribute(Attribute::Reset), Print("\r\n"))?;
    }

    out.flush()
}

/// Apply cell attributes
fn apply_attrs<W: Write>(out: &mut W, attrs: &CellAttrs) -> io::Result<()> {
    // Reset first
    queue!(out, SetAttribute(Attribute::Reset))?;

    let mapping = [
        (AttrFlags::BOLD, Attribute::Bold),
        (AttrFlags::ITALIC, Attribute::Italic),
        (AttrFlags::DIM, Attribute::Dim),
        (AttrFlags::UNDERLINE, Attribute::Underlined),
        (AttrFlags::STRIKETHROUGH, Attribute::CrossedOut),
        (AttrFlags::BLINK, Attribute::SlowBlink),
        (AttrFlags::INVISIBLE, Attribute::Hidden),
    ];
    for (flag, attribute) in mapping {
        if attrs.flags.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }

    let fg = attrs.fg.decode().to_crossterm();
    if fg != TermColor::Reset {
        queue!(out, SetForegroundColor(fg))?;
    }
    let bg = attrs.bg.decode().to_crossterm();
    if bg != TermColor::Reset {
        queue!(out, SetBackgroundColor(bg))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(toml: &str) -> String {
        let frame = Frame::parse(toml).unwrap();
        let mut out = Vec::new();
        preview(&mut out, &frame).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_text() {
        let out = render("cols = 2\n[[rows]]\n[[rows.cells]]\nchars = \"h\"\n[[rows.cells]]\nchars = \"i\"\n");
        assert!(out.contains("hi"));
        assert!(out.ends_with("\r\n"));
    }

    #[test]
    fn test_bold_and_colors() {
        let out = render(
            r#"
cols = 1
[[rows]]
[[rows.cells]]
chars = "x"
bold = true
fg_mode = 2
fg = 16744448
bg_mode = 1
bg = 4
"#,
        );
        assert!(out.contains("\x1b[1m"));
        assert!(out.contains("\x1b[38;2;255;128;0m"));
        assert!(out.contains("\x1b[48;5;4m"));
        assert!(out.contains('x'));
    }

    #[test]
    fn test_default_colors_not_emitted() {
        let out = render("cols = 1\n[[rows]]\n[[rows.cells]]\nchars = \"x\"\n");
        assert!(!out.contains("38;"));
        assert!(!out.contains("48;"));
    }

    #[test]
    fn test_empty_cells_render_as_space() {
        let out = render("cols = 2\n[[rows]]\n[[rows.cells]]\n[[rows.cells]]\nchars = \"y\"\n");
        assert!(out.contains(" y"));
    }
}
