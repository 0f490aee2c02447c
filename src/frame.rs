//! Captured terminal frames
//!
//! A frame is the visible region of some external terminal buffer, serialized
//! as TOML. Colors are stored as raw (mode, value) pairs and only decoded when
//! a cell is styled.
//!
//! ```toml
//! cols = 20
//!
//! [[rows]]
//! [[rows.cells]]
//! chars = "$"
//! bold = true
//! fg_mode = 1
//! fg = 2
//!
//! [[rows.cells]]
//! chars = " "
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::core::{AttrFlags, CellAttrs, RawColor, ScreenCell};

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Failed to read frame: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid frame: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Frame width must be at least one column")]
    EmptyWidth,

    #[error("Row {row} is {width} columns wide but the frame has {cols}")]
    RowTooWide { row: usize, width: usize, cols: u16 },
}

pub type Result<T> = std::result::Result<T, FrameError>;

/// One cell as it appears in a frame file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CellRecord {
    chars: String,
    bold: bool,
    italic: bool,
    dim: bool,
    underline: bool,
    strikethrough: bool,
    blink: bool,
    invisible: bool,
    fg_mode: u8,
    fg: u32,
    bg_mode: u8,
    bg: u32,
}

impl CellRecord {
    fn attrs(&self) -> CellAttrs {
        let mut flags = AttrFlags::empty();
        flags.set(AttrFlags::BOLD, self.bold);
        flags.set(AttrFlags::ITALIC, self.italic);
        flags.set(AttrFlags::DIM, self.dim);
        flags.set(AttrFlags::UNDERLINE, self.underline);
        flags.set(AttrFlags::STRIKETHROUGH, self.strikethrough);
        flags.set(AttrFlags::BLINK, self.blink);
        flags.set(AttrFlags::INVISIBLE, self.invisible);
        CellAttrs {
            fg: RawColor::new(self.fg_mode, self.fg),
            bg: RawColor::new(self.bg_mode, self.bg),
            flags,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RowRecord {
    cells: Vec<CellRecord>,
}

#[derive(Debug, Deserialize)]
struct FrameRecord {
    cols: u16,
    #[serde(default)]
    rows: Vec<RowRecord>,
}

/// A single row of captured cells
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    pub cells: Vec<ScreenCell>,
}

impl Row {
    /// Display width in columns
    pub fn width(&self) -> usize {
        self.cells.iter().map(|c| c.width as usize).sum()
    }

    /// Cells that occupy their own position (continuations skipped)
    pub fn visible_cells(&self) -> impl Iterator<Item = &ScreenCell> {
        self.cells.iter().filter(|c| !c.is_continuation())
    }
}

/// A captured screen region
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub cols: u16,
    pub rows: Vec<Row>,
}

impl Frame {
    /// Load a frame from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let frame = Self::parse(&content)?;
        debug!(
            "Loaded frame {}: {}x{}",
            path.display(),
            frame.cols,
            frame.rows.len()
        );
        Ok(frame)
    }

    /// Parse a frame from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let record: FrameRecord = toml::from_str(content)?;
        if record.cols == 0 {
            return Err(FrameError::EmptyWidth);
        }

        let mut rows = Vec::with_capacity(record.rows.len());
        for (index, row_record) in record.rows.into_iter().enumerate() {
            let row = build_row(row_record);
            let width = row.width();
            if width > record.cols as usize {
                return Err(FrameError::RowTooWide {
                    row: index,
                    width,
                    cols: record.cols,
                });
            }
            rows.push(row);
        }

        Ok(Self {
            cols: record.cols,
            rows,
        })
    }
}

/// Build a row, marking the empty cell after a wide character as its continuation
fn build_row(record: RowRecord) -> Row {
    let mut cells: Vec<ScreenCell> = Vec::with_capacity(record.cells.len());
    for cell in record.cells {
        let attrs = cell.attrs();
        let follows_wide = cells.last().map_or(false, |prev| prev.width == 2);
        if follows_wide && cell.chars.is_empty() {
            cells.push(ScreenCell::continuation(attrs));
        } else {
            cells.push(ScreenCell::new(cell.chars, attrs));
        }
    }
    Row { cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cell;
    use std::io::Write;

    #[test]
    fn test_parse_defaults() {
        let frame = Frame::parse(
            r#"
cols = 4
[[rows]]
[[rows.cells]]
chars = "a"
[[rows.cells]]
"#,
        )
        .unwrap();

        assert_eq!(frame.cols, 4);
        assert_eq!(frame.rows.len(), 1);
        let cells = &frame.rows[0].cells;
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].chars(), "a");
        assert_eq!(cells[1].chars(), "");
        assert_eq!(cells[1].fg_color_mode(), 0);
        assert!(!cells[1].is_bold());
    }

    #[test]
    fn test_parse_attributes_and_colors() {
        let frame = Frame::parse(
            r#"
cols = 2
[[rows]]
[[rows.cells]]
chars = "x"
bold = true
strikethrough = true
fg_mode = 2
fg = 16744448
bg_mode = 1
bg = 300
"#,
        )
        .unwrap();

        let cell = &frame.rows[0].cells[0];
        assert!(cell.is_bold());
        assert!(cell.is_strikethrough());
        assert!(!cell.is_underline());
        assert_eq!(cell.fg_color(), 0xFF8000);
        // kept as captured, decoding happens later
        assert_eq!(cell.bg_color_mode(), 1);
        assert_eq!(cell.bg_color(), 300);
    }

    #[test]
    fn test_wide_char_continuation() {
        let frame = Frame::parse(
            r#"
cols = 3
[[rows]]
[[rows.cells]]
chars = "日"
[[rows.cells]]
[[rows.cells]]
chars = "b"
"#,
        )
        .unwrap();

        let row = &frame.rows[0];
        assert!(row.cells[1].is_continuation());
        assert_eq!(row.width(), 3);
        assert_eq!(row.visible_cells().count(), 2);
    }

    #[test]
    fn test_row_too_wide() {
        let err = Frame::parse(
            r#"
cols = 1
[[rows]]
[[rows.cells]]
chars = "a"
[[rows.cells]]
chars = "b"
"#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            FrameError::RowTooWide { row: 0, width: 2, cols: 1 }
        ));
    }

    #[test]
    fn test_multi_column_cell_counts_fully() {
        let err = Frame::parse("cols = 2\n[[rows]]\n[[rows.cells]]\nchars = \"abc\"\n").unwrap_err();
        assert!(matches!(
            err,
            FrameError::RowTooWide { row: 0, width: 3, cols: 2 }
        ));
    }

    #[test]
    fn test_zero_cols_rejected() {
        assert!(matches!(Frame::parse("cols = 0"), Err(FrameError::EmptyWidth)));
    }

    #[test]
    fn test_missing_cols_is_parse_error() {
        assert!(matches!(Frame::parse("[[rows]]"), Err(FrameError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cols = 8\n[[rows]]\n[[rows.cells]]\nchars = \"$\"").unwrap();

        let frame = Frame::load(file.path()).unwrap();
        assert_eq!(frame.rows[0].cells[0].chars(), "$");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Frame::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(FrameError::Read(_))));
    }
}
