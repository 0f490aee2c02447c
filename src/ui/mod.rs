//! Output surfaces for captured frames.
//!
//! - **html**: DOM application of render styles (spans, escaping, documents)
//! - **stylesheet**: CSS rules for the class tokens
//! - **preview**: crossterm replay to a terminal

pub mod html;
pub mod preview;
pub mod stylesheet;

pub use html::{render, render_document, HtmlRenderer};
pub use preview::preview;
pub use stylesheet::stylesheet;
