//! HTML rendering of captured frames
//!
//! Applies each cell's [`RenderStyle`] to a `<span>`: class list to the class
//! attribute, declarations to the style attribute, content to the text node.
//! Escaping happens here, never in the style extractor.

use std::fmt::Write;

use tracing::debug;

use crate::config::{Config, HtmlConfig};
use crate::core::{extract, RenderStyle};
use crate::frame::{Frame, Row};

use super::stylesheet::stylesheet;

/// Frame to HTML renderer
pub struct HtmlRenderer<'a> {
    config: &'a HtmlConfig,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(config: &'a HtmlConfig) -> Self {
        Self { config }
    }

    /// Render a frame as an HTML fragment
    pub fn render_fragment(&self, frame: &Frame) -> String {
        let mut out = String::new();
        out.push_str("<div class=\"xterm-rows\">\n");
        let mut spans = 0;
        for row in &frame.rows {
            out.push_str("<div class=\"xterm-row\">");
            spans += self.render_row(&mut out, row);
            out.push_str("</div>\n");
        }
        out.push_str("</div>\n");
        debug!("Rendered {} rows as {} spans", frame.rows.len(), spans);
        out
    }

    /// Render one row, returning the number of spans written
    fn render_row(&self, out: &mut String, row: &Row) -> usize {
        let mut spans = 0;
        let mut run: Option<RenderStyle> = None;

        for cell in row.visible_cells() {
            let style = extract(cell);
            if self.config.merge_runs {
                if let Some(current) = run.as_mut().filter(|c| c.same_look(&style)) {
                    current.text_content.push_str(self.text_of(&style));
                    continue;
                }
            }

            if let Some(done) = run.take() {
                write_span(out, &done);
                spans += 1;
            }
            let text = self.text_of(&style).to_string();
            run = Some(RenderStyle {
                text_content: text,
                ..style
            });
        }

        if let Some(done) = run {
            write_span(out, &done);
            spans += 1;
        }
        spans
    }

    fn text_of<'s>(&self, style: &'s RenderStyle) -> &'s str {
        if self.config.fill_blank && style.text_content.is_empty() {
            " "
        } else {
            &style.text_content
        }
    }
}

/// Write one styled span
fn write_span(out: &mut String, style: &RenderStyle) {
    out.push_str("<span");
    if !style.class_list.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape(&style.class_list));
    }
    if !style.style.is_empty() {
        let _ = write!(out, " style=\"{}\"", escape(&style.style));
    }
    out.push('>');
    out.push_str(&escape(&style.text_content));
    out.push_str("</span>");
}

/// Render a frame as a complete HTML document with embedded stylesheet
pub fn render_document(frame: &Frame, config: &Config) -> String {
    let body = HtmlRenderer::new(&config.html).render_fragment(frame);
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape(&config.html.title));
    out.push_str("<style>\n");
    let _ = writeln!(
        out,
        ".xterm-rows {{ font-family: {}; white-space: pre; }}",
        css_value(&config.html.font_family)
    );
    out.push_str(&stylesheet(&config.stylesheet));
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str(&body);
    out.push_str("</body>\n</html>\n");
    out
}

/// Render according to `config.html.standalone`
pub fn render(frame: &Frame, config: &Config) -> String {
    if config.html.standalone {
        render_document(frame, config)
    } else {
        HtmlRenderer::new(&config.html).render_fragment(frame)
    }
}

/// Strip characters that could end a declaration, a rule or the `<style>` element
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}' | ';'))
        .collect()
}

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(toml: &str) -> Frame {
        Frame::parse(toml).unwrap()
    }

    const TWO_RED: &str = r#"
cols = 4
[[rows]]
[[rows.cells]]
chars = "a"
fg_mode = 1
fg = 1
[[rows.cells]]
chars = "b"
fg_mode = 1
fg = 1
[[rows.cells]]
chars = "c"
bold = true
"#;

    #[test]
    fn test_merges_runs() {
        let config = HtmlConfig::default();
        let html = HtmlRenderer::new(&config).render_fragment(&frame(TWO_RED));
        assert_eq!(
            html,
            "<div class=\"xterm-rows\">\n<div class=\"xterm-row\">\
             <span style=\"color: #cd0000\">ab</span>\
             <span class=\"xterm-bold\">c</span></div>\n</div>\n"
        );
    }

    #[test]
    fn test_one_span_per_cell_without_merge() {
        let config = HtmlConfig {
            merge_runs: false,
            ..HtmlConfig::default()
        };
        let html = HtmlRenderer::new(&config).render_fragment(&frame(TWO_RED));
        assert!(html.contains(
            "<span style=\"color: #cd0000\">a</span><span style=\"color: #cd0000\">b</span>"
        ));
    }

    #[test]
    fn test_blank_cells() {
        let input = "cols = 2\n[[rows]]\n[[rows.cells]]\n[[rows.cells]]\nchars = \"x\"\nbold = true\n";

        let filled = HtmlConfig::default();
        let html = HtmlRenderer::new(&filled).render_fragment(&frame(input));
        assert!(html.contains("<span> </span>"));

        let raw = HtmlConfig {
            fill_blank: false,
            ..HtmlConfig::default()
        };
        let html = HtmlRenderer::new(&raw).render_fragment(&frame(input));
        assert!(html.contains("<span></span>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let input = "cols = 3\n[[rows]]\n[[rows.cells]]\nchars = \"<\"\n[[rows.cells]]\nchars = \"&\"\n";
        let config = HtmlConfig::default();
        let html = HtmlRenderer::new(&config).render_fragment(&frame(input));
        assert!(html.contains("<span>&lt;&amp;</span>"));
    }

    #[test]
    fn test_wide_char_continuation_skipped() {
        let input = "cols = 2\n[[rows]]\n[[rows.cells]]\nchars = \"日\"\n[[rows.cells]]\n";
        let config = HtmlConfig::default();
        let html = HtmlRenderer::new(&config).render_fragment(&frame(input));
        assert!(html.contains("<span>日</span>"));
    }

    #[test]
    fn test_standalone_document() {
        let mut config = Config::default();
        config.html.standalone = true;
        config.html.title = "a < b".to_string();

        let html = render(&frame(TWO_RED), &config);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>a &lt; b</title>"));
        assert!(html.contains(".xterm-bold { font-weight: bold; }"));
        assert!(html.contains("<span class=\"xterm-bold\">c</span>"));
    }

    #[test]
    fn test_font_family_cannot_close_style() {
        let mut config = Config::default();
        config.html.font_family = "mono</style><script>x()</script>".to_string();

        let html = render_document(&frame(TWO_RED), &config);
        assert_eq!(html.matches("</style>").count(), 1);
        assert!(!html.contains("<script>"));
        assert!(html.contains("font-family: mono/stylescriptx()/script; white-space"));
    }

    #[test]
    fn test_quoted_font_family_kept() {
        let mut config = Config::default();
        config.html.font_family = "'Fira Code', monospace".to_string();

        let html = render_document(&frame(TWO_RED), &config);
        assert!(html.contains("font-family: 'Fira Code', monospace; white-space: pre;"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a\"b'c"), "a&quot;b&#39;c");
        assert_eq!(escape("plain"), "plain");
    }
}
