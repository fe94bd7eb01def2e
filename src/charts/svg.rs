//! Minimal SVG writer shared by the chart generators.

use std::fmt::{self, Write};

/// Categorical palette for pie slices (matplotlib `tab10`).
pub const TAB10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Sequential palette for word-cloud words (viridis, sampled).
pub const VIRIDIS: [&str; 9] = [
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b",
];

/// Axis and label ink.
pub const INK: &str = "#262730";

/// Escape text for use inside SVG/HTML content or a quoted attribute.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Presentation of one `<text>` element.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle<'a> {
    pub size: f64,
    pub anchor: Anchor,
    pub fill: &'a str,
    /// Degrees, clockwise, around the text origin.
    pub rotate: f64,
    /// Vertically centre the text on `y` instead of sitting on the baseline.
    pub centered: bool,
    /// Force the rendered advance width, so layout estimates hold on any font.
    pub text_length: Option<f64>,
}

impl<'a> TextStyle<'a> {
    pub fn new(size: f64, anchor: Anchor, fill: &'a str) -> Self {
        Self {
            size,
            anchor,
            fill,
            rotate: 0.0,
            centered: false,
            text_length: None,
        }
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotate = degrees;
        self
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    pub fn text_length(mut self, len: f64) -> Self {
        self.text_length = Some(len);
        self
    }
}

/// An SVG document under construction.
pub struct SvgCanvas {
    buf: String,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32, background: &str) -> Result<Self, fmt::Error> {
        let mut buf = String::with_capacity(8 * 1024);
        write!(
            buf,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="DejaVu Sans, Helvetica, Arial, sans-serif">"#
        )?;
        write!(
            buf,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            escape_xml(background)
        )?;
        Ok(Self { buf })
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) -> fmt::Result {
        write!(
            self.buf,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{fill}"/>"#
        )
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) -> fmt::Result {
        write!(
            self.buf,
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{stroke}" stroke-width="1"/>"#
        )
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) -> fmt::Result {
        write!(
            self.buf,
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="{fill}"/>"#
        )
    }

    pub fn path(&mut self, d: &str, fill: &str, stroke: &str) -> fmt::Result {
        write!(
            self.buf,
            r#"<path d="{d}" fill="{fill}" stroke="{stroke}" stroke-width="1"/>"#
        )
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: TextStyle<'_>) -> fmt::Result {
        write!(
            self.buf,
            r#"<text x="{x:.2}" y="{y:.2}" font-size="{:.1}" fill="{}" text-anchor="{}""#,
            style.size,
            style.fill,
            style.anchor.as_str()
        )?;
        if style.centered {
            self.buf.push_str(r#" dominant-baseline="central""#);
        }
        if let Some(len) = style.text_length {
            write!(self.buf, r#" textLength="{len:.2}" lengthAdjust="spacingAndGlyphs""#)?;
        }
        if style.rotate != 0.0 {
            write!(
                self.buf,
                r#" transform="rotate({:.1} {x:.2} {y:.2})""#,
                style.rotate
            )?;
        }
        write!(self.buf, ">{}</text>", escape_xml(content))
    }

    pub fn finish(mut self) -> String {
        self.buf.push_str("</svg>");
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_xml(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn canvas_is_well_formed() {
        let mut c = SvgCanvas::new(100, 50, "white").unwrap();
        c.rect(1.0, 2.0, 3.0, 4.0, "#000").unwrap();
        c.text(10.0, 20.0, "a<b", TextStyle::new(12.0, Anchor::Middle, INK).rotated(-45.0))
            .unwrap();
        let svg = c.finish();
        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"viewBox="0 0 100 50""#));
        assert!(svg.contains("a&lt;b"));
        assert!(svg.contains(r#"transform="rotate(-45.0 10.00 20.00)""#));
    }
}
