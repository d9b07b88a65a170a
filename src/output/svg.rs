//! SVG output encoder.
//!
//! Figures are built as a list of [`SvgElement`]s; the same list is rendered
//! to SVG markup here and rasterized by [`crate::render::rasterize`].

use crate::color::Rgba;
use crate::error::Result;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

/// SVG encoder for vector output.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    width: u32,
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        stroke: Option<Rgba>,
        stroke_width: f32,
    },
    /// Circle
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Rgba,
        stroke: Option<Rgba>,
        stroke_width: f32,
    },
    /// Line
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Polyline (connected line segments)
    Polyline {
        points: Vec<(f32, f32)>,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Text, optionally rotated (degrees) around its anchor point
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        rotate: f32,
    },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            elements: Vec::new(),
        }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Background color, if any.
    #[must_use]
    pub fn background_color(&self) -> Option<Rgba> {
        self.background
    }

    /// Canvas dimensions.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// All elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Add a filled rectangle.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgba) {
        self.elements.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke: None,
            stroke_width: 1.0,
        });
    }

    /// Add a rectangle with stroke.
    #[allow(clippy::too_many_arguments)]
    pub fn rect_outlined(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        stroke: Rgba,
        stroke_width: f32,
    ) {
        self.elements.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke: Some(stroke),
            stroke_width,
        });
    }

    /// Add a circle.
    pub fn circle(&mut self, cx: f32, cy: f32, r: f32, fill: Rgba) {
        self.elements.push(SvgElement::Circle {
            cx,
            cy,
            r,
            fill,
            stroke: None,
            stroke_width: 1.0,
        });
    }

    /// Add a circle with stroke.
    pub fn circle_outlined(&mut self, cx: f32, cy: f32, r: f32, fill: Rgba, stroke: Rgba) {
        self.elements.push(SvgElement::Circle {
            cx,
            cy,
            r,
            fill,
            stroke: Some(stroke),
            stroke_width: 0.5,
        });
    }

    /// Add a line.
    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Rgba, stroke_width: f32) {
        self.elements.push(SvgElement::Line {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            stroke,
            stroke_width,
        });
    }

    /// Add a polyline.
    pub fn polyline(&mut self, points: Vec<(f32, f32)>, stroke: Rgba, stroke_width: f32) {
        self.elements.push(SvgElement::Polyline {
            points,
            stroke,
            stroke_width,
        });
    }

    /// Add text with anchor.
    pub fn text(
        &mut self,
        (x, y): (f32, f32),
        text: &str,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
    ) {
        self.text_rotated((x, y), text, font_size, fill, anchor, 0.0);
    }

    /// Add text rotated around its anchor point.
    pub fn text_rotated(
        &mut self,
        (x, y): (f32, f32),
        text: &str,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        rotate: f32,
    ) {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor,
            rotate,
        });
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096 + self.elements.len() * 96);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(
                svg,
                r#"  <rect width="100%" height="100%" fill="{}"/>"#,
                bg.to_css()
            );
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }
}

fn stroke_attr(stroke: Option<Rgba>, stroke_width: f32) -> String {
    stroke
        .map(|s| {
            format!(
                r#" stroke="{}" stroke-width="{stroke_width}""#,
                s.to_css()
            )
        })
        .unwrap_or_default()
}

/// Escape XML special characters.
pub(crate) fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
            stroke_width,
        } => format!(
            r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"{}/>"#,
            fill.to_css(),
            stroke_attr(*stroke, *stroke_width)
        ),
        SvgElement::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
            stroke_width,
        } => format!(
            r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"{}/>"#,
            fill.to_css(),
            stroke_attr(*stroke, *stroke_width)
        ),
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        } => format!(
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
            stroke.to_css()
        ),
        SvgElement::Polyline {
            points,
            stroke,
            stroke_width,
        } => {
            let points_str = points
                .iter()
                .map(|(x, y)| format!("{x},{y}"))
                .collect::<Vec<_>>()
                .join(" ");
            format!(
                r#"<polyline points="{points_str}" fill="none" stroke="{}" stroke-width="{stroke_width}"/>"#,
                stroke.to_css()
            )
        }
        SvgElement::Text {
            x,
            y,
            text,
            font_size,
            fill,
            anchor,
            rotate,
        } => {
            let anchor_str = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let transform = if rotate.abs() > f32::EPSILON {
                format!(r#" transform="rotate({rotate} {x} {y})""#)
            } else {
                String::new()
            };
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{anchor_str}" font-family="sans-serif"{transform}>{}</text>"#,
                fill.to_css(),
                escape_xml(text)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_encoder_new() {
        let svg = SvgEncoder::new(800, 600).render();

        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"600\""));
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_svg_rect() {
        let mut enc = SvgEncoder::new(100, 100);
        enc.rect(10.0, 20.0, 30.0, 40.0, Rgba::RED);
        let svg = enc.render();

        assert!(svg.contains("x=\"10\""));
        assert!(svg.contains("height=\"40\""));
        assert!(svg.contains("rgb(255,0,0)"));
    }

    #[test]
    fn test_svg_circle_outlined() {
        let mut enc = SvgEncoder::new(100, 100);
        enc.circle_outlined(50.0, 50.0, 25.0, Rgba::BLUE, Rgba::WHITE);
        let svg = enc.render();

        assert!(svg.contains("<circle"));
        assert!(svg.contains("r=\"25\""));
        assert!(svg.contains("stroke=\"rgb(255,255,255)\""));
    }

    #[test]
    fn test_svg_polyline() {
        let mut enc = SvgEncoder::new(100, 100);
        enc.polyline(vec![(0.0, 0.0), (50.0, 100.0), (100.0, 0.0)], Rgba::GREEN, 1.5);
        let svg = enc.render();

        assert!(svg.contains("points=\"0,0 50,100 100,0\""));
        assert!(svg.contains("fill=\"none\""));
    }

    #[test]
    fn test_svg_text_escaping() {
        let mut enc = SvgEncoder::new(100, 100);
        enc.text(
            (10.0, 50.0),
            "<script>alert('xss')</script>",
            12.0,
            Rgba::BLACK,
            TextAnchor::Start,
        );
        let svg = enc.render();

        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_svg_text_rotated() {
        let mut enc = SvgEncoder::new(100, 100);
        enc.text_rotated((10.0, 50.0), "y", 12.0, Rgba::BLACK, TextAnchor::Middle, -90.0);
        assert!(enc.render().contains("transform=\"rotate(-90 10 50)\""));
    }

    #[test]
    fn test_svg_transparent_background() {
        let svg = SvgEncoder::new(100, 100).background(None).render();
        assert_eq!(svg.matches("<rect").count(), 0);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        SvgEncoder::new(10, 10).write_to_file(&path).unwrap();
        assert!(std::fs::read_to_string(path).unwrap().starts_with("<svg"));
    }
}
