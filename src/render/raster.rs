//! Rasterization of vector figures into a framebuffer.

use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::output::{SvgElement, SvgEncoder};
use crate::render::primitives::{draw_circle, draw_circle_outline, draw_rect, draw_rect_outline, draw_stroke};

/// Paint every element of `svg` into a new framebuffer.
///
/// Text elements are skipped: the raster path has no font engine, so titles
/// and labels only appear in vector and HTML output.
///
/// # Errors
///
/// Returns an error if the canvas dimensions are zero.
pub fn rasterize(svg: &SvgEncoder) -> Result<Framebuffer> {
    let (width, height) = svg.dimensions();
    let mut fb = Framebuffer::new(width, height)?;
    fb.clear(svg.background_color().unwrap_or(Rgba::TRANSPARENT));

    for element in svg.elements() {
        paint(&mut fb, element);
    }
    Ok(fb)
}

fn paint(fb: &mut Framebuffer, element: &SvgElement) {
    match element {
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
            stroke_width,
        } => {
            let (px, py) = (x.round() as i32, y.round() as i32);
            let (w, h) = (width.round().max(0.0) as u32, height.round().max(0.0) as u32);
            draw_rect(fb, px, py, w, h, *fill);
            if let Some(stroke) = stroke {
                draw_rect_outline(fb, px, py, w, h, *stroke, stroke_width.round() as u32);
            }
        }
        SvgElement::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
            ..
        } => {
            let (x, y, radius) = (cx.round() as i32, cy.round() as i32, r.round() as i32);
            draw_circle(fb, x, y, radius, *fill);
            if let Some(stroke) = stroke {
                draw_circle_outline(fb, x, y, radius, *stroke);
            }
        }
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        } => draw_stroke(fb, (*x1, *y1), (*x2, *y2), *stroke_width, *stroke),
        SvgElement::Polyline {
            points,
            stroke,
            stroke_width,
        } => {
            for pair in points.windows(2) {
                draw_stroke(fb, pair[0], pair[1], *stroke_width, *stroke);
            }
        }
        SvgElement::Text { .. } => {}
    }
}
