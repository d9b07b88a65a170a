//! Primitive rendering functions.
//!
//! Implements rasterization algorithms for the shapes charts are built from.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;

/// Draw a line using Bresenham's algorithm (non-antialiased).
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as u32, y as u32, color);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw an anti-aliased line using Wu's algorithm.
///
/// Two pixels are painted at each step along the major axis, with intensities
/// set by the fractional distance from the ideal line.
pub fn draw_line_aa(fb: &mut Framebuffer, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();

    let (x0, y0, x1, y1) = if steep { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };
    let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx.abs() < f32::EPSILON { 1.0 } else { dy / dx };

    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i32;
    let ypxl1 = yend.floor() as i32;
    plot_pair(fb, steep, xpxl1, ypxl1, yend, xgap, color);

    let mut intery = yend + gradient;

    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i32;
    let ypxl2 = yend.floor() as i32;
    plot_pair(fb, steep, xpxl2, ypxl2, yend, xgap, color);

    for x in (xpxl1 + 1)..xpxl2 {
        plot_pair(fb, steep, x, intery.floor() as i32, intery, 1.0, color);
        intery += gradient;
    }
}

#[inline]
fn plot_pair(fb: &mut Framebuffer, steep: bool, x: i32, y: i32, exact_y: f32, gap: f32, color: Rgba) {
    if steep {
        plot(fb, y, x, color, rfpart(exact_y) * gap);
        plot(fb, y + 1, x, color, fpart(exact_y) * gap);
    } else {
        plot(fb, x, y, color, rfpart(exact_y) * gap);
        plot(fb, x, y + 1, color, fpart(exact_y) * gap);
    }
}

/// Plot a pixel with intensity (for anti-aliased drawing).
#[inline]
fn plot(fb: &mut Framebuffer, x: i32, y: i32, color: Rgba, intensity: f32) {
    if x >= 0 && y >= 0 && x < fb.width() as i32 && y < fb.height() as i32 {
        let alpha = (f32::from(color.a) * intensity) as u8;
        fb.blend_pixel(x as u32, y as u32, color.with_alpha(alpha));
    }
}

#[inline]
fn fpart(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

/// Draw a line of the given stroke width.
///
/// Widths up to 1.5px use Wu's anti-aliased line; wider strokes are built from
/// parallel Bresenham lines offset along the normal.
pub fn draw_stroke(
    fb: &mut Framebuffer,
    (x0, y0): (f32, f32),
    (x1, y1): (f32, f32),
    width: f32,
    color: Rgba,
) {
    if width <= 1.5 {
        draw_line_aa(fb, x0, y0, x1, y1, color);
        return;
    }

    let len = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
    if len < f32::EPSILON {
        draw_circle(fb, x0 as i32, y0 as i32, (width / 2.0) as i32, color);
        return;
    }
    let (nx, ny) = (-(y1 - y0) / len, (x1 - x0) / len);

    let half = (width / 2.0).round() as i32;
    for k in -half..=half {
        let off = k as f32 * 0.5;
        draw_line(
            fb,
            (x0 + nx * off).round() as i32,
            (y0 + ny * off).round() as i32,
            (x1 + nx * off).round() as i32,
            (y1 + ny * off).round() as i32,
            color,
        );
    }
}

/// Draw a filled rectangle.
pub fn draw_rect(fb: &mut Framebuffer, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
    // shift the clipped part off the size so the far edges stay put
    let w = width.saturating_sub(x.min(0).unsigned_abs());
    let h = height.saturating_sub(y.min(0).unsigned_abs());
    fb.fill_rect(x.max(0) as u32, y.max(0) as u32, w, h, color);
}

/// Draw a rectangle outline.
pub fn draw_rect_outline(
    fb: &mut Framebuffer,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: Rgba,
    thickness: u32,
) {
    let thickness = thickness.max(1);
    let x = x.max(0) as u32;
    let y = y.max(0) as u32;

    fb.fill_rect(x, y, width, thickness, color);
    if height > thickness {
        fb.fill_rect(x, y + height - thickness, width, thickness, color);
    }
    if height > 2 * thickness {
        fb.fill_rect(x, y + thickness, thickness, height - 2 * thickness, color);
        if width > thickness {
            fb.fill_rect(
                x + width - thickness,
                y + thickness,
                thickness,
                height - 2 * thickness,
                color,
            );
        }
    }
}

/// Draw a filled circle using the midpoint algorithm.
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        if radius == 0 && cx >= 0 && cy >= 0 {
            fb.set_pixel(cx as u32, cy as u32, color);
        }
        return;
    }

    // Scanline half-widths per row offset, so every row is painted once and
    // translucent markers don't double-blend.
    let mut spans = vec![0i32; radius as usize + 1];
    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        spans[y as usize] = spans[y as usize].max(x);
        spans[x as usize] = spans[x as usize].max(y);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }

    for (dy, &half) in spans.iter().enumerate() {
        let dy = dy as i32;
        draw_horizontal_line(fb, cx - half, cx + half, cy + dy, color);
        if dy != 0 {
            draw_horizontal_line(fb, cx - half, cx + half, cy - dy, color);
        }
    }
}

/// Draw a circle outline.
pub fn draw_circle_outline(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        if radius == 0 && cx >= 0 && cy >= 0 {
            fb.set_pixel(cx as u32, cy as u32, color);
        }
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        for (px, py) in [
            (cx + x, cy + y),
            (cx - x, cy + y),
            (cx + x, cy - y),
            (cx - x, cy - y),
            (cx + y, cy + x),
            (cx - y, cy + x),
            (cx + y, cy - x),
            (cx - y, cy - x),
        ] {
            if px >= 0 && py >= 0 {
                fb.set_pixel(px as u32, py as u32, color);
            }
        }

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

#[inline]
fn draw_horizontal_line(fb: &mut Framebuffer, x1: i32, x2: i32, y: i32, color: Rgba) {
    if y < 0 || y >= fb.height() as i32 {
        return;
    }

    let x_start = x1.max(0) as u32;
    let x_end = (x2 + 1).max(0).min(fb.width() as i32) as u32;

    if x_start < x_end {
        fb.fill_rect(x_start, y as u32, x_end - x_start, 1, color);
    }
}
