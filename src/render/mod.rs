//! Rasterization of figures.
//!
//! # Algorithms
//!
//! - **Wu's Anti-aliased Line**: thin strokes (trendlines, axes)
//! - **Bresenham's Line**: wide strokes, built from offset lines
//! - **Midpoint Circle**: scatter markers
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;
mod raster;

pub use primitives::{
    draw_circle, draw_circle_outline, draw_line, draw_line_aa, draw_rect, draw_rect_outline,
    draw_stroke,
};
pub use raster::rasterize;
