//! 2D scatter plot with optional trendline overlay.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::output::SvgEncoder;
use crate::plots::frame::{draw_legend, draw_title, plot_area, ChartFrame, Colouring};
use crate::scale::padded;
use crate::stats::extent;
use crate::table::Table;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A reference curve `y = f(x)` drawn over a scatter.
pub type Trendline = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Number of samples used to draw a trendline across the x extent.
pub const TRENDLINE_SAMPLES: usize = 200;

const AXIS_PAD: f32 = 0.05;
const TRENDLINE_COLOR: Rgba = Rgba::rgb(33, 33, 33);

/// Sample `f` at `samples` evenly spaced points over `[lo, hi]`, dropping
/// non-finite results.
#[must_use]
pub fn trendline_samples(f: &dyn Fn(f64) -> f64, (lo, hi): (f64, f64), samples: usize) -> Vec<(f64, f64)> {
    if samples < 2 || lo == hi {
        let y = f(lo);
        return if y.is_finite() { vec![(lo, y)] } else { Vec::new() };
    }
    let step = (hi - lo) / (samples - 1) as f64;
    (0..samples)
        .map(|i| {
            let x = lo + step * i as f64;
            (x, f(x))
        })
        .filter(|(_, y)| y.is_finite())
        .collect()
}

/// Builder for a 2D scatter of two table columns.
#[derive(Clone)]
pub struct Scatter2d<'a> {
    table: &'a Table,
    x: Option<String>,
    y: Option<String>,
    colour: Option<String>,
    trendline: Option<Trendline>,
    title: Option<String>,
    width: u32,
    height: u32,
    point_size: f32,
    alpha: f32,
}

impl fmt::Debug for Scatter2d<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scatter2d")
            .field("rows", &self.table.rows())
            .field("x", &self.x)
            .field("y", &self.y)
            .field("colour", &self.colour)
            .field("trendline", &self.trendline.is_some())
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

impl<'a> Scatter2d<'a> {
    /// Scatter of `table`; x and y default to its first two columns.
    #[must_use]
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            x: None,
            y: None,
            colour: None,
            trendline: None,
            title: None,
            width: 800,
            height: 600,
            point_size: 8.0,
            alpha: 0.8,
        }
    }

    /// Column for the horizontal axis.
    #[must_use]
    pub fn x(mut self, column: impl Into<String>) -> Self {
        self.x = Some(column.into());
        self
    }

    /// Column for the vertical axis.
    #[must_use]
    pub fn y(mut self, column: impl Into<String>) -> Self {
        self.y = Some(column.into());
        self
    }

    /// Colour points by the values of a column.
    #[must_use]
    pub fn colour(mut self, column: impl Into<String>) -> Self {
        self.colour = Some(column.into());
        self
    }

    /// Overlay `y = f(x)` across the x extent.
    #[must_use]
    pub fn trendline(mut self, f: Trendline) -> Self {
        self.trendline = Some(f);
        self
    }

    /// Chart title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the marker diameter in pixels.
    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.point_size = size.max(1.0);
        self
    }

    /// Set the marker alpha (0.0 - 1.0).
    #[must_use]
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Render the scatter.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown columns, a table with fewer than two
    /// columns, no finite points, or a canvas too small for the layout.
    pub fn build(self) -> Result<Figure> {
        let x_name = match &self.x {
            Some(name) => name.clone(),
            None => self.table.name_at(0)?.to_string(),
        };
        let y_name = match &self.y {
            Some(name) => name.clone(),
            None => self.table.name_at(1)?.to_string(),
        };

        let xs = self.table.numeric(&x_name)?;
        let ys = self.table.numeric(&y_name)?;
        let colouring = Colouring::for_column(self.table, self.colour.as_deref())?;

        let (x_lo, x_hi) = extent(&xs).ok_or(Error::EmptyData)?;
        let (mut y_lo, mut y_hi) = extent(&ys).ok_or(Error::EmptyData)?;

        let trend = self
            .trendline
            .as_ref()
            .map(|f| trendline_samples(f.as_ref(), (x_lo, x_hi), TRENDLINE_SAMPLES))
            .unwrap_or_default();
        for &(_, ty) in &trend {
            y_lo = y_lo.min(ty);
            y_hi = y_hi.max(ty);
        }

        let legend = colouring.legend();
        let area = plot_area(self.width, self.height, !legend.is_empty())?;
        let frame = ChartFrame::new(
            area,
            padded(x_lo as f32, x_hi as f32, AXIS_PAD),
            padded(y_lo as f32, y_hi as f32, AXIS_PAD),
        )?;

        let title = self
            .title
            .clone()
            .unwrap_or_else(|| format!("{y_name} vs {x_name}"));

        let mut svg = SvgEncoder::new(self.width, self.height);
        draw_title(&mut svg, &title);
        frame.draw_axes(&mut svg, &x_name, &y_name);

        let alpha = (self.alpha * 255.0) as u8;
        let radius = self.point_size / 2.0;
        let mut drawn = 0usize;
        for (row, (&x, &y)) in xs.iter().zip(&ys).enumerate() {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let (px, py) = frame.map(x, y);
            svg.circle_outlined(px, py, radius, colouring.colour_of(row).with_alpha(alpha), Rgba::WHITE);
            drawn += 1;
        }

        if !trend.is_empty() {
            let points = trend.iter().map(|&(x, y)| frame.map(x, y)).collect();
            svg.polyline(points, TRENDLINE_COLOR, 2.0);
        }

        if let Some(heading) = self.colour.as_deref().filter(|_| !legend.is_empty()) {
            draw_legend(&mut svg, area, heading, &legend);
        }

        debug!(points = drawn, trendline = !trend.is_empty(), %title, "scatter built");
        Ok(Figure::new(title, svg))
    }
}

impl batuta_common::display::WithDimensions for Scatter2d<'_> {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
