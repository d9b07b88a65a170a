//! 3D scatter plot under an orthographic projection.
//!
//! Each axis is normalized into a unit cube centred on the origin, the cube
//! and its points are projected with a [`Projection`], and points are painted
//! far-to-near so closer markers overlap farther ones.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::geometry::{Point, Point3, Projection};
use crate::output::{SvgEncoder, TextAnchor};
use crate::plots::frame::{draw_legend, draw_title, plot_area, Colouring};
use crate::scale::{format_tick, padded, ColorScale, Scale};
use crate::stats::extent;
use crate::table::Table;
use tracing::debug;

const LABEL_SIZE: f32 = 13.0;
const TICK_SIZE: f32 = 10.0;

/// Builder for a 3D scatter of three table columns.
#[derive(Debug, Clone)]
pub struct Scatter3d<'a> {
    table: &'a Table,
    x: Option<String>,
    y: Option<String>,
    z: Option<String>,
    colour: Option<String>,
    title: Option<String>,
    projection: Projection,
    width: u32,
    height: u32,
    point_size: f32,
}

/// A projected marker, in pixels, with its view depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Source row.
    pub row: usize,
    /// Pixel x.
    pub x: f32,
    /// Pixel y.
    pub y: f32,
    /// Distance from the viewer; larger is farther.
    pub depth: f32,
}

/// Maps normalized cube coordinates into the pixel plot area.
struct Viewport {
    projection: Projection,
    scale: f32,
    centre: Point,
    offset: Point,
}

impl Viewport {
    fn fit(projection: Projection, width: f32, height: f32, centre: Point) -> Self {
        let corners: Vec<Point> = cube_corners()
            .iter()
            .map(|&c| projection.project(c).0)
            .collect();
        let (min_x, max_x) = corners
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
        let (min_y, max_y) = corners
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));

        let scale = (width / (max_x - min_x).max(f32::EPSILON))
            .min(height / (max_y - min_y).max(f32::EPSILON));

        Self {
            projection,
            scale,
            centre,
            offset: Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0),
        }
    }

    fn to_pixels(&self, p: Point3) -> (f32, f32, f32) {
        let (screen, depth) = self.projection.project(p);
        (
            self.centre.x + (screen.x - self.offset.x) * self.scale,
            self.centre.y - (screen.y - self.offset.y) * self.scale,
            depth,
        )
    }
}

/// The eight corners of the unit cube centred at the origin; bit 0 selects
/// +x, bit 1 +y and bit 2 +z.
fn cube_corners() -> [Point3; 8] {
    let mut corners = [Point3::default(); 8];
    for (i, corner) in corners.iter_mut().enumerate() {
        let pick = |bit: usize| if i & bit == 0 { -0.5 } else { 0.5 };
        *corner = Point3::new(pick(1), pick(2), pick(4));
    }
    corners
}

/// Index pairs of the twelve cube edges.
fn cube_edges() -> Vec<(usize, usize)> {
    (0..8)
        .flat_map(|i| [1, 2, 4].into_iter().filter(move |bit| i & bit == 0).map(move |bit| (i, i | bit)))
        .collect()
}

/// Affine map from a data domain to `[-0.5, 0.5]`.
#[derive(Debug, Clone, Copy)]
struct Normalizer {
    lo: f64,
    hi: f64,
}

impl Normalizer {
    fn for_data(data: &[f64]) -> Result<Self> {
        let (lo, hi) = extent(data).ok_or(Error::EmptyData)?;
        let (lo, hi) = padded(lo as f32, hi as f32, 0.02);
        Ok(Self {
            lo: f64::from(lo),
            hi: f64::from(hi),
        })
    }

    fn apply(self, v: f64) -> f32 {
        ((v - self.lo) / (self.hi - self.lo) - 0.5) as f32
    }
}

impl<'a> Scatter3d<'a> {
    /// Scatter of `table`; x, y and z default to its first three columns.
    #[must_use]
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            x: None,
            y: None,
            z: None,
            colour: None,
            title: None,
            projection: Projection::default(),
            width: 800,
            height: 600,
            point_size: 6.0,
        }
    }

    /// Column for the x axis.
    #[must_use]
    pub fn x(mut self, column: impl Into<String>) -> Self {
        self.x = Some(column.into());
        self
    }

    /// Column for the y axis.
    #[must_use]
    pub fn y(mut self, column: impl Into<String>) -> Self {
        self.y = Some(column.into());
        self
    }

    /// Column for the vertical z axis.
    #[must_use]
    pub fn z(mut self, column: impl Into<String>) -> Self {
        self.z = Some(column.into());
        self
    }

    /// Colour points by a column instead of by depth.
    #[must_use]
    pub fn colour(mut self, column: impl Into<String>) -> Self {
        self.colour = Some(column.into());
        self
    }

    /// Chart title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Camera angles.
    #[must_use]
    pub fn projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
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

    fn column_name(&self, chosen: &Option<String>, index: usize) -> Result<String> {
        match chosen {
            Some(name) => Ok(name.clone()),
            None => Ok(self.table.name_at(index)?.to_string()),
        }
    }

    /// Render the scatter.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown columns, a table with fewer than three
    /// columns, no finite points, or a canvas too small for the layout.
    pub fn build(self) -> Result<Figure> {
        let names = [
            self.column_name(&self.x, 0)?,
            self.column_name(&self.y, 1)?,
            self.column_name(&self.z, 2)?,
        ];
        let xs = self.table.numeric(&names[0])?;
        let ys = self.table.numeric(&names[1])?;
        let zs = self.table.numeric(&names[2])?;
        let norms = [
            Normalizer::for_data(&xs)?,
            Normalizer::for_data(&ys)?,
            Normalizer::for_data(&zs)?,
        ];
        let colouring = match self.colour.as_deref() {
            Some(name) => Some(Colouring::for_column(self.table, Some(name))?),
            None => None,
        };

        let legend = colouring.as_ref().map(Colouring::legend).unwrap_or_default();
        let area = plot_area(self.width, self.height, !legend.is_empty())?;
        let viewport = Viewport::fit(self.projection, area.width, area.height, area.center());

        let mut points: Vec<ProjectedPoint> = xs
            .iter()
            .zip(&ys)
            .zip(&zs)
            .enumerate()
            .filter(|(_, ((x, y), z))| x.is_finite() && y.is_finite() && z.is_finite())
            .map(|(row, ((&x, &y), &z))| {
                let p = Point3::new(norms[0].apply(x), norms[1].apply(y), norms[2].apply(z));
                let (px, py, depth) = viewport.to_pixels(p);
                ProjectedPoint {
                    row,
                    x: px,
                    y: py,
                    depth,
                }
            })
            .collect();
        points.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        let title = self.title.clone().unwrap_or_else(|| names.join(" / "));
        let mut svg = SvgEncoder::new(self.width, self.height);
        draw_title(&mut svg, &title);
        draw_cube(&mut svg, &viewport, &names, &norms);

        let depth_colours = match colouring {
            Some(_) => None,
            None => {
                let depths: Vec<f32> = points.iter().map(|p| p.depth).collect();
                let (lo, hi) = crate::scale::finite_extent(&depths).unwrap_or((0.0, 1.0));
                Some(ColorScale::viridis(padded(lo, hi, 0.0))?)
            }
        };

        let radius = self.point_size / 2.0;
        for p in &points {
            let fill = match (&colouring, &depth_colours) {
                (Some(c), _) => c.colour_of(p.row),
                (None, Some(scale)) => scale.scale(p.depth),
                (None, None) => Rgba::BLACK,
            };
            svg.circle_outlined(p.x, p.y, radius, fill.with_alpha(220), Rgba::WHITE);
        }

        if let Some(heading) = self.colour.as_deref().filter(|_| !legend.is_empty()) {
            draw_legend(&mut svg, area, heading, &legend);
        }

        debug!(points = points.len(), %title, "3d scatter built");
        Ok(Figure::new(title, svg))
    }
}

/// Cube wireframe, with the three edges meeting at the low corner drawn as
/// axes and labelled with their column names and extents.
fn draw_cube(svg: &mut SvgEncoder, viewport: &Viewport, names: &[String; 3], norms: &[Normalizer; 3]) {
    let corners: Vec<(f32, f32)> = cube_corners()
        .iter()
        .map(|&c| {
            let (x, y, _) = viewport.to_pixels(c);
            (x, y)
        })
        .collect();

    for (a, b) in cube_edges() {
        let axis = a == 0;
        let colour = if axis { Rgba::AXIS } else { Rgba::GRID };
        svg.line(corners[a], corners[b], colour, if axis { 1.5 } else { 1.0 });
    }

    for (axis, bit) in [1usize, 2, 4].into_iter().enumerate() {
        let (x0, y0) = corners[0];
        let (x1, y1) = corners[bit];
        let mid = ((x0 + x1) / 2.0, (y0 + y1) / 2.0 + LABEL_SIZE + 4.0);
        svg.text(mid, &names[axis], LABEL_SIZE, Rgba::BLACK, TextAnchor::Middle);

        let Normalizer { lo, hi } = norms[axis];
        svg.text(
            (x0, y0 + TICK_SIZE + 2.0),
            &format_tick(lo as f32),
            TICK_SIZE,
            Rgba::AXIS,
            TextAnchor::Middle,
        );
        svg.text(
            (x1, y1 + TICK_SIZE + 2.0),
            &format_tick(hi as f32),
            TICK_SIZE,
            Rgba::AXIS,
            TextAnchor::Middle,
        );
    }
}

impl batuta_common::display::WithDimensions for Scatter3d<'_> {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
