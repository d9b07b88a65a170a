//! Box-and-whisker plots.
//!
//! One box per category of an optional grouping column, each summarising a
//! numeric column through its quartiles, 1.5 * IQR whiskers and outliers.

use crate::color::{Palette, Rgba};
use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::output::SvgEncoder;
use crate::plots::frame::{draw_title, plot_area, ChartFrame, Colouring};
use crate::scale::padded;
use crate::stats::BoxStats;
use crate::table::Table;
use tracing::debug;

/// A labelled box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGroup {
    /// Category label shown under the box.
    pub label: String,
    /// Summary of the group's values.
    pub stats: BoxStats,
}

/// Builder for a box-and-whisker plot.
#[derive(Debug, Clone)]
pub struct BoxAndWhisker<'a> {
    table: &'a Table,
    x: Option<String>,
    y: Option<String>,
    title: Option<String>,
    box_width: f32,
    show_outliers: bool,
    width: u32,
    height: u32,
}

impl<'a> BoxAndWhisker<'a> {
    /// Box plot of `table`; y defaults to its first column, ungrouped.
    #[must_use]
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            x: None,
            y: None,
            title: None,
            box_width: 0.6,
            show_outliers: true,
            width: 800,
            height: 600,
        }
    }

    /// Group boxes by the categories of a column.
    #[must_use]
    pub fn x(mut self, column: impl Into<String>) -> Self {
        self.x = Some(column.into());
        self
    }

    /// Column summarised by each box.
    #[must_use]
    pub fn y(mut self, column: impl Into<String>) -> Self {
        self.y = Some(column.into());
        self
    }

    /// Chart title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Box width as a fraction of each category slot (0.1 - 1.0).
    #[must_use]
    pub fn box_width(mut self, width: f32) -> Self {
        self.box_width = width.clamp(0.1, 1.0);
        self
    }

    /// Whether outliers are drawn as points.
    #[must_use]
    pub fn show_outliers(mut self, show: bool) -> Self {
        self.show_outliers = show;
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    fn y_name(&self) -> Result<String> {
        match &self.y {
            Some(name) => Ok(name.clone()),
            None => Ok(self.table.name_at(0)?.to_string()),
        }
    }

    /// Per-category statistics in ascending category order; categories
    /// without finite values are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown columns.
    pub fn groups(&self) -> Result<Vec<BoxGroup>> {
        let y_name = self.y_name()?;
        let ys = self.table.numeric(&y_name)?;

        let members: Vec<(String, Vec<f64>)> = match Colouring::for_column(self.table, self.x.as_deref())? {
            Colouring::Groups(groups) => groups
                .into_iter()
                .map(|g| (g.label, g.rows.iter().map(|&r| ys[r]).collect()))
                .collect(),
            _ => vec![(y_name, ys)],
        };

        Ok(members
            .into_iter()
            .filter_map(|(label, values)| BoxStats::from_data(&values).map(|stats| BoxGroup { label, stats }))
            .collect())
    }

    /// Render the plot.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown columns, no finite y values, or a
    /// canvas too small for the layout.
    pub fn build(self) -> Result<Figure> {
        let y_name = self.y_name()?;
        let groups = self.groups()?;
        if groups.is_empty() {
            return Err(Error::EmptyData);
        }

        let (mut lo, mut hi) = (f64::MAX, f64::MIN);
        for g in &groups {
            let s = &g.stats;
            let outliers: &[f64] = if self.show_outliers { s.outliers.as_slice() } else { &[] };
            lo = outliers.iter().copied().fold(lo.min(s.min), f64::min);
            hi = outliers.iter().copied().fold(hi.max(s.max), f64::max);
        }

        let area = plot_area(self.width, self.height, false)?;
        let frame = ChartFrame::new(
            area,
            (-0.5, groups.len() as f32 - 0.5),
            padded(lo as f32, hi as f32, 0.1),
        )?;

        let title = self
            .title
            .clone()
            .unwrap_or_else(|| format!("Distribution of {y_name}"));
        let x_label = self.x.clone().unwrap_or_default();
        let labels: Vec<String> = groups.iter().map(|g| g.label.clone()).collect();

        let mut svg = SvgEncoder::new(self.width, self.height);
        draw_title(&mut svg, &title);
        frame.draw_category_axes(&mut svg, &labels, &x_label, &y_name);

        let half = f64::from(self.box_width) / 2.0;
        for (i, group) in groups.iter().enumerate() {
            let colour = Palette::category(i);
            draw_box(&mut svg, &frame, i as f64, half, &group.stats, colour, self.show_outliers);
        }

        debug!(boxes = groups.len(), %title, "box plot built");
        Ok(Figure::new(title, svg))
    }
}

fn draw_box(
    svg: &mut SvgEncoder,
    frame: &ChartFrame,
    centre: f64,
    half: f64,
    s: &BoxStats,
    colour: Rgba,
    show_outliers: bool,
) {
    let outline = Rgba::AXIS;
    let cap = half / 2.0;

    svg.line(frame.map(centre, s.min), frame.map(centre, s.q1), outline, 1.0);
    svg.line(frame.map(centre, s.q3), frame.map(centre, s.max), outline, 1.0);
    svg.line(frame.map(centre - cap, s.min), frame.map(centre + cap, s.min), outline, 1.0);
    svg.line(frame.map(centre - cap, s.max), frame.map(centre + cap, s.max), outline, 1.0);

    let (x0, top) = frame.map(centre - half, s.q3);
    let (x1, bottom) = frame.map(centre + half, s.q1);
    svg.rect_outlined(x0, top, x1 - x0, (bottom - top).max(1.0), colour.with_alpha(160), outline, 1.0);

    svg.line(frame.map(centre - half, s.median), frame.map(centre + half, s.median), outline, 2.0);

    let (mx, my) = frame.map(centre, s.mean);
    svg.circle(mx, my, 2.5, outline);

    if show_outliers {
        for &v in &s.outliers {
            let (ox, oy) = frame.map(centre, v);
            svg.circle_outlined(ox, oy, 3.0, colour, outline);
        }
    }
}

impl batuta_common::display::WithDimensions for BoxAndWhisker<'_> {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
