//! Shared chart furniture: layout, axes, titles, legends and colour groups.

use crate::color::{Palette, Rgba};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::output::{SvgEncoder, TextAnchor};
use crate::scale::{format_tick, LinearScale, Scale};
use crate::stats::extent;
use crate::table::Table;

const MARGIN_LEFT: f32 = 72.0;
const MARGIN_RIGHT: f32 = 28.0;
const MARGIN_TOP: f32 = 56.0;
const MARGIN_BOTTOM: f32 = 60.0;
const LEGEND_WIDTH: f32 = 120.0;
const TICK_COUNT: usize = 6;
const TICK_LEN: f32 = 5.0;
const LABEL_SIZE: f32 = 14.0;
const TICK_SIZE: f32 = 11.0;
const TITLE_SIZE: f32 = 18.0;

/// Above this many distinct values a colour column is shaded continuously.
pub const MAX_CATEGORIES: usize = 20;

/// Plot area for a chart of the given size, leaving room for a legend.
///
/// # Errors
///
/// Returns an error if the canvas is too small to hold the margins.
pub fn plot_area(width: u32, height: u32, legend: bool) -> Result<Rect> {
    let right = MARGIN_RIGHT + if legend { LEGEND_WIDTH } else { 0.0 };
    let w = width as f32 - MARGIN_LEFT - right;
    let h = height as f32 - MARGIN_TOP - MARGIN_BOTTOM;
    if w < 10.0 || h < 10.0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(Rect::new(MARGIN_LEFT, MARGIN_TOP, w, h))
}

/// A 2D cartesian frame mapping data coordinates into a plot area.
#[derive(Debug, Clone, Copy)]
pub struct ChartFrame {
    area: Rect,
    x: LinearScale,
    y: LinearScale,
}

impl ChartFrame {
    /// Frame over explicit data domains.
    ///
    /// # Errors
    ///
    /// Returns an error if a domain is degenerate or not finite.
    pub fn new(area: Rect, x_domain: (f32, f32), y_domain: (f32, f32)) -> Result<Self> {
        Ok(Self {
            area,
            x: LinearScale::new(x_domain, (area.x, area.right()))?,
            y: LinearScale::new(y_domain, (area.bottom(), area.y))?,
        })
    }

    /// Plot area in pixels.
    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Horizontal scale.
    #[must_use]
    pub fn x_scale(&self) -> &LinearScale {
        &self.x
    }

    /// Vertical scale.
    #[must_use]
    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    /// Map a data point to pixels.
    #[must_use]
    pub fn map(&self, x: f64, y: f64) -> (f32, f32) {
        (self.x.scale(x as f32), self.y.scale(y as f32))
    }

    /// Gridlines, axis lines, ticks, tick labels and axis titles.
    pub fn draw_axes(&self, svg: &mut SvgEncoder, x_label: &str, y_label: &str) {
        let x_ticks = self
            .x
            .ticks(TICK_COUNT)
            .into_iter()
            .map(|t| (self.x.scale(t), format_tick(t)))
            .collect();
        self.draw_axes_with(svg, x_ticks, true, x_label, y_label);
    }

    /// Axes with one labelled x tick per category, category `i` centred at `x = i`.
    pub fn draw_category_axes(
        &self,
        svg: &mut SvgEncoder,
        categories: &[String],
        x_label: &str,
        y_label: &str,
    ) {
        let x_ticks = categories
            .iter()
            .enumerate()
            .map(|(i, label)| (self.x.scale(i as f32), label.clone()))
            .collect();
        self.draw_axes_with(svg, x_ticks, false, x_label, y_label);
    }

    fn draw_axes_with(
        &self,
        svg: &mut SvgEncoder,
        x_ticks: Vec<(f32, String)>,
        x_grid: bool,
        x_label: &str,
        y_label: &str,
    ) {
        let a = self.area;

        for (px, label) in x_ticks {
            if x_grid {
                svg.line((px, a.y), (px, a.bottom()), Rgba::GRID, 1.0);
            }
            svg.line((px, a.bottom()), (px, a.bottom() + TICK_LEN), Rgba::AXIS, 1.0);
            svg.text(
                (px, a.bottom() + TICK_LEN + TICK_SIZE + 2.0),
                &label,
                TICK_SIZE,
                Rgba::AXIS,
                TextAnchor::Middle,
            );
        }
        for t in self.y.ticks(TICK_COUNT) {
            let py = self.y.scale(t);
            svg.line((a.x, py), (a.right(), py), Rgba::GRID, 1.0);
            svg.line((a.x - TICK_LEN, py), (a.x, py), Rgba::AXIS, 1.0);
            svg.text(
                (a.x - TICK_LEN - 3.0, py + TICK_SIZE / 3.0),
                &format_tick(t),
                TICK_SIZE,
                Rgba::AXIS,
                TextAnchor::End,
            );
        }

        svg.line((a.x, a.bottom()), (a.right(), a.bottom()), Rgba::AXIS, 1.0);
        svg.line((a.x, a.y), (a.x, a.bottom()), Rgba::AXIS, 1.0);

        svg.text(
            (a.center().x, a.bottom() + 44.0),
            x_label,
            LABEL_SIZE,
            Rgba::BLACK,
            TextAnchor::Middle,
        );
        svg.text_rotated(
            (a.x - 50.0, a.center().y),
            y_label,
            LABEL_SIZE,
            Rgba::BLACK,
            TextAnchor::Middle,
            -90.0,
        );
    }
}

/// Chart title centred above the plot area.
pub fn draw_title(svg: &mut SvgEncoder, title: &str) {
    let (width, _) = svg.dimensions();
    svg.text(
        (width as f32 / 2.0, MARGIN_TOP / 2.0 + TITLE_SIZE / 3.0),
        title,
        TITLE_SIZE,
        Rgba::BLACK,
        TextAnchor::Middle,
    );
}

/// Legend block to the right of `area`.
pub fn draw_legend(svg: &mut SvgEncoder, area: Rect, heading: &str, entries: &[(String, Rgba)]) {
    let x = area.right() + 16.0;
    let mut y = area.y + 4.0;
    svg.text((x, y + LABEL_SIZE), heading, LABEL_SIZE, Rgba::BLACK, TextAnchor::Start);
    y += LABEL_SIZE + 10.0;

    for (label, colour) in entries {
        svg.rect(x, y, 12.0, 12.0, *colour);
        svg.text((x + 18.0, y + 10.5), label, TICK_SIZE, Rgba::AXIS, TextAnchor::Start);
        y += 18.0;
    }
}

/// Rows partitioned by the distinct values of a colour column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColourGroup {
    /// Legend label (the category value).
    pub label: String,
    /// Fill color.
    pub colour: Rgba,
    /// Row indices belonging to the group.
    pub rows: Vec<usize>,
}

/// How points are coloured.
#[derive(Debug, Clone, PartialEq)]
pub enum Colouring {
    /// A single colour for every row.
    Single(Rgba),
    /// One palette colour per category, in ascending category order.
    Groups(Vec<ColourGroup>),
    /// Per-row colours from a continuous scale.
    Continuous(Vec<Rgba>),
}

impl Colouring {
    /// Build the colouring for `column` (or a single colour when `None`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] for unknown names.
    pub fn for_column(table: &Table, column: Option<&str>) -> Result<Self> {
        let Some(name) = column else {
            return Ok(Self::Single(Palette::primary()));
        };

        let values = table.numeric(name)?;
        let mut distinct: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();

        if distinct.len() > MAX_CATEGORIES {
            let (lo, hi) = extent(&values).ok_or(Error::EmptyData)?;
            let scale = crate::scale::ColorScale::viridis(crate::scale::padded(
                lo as f32, hi as f32, 0.0,
            ))?;
            return Ok(Self::Continuous(
                values.iter().map(|&v| scale.scale(v as f32)).collect(),
            ));
        }

        let groups = distinct
            .iter()
            .enumerate()
            .map(|(i, &value)| ColourGroup {
                label: format!("{value}"),
                colour: Palette::category(i),
                rows: values
                    .iter()
                    .enumerate()
                    .filter(|&(_, &v)| v.total_cmp(&value).is_eq())
                    .map(|(row, _)| row)
                    .collect(),
            })
            .collect();
        Ok(Self::Groups(groups))
    }

    /// Colour for a given row.
    #[must_use]
    pub fn colour_of(&self, row: usize) -> Rgba {
        match self {
            Self::Single(c) => *c,
            Self::Groups(groups) => groups
                .iter()
                .find(|g| g.rows.binary_search(&row).is_ok())
                .map_or(Palette::primary(), |g| g.colour),
            Self::Continuous(colours) => colours.get(row).copied().unwrap_or(Palette::primary()),
        }
    }

    /// Legend entries, empty unless the colouring is categorical.
    #[must_use]
    pub fn legend(&self) -> Vec<(String, Rgba)> {
        match self {
            Self::Groups(groups) => groups.iter().map(|g| (g.label.clone(), g.colour)).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::new()
            .with_column("v", vec![1.0, 2.0, 3.0, 4.0])
            .unwrap()
            .with_column("cat", vec![2_i64, 0, 2, 1])
            .unwrap()
    }

    #[test]
    fn test_plot_area_reserves_legend() {
        let plain = plot_area(800, 600, false).unwrap();
        let legend = plot_area(800, 600, true).unwrap();
        assert!(legend.width < plain.width);
        assert!(plot_area(50, 50, false).is_err());
    }

    #[test]
    fn test_frame_maps_corners() {
        let area = Rect::new(10.0, 10.0, 100.0, 50.0);
        let frame = ChartFrame::new(area, (0.0, 1.0), (0.0, 1.0)).unwrap();
        assert_eq!(frame.map(0.0, 0.0), (10.0, 60.0));
        assert_eq!(frame.map(1.0, 1.0), (110.0, 10.0));
    }

    #[test]
    fn test_axes_emit_labels() {
        let area = plot_area(400, 300, false).unwrap();
        let frame = ChartFrame::new(area, (0.0, 10.0), (-1.0, 1.0)).unwrap();
        let mut svg = SvgEncoder::new(400, 300);
        frame.draw_axes(&mut svg, "shoe_size", "person_height");
        let out = svg.render();
        assert!(out.contains(">shoe_size</text>"));
        assert!(out.contains(">person_height</text>"));
        assert!(out.contains(">10</text>"));
    }

    #[test]
    fn test_category_axes_label_each_category() {
        let area = plot_area(400, 300, false).unwrap();
        let frame = ChartFrame::new(area, (-0.5, 1.5), (0.0, 1.0)).unwrap();
        let mut svg = SvgEncoder::new(400, 300);
        frame.draw_category_axes(&mut svg, &["low".to_string(), "high".to_string()], "x", "y");
        let out = svg.render();
        assert!(out.contains(">low</text>"));
        assert!(out.contains(">high</text>"));
    }

    #[test]
    fn test_groups_sorted_by_value() {
        let colouring = Colouring::for_column(&table(), Some("cat")).unwrap();
        let Colouring::Groups(groups) = &colouring else {
            panic!("expected categorical groups");
        };
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["0", "1", "2"]);
        assert_eq!(groups[2].rows, vec![0, 2]);
        assert_eq!(colouring.colour_of(3), Palette::category(1));
        assert_eq!(colouring.legend().len(), 3);
    }

    #[test]
    fn test_many_values_shade_continuously() {
        let values: Vec<f64> = (0..30).map(f64::from).collect();
        let t = Table::new().with_column("c", values).unwrap();
        let colouring = Colouring::for_column(&t, Some("c")).unwrap();
        assert!(matches!(colouring, Colouring::Continuous(ref c) if c.len() == 30));
        assert!(colouring.legend().is_empty());
    }

    #[test]
    fn test_unknown_colour_column() {
        assert!(matches!(
            Colouring::for_column(&table(), Some("nope")),
            Err(Error::ColumnNotFound(_))
        ));
    }
}
