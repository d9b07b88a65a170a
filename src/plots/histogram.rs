//! Histograms: counts per bin, or a second column aggregated per bin,
//! optionally stacked by a categorical colour column.

use crate::color::{Palette, Rgba};
use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::output::SvgEncoder;
use crate::plots::frame::{draw_legend, draw_title, plot_area, ChartFrame, Colouring};
use crate::scale::padded;
use crate::stats::{self, default_strategy, BinStrategy, Bins};
use crate::table::{DataType, Table};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// How the values falling into one bin are reduced to a bar height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistFunc {
    /// Number of rows in the bin.
    #[default]
    Count,
    /// Sum of `y`.
    Sum,
    /// Mean of `y`.
    Avg,
    /// Smallest `y`.
    Min,
    /// Largest `y`.
    Max,
}

impl HistFunc {
    /// Reduce the `y` values of one bin. `rows` is the bin's row count,
    /// which may exceed `values.len()` when some `y` are not finite.
    #[must_use]
    pub fn apply(self, rows: usize, values: &[f64]) -> Option<f64> {
        match self {
            Self::Count => Some(rows as f64),
            Self::Sum => Some(values.iter().sum()),
            Self::Avg => stats::mean(values),
            Self::Min => values.iter().copied().reduce(f64::min),
            Self::Max => values.iter().copied().reduce(f64::max),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for HistFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HistFunc {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "count" => Ok(Self::Count),
            "sum" => Ok(Self::Sum),
            "avg" | "mean" => Ok(Self::Avg),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            other => Err(format!("unknown histfunc '{other}'")),
        }
    }
}

/// One (possibly stacked) bar segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Bin index.
    pub bin: usize,
    /// Colour group index (0 when unstacked).
    pub group: usize,
    /// Left bin edge.
    pub left: f64,
    /// Right bin edge.
    pub right: f64,
    /// Aggregated value (the segment height).
    pub value: f64,
    /// Where the segment starts; segments of one bin stack upwards from 0
    /// for positive values and downwards for negative ones.
    pub base: f64,
}

/// Builder for a histogram over table columns.
#[derive(Debug, Clone)]
pub struct Histogram<'a> {
    table: &'a Table,
    x: Option<String>,
    y: Option<String>,
    colour: Option<String>,
    func: Option<HistFunc>,
    nbins: Option<usize>,
    title: Option<String>,
    width: u32,
    height: u32,
}

impl<'a> Histogram<'a> {
    /// Histogram of `table`; x defaults to its first column.
    #[must_use]
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            x: None,
            y: None,
            colour: None,
            func: None,
            nbins: None,
            title: None,
            width: 800,
            height: 600,
        }
    }

    /// Column that is binned.
    #[must_use]
    pub fn x(mut self, column: impl Into<String>) -> Self {
        self.x = Some(column.into());
        self
    }

    /// Column aggregated per bin (defaults the function to [`HistFunc::Sum`]).
    #[must_use]
    pub fn y(mut self, column: impl Into<String>) -> Self {
        self.y = Some(column.into());
        self
    }

    /// Stack bars by the categories of a column.
    #[must_use]
    pub fn colour(mut self, column: impl Into<String>) -> Self {
        self.colour = Some(column.into());
        self
    }

    /// Aggregation function.
    #[must_use]
    pub fn func(mut self, func: HistFunc) -> Self {
        self.func = Some(func);
        self
    }

    /// Fixed number of bins.
    #[must_use]
    pub fn nbins(mut self, nbins: usize) -> Self {
        self.nbins = Some(nbins);
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

    fn x_name(&self) -> Result<String> {
        match &self.x {
            Some(name) => Ok(name.clone()),
            None => Ok(self.table.name_at(0)?.to_string()),
        }
    }

    fn effective_func(&self) -> HistFunc {
        match (self.func, &self.y) {
            (Some(func), _) => func,
            (None, Some(_)) => HistFunc::Sum,
            (None, None) => HistFunc::Count,
        }
    }

    fn strategy(&self, name: &str, xs: &[f64]) -> Result<BinStrategy> {
        if let Some(n) = self.nbins {
            return Ok(BinStrategy::Fixed(n));
        }
        let integer = self.table.column(name)?.dtype() == DataType::Int64;
        Ok(default_strategy(xs, integer))
    }

    /// Bin edges plus the stacked bar segments, in bin-major, group-minor order.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown columns or when x has no finite values.
    pub fn bars(&self) -> Result<(Bins, Vec<Bar>)> {
        let x_name = self.x_name()?;
        let xs = self.table.numeric(&x_name)?;
        let ys = match &self.y {
            Some(name) => Some(self.table.numeric(name)?),
            None => None,
        };
        let groups = self.groups()?;
        let func = self.effective_func();

        let bins = Bins::compute(&xs, self.strategy(&x_name, &xs)?)?;
        debug!(column = %x_name, bins = bins.count, width = bins.width, %func, "histogram bins");

        // rows[group][bin]
        let mut rows: Vec<Vec<Vec<usize>>> = vec![vec![Vec::new(); bins.count]; groups.len()];
        for (group, members) in groups.iter().enumerate() {
            for &row in members {
                if let Some(bin) = xs.get(row).and_then(|&x| bins.index_of(x)) {
                    rows[group][bin].push(row);
                }
            }
        }

        let mut bars = Vec::new();
        for bin in 0..bins.count {
            let (mut up, mut down) = (0.0_f64, 0.0_f64);
            for (group, per_bin) in rows.iter().enumerate() {
                let members = &per_bin[bin];
                if members.is_empty() {
                    continue;
                }
                let values: Vec<f64> = match &ys {
                    Some(ys) => members
                        .iter()
                        .map(|&r| ys[r])
                        .filter(|v| v.is_finite())
                        .collect(),
                    None => Vec::new(),
                };
                let Some(value) = func.apply(members.len(), &values) else {
                    continue;
                };
                let base = if value >= 0.0 { up } else { down };
                if value >= 0.0 {
                    up += value;
                } else {
                    down += value;
                }
                bars.push(Bar {
                    bin,
                    group,
                    left: bins.left(bin),
                    right: bins.left(bin + 1),
                    value,
                    base,
                });
            }
        }

        Ok((bins, bars))
    }

    /// Row membership per stack group; one group of all rows when unstacked.
    fn groups(&self) -> Result<Vec<Vec<usize>>> {
        let all = || vec![(0..self.table.rows()).collect()];
        match Colouring::for_column(self.table, self.colour.as_deref())? {
            Colouring::Groups(groups) => Ok(groups.into_iter().map(|g| g.rows).collect()),
            Colouring::Continuous(_) => {
                warn!(column = ?self.colour, "too many categories to stack, drawing unstacked");
                Ok(all())
            }
            Colouring::Single(_) => Ok(all()),
        }
    }

    /// Render the histogram.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown columns, no finite x values, or a
    /// canvas too small for the layout.
    pub fn build(self) -> Result<Figure> {
        let x_name = self.x_name()?;
        let (bins, bars) = self.bars()?;
        let colouring = Colouring::for_column(self.table, self.colour.as_deref())?;
        let legend = colouring.legend();
        let func = self.effective_func();

        let (mut lo, mut hi) = (0.0_f64, 0.0_f64);
        for bar in &bars {
            lo = lo.min(bar.base + bar.value.min(0.0));
            hi = hi.max(bar.base + bar.value.max(0.0));
        }
        if bars.is_empty() {
            return Err(Error::EmptyData);
        }

        let area = plot_area(self.width, self.height, !legend.is_empty())?;
        let y_domain = if lo == hi {
            padded(lo as f32, hi as f32, 0.0)
        } else {
            let pad = (hi - lo) * 0.05;
            (
                (lo - if lo < 0.0 { pad } else { 0.0 }) as f32,
                (hi + if hi > 0.0 { pad } else { 0.0 }) as f32,
            )
        };
        let frame = ChartFrame::new(area, (bins.start as f32, bins.end() as f32), y_domain)?;

        let y_label = match (&self.y, func) {
            (_, HistFunc::Count) => "count".to_string(),
            (Some(y), f) => format!("{f} of {y}"),
            (None, f) => format!("{f} of {x_name}"),
        };
        let title = self
            .title
            .clone()
            .unwrap_or_else(|| format!("Histogram of {x_name}"));

        let mut svg = SvgEncoder::new(self.width, self.height);
        draw_title(&mut svg, &title);
        frame.draw_axes(&mut svg, &x_name, &y_label);

        let fill_of = |group: usize| -> Rgba {
            match &colouring {
                Colouring::Groups(groups) => groups.get(group).map_or(Palette::primary(), |g| g.colour),
                _ => Palette::primary(),
            }
        };
        for bar in &bars {
            let (x0, y0) = frame.map(bar.left, bar.base + bar.value);
            let (x1, y1) = frame.map(bar.right, bar.base);
            let (top, bottom) = (y0.min(y1), y0.max(y1));
            svg.rect_outlined(x0, top, x1 - x0, bottom - top, fill_of(bar.group), Rgba::WHITE, 0.5);
        }

        if let Some(heading) = self.colour.as_deref().filter(|_| !legend.is_empty()) {
            draw_legend(&mut svg, area, heading, &legend);
        }

        debug!(bars = bars.len(), %title, "histogram built");
        Ok(Figure::new(title, svg))
    }
}

impl batuta_common::display::WithDimensions for Histogram<'_> {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn table() -> Table {
        Table::new()
            .with_column("v", vec![0.5, 1.5, 1.7, 2.5, 3.9, -0.2, 1.1, 2.2])
            .unwrap()
            .with_column("w", vec![1.0, 2.0, 3.0, 4.0, 5.0, -6.0, 7.0, 8.0])
            .unwrap()
            .with_column("k", vec![0_i64, 1, 2, 1, 0, 2, 2, 1])
            .unwrap()
    }

    fn totals(bars: &[Bar]) -> HashMap<usize, f64> {
        let mut out = HashMap::new();
        for bar in bars {
            *out.entry(bar.bin).or_insert(0.0) += bar.value;
        }
        out
    }

    #[test]
    fn test_counts_cover_every_row() {
        let (_, bars) = Histogram::new(&table()).bars().unwrap();
        let total: f64 = bars.iter().map(|b| b.value).sum();
        assert_relative_eq!(total, 8.0);
    }

    #[test]
    fn test_stacked_heights_sum_to_unstacked() {
        let t = table();
        let (_, plain) = Histogram::new(&t).nbins(4).bars().unwrap();
        let (_, stacked) = Histogram::new(&t).nbins(4).colour("k").bars().unwrap();

        let plain = totals(&plain);
        for (bin, total) in totals(&stacked) {
            assert_relative_eq!(total, plain[&bin]);
        }
        assert!(stacked.iter().any(|b| b.base > 0.0));
    }

    #[test]
    fn test_integer_column_one_bin_per_value() {
        let (bins, bars) = Histogram::new(&table()).x("k").bars().unwrap();
        assert_eq!(bins.count, 3);
        let counts: Vec<f64> = bars.iter().map(|b| b.value).collect();
        assert_eq!(counts, vec![2.0, 3.0, 3.0]);
    }

    #[test]
    fn test_y_defaults_to_sum() {
        let (_, bars) = Histogram::new(&table()).x("k").y("w").bars().unwrap();
        let sums: Vec<f64> = bars.iter().map(|b| b.value).collect();
        assert_eq!(sums, vec![6.0, 14.0, 4.0]);
        assert_relative_eq!(bars[2].base, 0.0);
    }

    #[test]
    fn test_other_funcs() {
        let t = table();
        let values = |f| {
            Histogram::new(&t)
                .x("k")
                .y("w")
                .func(f)
                .bars()
                .unwrap()
                .1
                .iter()
                .map(|b| b.value)
                .collect::<Vec<_>>()
        };
        assert_eq!(values(HistFunc::Min), vec![1.0, 2.0, -6.0]);
        assert_eq!(values(HistFunc::Max), vec![5.0, 8.0, 7.0]);
        let avg = values(HistFunc::Avg);
        assert_eq!(avg[1], 14.0 / 3.0);
        assert_eq!(values(HistFunc::Count), vec![2.0, 3.0, 3.0]);
    }

    #[test]
    fn test_avg_keeps_large_integer_values() {
        let t = Table::new()
            .with_column("x", vec![1_i64, 1, 2])
            .unwrap()
            .with_column("y", vec![16_777_217.0, 16_777_217.0, 0.1])
            .unwrap();
        let (_, bars) = Histogram::new(&t).y("y").func(HistFunc::Avg).bars().unwrap();
        let avg: Vec<f64> = bars.iter().map(|b| b.value).collect();
        assert_eq!(avg, vec![16_777_217.0, 0.1]);
    }

    #[test]
    fn test_full_i64_range_column() {
        let t = Table::new()
            .with_column("x", vec![i64::MIN, i64::MAX])
            .unwrap();
        let (bins, bars) = Histogram::new(&t).bars().unwrap();
        assert!(bins.count <= stats::MAX_INTEGER_BINS);
        assert_eq!(bars.iter().map(|b| b.value).sum::<f64>(), 2.0);
        assert!(Histogram::new(&t).build().is_ok());
    }

    #[test]
    fn test_negative_segments_stack_down() {
        let t = Table::new()
            .with_column("x", vec![1_i64, 1])
            .unwrap()
            .with_column("y", vec![-2.0, -3.0])
            .unwrap()
            .with_column("c", vec![0_i64, 1])
            .unwrap();
        let (_, bars) = Histogram::new(&t).y("y").colour("c").bars().unwrap();
        assert_eq!(bars.len(), 2);
        assert_relative_eq!(bars[1].base, -2.0);
        assert!(Histogram::new(&t).y("y").colour("c").build().is_ok());
    }

    #[test]
    fn test_histfunc_parse() {
        assert_eq!("AVG".parse::<HistFunc>().unwrap(), HistFunc::Avg);
        assert_eq!("mean".parse::<HistFunc>().unwrap(), HistFunc::Avg);
        assert!("median".parse::<HistFunc>().is_err());
        assert_eq!(HistFunc::Sum.to_string(), "sum");
    }

    #[test]
    fn test_build_labels() {
        let fig = Histogram::new(&table()).x("k").y("w").build().unwrap();
        assert_eq!(fig.title(), "Histogram of k");
        assert!(fig.to_svg().contains(">sum of w</text>"));
    }

    #[test]
    fn test_empty_table() {
        assert!(matches!(
            Histogram::new(&table().head(0)).build(),
            Err(Error::EmptyData)
        ));
    }

    #[test]
    fn test_unknown_colour() {
        assert!(matches!(
            Histogram::new(&table()).colour("zzz").bars(),
            Err(Error::ColumnNotFound(_))
        ));
    }
}
