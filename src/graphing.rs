//! One-call chart functions over a [`Table`].
//!
//! [`Plotter`] maps [`ChartOptions`] onto the plot builders, applies the
//! configured canvas size, and for `show = true` writes the figure and opens
//! it in the browser.

use crate::config::DisplayConfig;
use crate::error::Result;
use crate::figure::{Figure, OutputFormat};
use crate::output::{HtmlExporter, Viewer};
use crate::plots::{BoxAndWhisker, HistFunc, Histogram, Scatter2d, Scatter3d, Trendline};
use crate::table::Table;
use batuta_common::display::WithDimensions;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Per-chart options shared by every chart function.
#[derive(Clone, Default)]
pub struct ChartOptions {
    /// Chart title; each chart has a fallback built from its columns.
    pub title: Option<String>,
    /// Write the figure and open it in the browser.
    pub show: bool,
    /// Column for the x axis (or the binned column of a histogram).
    pub label_x: Option<String>,
    /// Column for the y axis (or the aggregated column of a histogram).
    pub label_y: Option<String>,
    /// Column for the z axis of a 3D scatter.
    pub label_z: Option<String>,
    /// Categorical column used for colour groups / stacking.
    pub label_colour: Option<String>,
    /// Fixed histogram bin count.
    pub nbins: Option<usize>,
    /// Histogram aggregation.
    pub histfunc: Option<HistFunc>,
    /// Curve overlaid on a 2D scatter.
    pub trendline: Option<Trendline>,
}

impl fmt::Debug for ChartOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartOptions")
            .field("title", &self.title)
            .field("show", &self.show)
            .field("label_x", &self.label_x)
            .field("label_y", &self.label_y)
            .field("label_z", &self.label_z)
            .field("label_colour", &self.label_colour)
            .field("nbins", &self.nbins)
            .field("histfunc", &self.histfunc)
            .field("trendline", &self.trendline.is_some())
            .finish()
    }
}

impl ChartOptions {
    /// Options with a title, not shown.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Whether to write and open the figure.
    #[must_use]
    pub fn show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Set the x column.
    #[must_use]
    pub fn label_x(mut self, column: impl Into<String>) -> Self {
        self.label_x = Some(column.into());
        self
    }

    /// Set the y column.
    #[must_use]
    pub fn label_y(mut self, column: impl Into<String>) -> Self {
        self.label_y = Some(column.into());
        self
    }

    /// Set the z column.
    #[must_use]
    pub fn label_z(mut self, column: impl Into<String>) -> Self {
        self.label_z = Some(column.into());
        self
    }

    /// Set the colour column.
    #[must_use]
    pub fn label_colour(mut self, column: impl Into<String>) -> Self {
        self.label_colour = Some(column.into());
        self
    }

    /// Set a fixed bin count.
    #[must_use]
    pub fn nbins(mut self, nbins: usize) -> Self {
        self.nbins = Some(nbins);
        self
    }

    /// Set the histogram aggregation.
    #[must_use]
    pub fn histfunc(mut self, func: HistFunc) -> Self {
        self.histfunc = Some(func);
        self
    }

    /// Overlay `f` on a 2D scatter.
    #[must_use]
    pub fn trendline(mut self, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        self.trendline = Some(std::sync::Arc::new(f));
        self
    }
}

/// Produces figures with a shared display configuration.
#[derive(Debug, Clone)]
pub struct Plotter {
    display: DisplayConfig,
    viewer: Viewer,
}

impl Default for Plotter {
    fn default() -> Self {
        Self::new(DisplayConfig::default())
    }
}

impl Plotter {
    /// A plotter writing and opening figures as `display` describes.
    #[must_use]
    pub fn new(display: DisplayConfig) -> Self {
        let viewer = Viewer::new(display.open_browser);
        Self { display, viewer }
    }

    /// Display settings in use.
    #[must_use]
    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Scatter two columns (default: the first two), optionally with a trendline.
    ///
    /// # Errors
    ///
    /// Returns an error if the chart cannot be built, written or opened.
    pub fn scatter_2d(&self, table: &Table, options: &ChartOptions) -> Result<Figure> {
        let mut plot = Scatter2d::new(table);
        if let Some(x) = &options.label_x {
            plot = plot.x(x);
        }
        if let Some(y) = &options.label_y {
            plot = plot.y(y);
        }
        if let Some(colour) = &options.label_colour {
            plot = plot.colour(colour);
        }
        if let Some(f) = &options.trendline {
            plot = plot.trendline(f.clone());
        }
        if let Some(title) = &options.title {
            plot = plot.title(title);
        }
        self.size(&mut plot);
        self.present(plot.build()?, options.show)
    }

    /// Scatter three columns (default: the first three) in 3D.
    ///
    /// # Errors
    ///
    /// Returns an error if the chart cannot be built, written or opened.
    pub fn scatter_3d(&self, table: &Table, options: &ChartOptions) -> Result<Figure> {
        let mut plot = Scatter3d::new(table);
        if let Some(x) = &options.label_x {
            plot = plot.x(x);
        }
        if let Some(y) = &options.label_y {
            plot = plot.y(y);
        }
        if let Some(z) = &options.label_z {
            plot = plot.z(z);
        }
        if let Some(colour) = &options.label_colour {
            plot = plot.colour(colour);
        }
        if let Some(title) = &options.title {
            plot = plot.title(title);
        }
        self.size(&mut plot);
        self.present(plot.build()?, options.show)
    }

    /// Histogram of one column (default: the first), optionally aggregating
    /// `label_y` per bin and stacking by `label_colour`.
    ///
    /// # Errors
    ///
    /// Returns an error if the chart cannot be built, written or opened.
    pub fn histogram(&self, table: &Table, options: &ChartOptions) -> Result<Figure> {
        let mut plot = Histogram::new(table);
        if let Some(x) = &options.label_x {
            plot = plot.x(x);
        }
        if let Some(y) = &options.label_y {
            plot = plot.y(y);
        }
        if let Some(colour) = &options.label_colour {
            plot = plot.colour(colour);
        }
        if let Some(func) = options.histfunc {
            plot = plot.func(func);
        }
        if let Some(nbins) = options.nbins {
            plot = plot.nbins(nbins);
        }
        if let Some(title) = &options.title {
            plot = plot.title(title);
        }
        self.size(&mut plot);
        self.present(plot.build()?, options.show)
    }

    /// Box plot of `label_y` (default: the first column), one box per
    /// category of `label_x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the chart cannot be built, written or opened.
    pub fn box_and_whisker(&self, table: &Table, options: &ChartOptions) -> Result<Figure> {
        let mut plot = BoxAndWhisker::new(table);
        if let Some(x) = &options.label_x {
            plot = plot.x(x);
        }
        if let Some(y) = &options.label_y {
            plot = plot.y(y);
        }
        if let Some(title) = &options.title {
            plot = plot.title(title);
        }
        self.size(&mut plot);
        self.present(plot.build()?, options.show)
    }

    fn size(&self, plot: &mut impl WithDimensions) {
        plot.set_dimensions(self.display.width, self.display.height);
    }

    /// Write the figure (when shown) and hand it to the viewer.
    fn present(&self, figure: Figure, show: bool) -> Result<Figure> {
        if show {
            let page = self.write(&figure)?;
            self.viewer.open(&page)?;
        }
        Ok(figure)
    }

    /// Write `figure` in the configured format and return the file to open.
    /// PNG output also gets an HTML page embedding the image.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory or files cannot be written.
    pub fn write(&self, figure: &Figure) -> Result<PathBuf> {
        let dir = &self.display.output_dir;
        let path = figure.save(dir, self.display.format)?;
        if self.display.format != OutputFormat::Png {
            return Ok(path);
        }

        let page = path.with_extension(OutputFormat::Html.extension());
        HtmlExporter::from_png(figure.title(), &std::fs::read(&path)?).write_to_file(&page)?;
        info!(page = %page.display(), "wrapped png in html page");
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{self, HAT_SIZE, SHOE_SIZE};
    use crate::error::Error;

    fn plotter(dir: &std::path::Path, format: OutputFormat) -> Plotter {
        Plotter::new(DisplayConfig {
            output_dir: dir.to_path_buf(),
            open_browser: false,
            format,
            width: 640,
            height: 480,
        })
    }

    #[test]
    fn test_unshown_chart_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let table = dataset::generate_seeded(30, 1).unwrap();
        let fig = plotter(dir.path(), OutputFormat::Html)
            .scatter_2d(&table, &ChartOptions::titled("quiet"))
            .unwrap();

        assert_eq!(fig.scene().dimensions(), (640, 480));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_shown_chart_written_by_title() {
        let dir = tempfile::tempdir().unwrap();
        let table = dataset::generate_seeded(30, 2).unwrap();
        plotter(dir.path(), OutputFormat::Html)
            .histogram(&table, &ChartOptions::titled("A histogram (one variable)").show(true))
            .unwrap();

        assert!(dir.path().join("a_histogram_one_variable.html").exists());
    }

    #[test]
    fn test_png_gets_html_page() {
        let dir = tempfile::tempdir().unwrap();
        let table = dataset::generate_seeded(30, 3).unwrap();
        let p = plotter(dir.path(), OutputFormat::Png);
        let fig = p.scatter_3d(&table, &ChartOptions::titled("A 3D scatter")).unwrap();
        let page = p.write(&fig).unwrap();

        assert_eq!(page, dir.path().join("a_3d_scatter.html"));
        assert!(dir.path().join("a_3d_scatter.png").exists());
        assert!(std::fs::read_to_string(page).unwrap().contains("data:image/png;base64,"));
    }

    #[test]
    fn test_options_reach_builders() {
        let dir = tempfile::tempdir().unwrap();
        let table = dataset::generate_seeded(40, 4).unwrap();
        let p = plotter(dir.path(), OutputFormat::Svg);

        let fig = p
            .histogram(
                &table,
                &ChartOptions::titled("two")
                    .label_x(HAT_SIZE)
                    .label_y(SHOE_SIZE)
                    .histfunc(HistFunc::Avg),
            )
            .unwrap();
        assert!(fig.to_svg().contains(">avg of shoe_size</text>"));

        let fig = p
            .box_and_whisker(&table, &ChartOptions::default().label_x(HAT_SIZE).label_y(SHOE_SIZE))
            .unwrap();
        assert_eq!(fig.title(), "Distribution of shoe_size");
    }

    #[test]
    fn test_bad_column_propagates() {
        let table = dataset::generate_seeded(5, 5).unwrap();
        let err = Plotter::default()
            .scatter_2d(&table, &ChartOptions::default().label_colour("nope"))
            .unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound(_)));
    }

    #[test]
    fn test_options_debug_hides_closure() {
        let options = ChartOptions::titled("t").trendline(dataset::shoe_to_height);
        assert!(format!("{options:?}").contains("trendline: true"));
    }
}
