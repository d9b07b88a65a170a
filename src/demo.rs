//! The demo sequence: one synthetic table, every chart shape.

use crate::config::DemoConfig;
use crate::dataset::{self, HAT_SIZE, SHOE_SIZE};
use crate::error::Result;
use crate::figure::Figure;
use crate::graphing::{ChartOptions, Plotter};
use crate::table::Table;
use tracing::info;

/// Draw every demo chart from `table`.
///
/// For each `n` in `sample_sizes` a 2D scatter of the first `n` rows with the
/// generating function as trendline, then a 3D scatter and three histograms
/// (one variable, two variables, stacked by hat size).
///
/// # Errors
///
/// Returns the first chart error.
pub fn charts(table: &Table, plotter: &Plotter, sample_sizes: &[usize], show: bool) -> Result<Vec<Figure>> {
    let mut figures = Vec::with_capacity(sample_sizes.len() + 4);

    for &n in sample_sizes {
        let options = ChartOptions::titled(format!("A 2D scatter with {n} points"))
            .show(show)
            .trendline(dataset::shoe_to_height);
        figures.push(plotter.scatter_2d(&table.head(n), &options)?);
    }

    figures.push(plotter.scatter_3d(table, &ChartOptions::titled("A 3D scatter").show(show))?);

    figures.push(plotter.histogram(
        table,
        &ChartOptions::titled("A histogram (one variable)").show(show),
    )?);

    figures.push(plotter.histogram(
        table,
        &ChartOptions::titled("A histogram (two variables)")
            .show(show)
            .label_x(HAT_SIZE)
            .label_y(SHOE_SIZE),
    )?);

    figures.push(plotter.histogram(
        table,
        &ChartOptions::titled("A stacked histogram")
            .show(show)
            .label_colour(HAT_SIZE),
    )?);

    Ok(figures)
}

/// Generate the table described by `config` and show every demo chart.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidConfig`] for a config with nothing to draw,
/// otherwise the first generation, chart, write or browser error.
pub fn run(config: &DemoConfig) -> Result<Vec<Figure>> {
    config.validate()?;
    let table = match config.seed {
        Some(seed) => dataset::generate_seeded(config.rows, seed)?,
        None => dataset::generate_random(config.rows)?,
    };
    info!(
        rows = table.rows(),
        seed = ?config.seed,
        output_dir = %config.display.output_dir.display(),
        "running demo"
    );

    let plotter = Plotter::new(config.display.clone());
    charts(&table, &plotter, &config.sample_sizes, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::error::Error;
    use crate::figure::OutputFormat;

    #[test]
    fn test_run_writes_every_chart() {
        let dir = tempfile::tempdir().unwrap();
        let config = DemoConfig {
            rows: 120,
            seed: Some(9),
            sample_sizes: vec![10, 50],
            display: DisplayConfig {
                output_dir: dir.path().to_path_buf(),
                open_browser: false,
                format: OutputFormat::Svg,
                ..DisplayConfig::default()
            },
        };

        let figures = run(&config).unwrap();
        assert_eq!(figures.len(), 6);
        for name in [
            "a_2d_scatter_with_10_points.svg",
            "a_2d_scatter_with_50_points.svg",
            "a_3d_scatter.svg",
            "a_histogram_one_variable.svg",
            "a_histogram_two_variables.svg",
            "a_stacked_histogram.svg",
        ] {
            assert!(dir.path().join(name).exists(), "{name} missing");
        }
    }

    #[test]
    fn test_run_rejects_zero_rows_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = DemoConfig {
            rows: 0,
            seed: Some(1),
            display: DisplayConfig {
                output_dir: dir.path().join("charts"),
                open_browser: false,
                ..DisplayConfig::default()
            },
            ..DemoConfig::default()
        };

        let err = run(&config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)), "{err}");
        assert!(!dir.path().join("charts").exists());
    }
}
