//! End-to-end chart calls over the demo dataset.
//!
//! Run: cargo test --test chart_calls_test

#![allow(clippy::unwrap_used)]

use graphing::dataset::{self, HAT_SIZE, PERSON_HEIGHT, SHOE_SIZE};
use graphing::demo;
use graphing::output::SvgElement;
use graphing::prelude::*;
use std::path::Path;

const SAMPLE_SIZES: [usize; 4] = [10, 50, 200, 1000];

fn plotter(dir: &Path, format: OutputFormat) -> Plotter {
    Plotter::new(DisplayConfig {
        output_dir: dir.to_path_buf(),
        open_browser: false,
        format,
        ..DisplayConfig::default()
    })
}

fn circle_count(fig: &Figure) -> usize {
    fig.scene()
        .elements()
        .iter()
        .filter(|e| matches!(e, SvgElement::Circle { .. }))
        .count()
}

#[test]
fn test_every_chart_for_every_sample_size() {
    let dir = tempfile::tempdir().unwrap();
    let table = dataset::generate_seeded(1000, 42).unwrap();
    let plotter = plotter(dir.path(), OutputFormat::Html);

    for n in SAMPLE_SIZES {
        let sample = table.head(n);
        let title = format!("A 2D scatter with {n} points");
        let fig = plotter
            .scatter_2d(
                &sample,
                &ChartOptions::titled(&title)
                    .show(true)
                    .trendline(dataset::shoe_to_height),
            )
            .unwrap();
        assert_eq!(circle_count(&fig), n);
        assert!(dir.path().join(fig.file_name(OutputFormat::Html)).exists());

        plotter.scatter_3d(&sample, &ChartOptions::titled("A 3D scatter")).unwrap();
        plotter.histogram(&sample, &ChartOptions::titled("A histogram (one variable)")).unwrap();
        plotter
            .histogram(
                &sample,
                &ChartOptions::titled("A histogram (two variables)")
                    .label_x(HAT_SIZE)
                    .label_y(SHOE_SIZE),
            )
            .unwrap();
        plotter
            .histogram(
                &sample,
                &ChartOptions::titled("A stacked histogram").label_colour(HAT_SIZE),
            )
            .unwrap();
        plotter
            .box_and_whisker(
                &sample,
                &ChartOptions::default().label_x(HAT_SIZE).label_y(PERSON_HEIGHT),
            )
            .unwrap();
    }
}

#[test]
fn test_demo_sequence_writes_pages() {
    let dir = tempfile::tempdir().unwrap();
    let table = dataset::generate_seeded(1000, 7).unwrap();
    let figures = demo::charts(&table, &plotter(dir.path(), OutputFormat::Html), &SAMPLE_SIZES, true).unwrap();

    let titles: Vec<&str> = figures.iter().map(Figure::title).collect();
    assert_eq!(
        titles,
        vec![
            "A 2D scatter with 10 points",
            "A 2D scatter with 50 points",
            "A 2D scatter with 200 points",
            "A 2D scatter with 1000 points",
            "A 3D scatter",
            "A histogram (one variable)",
            "A histogram (two variables)",
            "A stacked histogram",
        ]
    );

    let pages = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(pages, figures.len());
    let html = std::fs::read_to_string(dir.path().join("a_3d_scatter.html")).unwrap();
    assert!(html.contains("<svg"));
}

#[test]
fn test_png_output_is_valid_image() {
    let dir = tempfile::tempdir().unwrap();
    let table = dataset::generate_seeded(200, 11).unwrap();
    let plotter = plotter(dir.path(), OutputFormat::Png);

    let fig = plotter
        .histogram(&table, &ChartOptions::titled("A stacked histogram").label_colour(HAT_SIZE))
        .unwrap();
    let page = plotter.write(&fig).unwrap();

    let png = std::fs::read(dir.path().join("a_stacked_histogram.png")).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(page.extension().unwrap(), "html");

    let fb = fig.to_framebuffer().unwrap();
    assert!(fb.count_non_background(Rgba::WHITE) > 0);
}

#[test]
fn test_stacked_histogram_matches_unstacked_counts() {
    let table = dataset::generate_seeded(1000, 5).unwrap();
    let (bins, plain) = Histogram::new(&table).bars().unwrap();
    let (stacked_bins, stacked) = Histogram::new(&table).colour(HAT_SIZE).bars().unwrap();
    assert_eq!(bins, stacked_bins);

    let mut plain_totals = vec![0.0; bins.count];
    let mut stacked_totals = vec![0.0; bins.count];
    for bar in &plain {
        plain_totals[bar.bin] += bar.value;
    }
    for bar in &stacked {
        stacked_totals[bar.bin] += bar.value;
    }
    assert_eq!(plain_totals, stacked_totals);
    assert_eq!(plain_totals.iter().sum::<f64>(), 1000.0);
}

#[test]
fn test_unknown_column_reported() {
    let table = dataset::generate_seeded(10, 1).unwrap();
    let err = Plotter::default()
        .histogram(&table, &ChartOptions::default().label_x("shoe"))
        .unwrap_err();
    assert!(matches!(err, Error::ColumnNotFound(ref name) if name == "shoe"));
    assert_eq!(err.to_string(), "Column not found: shoe");
}
