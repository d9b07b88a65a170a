//! graphing-demo - draws the synthetic shoe-size dataset every way it can.
//!
//! Run: `graphing-demo --seed 42 --format png`

#![cfg_attr(test, allow(clippy::unwrap_used))]

use anyhow::{Context, Result};
use clap::Parser;
use graphing::config::DemoConfig;
use graphing::demo;
use graphing::figure::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// graphing-demo: synthetic data, scatters and histograms in the browser
#[derive(Parser, Debug)]
#[command(name = "graphing-demo")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Generate a synthetic table and open charts of it in the browser", long_about = None)]
struct Cli {
    /// Rows in the generated table
    #[arg(short, long)]
    rows: Option<usize>,

    /// RNG seed for a reproducible table
    #[arg(short, long)]
    seed: Option<u64>,

    /// Row counts for the 2D scatters, comma separated
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<usize>>,

    /// Directory charts are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format (html, svg, png)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Write charts without opening a browser
    #[arg(long)]
    no_open: bool,

    /// Config file path (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Chart width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Chart height in pixels
    #[arg(long)]
    height: Option<u32>,
}

impl Cli {
    /// Layer command-line values over `config`.
    fn apply(self, mut config: DemoConfig) -> DemoConfig {
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(sizes) = self.sizes {
            config.sample_sizes = sizes;
        }
        if let Some(dir) = self.output_dir {
            config.display.output_dir = dir;
        }
        if let Some(format) = self.format {
            config.display.format = format;
        }
        if self.no_open {
            config.display.open_browser = false;
        }
        if let Some(width) = self.width {
            config.display.width = width;
        }
        if let Some(height) = self.height {
            config.display.height = height;
        }
        config
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => DemoConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DemoConfig::default(),
    };
    let config = cli.apply(file_config);

    let figures = demo::run(&config).context("demo failed")?;
    tracing::info!(
        figures = figures.len(),
        output_dir = %config.display.output_dir.display(),
        "demo complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_file_values() {
        let cli = Cli::parse_from([
            "graphing-demo",
            "--rows",
            "50",
            "--sizes",
            "5,10",
            "--format",
            "png",
            "--no-open",
        ]);
        let file = DemoConfig::parse("rows: 10\nseed: 3\n").unwrap();
        let config = cli.apply(file);

        assert_eq!(config.rows, 50);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.sample_sizes, vec![5, 10]);
        assert_eq!(config.display.format, OutputFormat::Png);
        assert!(!config.display.open_browser);
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = Cli::parse_from(["graphing-demo"]).apply(DemoConfig::default());
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn test_zero_rows_flag_fails_validation() {
        let config = Cli::parse_from(["graphing-demo", "--rows", "0"]).apply(DemoConfig::default());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rows must be at least 1"));
    }

    #[test]
    fn test_bad_format_rejected() {
        assert!(Cli::try_parse_from(["graphing-demo", "--format", "gif"]).is_err());
    }
}
