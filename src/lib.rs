//! # graphing
//!
//! Small chart library and demo: generates a synthetic shoe-size / height /
//! hat-size table and draws it as 2D scatters, a 3D scatter, histograms and
//! box plots, written as SVG, PNG or standalone HTML and opened in the
//! default browser.
//!
//! Charts are built as a vector scene that is either serialized to SVG or
//! rasterized into a [`framebuffer::Framebuffer`] for PNG output. Pixel-space
//! extents go through [trueno](https://crates.io/crates/trueno) vectors;
//! column statistics stay in f64.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use graphing::prelude::*;
//!
//! # fn main() -> graphing::Result<()> {
//! let table = dataset::generate_seeded(1000, 42)?;
//! let plotter = Plotter::new(DisplayConfig::default());
//!
//! plotter.scatter_2d(
//!     &table.head(200),
//!     &ChartOptions::titled("A 2D scatter with 200 points")
//!         .show(true)
//!         .trendline(dataset::shoe_to_height),
//! )?;
//! plotter.histogram(
//!     &table,
//!     &ChartOptions::titled("A stacked histogram")
//!         .show(true)
//!         .label_colour(dataset::HAT_SIZE),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! ## References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Sturges, H. A. (1926). "The Choice of a Class Interval." JASA.
//! - Freedman, D., & Diaconis, P. (1981). "On the histogram as a density estimator."

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Data
// ============================================================================

/// Column-oriented tables.
pub mod table;

/// Synthetic demo dataset.
pub mod dataset;

/// Summary statistics and binning.
pub mod stats;

// ============================================================================
// Core Modules
// ============================================================================

/// Color types, color space conversions and palettes.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives and the 3D projection.
pub mod geometry;

/// Scale functions for data-to-visual mappings.
pub mod scale;

// ============================================================================
// Charts
// ============================================================================

/// Chart types (scatter, 3D scatter, histogram, box plot).
pub mod plots;

/// Rendered figures and export formats.
pub mod figure;

/// One-call chart functions with display configuration.
pub mod graphing;

/// Demo and display configuration.
pub mod config;

/// The demo chart sequence.
pub mod demo;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization of figures.
pub mod render;

/// Output encoders (PNG, SVG, HTML) and the browser viewer.
pub mod output;

/// Error types.
pub mod error;

pub use error::{Error, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::color::{Palette, Rgba};
    pub use crate::config::{DemoConfig, DisplayConfig};
    pub use crate::dataset;
    pub use crate::error::{Error, Result};
    pub use crate::figure::{Figure, OutputFormat};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::Projection;
    pub use crate::graphing::{ChartOptions, Plotter};
    pub use crate::output::{HtmlExporter, PngEncoder, SvgEncoder, Viewer};
    pub use crate::plots::{BoxAndWhisker, HistFunc, Histogram, Scatter2d, Scatter3d, Trendline};
    pub use crate::stats::{BinStrategy, Bins};
    pub use crate::table::{Column, DataType, Table};
}
