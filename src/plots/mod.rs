//! Chart types built over a [`Table`](crate::table::Table).
//!
//! Each chart is a builder borrowing the table; `build()` lays the chart out
//! and returns a [`Figure`](crate::figure::Figure).

mod boxplot;
mod frame;
mod histogram;
mod scatter;
mod scatter3d;

pub use boxplot::{BoxAndWhisker, BoxGroup};
pub use frame::{ColourGroup, Colouring, MAX_CATEGORIES};
pub use histogram::{Bar, HistFunc, Histogram};
pub use scatter::{trendline_samples, Scatter2d, Trendline, TRENDLINE_SAMPLES};
pub use scatter3d::{ProjectedPoint, Scatter3d};
