//! Summary statistics and histogram binning.
//!
//! Sums accumulate in f64 so large integer-valued columns keep full
//! precision; quantiles and binning work on sorted copies.

use crate::error::{Error, Result};

/// Min and max of the finite values.
#[must_use]
pub fn extent(data: &[f64]) -> Option<(f64, f64)> {
    let mut iter = data.iter().copied().filter(|v| v.is_finite());
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Arithmetic mean, summed in f64, or `None` for empty input.
#[must_use]
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample standard deviation (n - 1), 0 for fewer than two values.
#[must_use]
pub fn std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let mean = data.iter().sum::<f64>() / data.len() as f64;
    let variance =
        data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (data.len() - 1) as f64;
    variance.sqrt()
}

/// Finite values sorted ascending.
#[must_use]
pub fn sorted_finite(data: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Linear-interpolated percentile of sorted data (`p` in 0..=100).
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
        }
    }
}

/// Box-plot summary using the 1.5 * IQR whisker rule.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    /// Lowest value inside the lower fence.
    pub min: f64,
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// Highest value inside the upper fence.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Values outside the fences.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Compute statistics, or `None` when there are no finite values.
    #[must_use]
    pub fn from_data(data: &[f64]) -> Option<Self> {
        let sorted = sorted_finite(data);
        let (&first, &last) = (sorted.first()?, sorted.last()?);

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let lower_fence = q1 - 1.5 * iqr;
        let upper_fence = q3 + 1.5 * iqr;

        let min = sorted
            .iter()
            .copied()
            .find(|&x| x >= lower_fence)
            .unwrap_or(first);
        let max = sorted
            .iter()
            .rev()
            .copied()
            .find(|&x| x <= upper_fence)
            .unwrap_or(last);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&x| x < lower_fence || x > upper_fence)
            .collect();

        Some(Self {
            min,
            mean: mean(&sorted).unwrap_or(median),
            q1,
            median,
            q3,
            max,
            outliers,
        })
    }
}

/// Binning strategy for histograms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BinStrategy {
    /// Sturges' rule: ceil(log2(n) + 1)
    #[default]
    Sturges,
    /// Scott's rule: 3.5 * std / n^(1/3)
    Scott,
    /// Freedman-Diaconis rule: 2 * IQR / n^(1/3)
    FreedmanDiaconis,
    /// Fixed number of bins
    Fixed(usize),
    /// One bin per integer value, centred on the integers
    Integer,
}

/// Largest integer span that still gets one bin per value.
pub const MAX_INTEGER_BINS: usize = 50;

/// Equal-width bin edges over a data extent.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    /// Left edge of the first bin.
    pub start: f64,
    /// Width of each bin.
    pub width: f64,
    /// Number of bins.
    pub count: usize,
}

impl Bins {
    /// Choose bins for `data` with the given strategy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] if there are no finite values.
    pub fn compute(data: &[f64], strategy: BinStrategy) -> Result<Self> {
        let (min, max) = extent(data).ok_or(Error::EmptyData)?;

        if let BinStrategy::Integer = strategy {
            let (lo, hi) = (min.floor(), max.ceil());
            // Wider spans fall through to Sturges below.
            if integer_span_fits(lo, hi) {
                return Ok(Self {
                    start: lo - 0.5,
                    width: 1.0,
                    count: (hi - lo) as usize + 1,
                });
            }
        }

        let span = max - min;
        if span <= 0.0 {
            return Ok(Self {
                start: min - 0.5,
                width: 1.0,
                count: 1,
            });
        }

        let n = data.len() as f64;
        let sturges = || (n.log2().ceil() + 1.0).max(1.0) as usize;
        let count = match strategy {
            BinStrategy::Sturges | BinStrategy::Integer => sturges(),
            BinStrategy::Scott => {
                let width = 3.5 * std_dev(data) / n.cbrt();
                if width > 0.0 {
                    (span / width).ceil() as usize
                } else {
                    sturges()
                }
            }
            BinStrategy::FreedmanDiaconis => {
                let sorted = sorted_finite(data);
                let iqr = percentile(&sorted, 75.0) - percentile(&sorted, 25.0);
                let width = 2.0 * iqr / n.cbrt();
                if width > 0.0 {
                    (span / width).ceil() as usize
                } else {
                    sturges()
                }
            }
            BinStrategy::Fixed(bins) => bins,
        }
        .max(1);

        Ok(Self {
            start: min,
            width: span / count as f64,
            count,
        })
    }

    /// Index of the bin containing `value`, clamping the right edge into the last bin.
    #[must_use]
    pub fn index_of(&self, value: f64) -> Option<usize> {
        if !value.is_finite() {
            return None;
        }
        let idx = ((value - self.start) / self.width).floor();
        if idx < 0.0 {
            return None;
        }
        let idx = idx as usize;
        if idx < self.count {
            Some(idx)
        } else if value <= self.end() + self.width * 1e-9 {
            Some(self.count - 1)
        } else {
            None
        }
    }

    /// Left edge of bin `i`.
    #[must_use]
    pub fn left(&self, i: usize) -> f64 {
        self.start + self.width * i as f64
    }

    /// Right edge of the last bin.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.left(self.count)
    }
}

/// True when `lo..=hi` holds at most [`MAX_INTEGER_BINS`] integers.
///
/// Compared in f64: the span of an i64 column can exceed `usize`.
fn integer_span_fits(lo: f64, hi: f64) -> bool {
    hi - lo < MAX_INTEGER_BINS as f64
}

/// Default strategy for a column: per-integer bins for narrow integer data.
#[must_use]
pub fn default_strategy(data: &[f64], integer: bool) -> BinStrategy {
    if integer {
        if let Some((min, max)) = extent(data) {
            if integer_span_fits(min.floor(), max.ceil()) {
                return BinStrategy::Integer;
            }
        }
    }
    BinStrategy::Sturges
}
