//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (position, color).

use crate::color::Rgba;
use crate::error::{Error, Result};
use trueno::Vector;

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max or either is not finite.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain("Domain must be finite".to_string()));
        }
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain(
                "Domain min and max cannot be equal".to_string(),
            ));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Create a scale from data extent, padded by `pad` of the span on each side.
    ///
    /// A single distinct value is widened to `value ± 0.5` so that constant
    /// columns still plot in the middle of the axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is empty or contains no finite values.
    pub fn from_data(data: &[f32], range: (f32, f32), pad: f32) -> Result<Self> {
        let (min, max) = finite_extent(data).ok_or(Error::EmptyData)?;
        Self::new(padded(min, max, pad), range)
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f32) -> f32 {
        let t = (value - self.range_min) / (self.range_max - self.range_min);
        self.domain_min + t * (self.domain_max - self.domain_min)
    }

    /// "Nice" tick positions inside the domain, roughly `count` of them.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f32> {
        nice_ticks(self.domain_min, self.domain_max, count)
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Min and max of the finite values in `data`, reduced with trueno SIMD.
#[must_use]
pub fn finite_extent(data: &[f32]) -> Option<(f32, f32)> {
    let finite: Vec<f32> = data.iter().copied().filter(|v| v.is_finite()).collect();
    let first = *finite.first()?;
    let vec = Vector::from_vec(finite);
    Some((vec.min().unwrap_or(first), vec.max().unwrap_or(first)))
}

/// Widen `[min, max]` by `pad` of its span; degenerate spans become `± 0.5`.
#[must_use]
pub fn padded(min: f32, max: f32, pad: f32) -> (f32, f32) {
    let span = max - min;
    if span.abs() < f32::EPSILON {
        return (min - 0.5, max + 0.5);
    }
    (min - span * pad, max + span * pad)
}

/// Compute 1-2-5 stepped tick positions covering `[min, max]`.
#[must_use]
pub fn nice_ticks(min: f32, max: f32, count: usize) -> Vec<f32> {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let span = hi - lo;
    if !span.is_finite() || span <= 0.0 || count == 0 {
        return vec![lo];
    }

    let raw = span / count as f32;
    let magnitude = 10f32.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let step = magnitude
        * if residual >= 50f32.sqrt() {
            10.0
        } else if residual >= 10f32.sqrt() {
            5.0
        } else if residual >= 2f32.sqrt() {
            2.0
        } else {
            1.0
        };

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .map(|i| {
            let v = i as f32 * step;
            // snap tiny float residue to zero
            if v.abs() < step * 1e-6 {
                0.0
            } else {
                v
            }
        })
        .collect()
}

/// Format a tick value without trailing float noise.
#[must_use]
pub fn format_tick(value: f32) -> String {
    if value.fract().abs() < 1e-6 {
        format!("{}", value.round() as i64)
    } else {
        let s = format!("{value:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Color scale for mapping values to colors.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f32,
    domain_max: f32,
}

impl ColorScale {
    /// Create a new color scale.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty or domain is invalid.
    pub fn new(colors: Vec<Rgba>, domain: (f32, f32)) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::ScaleDomain(
                "Color scale requires at least one color".to_string(),
            ));
        }

        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain(
                "Domain min and max cannot be equal".to_string(),
            ));
        }

        Ok(Self {
            colors,
            domain_min: domain.0,
            domain_max: domain.1,
        })
    }

    /// Create a viridis color scale (perceptually uniform).
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is degenerate.
    pub fn viridis(domain: (f32, f32)) -> Result<Self> {
        Self::new(
            vec![
                Rgba::rgb(68, 1, 84),
                Rgba::rgb(59, 82, 139),
                Rgba::rgb(33, 145, 140),
                Rgba::rgb(94, 201, 98),
                Rgba::rgb(253, 231, 37),
            ],
            domain,
        )
    }
}

impl Scale<f32, Rgba> for ColorScale {
    fn scale(&self, value: f32) -> Rgba {
        let t = ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0);

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let segment_count = self.colors.len() - 1;
        let segment = (t * segment_count as f32).floor() as usize;
        let segment = segment.min(segment_count - 1);

        let local_t = t * segment_count as f32 - segment as f32;

        self.colors[segment].lerp(self.colors[segment + 1], local_t)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (
            *self.colors.first().unwrap_or(&Rgba::BLACK),
            *self.colors.last().unwrap_or(&Rgba::WHITE),
        )
    }
}
