//! Uniform sampling over numeric intervals.
//!
//! Everything stochastic in a painting goes through [`rand_number`] and
//! [`rand_int`]. Both accept either a pair of scalars or a [`Range`], and
//! both treat the upper bound as exclusive.

use crate::error::{PaintError, PaintResult};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A numeric interval `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Arguments accepted by the samplers.
///
/// Built from `(min, max)`, `(min, Option<max>)`, a lone `min`, or a
/// [`Range`]. A missing upper bound is only reported when sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: f64,
    max: Option<f64>,
}

impl From<Range> for Bounds {
    fn from(range: Range) -> Self {
        Self {
            min: range.min,
            max: Some(range.max),
        }
    }
}

impl From<&Range> for Bounds {
    fn from(range: &Range) -> Self {
        Self::from(*range)
    }
}

impl From<(f64, f64)> for Bounds {
    fn from((min, max): (f64, f64)) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }
}

impl From<(f64, Option<f64>)> for Bounds {
    fn from((min, max): (f64, Option<f64>)) -> Self {
        Self { min, max }
    }
}

impl From<f64> for Bounds {
    fn from(min: f64) -> Self {
        Self { min, max: None }
    }
}

impl Bounds {
    fn resolve(self) -> PaintResult<(f64, f64)> {
        let max = self
            .max
            .ok_or_else(|| PaintError::invalid_range("must provide max and min"))?;
        if !self.min.is_finite() || !max.is_finite() {
            return Err(PaintError::invalid_range(format!(
                "bounds must be finite, got [{}, {})",
                self.min, max
            )));
        }
        if self.min > max {
            return Err(PaintError::invalid_range(format!(
                "min {} exceeds max {}",
                self.min, max
            )));
        }
        Ok((self.min, max))
    }
}

/// Sample a real value uniformly from `[min, max)`.
///
/// Returns exactly `min` when `min == max`.
pub fn rand_number<R: Rng + ?Sized>(rng: &mut R, bounds: impl Into<Bounds>) -> PaintResult<f64> {
    let (min, max) = bounds.into().resolve()?;
    Ok(rng.gen::<f64>() * (max - min) + min)
}

/// Sample an integer by truncating [`rand_number`] toward zero.
///
/// Truncation, not rounding: `rand_int(rng, (1.0, 2.0))` is always 1.
pub fn rand_int<R: Rng + ?Sized>(rng: &mut R, bounds: impl Into<Bounds>) -> PaintResult<i64> {
    rand_number(rng, bounds).map(|value| value.trunc() as i64)
}
