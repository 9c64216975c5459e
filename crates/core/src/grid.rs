//! Evenly spaced simulation time grid.

use thiserror::Error;

/// Errors raised when a time grid cannot be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("time horizon must be positive and finite (got {0})")]
    InvalidHorizon(f64),
    #[error("time grid needs at least 2 points (got {0})")]
    TooFewPoints(usize),
}

/// Ordered, evenly spaced samples from 0 to the horizon, both ends included.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    samples: Vec<f64>,
    horizon_s: f64,
}

impl TimeGrid {
    /// Build `points` samples spanning `[0, horizon_s]`.
    ///
    /// The last sample is exactly `horizon_s`; interior samples are computed
    /// from their index so rounding does not accumulate along the grid.
    pub fn linspace(horizon_s: f64, points: usize) -> Result<Self, GridError> {
        if !horizon_s.is_finite() || horizon_s <= 0.0 {
            return Err(GridError::InvalidHorizon(horizon_s));
        }
        if points < 2 {
            return Err(GridError::TooFewPoints(points));
        }

        let last = (points - 1) as f64;
        let samples = (0..points)
            .map(|i| {
                if i + 1 == points {
                    horizon_s
                } else {
                    horizon_s * (i as f64 / last)
                }
            })
            .collect();

        Ok(Self { samples, horizon_s })
    }

    /// Sample times in seconds.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Final sample time (s).
    pub fn horizon_s(&self) -> f64 {
        self.horizon_s
    }

    /// Nominal spacing between consecutive samples (s).
    pub fn spacing_s(&self) -> f64 {
        self.horizon_s / (self.samples.len() - 1) as f64
    }
}
