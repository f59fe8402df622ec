//! Equalization parameters.
//!
//! Set once before a run and read-only while rows are processed.

use crate::error::{ClaheError, Result};

pub const DEFAULT_BLOCK_RADIUS: usize = 63;
pub const DEFAULT_BINS: usize = 255;
pub const DEFAULT_SLOPE: f32 = 3.0;

/// CLAHE configuration.
///
/// * `block_radius` - Half-width of the square neighborhood. Should be
///   larger than the features to be preserved.
/// * `bins` - Histogram resolution; the histogram has `bins + 1` buckets.
/// * `slope` - Clip-limit multiplier. `1.0` yields the original image,
///   very large values give unlimited local contrast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClaheParams {
    pub block_radius: usize,
    pub bins: usize,
    pub slope: f32,
}

impl Default for ClaheParams {
    fn default() -> Self {
        ClaheParams {
            block_radius: DEFAULT_BLOCK_RADIUS,
            bins: DEFAULT_BINS,
            slope: DEFAULT_SLOPE,
        }
    }
}

impl ClaheParams {
    pub fn new(block_radius: usize, bins: usize, slope: f32) -> Self {
        ClaheParams {
            block_radius,
            bins,
            slope,
        }
    }

    pub fn with_block_radius(mut self, block_radius: usize) -> Self {
        self.block_radius = block_radius;
        self
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_slope(mut self, slope: f32) -> Self {
        self.slope = slope;
        self
    }

    /// Check every parameter before a run starts.
    pub fn validate(&self) -> Result<()> {
        if self.block_radius < 1 {
            return Err(ClaheError::InvalidParameter(format!(
                "block_radius must be >= 1, got {}",
                self.block_radius
            )));
        }
        if self.bins < 1 {
            return Err(ClaheError::InvalidParameter(format!(
                "bins must be >= 1, got {}",
                self.bins
            )));
        }
        if !self.slope.is_finite() || self.slope < 1.0 {
            return Err(ClaheError::InvalidParameter(format!(
                "slope must be a finite value >= 1.0, got {}",
                self.slope
            )));
        }
        Ok(())
    }

    /// Number of histogram buckets (`bins + 1`).
    #[inline]
    pub fn buckets(&self) -> usize {
        self.bins + 1
    }

    /// Clip limit for a neighborhood of `n` pixels:
    /// `round(slope * n / (bins + 1))`.
    #[inline]
    pub fn clip_limit(&self, n: usize) -> u32 {
        let limit = self.slope as f64 * n as f64 / self.buckets() as f64 + 0.5;
        limit.min(u32::MAX as f64) as u32
    }
}
