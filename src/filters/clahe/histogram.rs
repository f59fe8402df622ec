//! Sliding neighborhood histogram.
//!
//! The histogram covers `[i_min, i_max) × [x_min, x_max)` and is moved one
//! column at a time: the column leaving on the left is subtracted and the
//! column entering on the right is added, so a step costs O(h) instead of
//! O(h × w).

use ndarray::{Array2, ArrayView2};

/// Intensity to bin lookup: `ceil(v / 255 * bins)`.
///
/// Zero is the only intensity that lands in bin 0; everything else rounds
/// up. Computed in integers so no float rounding can move a sample to the
/// neighboring bin.
#[derive(Debug, Clone)]
pub struct BinMap {
    lut: [u32; 256],
}

impl BinMap {
    pub fn new(bins: usize) -> Self {
        let mut lut = [0u32; 256];
        for (v, bin) in lut.iter_mut().enumerate() {
            *bin = ((v * bins + 254) / 255) as u32;
        }
        BinMap { lut }
    }

    #[inline]
    pub fn bin(&self, v: u8) -> u32 {
        self.lut[v as usize]
    }

    /// Bin every sample of the source once. The result is the immutable
    /// snapshot every row reads from.
    pub fn bin_image(&self, input: ArrayView2<u8>) -> Array2<u32> {
        input.mapv(|v| self.bin(v))
    }
}

/// Raw bin counts for one row's neighborhood.
#[derive(Debug, Clone)]
pub struct SlidingHistogram {
    counts: Vec<u32>,
    i_min: usize,
    i_max: usize,
    radius: usize,
}

impl SlidingHistogram {
    /// Empty histogram with `buckets` counters.
    pub fn new(buckets: usize, radius: usize) -> Self {
        SlidingHistogram {
            counts: vec![0; buckets],
            i_min: 0,
            i_max: 0,
            radius,
        }
    }

    /// Start a new row: clear the counters and load the initial window.
    ///
    /// The vertical extent is `[max(0, i - r), min(height, i + r + 1))`.
    /// The initial horizontal window holds the columns left of the first
    /// entering column `r`, i.e. `[0, min(width - 1, r))` whenever the
    /// image is wider than the radius. On narrower images it is the whole
    /// width, since column `r` never enters.
    pub fn reset_row(&mut self, binned: ArrayView2<u32>, row: usize) {
        let (height, width) = binned.dim();
        let r = self.radius;

        self.counts.iter_mut().for_each(|c| *c = 0);
        self.i_min = row.saturating_sub(r);
        self.i_max = height.min(row + r + 1);

        let j_max = r.min(width);
        for y in self.i_min..self.i_max {
            for x in 0..j_max {
                self.counts[binned[[y, x]] as usize] += 1;
            }
        }
    }

    /// Slide the window so it is centered on column `j` and return the
    /// neighborhood pixel count `n = h * w`.
    ///
    /// Must be called for `j = 0, 1, 2, ...` in order after `reset_row`.
    pub fn advance(&mut self, binned: ArrayView2<u32>, j: usize) -> usize {
        let width = binned.dim().1;
        let r = self.radius;

        let x_min = j.saturating_sub(r);
        let x_max = j + r + 1;

        if x_min > 0 {
            let leaving = x_min - 1;
            for y in self.i_min..self.i_max {
                self.counts[binned[[y, leaving]] as usize] -= 1;
            }
        }

        if x_max <= width {
            let entering = x_max - 1;
            for y in self.i_min..self.i_max {
                self.counts[binned[[y, entering]] as usize] += 1;
            }
        }

        let w = width.min(x_max) - x_min;
        self.height() * w
    }

    #[inline]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Vertical extent of the current row's neighborhood.
    #[inline]
    pub fn height(&self) -> usize {
        self.i_max - self.i_min
    }

    #[cfg(test)]
    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }
}
