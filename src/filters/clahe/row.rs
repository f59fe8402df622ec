//! Row processor: equalizes one output row from the binned snapshot.

use log::trace;
use ndarray::ArrayView2;

use super::cdf::map_bin;
use super::clip::{clip_histogram, ClipOutcome};
use super::histogram::SlidingHistogram;
use crate::params::ClaheParams;

/// Per-row working memory. Reused across rows by one worker; nothing in
/// it survives `reset_row`.
#[derive(Debug, Clone)]
pub struct RowScratch {
    hist: SlidingHistogram,
    clipped: Vec<u32>,
}

impl RowScratch {
    pub fn new(params: &ClaheParams) -> Self {
        RowScratch {
            hist: SlidingHistogram::new(params.buckets(), params.block_radius),
            clipped: vec![0; params.buckets()],
        }
    }
}

/// Equalize row `row` into `out` (length = image width).
///
/// # Arguments
/// * `source` - Original intensities, used when a neighborhood is degenerate
/// * `binned` - Bin index of every source sample
/// * `params` - Validated parameters
/// * `row` - Row index to produce
/// * `scratch` - Worker-owned histogram buffers
/// * `out` - Destination row
pub fn equalize_row(
    source: ArrayView2<u8>,
    binned: ArrayView2<u32>,
    params: &ClaheParams,
    row: usize,
    scratch: &mut RowScratch,
    out: &mut [u8],
) {
    let RowScratch { hist, clipped } = scratch;
    hist.reset_row(binned, row);

    for (j, pixel) in out.iter_mut().enumerate() {
        let n = hist.advance(binned, j);
        let v = binned[[row, j]] as usize;

        // Single-valued neighborhood keeps its intensity
        if hist.counts()[v] as usize == n {
            *pixel = source[[row, j]];
            continue;
        }

        let limit = params.clip_limit(n);
        let outcome = clip_histogram(hist.counts(), limit, clipped.as_mut_slice());
        if outcome == ClipOutcome::Saturated {
            trace!(
                "row {} col {}: clip limit {} unsatisfiable for {} pixels",
                row, j, limit, n
            );
        }

        *pixel = map_bin(clipped.as_slice(), v).unwrap_or(source[[row, j]]);
    }
}
