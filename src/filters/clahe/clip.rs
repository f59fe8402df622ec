//! Contrast limiting: clip a raw histogram and redistribute the excess.
//!
//! Every pass clamps overflowing buckets to the limit, spreads the clipped
//! total evenly over all buckets and hands the remainder out at a fixed
//! stride starting at bucket 0. Passes repeat until nothing is clipped or
//! a pass makes no progress. The total count never changes.

use log::trace;

/// Upper bound on clip passes per histogram. The clipped total never grows
/// between passes, so hitting this means the histogram is oscillating on
/// a handful of entries.
pub const MAX_CLIP_PASSES: usize = 256;

/// How a clip run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipOutcome {
    /// A pass clipped nothing; every bucket is within the limit.
    Converged,
    /// Passes stopped making progress and the leftover was settled into
    /// buckets with room below the limit.
    Settled,
    /// `limit * buckets < total`: the bound cannot hold, so the excess
    /// stays spread over all buckets.
    Saturated,
}

/// Clip `raw` to `limit` into `clipped` (same length), conserving the sum.
pub fn clip_histogram(raw: &[u32], limit: u32, clipped: &mut [u32]) -> ClipOutcome {
    debug_assert_eq!(raw.len(), clipped.len());
    clipped.copy_from_slice(raw);

    let mut previous = 0u64;
    for _ in 0..MAX_CLIP_PASSES {
        let excess = clip_pass(clipped, limit);
        if excess == 0 {
            return ClipOutcome::Converged;
        }
        if excess == previous {
            return settle(clipped, limit, excess);
        }
        redistribute(clipped, excess);
        previous = excess;
    }

    trace!("clip loop hit {} passes (limit {})", MAX_CLIP_PASSES, limit);
    let excess = clip_pass(clipped, limit);
    if excess == 0 {
        ClipOutcome::Converged
    } else {
        settle(clipped, limit, excess)
    }
}

/// Clamp every bucket to `limit` and return the total clipped off.
fn clip_pass(hist: &mut [u32], limit: u32) -> u64 {
    let mut excess = 0u64;
    for count in hist.iter_mut() {
        if *count > limit {
            excess += (*count - limit) as u64;
            *count = limit;
        }
    }
    excess
}

/// Spread `excess` evenly, then give one extra entry to every
/// `(bins / m)`-th bucket for the remainder `m`, `m` entries in total.
fn redistribute(hist: &mut [u32], excess: u64) {
    let buckets = hist.len() as u64;
    let bins = hist.len() - 1;

    let share = (excess / buckets) as u32;
    let remainder = (excess % buckets) as usize;

    if share > 0 {
        for count in hist.iter_mut() {
            *count += share;
        }
    }

    if remainder != 0 {
        let stride = (bins / remainder).max(1);
        for count in hist.iter_mut().step_by(stride).take(remainder) {
            *count += 1;
        }
    }
}

/// Final placement of an excess the stride passes could not absorb.
/// `hist` must already be clamped to `limit`.
fn settle(hist: &mut [u32], limit: u32, excess: u64) -> ClipOutcome {
    let room: u64 = hist.iter().map(|&c| (limit - c) as u64).sum();
    if room < excess {
        redistribute(hist, excess);
        return ClipOutcome::Saturated;
    }

    trace!("settling {} clipped entries below limit {}", excess, limit);
    let mut left = excess;
    for count in hist.iter_mut() {
        if left == 0 {
            break;
        }
        let take = ((limit - *count) as u64).min(left);
        *count += take as u32;
        left -= take;
    }
    ClipOutcome::Settled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(hist: &[u32]) -> u64 {
        hist.iter().map(|&c| c as u64).sum()
    }

    #[test]
    fn test_no_clipping_below_limit() {
        let raw = [1, 2, 3, 0];
        let mut out = [0u32; 4];
        assert_eq!(clip_histogram(&raw, 3, &mut out), ClipOutcome::Converged);
        assert_eq!(out, raw);
    }

    #[test]
    fn test_even_redistribution() {
        // 8 over the limit -> +2 each, then 2 more go to buckets 0 and 1
        let raw = [0, 0, 0, 12];
        let mut out = [0u32; 4];
        assert_eq!(clip_histogram(&raw, 4, &mut out), ClipOutcome::Converged);
        assert_eq!(out, [3, 3, 2, 4]);
    }

    #[test]
    fn test_stalled_remainder_is_settled() {
        // The stride keeps landing on full bucket 0
        let raw = [12, 0, 0, 0];
        let mut out = [0u32; 4];
        assert_eq!(clip_histogram(&raw, 4, &mut out), ClipOutcome::Settled);
        assert_eq!(out, [4, 4, 2, 2]);
        assert_eq!(sum(&out), 12);
    }

    #[test]
    fn test_remainder_uses_fixed_stride() {
        // limit 10: 2 clipped from bucket 1, stride = 7 / 2 = 3 -> buckets 0 and 3
        let raw = [0, 12, 0, 0, 0, 0, 0, 0];
        let mut out = [0u32; 8];
        assert_eq!(clip_histogram(&raw, 10, &mut out), ClipOutcome::Converged);
        assert_eq!(out, [1, 10, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_single_bin_neighborhood() {
        // 3x3 zeros, bins = 3, slope = 2 -> limit 5
        let raw = [9, 0, 0, 0];
        let mut out = [0u32; 4];
        let outcome = clip_histogram(&raw, 5, &mut out);
        assert_ne!(outcome, ClipOutcome::Saturated);
        assert_eq!(sum(&out), 9);
        assert!(out.iter().all(|&c| c <= 5));
    }

    #[test]
    fn test_unsatisfiable_limit_terminates() {
        // 4 buckets can hold at most 4 entries at limit 1
        let raw = [10, 0, 0, 0];
        let mut out = [0u32; 4];
        assert_eq!(clip_histogram(&raw, 1, &mut out), ClipOutcome::Saturated);
        assert_eq!(sum(&out), 10);
    }

    #[test]
    fn test_zero_limit_terminates() {
        let raw = [0, 1, 0, 0, 0, 0];
        let mut out = [0u32; 6];
        assert_eq!(clip_histogram(&raw, 0, &mut out), ClipOutcome::Saturated);
        assert_eq!(sum(&out), 1);
    }

    #[test]
    fn test_large_limit_is_identity() {
        let raw = [5, 9, 0, 7, 1];
        let mut out = [0u32; 5];
        assert_eq!(clip_histogram(&raw, 22, &mut out), ClipOutcome::Converged);
        assert_eq!(out, raw);
    }

    #[test]
    fn test_one_bin_histogram() {
        // bins = 1 -> two buckets, stride falls back to 1
        let raw = [7, 0];
        let mut out = [0u32; 2];
        let outcome = clip_histogram(&raw, 4, &mut out);
        assert_ne!(outcome, ClipOutcome::Saturated);
        assert_eq!(sum(&out), 7);
        assert!(out.iter().all(|&c| c <= 4));
    }
}
