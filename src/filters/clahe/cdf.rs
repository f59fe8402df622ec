//! Intensity remapping through the clipped histogram's CDF.

/// Map bin `v` to an output intensity using the normalized cumulative
/// count of `clipped`.
///
/// The CDF starts at `h_min`, the lowest populated bucket below the last
/// one. Returns `None` when the histogram has a single populated bucket
/// (`cdf_max == cdf_min`); the caller keeps the original intensity.
pub fn map_bin(clipped: &[u32], v: usize) -> Option<u8> {
    let bins = clipped.len() - 1;

    let h_min = clipped[..bins]
        .iter()
        .position(|&c| c != 0)
        .unwrap_or(bins);

    let cdf: u64 = if v >= h_min {
        clipped[h_min..=v].iter().map(|&c| c as u64).sum()
    } else {
        0
    };
    let cdf_max = cdf + clipped[v + 1..].iter().map(|&c| c as u64).sum::<u64>();
    let cdf_min = clipped[h_min] as u64;

    if cdf_max == cdf_min {
        return None;
    }

    // Scale before dividing so exact ratios stay exact under ceil
    let scaled = (cdf as f64 - cdf_min as f64) * 255.0 / (cdf_max - cdf_min) as f64;
    Some(scaled.ceil().clamp(0.0, 255.0) as u8)
}
