//! Contrast Limited Adaptive Histogram Equalization (CLAHE).
//!
//! Every output pixel is remapped through the clipped CDF of the square
//! neighborhood around it. The neighborhood histogram slides along each
//! row instead of being rebuilt per pixel.
//!
//! ## Supported Formats
//!
//! - **Grayscale8**: (height, width) or (height, width, 1) u8 - equalized directly
//! - **RGB8 / RGBA8**: (height, width, 3|4) u8 - reduced to BT.709 luma first,
//!   output is single-channel
//!
//! Other sample types are rejected with [`ClaheError::UnsupportedSampleType`];
//! convert them with the helpers in [`crate::filters::grayscale`] first.
//!
//! ## Parallelism
//!
//! Rows are independent. The default entry points run them on the rayon
//! pool, each worker writing its own output rows. The sequential variant
//! produces identical output.

pub mod cdf;
pub mod clip;
pub mod histogram;
pub mod row;

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};
use rayon::prelude::*;

use crate::error::{validate_buffer, ClaheError, Result};
use crate::filters::grayscale::luma_u8;
use crate::params::ClaheParams;
use histogram::BinMap;
use row::{equalize_row, RowScratch};

/// Raw sample buffer as handed over by a raster reader.
///
/// Only 8-bit intensities are equalized. Wider types must be rescaled by
/// the caller.
#[derive(Debug, Clone, Copy)]
pub enum Samples<'a> {
    U8(&'a [u8]),
    U16(&'a [u16]),
    I16(&'a [i16]),
    F32(&'a [f32]),
}

impl Samples<'_> {
    pub fn type_name(&self) -> &'static str {
        match self {
            Samples::U8(_) => "u8",
            Samples::U16(_) => "u16",
            Samples::I16(_) => "i16",
            Samples::F32(_) => "f32",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Samples::U8(s) => s.len(),
            Samples::U16(s) => s.len(),
            Samples::I16(s) => s.len(),
            Samples::F32(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Execution {
    Parallel,
    Sequential,
}

// ============================================================================
// 2D grayscale entry points
// ============================================================================

/// Equalize a grayscale u8 image, rows in parallel.
///
/// # Arguments
/// * `input` - 2D array view (height, width), values 0-255
/// * `params` - Block radius, bins and slope
///
/// # Returns
/// New array of the same shape
pub fn clahe_gray_u8(input: ArrayView2<u8>, params: &ClaheParams) -> Result<Array2<u8>> {
    equalize(input, params, Execution::Parallel, None)
}

/// Same as [`clahe_gray_u8`] but processes rows top to bottom on the
/// calling thread.
pub fn clahe_gray_u8_sequential(input: ArrayView2<u8>, params: &ClaheParams) -> Result<Array2<u8>> {
    equalize(input, params, Execution::Sequential, None)
}

/// Parallel equalization that stops at the next row boundary once
/// `cancel` is set. A cancelled run returns [`ClaheError::Cancelled`]
/// and no output.
pub fn clahe_gray_u8_cancellable(
    input: ArrayView2<u8>,
    params: &ClaheParams,
    cancel: &AtomicBool,
) -> Result<Array2<u8>> {
    equalize(input, params, Execution::Parallel, Some(cancel))
}

// ============================================================================
// Flat buffer entry points
// ============================================================================

/// Equalize a flat row-major buffer into a new buffer.
pub fn clahe_buffer(samples: &[u8], width: usize, height: usize, params: &ClaheParams) -> Result<Vec<u8>> {
    params.validate()?;
    validate_buffer(samples.len(), width, height)?;

    let input = ArrayView2::from_shape((height, width), samples)?;
    let output = clahe_gray_u8(input, params)?;
    Ok(output.into_raw_vec_and_offset().0)
}

/// Equalize a flat row-major buffer in place.
///
/// Histograms are built from a snapshot of the original samples; the
/// buffer is only overwritten once the whole pass has succeeded.
pub fn clahe_in_place(samples: &mut [u8], width: usize, height: usize, params: &ClaheParams) -> Result<()> {
    let result = clahe_buffer(samples, width, height, params)?;
    samples.copy_from_slice(&result);
    Ok(())
}

/// Equalize a typed sample buffer. Anything but u8 is rejected.
pub fn clahe_samples(samples: Samples<'_>, width: usize, height: usize, params: &ClaheParams) -> Result<Vec<u8>> {
    match samples {
        Samples::U8(data) => clahe_buffer(data, width, height, params),
        other => Err(ClaheError::UnsupportedSampleType(other.type_name())),
    }
}

// ============================================================================
// 3D (height, width, channels) entry point
// ============================================================================

/// Equalize an image with 1, 3 or 4 channels.
///
/// Color input is reduced to BT.709 luma before equalization; alpha is
/// ignored.
///
/// # Arguments
/// * `input` - 3D array view (height, width, channels), values 0-255
/// * `params` - Block radius, bins and slope
///
/// # Returns
/// Single-channel image of shape (height, width, 1)
pub fn clahe_u8(input: ArrayView3<u8>, params: &ClaheParams) -> Result<Array3<u8>> {
    params.validate()?;
    let (height, width, channels) = input.dim();

    let output = if channels == 1 {
        clahe_gray_u8(input.index_axis(Axis(2), 0), params)?
    } else {
        let gray = luma_u8(input)?;
        debug!("clahe: reduced {} channels to luma", channels);
        clahe_gray_u8(gray.view(), params)?
    };

    Ok(output.into_shape_with_order((height, width, 1))?)
}

// ============================================================================
// Driver
// ============================================================================

fn equalize(
    input: ArrayView2<u8>,
    params: &ClaheParams,
    execution: Execution,
    cancel: Option<&AtomicBool>,
) -> Result<Array2<u8>> {
    params.validate()?;
    let (height, width) = input.dim();
    if width == 0 || height == 0 {
        return Err(ClaheError::InvalidDimensions { width, height });
    }

    debug!(
        "clahe: {}x{} radius={} bins={} slope={} ({:?})",
        width, height, params.block_radius, params.bins, params.slope, execution
    );

    let binned = BinMap::new(params.bins).bin_image(input);
    let mut output = vec![0u8; width * height];

    let process_row = |scratch: &mut RowScratch, (row, out): (usize, &mut [u8])| -> Result<()> {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(ClaheError::Cancelled);
        }
        equalize_row(input, binned.view(), params, row, scratch, out);
        Ok(())
    };

    let result = match execution {
        Execution::Parallel => output
            .par_chunks_mut(width)
            .enumerate()
            .try_for_each_init(|| RowScratch::new(params), process_row),
        Execution::Sequential => {
            let mut scratch = RowScratch::new(params);
            output
                .chunks_mut(width)
                .enumerate()
                .try_for_each(|item| process_row(&mut scratch, item))
        }
    };

    if let Err(err) = result {
        warn!("clahe: {}x{} pass aborted: {}", width, height, err);
        return Err(err);
    }

    debug!("clahe: {}x{} done", width, height);
    Ok(Array2::from_shape_vec((height, width), output)?)
}
