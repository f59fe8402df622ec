//! WebAssembly exports for the CLAHE filter.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images are
//! passed as flat row-major arrays; errors surface as thrown strings.

use wasm_bindgen::prelude::*;

use crate::error::ClaheError;
use crate::filters::clahe::clahe_buffer;
use crate::filters::grayscale::luma_u8;
use crate::params::ClaheParams;

fn to_js_err(err: ClaheError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// CLAHE - grayscale
// ============================================================================

/// Equalize a grayscale u8 image.
///
/// # Arguments
/// * `data` - Flat array of intensities (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `block_radius` - Neighborhood half-width (63 is the usual default)
/// * `bins` - Histogram bins (255 is the usual default)
/// * `slope` - Clip-limit multiplier, >= 1.0 (3.0 is the usual default)
///
/// # Returns
/// Flat array of equalized intensities
#[wasm_bindgen]
pub fn clahe_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    block_radius: usize,
    bins: usize,
    slope: f32,
) -> Result<Vec<u8>, JsValue> {
    let params = ClaheParams::new(block_radius, bins, slope);
    clahe_buffer(data, width, height, &params).map_err(to_js_err)
}

// ============================================================================
// CLAHE - RGBA canvas data
// ============================================================================

/// Equalize the luminosity of RGBA canvas data.
///
/// Returns RGBA bytes with R=G=B=equalized luminosity, alpha preserved,
/// ready to put back into an `ImageData`.
#[wasm_bindgen]
pub fn clahe_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    block_radius: usize,
    bins: usize,
    slope: f32,
) -> Result<Vec<u8>, JsValue> {
    let input = ndarray::ArrayView3::from_shape((height, width, 4), data)
        .map_err(|e| to_js_err(e.into()))?;
    let gray = luma_u8(input).map_err(to_js_err)?;

    let params = ClaheParams::new(block_radius, bins, slope);
    let flat = gray.into_raw_vec_and_offset().0;
    let equalized = clahe_buffer(&flat, width, height, &params).map_err(to_js_err)?;

    let mut output = Vec::with_capacity(data.len());
    for (i, &v) in equalized.iter().enumerate() {
        output.extend_from_slice(&[v, v, v, data[i * 4 + 3]]);
    }
    Ok(output)
}
