//! CLAHE Rust Extensions
//!
//! Contrast Limited Adaptive Histogram Equalization for 8-bit grayscale
//! rasters, with Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! The core consumes a single intensity plane:
//! - **Grayscale**: (height, width) or (height, width, 1) u8, 0-255
//!
//! Color images are reduced to BT.709 luma first; f32 and 12-bit data are
//! converted with the helpers in [`filters::grayscale`]. Any other sample
//! type is rejected.
//!
//! ## Parameters
//! - `block_radius` - half-width of the square neighborhood (default 63)
//! - `bins` - histogram resolution, `bins + 1` buckets (default 255)
//! - `slope` - clip-limit multiplier, 1.0 = original image (default 3.0)

pub mod error;
pub mod filters;
pub mod params;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{ClaheError, Result};
pub use filters::clahe::{
    clahe_buffer, clahe_gray_u8, clahe_gray_u8_cancellable, clahe_gray_u8_sequential,
    clahe_in_place, clahe_samples, clahe_u8, Samples,
};
pub use params::ClaheParams;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray2, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::ClaheError;
    use crate::filters::clahe::{clahe_gray_u8, clahe_u8};
    use crate::filters::grayscale;
    use crate::params::{ClaheParams, DEFAULT_BINS, DEFAULT_BLOCK_RADIUS, DEFAULT_SLOPE};

    fn to_py_err(err: ClaheError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    // ========================================================================
    // CLAHE
    // ========================================================================

    /// Equalize a 2D u8 grayscale image.
    ///
    /// The GIL is released while rows are processed.
    ///
    /// # Arguments
    /// * `image` - Grayscale image (height, width), values 0-255
    /// * `block_radius` - Neighborhood half-width (default: 63)
    /// * `bins` - Histogram bins (default: 255)
    /// * `slope` - Clip-limit multiplier, >= 1.0 (default: 3.0)
    #[pyfunction]
    #[pyo3(signature = (image, block_radius=DEFAULT_BLOCK_RADIUS, bins=DEFAULT_BINS, slope=DEFAULT_SLOPE))]
    pub fn clahe<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        block_radius: usize,
        bins: usize,
        slope: f32,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let input = image.as_array().to_owned();
        let params = ClaheParams::new(block_radius, bins, slope);
        let result = py
            .allow_threads(|| clahe_gray_u8(input.view(), &params))
            .map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Equalize a u8 image with 1, 3 or 4 channels.
    ///
    /// Color input is reduced to BT.709 luma; output is (height, width, 1).
    #[pyfunction]
    #[pyo3(signature = (image, block_radius=DEFAULT_BLOCK_RADIUS, bins=DEFAULT_BINS, slope=DEFAULT_SLOPE))]
    pub fn clahe_image<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        block_radius: usize,
        bins: usize,
        slope: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = image.as_array().to_owned();
        let params = ClaheParams::new(block_radius, bins, slope);
        let result = py
            .allow_threads(|| clahe_u8(input.view(), &params))
            .map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Conversion Utilities
    // ========================================================================

    /// Convert f32 grayscale (0.0-1.0) to u8 (0-255)
    #[pyfunction]
    pub fn convert_f32_to_u8<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f32>,
    ) -> Bound<'py, PyArray2<u8>> {
        grayscale::f32_to_u8(image.as_array()).into_pyarray(py)
    }

    /// Convert 12-bit grayscale (0-4095) to u8 (0-255)
    #[pyfunction]
    pub fn convert_12bit_to_u8<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u16>,
    ) -> Bound<'py, PyArray2<u8>> {
        grayscale::u16_12bit_to_u8(image.as_array()).into_pyarray(py)
    }

    /// Python module definition
    #[pymodule]
    pub fn clahe_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(clahe, m)?)?;
        m.add_function(wrap_pyfunction!(clahe_image, m)?)?;
        m.add_function(wrap_pyfunction!(convert_f32_to_u8, m)?)?;
        m.add_function(wrap_pyfunction!(convert_12bit_to_u8, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::clahe_rust;
