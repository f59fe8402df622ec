//! Reduction of arbitrary input to the 8-bit intensity form CLAHE consumes.
//!
//! Uses ITU-R BT.709 luminosity coefficients for color input.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1) - copied as is
//! - **RGB**: (height, width, 3) - luminosity of R, G, B
//! - **RGBA**: (height, width, 4) - luminosity of R, G, B, alpha dropped
//!
//! ## Bit Depth Conversion
//!
//! - **f32 (float)**: Values 0.0-1.0, scaled to 0-255
//! - **u16 (12-bit)**: Values 0-4095, scaled to 0-255

use ndarray::{Array2, ArrayView2, ArrayView3};

use crate::error::{ClaheError, Result};

/// ITU-R BT.709 luminosity coefficients
pub const LUMA_R: f32 = 0.2126;
pub const LUMA_G: f32 = 0.7152;
pub const LUMA_B: f32 = 0.0722;

/// Reduce a 1, 3 or 4 channel u8 image to a single luminosity plane.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, channels), values 0-255
///
/// # Returns
/// 2D array (height, width) of intensities
pub fn luma_u8(input: ArrayView3<u8>) -> Result<Array2<u8>> {
    let (height, width, channels) = input.dim();

    match channels {
        1 => Ok(Array2::from_shape_fn((height, width), |(y, x)| input[[y, x, 0]])),
        3 | 4 => Ok(Array2::from_shape_fn((height, width), |(y, x)| {
            let r = input[[y, x, 0]] as f32;
            let g = input[[y, x, 1]] as f32;
            let b = input[[y, x, 2]] as f32;
            (LUMA_R * r + LUMA_G * g + LUMA_B * b) as u8
        })),
        other => Err(ClaheError::UnsupportedChannels(other)),
    }
}

/// Convert f32 intensities (0.0-1.0) to u8 (0-255)
pub fn f32_to_u8(input: ArrayView2<f32>) -> Array2<u8> {
    input.mapv(|v| (v.clamp(0.0, 1.0) * 255.0) as u8)
}

/// Convert 12-bit intensities (0-4095) stored in u16 to u8 (0-255)
pub fn u16_12bit_to_u8(input: ArrayView2<u16>) -> Array2<u8> {
    input.mapv(|v| (v.min(4095) as u32 * 255 / 4095) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3};

    #[test]
    fn test_luma_red() {
        let mut img = Array3::<u8>::zeros((1, 1, 3));
        img[[0, 0, 0]] = 255;

        let result = luma_u8(img.view()).unwrap();

        // 0.2126 * 255 ≈ 54
        assert!((result[[0, 0]] as i32 - 54).abs() <= 1);
    }

    #[test]
    fn test_luma_green() {
        let mut img = Array3::<u8>::zeros((1, 1, 4));
        img[[0, 0, 1]] = 255;
        img[[0, 0, 3]] = 255;

        let result = luma_u8(img.view()).unwrap();

        // 0.7152 * 255 ≈ 182
        assert!((result[[0, 0]] as i32 - 182).abs() <= 1);
    }

    #[test]
    fn test_luma_ignores_alpha() {
        let mut a = Array3::<u8>::zeros((1, 1, 4));
        a[[0, 0, 0]] = 120;
        a[[0, 0, 1]] = 60;
        a[[0, 0, 2]] = 30;
        let mut b = a.clone();
        a[[0, 0, 3]] = 255;
        b[[0, 0, 3]] = 10;

        assert_eq!(luma_u8(a.view()).unwrap(), luma_u8(b.view()).unwrap());
    }

    #[test]
    fn test_single_channel_copied() {
        let img = Array3::from_shape_fn((2, 3, 1), |(y, x, _)| (y * 3 + x) as u8 * 20);
        let result = luma_u8(img.view()).unwrap();
        assert_eq!(result[[1, 2]], 100);
        assert_eq!(result.dim(), (2, 3));
    }

    #[test]
    fn test_two_channels_rejected() {
        let img = Array3::<u8>::zeros((1, 1, 2));
        assert!(matches!(luma_u8(img.view()), Err(ClaheError::UnsupportedChannels(2))));
    }

    #[test]
    fn test_f32_to_u8_clamps() {
        let img = Array2::from_shape_vec((1, 4), vec![-0.5f32, 0.0, 1.0, 2.0]).unwrap();
        let result = f32_to_u8(img.view());
        assert_eq!(result.into_raw_vec_and_offset().0, vec![0, 0, 255, 255]);
    }

    #[test]
    fn test_12bit_to_u8_range() {
        let img = Array2::from_shape_vec((1, 4), vec![0u16, 2048, 4095, 65535]).unwrap();
        let result = u16_12bit_to_u8(img.view());
        assert_eq!(result.into_raw_vec_and_offset().0, vec![0, 127, 255, 255]);
    }
}
