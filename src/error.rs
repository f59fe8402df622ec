//! Error type shared by every entry point.
//!
//! Parameter and input-shape problems are reported before any pixel is
//! touched, so a returned error always means no output was produced.

pub type Result<T> = std::result::Result<T, ClaheError>;

#[derive(Debug, thiserror::Error)]
pub enum ClaheError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported sample type: {0} (expected 8-bit intensities)")]
    UnsupportedSampleType(&'static str),

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Unsupported channel count: {0} (expected 1, 3 or 4)")]
    UnsupportedChannels(usize),

    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Equalization cancelled")]
    Cancelled,
}

/// Reject empty images and buffers whose length disagrees with the size.
pub fn validate_buffer(len: usize, width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ClaheError::InvalidDimensions { width, height });
    }
    let expected = width * height;
    if len != expected {
        return Err(ClaheError::BufferSizeMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}
