//! Filter modules.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W) | u8 | Single luminance plane, 0-255 |
//! | Grayscale8 | (H, W, 1) | u8 | Single luminance channel, 0-255 |
//! | RGB8 | (H, W, 3) | u8 | Reduced to luminance before equalization |
//! | RGBA8 | (H, W, 4) | u8 | Reduced to luminance, alpha dropped |
//!
//! f32 and 12-bit data go through the [`grayscale`] conversions first.
//!
//! ## Architecture
//!
//! - **Snapshot reads** - Histograms are built from an immutable copy of the input
//! - **Row parallel** - Rows are independent and run on rayon
//! - **Fail fast** - Parameters and shapes are validated before any pixel is written

pub mod clahe;
pub mod grayscale;
