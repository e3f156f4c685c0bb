//! # zenqoi
//!
//! Lossless QOI ("Quite OK Image") encoder and decoder.
//!
//! ## Format
//!
//! A QOI file is a 14-byte header (`qoif`, big-endian width and height,
//! channel count, colorspace), a stream of tagged ops, and an 8-byte end
//! marker. Each op encodes one pixel, or a run of repeats of the previous
//! pixel, as the smallest of:
//!
//! - a back-reference into a 64-entry cache of recently seen pixels,
//! - a small per-channel delta (1 byte) or a green-relative delta (2 bytes),
//! - a run of up to 62 repeats (1 byte),
//! - a literal RGB or RGBA value.
//!
//! Encoder and decoder replay the same cache updates, so no cache contents are
//! ever stored in the file.
//!
//! ## Supported layouts
//!
//! - **Rgb8**: 3-channel files; decoded alpha is implicitly 255
//! - **Rgba8**: 4-channel files
//!
//! ## Non-Goals
//!
//! - Other pixel formats (grayscale, 16-bit, float)
//! - Streaming or partial decode
//! - Color management (the colorspace byte is passed through untouched)
//!
//! ## Usage
//!
//! ```
//! use zenqoi::{DecodeRequest, EncodeRequest, ImageInfo, PixelLayout, Unstoppable};
//!
//! let pixels = [0u8, 0, 0, 255, 255, 255, 255, 128, 10, 10, 10, 255];
//! let encoded = EncodeRequest::new()
//!     .encode(&pixels, 3, 1, PixelLayout::Rgba8, Unstoppable)?;
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(&encoded)?;
//! assert_eq!((info.width, info.height), (3, 1));
//!
//! let decoded = DecodeRequest::new(&encoded).decode(Unstoppable)?;
//! assert!(decoded.is_valid());
//! assert_eq!(decoded.pixels(), &pixels[..]);
//! # Ok::<(), zenqoi::QoiError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;
mod pixel;
mod qoi;

mod decode;
mod encode;

use alloc::vec::Vec;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::QoiError;
pub use info::ImageInfo;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::QoiPixel;
pub use pixel::{Colorspace, PixelLayout};

/// Decode a QOI file with default options.
///
/// A mismatched end marker is reported through
/// [`DecodeOutput::end_marker_valid`], not as an error.
pub fn decode_qoi(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, QoiError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode RGB8 or RGBA8 pixels as an sRGB-tagged QOI file.
pub fn encode_qoi(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    stop: impl Stop,
) -> Result<Vec<u8>, QoiError> {
    EncodeRequest::new().encode(pixels, width, height, layout, stop)
}
