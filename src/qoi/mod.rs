//! QOI ("Quite OK Image") format (internal).
//!
//! Layout: a 14-byte header (`qoif` magic, big-endian width and height,
//! channel count, colorspace byte), one tagged op per pixel or run of pixels,
//! then the 8-byte end marker `00 00 00 00 00 00 00 01`.
//!
//! Encoder and decoder share [`PixelState`]: a 64-slot cache addressed by
//! [`hash`], the previous-pixel register and the run counter. Both sides must
//! update it in exactly the same order or decoded pixels silently diverge.

pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod header;
pub(crate) mod op;
pub(crate) mod stream;

use alloc::vec::Vec;
use enough::Stop;

use crate::decode::DecodeOutput;
use crate::error::QoiError;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pixel::{Colorspace, PixelLayout};
use header::QoiHeader;
use stream::ByteReader;

pub(crate) const MAGIC: [u8; 4] = *b"qoif";
pub(crate) const HEADER_LEN: usize = 14;
pub(crate) const END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

pub(crate) const OP_INDEX: u8 = 0x00;
pub(crate) const OP_DIFF: u8 = 0x40;
pub(crate) const OP_LUMA: u8 = 0x80;
pub(crate) const OP_RUN: u8 = 0xc0;
pub(crate) const OP_RGB: u8 = 0xfe;
pub(crate) const OP_RGBA: u8 = 0xff;
pub(crate) const MASK_2: u8 = 0xc0;

/// Longest run a single run op can carry. 63 and 64 would collide with the
/// RGB and RGBA literal tags.
pub(crate) const MAX_RUN: u8 = 62;

/// Number of pixels between cancellation checks, sixteen rows at a time.
pub(crate) fn stop_interval(width: u32) -> usize {
    (width as usize).saturating_mul(16).max(1)
}

/// One pixel as the codec sees it: four 8-bit channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Value of every cache slot before the first pixel.
    pub const ZERO: Rgba = Rgba::new(0, 0, 0, 0);
    /// Value of the previous-pixel register before the first pixel.
    pub const START: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Read one pixel from interleaved RGB or RGBA bytes. RGB gets alpha 255.
    #[inline]
    pub fn from_channels(px: &[u8]) -> Self {
        let a = if px.len() >= 4 { px[3] } else { 255 };
        Self::new(px[0], px[1], px[2], a)
    }

    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Cache slot for a pixel: `(r*3 + g*5 + b*7 + a*11) % 64`.
#[inline]
pub(crate) fn hash(px: Rgba) -> usize {
    let sum = u32::from(px.r) * 3 + u32::from(px.g) * 5 + u32::from(px.b) * 7 + u32::from(px.a) * 11;
    (sum % 64) as usize
}

/// Per-call codec state. Created fresh for each image.
///
/// Collisions in the cache are expected: a write simply replaces whatever
/// pixel held the slot, and an index op trusts the slot without checking.
#[derive(Debug)]
pub(crate) struct PixelState {
    cache: [Rgba; 64],
    prev: Rgba,
    run: u8,
}

impl PixelState {
    pub fn new() -> Self {
        Self {
            cache: [Rgba::ZERO; 64],
            prev: Rgba::START,
            run: 0,
        }
    }

    #[inline]
    fn cached(&self, index: usize) -> Rgba {
        self.cache[index & 0x3f]
    }

    #[inline]
    fn remember(&mut self, px: Rgba) {
        self.cache[hash(px)] = px;
    }
}

/// Probe header for ImageInfo without decoding.
pub(crate) fn probe_header(data: &[u8]) -> Result<ImageInfo, QoiError> {
    let header = QoiHeader::read(&mut ByteReader::new(data))?;
    Ok(header.info())
}

/// Decode QOI data (called from DecodeRequest).
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    layout: Option<PixelLayout>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, QoiError> {
    let mut reader = ByteReader::new(data);
    let header = QoiHeader::read(&mut reader)?;

    if let Some(limits) = limits {
        limits.check(header.width, header.height)?;
    }
    let layout = layout.unwrap_or(PixelLayout::from_channels(header.channels));
    let out_bytes = (header.width as usize)
        .checked_mul(header.height as usize)
        .and_then(|wh| wh.checked_mul(layout.bytes_per_pixel()))
        .ok_or(QoiError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
    if let Some(limits) = limits {
        limits.check_memory(out_bytes)?;
    }

    stop.check()?;

    let (pixels, end_marker_valid) = decode::decode_pixels(&mut reader, &header, layout, stop)?;
    Ok(DecodeOutput::new(
        pixels,
        header.width,
        header.height,
        layout,
        header.channels,
        header.colorspace,
        end_marker_valid,
    ))
}

/// Encode to QOI (called from EncodeRequest).
pub(crate) fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    colorspace: Colorspace,
    stop: &dyn Stop,
) -> Result<Vec<u8>, QoiError> {
    encode::encode_qoi(pixels, width, height, layout, colorspace, stop)
}
