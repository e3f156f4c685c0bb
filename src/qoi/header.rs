//! Header and end-marker codec.

use super::stream::{ByteReader, ByteWriter};
use super::{END_MARKER, MAGIC};
use crate::error::QoiError;
use crate::info::ImageInfo;
use crate::pixel::PixelLayout;

/// Parsed QOI header.
///
/// `channels` and `colorspace` are kept as written; the pixel stream does not
/// depend on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct QoiHeader {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub colorspace: u8,
}

impl QoiHeader {
    pub fn write(&self, out: &mut ByteWriter) {
        for c in MAGIC {
            out.write_char(char::from(c));
        }
        out.write_u32_be(self.width);
        out.write_u32_be(self.height);
        out.write_u8(self.channels);
        out.write_u8(self.colorspace);
    }

    /// Fails with [`QoiError::UnrecognizedFormat`] before reading past the
    /// magic if it isn't `qoif`.
    pub fn read(input: &mut ByteReader<'_>) -> Result<Self, QoiError> {
        let mut magic = [0u8; 4];
        for byte in &mut magic {
            *byte = input.read_char()? as u8;
        }
        if magic != MAGIC {
            return Err(QoiError::UnrecognizedFormat);
        }
        let width = input.read_u32_be()?;
        let height = input.read_u32_be()?;
        let channels = input.read_u8()?;
        let colorspace = input.read_u8()?;
        Ok(Self {
            width,
            height,
            channels,
            colorspace,
        })
    }

    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            width: self.width,
            height: self.height,
            channels: self.channels,
            colorspace: self.colorspace,
            native_layout: PixelLayout::from_channels(self.channels),
        }
    }
}

pub(crate) fn write_end_marker(out: &mut ByteWriter) {
    out.write_all(&END_MARKER);
}

/// Whether the next 8 bytes are the end marker.
///
/// Missing bytes count as a mismatch rather than an error: by the time the
/// marker is read every pixel has already been recovered.
pub(crate) fn read_end_marker(input: &mut ByteReader<'_>) -> bool {
    let mut valid = true;
    for expected in END_MARKER {
        match input.read_u8() {
            Ok(byte) if byte == expected => {}
            Ok(_) => valid = false,
            Err(_) => return false,
        }
    }
    valid
}
