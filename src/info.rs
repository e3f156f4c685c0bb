use crate::error::QoiError;
use crate::pixel::{Colorspace, PixelLayout};

/// Header information, read without decoding any pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Channel count byte, as written (3 or 4 in well-formed files).
    pub channels: u8,
    /// Colorspace byte, as written (0 or 1 in well-formed files).
    pub colorspace: u8,
    /// Layout a default decode produces.
    pub native_layout: PixelLayout,
}

impl ImageInfo {
    /// Parse the 14-byte header.
    pub fn from_bytes(data: &[u8]) -> Result<Self, QoiError> {
        crate::qoi::probe_header(data)
    }

    pub fn colorspace(&self) -> Option<Colorspace> {
        Colorspace::from_u8(self.colorspace)
    }
}
