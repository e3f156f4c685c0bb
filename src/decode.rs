use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use enough::Stop;

use crate::error::QoiError;
use crate::limits::Limits;
use crate::pixel::{Colorspace, PixelLayout};

/// Decoded image output.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Layout of [`Self::pixels`].
    pub layout: PixelLayout,
    /// Channel count byte from the header, as written.
    pub channels: u8,
    /// Colorspace byte from the header, as written.
    pub colorspace: u8,
    /// Whether the stream ended with the expected 8-byte end marker.
    pub end_marker_valid: bool,
}

impl DecodeOutput {
    pub(crate) fn new(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        layout: PixelLayout,
        channels: u8,
        colorspace: u8,
        end_marker_valid: bool,
    ) -> Self {
        Self {
            pixels,
            width,
            height,
            layout,
            channels,
            colorspace,
            end_marker_valid,
        }
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The header colorspace, if it is one of the two defined values.
    pub fn colorspace(&self) -> Option<Colorspace> {
        Colorspace::from_u8(self.colorspace)
    }

    /// Whether the stream was well formed through the end marker.
    ///
    /// The pixels are complete either way.
    pub fn is_valid(&self) -> bool {
        self.end_marker_valid
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`QoiError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::QoiPixel>(&self) -> Result<&[P], QoiError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(QoiError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    ///
    /// Returns [`QoiError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::QoiPixel>(&self) -> Result<imgref::ImgRef<'_, P>, QoiError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    ///
    /// Returns [`QoiError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::QoiPixel>(&self) -> Result<imgref::ImgVec<P>, QoiError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}

/// Builder for a QOI decode.
///
/// ```no_run
/// use zenqoi::{DecodeRequest, Limits, PixelLayout, Unstoppable};
///
/// let data: &[u8] = &[]; // your QOI bytes
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let decoded = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_layout(PixelLayout::Rgba8)
///     .decode(Unstoppable)?;
/// # Ok::<(), zenqoi::QoiError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    layout: Option<PixelLayout>,
    require_valid_end: bool,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            layout: None,
            require_valid_end: false,
        }
    }

    /// Reject images exceeding these limits before allocating.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Output layout. Defaults to the header's channel count (4 gives
    /// `Rgba8`, anything else `Rgb8`). `Rgb8` drops alpha.
    pub fn with_layout(mut self, layout: PixelLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Turn a bad end marker into [`QoiError::InvalidEndMarker`] instead of
    /// reporting it through [`DecodeOutput::end_marker_valid`].
    pub fn require_valid_end(mut self, require: bool) -> Self {
        self.require_valid_end = require;
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, QoiError> {
        let output = crate::qoi::decode(self.data, self.limits, self.layout, &stop)?;
        if self.require_valid_end && !output.end_marker_valid {
            return Err(QoiError::InvalidEndMarker);
        }
        Ok(output)
    }
}
