use alloc::vec::Vec;

use enough::Stop;

use crate::error::QoiError;
use crate::pixel::{Colorspace, PixelLayout};

/// Builder for a QOI encode.
///
/// ```
/// use zenqoi::{Colorspace, EncodeRequest, PixelLayout, Unstoppable};
///
/// let pixels = [255u8, 0, 0, 255, 0, 0];
/// let encoded = EncodeRequest::new()
///     .with_colorspace(Colorspace::Linear)
///     .encode(&pixels, 2, 1, PixelLayout::Rgb8, Unstoppable)?;
/// assert_eq!(&encoded[..4], b"qoif");
/// # Ok::<(), zenqoi::QoiError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeRequest {
    colorspace: Colorspace,
}

impl EncodeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colorspace tag written to the header. Defaults to sRGB.
    pub fn with_colorspace(mut self, colorspace: Colorspace) -> Self {
        self.colorspace = colorspace;
        self
    }

    /// Encode interleaved pixels. `Rgb8` writes a 3-channel header, `Rgba8` a
    /// 4-channel one.
    pub fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
        stop: impl Stop,
    ) -> Result<Vec<u8>, QoiError> {
        crate::qoi::encode(pixels, width, height, layout, self.colorspace, &stop)
    }

    /// Encode typed pixels.
    #[cfg(feature = "rgb")]
    pub fn encode_pixels<P: crate::QoiPixel>(
        &self,
        pixels: &[P],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<Vec<u8>, QoiError> {
        self.encode(P::slice_as_bytes(pixels), width, height, P::layout(), stop)
    }

    /// Encode an [`imgref::ImgRef`], copying rows out first when the stride
    /// is wider than the image.
    #[cfg(feature = "imgref")]
    pub fn encode_img<P: crate::QoiPixel>(
        &self,
        img: imgref::ImgRef<'_, P>,
        stop: impl Stop,
    ) -> Result<Vec<u8>, QoiError> {
        let (width, height) = img_dimensions(img.width(), img.height())?;
        if img.stride() == img.width() {
            let buf = &img.buf()[..img.width() * img.height()];
            return self.encode_pixels(buf, width, height, stop);
        }
        let mut packed = Vec::with_capacity(img.width() * img.height());
        for row in img.rows() {
            packed.extend_from_slice(row);
        }
        self.encode_pixels(&packed, width, height, stop)
    }
}

/// Image dimensions as header fields. Dimensions past `u32::MAX` are reported
/// saturated.
#[cfg(feature = "imgref")]
fn img_dimensions(width: usize, height: usize) -> Result<(u32, u32), QoiError> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        (w, h) => Err(QoiError::DimensionsTooLarge {
            width: w.unwrap_or(u32::MAX),
            height: h.unwrap_or(u32::MAX),
        }),
    }
}
