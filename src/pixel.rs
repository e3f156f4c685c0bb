/// Pixel memory layout.
///
/// QOI carries 8-bit RGB or RGBA only.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        self.channels()
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    /// Layout for a header channel count.
    ///
    /// The channel byte is informative only, so anything other than 4 maps to `Rgb8`.
    pub fn from_channels(channels: u8) -> Self {
        if channels == 4 { Self::Rgba8 } else { Self::Rgb8 }
    }
}

/// Colorspace tag stored in the header.
///
/// Purely informative: the codec never transforms pixel values based on it.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Colorspace {
    /// sRGB color channels with linear alpha.
    #[default]
    Srgb,
    /// All channels linear.
    Linear,
}

impl Colorspace {
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Srgb => 0,
            Self::Linear => 1,
        }
    }

    /// `None` for bytes other than 0 and 1.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Srgb),
            1 => Some(Self::Linear),
            _ => None,
        }
    }
}

/// Typed pixels that QOI can encode and decode directly.
#[cfg(feature = "rgb")]
pub trait QoiPixel: Copy + 'static + sealed::Sealed {
    /// The byte layout matching this pixel type.
    fn layout() -> PixelLayout;

    /// View a pixel slice as its interleaved channel bytes.
    fn slice_as_bytes(pixels: &[Self]) -> &[u8];
}

#[cfg(feature = "rgb")]
mod sealed {
    pub trait Sealed {}
    impl Sealed for rgb::RGB8 {}
    impl Sealed for rgb::RGBA8 {}
}

#[cfg(feature = "rgb")]
impl QoiPixel for rgb::RGB8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }

    fn slice_as_bytes(pixels: &[Self]) -> &[u8] {
        rgb::ComponentBytes::as_bytes(pixels)
    }
}

#[cfg(feature = "rgb")]
impl QoiPixel for rgb::RGBA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }

    fn slice_as_bytes(pixels: &[Self]) -> &[u8] {
        rgb::ComponentBytes::as_bytes(pixels)
    }
}
