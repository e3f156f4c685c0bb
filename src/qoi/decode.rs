//! QOI pixel-stream decoder.

use alloc::vec::Vec;
use enough::Stop;

use super::header::{QoiHeader, read_end_marker};
use super::op::Op;
use super::stream::ByteReader;
use super::{MAX_RUN, PixelState, Rgba, stop_interval};
use crate::error::QoiError;
use crate::pixel::PixelLayout;

/// Decode the op stream following the header, then check the end marker.
///
/// Returns the pixels in `layout` and whether the end marker matched. A
/// mismatched marker still yields every pixel.
pub(crate) fn decode_pixels(
    input: &mut ByteReader<'_>,
    header: &QoiHeader,
    layout: PixelLayout,
    stop: &dyn Stop,
) -> Result<(Vec<u8>, bool), QoiError> {
    let bpp = layout.bytes_per_pixel();
    let (width, height) = (header.width, header.height);
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(QoiError::DimensionsTooLarge { width, height })?;
    let out_bytes = pixel_count
        .checked_mul(bpp)
        .ok_or(QoiError::DimensionsTooLarge { width, height })?;

    // A single input byte expands to at most MAX_RUN pixels, so don't trust
    // the header for the up-front allocation.
    let reachable = input
        .remaining()
        .saturating_mul(usize::from(MAX_RUN))
        .saturating_mul(bpp);
    let mut out = Vec::with_capacity(out_bytes.min(reachable));

    let interval = stop_interval(width);
    let mut state = PixelState::new();
    for i in 0..pixel_count {
        if i % interval == 0 {
            stop.check()?;
        }
        let px = state.decode_pixel(input)?;
        out.extend_from_slice(&px.to_array()[..bpp]);
    }

    let valid = read_end_marker(input);
    Ok((out, valid))
}

impl PixelState {
    /// Produce the next pixel, reading an op only when no run is pending.
    pub(crate) fn decode_pixel(&mut self, input: &mut ByteReader<'_>) -> Result<Rgba, QoiError> {
        if self.run > 0 {
            self.run -= 1;
            return Ok(self.prev);
        }

        let prev = self.prev;
        let op = Op::read_from(input)?;
        let px = match op {
            Op::Rgb { r, g, b } => Rgba::new(r, g, b, prev.a),
            Op::Rgba(px) => px,
            Op::Index(index) => self.cached(usize::from(index)),
            Op::Diff { dr, dg, db } => Rgba::new(
                prev.r.wrapping_add_signed(dr),
                prev.g.wrapping_add_signed(dg),
                prev.b.wrapping_add_signed(db),
                prev.a,
            ),
            Op::Luma { dg, dr_dg, db_dg } => Rgba::new(
                prev.r.wrapping_add_signed(dg).wrapping_add_signed(dr_dg),
                prev.g.wrapping_add_signed(dg),
                prev.b.wrapping_add_signed(dg).wrapping_add_signed(db_dg),
                prev.a,
            ),
            Op::Run(len) => {
                // This pixel is the first of the run.
                self.run = len - 1;
                return Ok(prev);
            }
        };

        self.remember(px);
        self.prev = px;
        Ok(px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Colorspace;
    use crate::qoi::encode::encode_qoi;
    use crate::qoi::{END_MARKER, HEADER_LEN};
    use enough::Unstoppable;

    fn stream(width: u32, height: u32, channels: u8, ops: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"qoif");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[channels, 0]);
        data.extend_from_slice(ops);
        data.extend_from_slice(&END_MARKER);
        data
    }

    fn decode_all(data: &[u8], layout: PixelLayout) -> Result<(Vec<u8>, bool), QoiError> {
        let mut input = ByteReader::new(data);
        let header = QoiHeader::read(&mut input)?;
        decode_pixels(&mut input, &header, layout, &Unstoppable)
    }

    #[test]
    fn run_repeats_previous_pixel() {
        // RGB literal, then run tag 0xc2 = the pixel plus 2 more
        let data = stream(4, 1, 3, &[0xfe, 5, 6, 7, 0xc2]);
        let (pixels, valid) = decode_all(&data, PixelLayout::Rgb8).unwrap();
        assert!(valid);
        assert_eq!(pixels, [5, 6, 7, 5, 6, 7, 5, 6, 7, 5, 6, 7]);
    }

    #[test]
    fn run_from_initial_pixel() {
        let data = stream(2, 1, 4, &[0xc1]);
        let (pixels, valid) = decode_all(&data, PixelLayout::Rgba8).unwrap();
        assert!(valid);
        assert_eq!(pixels, [0, 0, 0, 255, 0, 0, 0, 255]);
    }

    #[test]
    fn run_leaves_cache_untouched() {
        // The run repeats (0,0,0,255) from the previous-pixel register; its
        // slot 53 must keep the initial (0,0,0,0).
        let data = stream(3, 1, 4, &[0xc0, 0xfe, 1, 2, 3, 0x35]);
        let (pixels, valid) = decode_all(&data, PixelLayout::Rgba8).unwrap();
        assert!(valid);
        assert_eq!(pixels, [0, 0, 0, 255, 1, 2, 3, 255, 0, 0, 0, 0]);
    }

    #[test]
    fn diff_and_luma_wrap() {
        // diff dr = -2 from 0 -> 254; luma dg = +31 from 250 wraps to 25
        let data = stream(
            3,
            1,
            3,
            &[0xfe, 0, 250, 1, 0x40 | 0b00_10_10, 0x80 | 63, 0x88],
        );
        let (pixels, _) = decode_all(&data, PixelLayout::Rgb8).unwrap();
        assert_eq!(pixels, [0, 250, 1, 254, 250, 1, 29, 25, 32]);
    }

    #[test]
    fn index_reads_cache_without_verifying() {
        // Slot 0 still holds (0,0,0,0) from initialisation.
        let data = stream(1, 1, 4, &[0x00]);
        let (pixels, _) = decode_all(&data, PixelLayout::Rgba8).unwrap();
        assert_eq!(pixels, [0, 0, 0, 0]);
    }

    #[test]
    fn rgb_literal_keeps_alpha() {
        let data = stream(2, 1, 4, &[0xff, 1, 2, 3, 100, 0xfe, 9, 9, 9]);
        let (pixels, _) = decode_all(&data, PixelLayout::Rgba8).unwrap();
        assert_eq!(pixels, [1, 2, 3, 100, 9, 9, 9, 100]);
    }

    #[test]
    fn tampered_marker_still_yields_pixels() {
        let source = [10u8, 20, 30, 200, 11, 21, 31, 200];
        let mut encoded = encode_qoi(
            &source,
            2,
            1,
            PixelLayout::Rgba8,
            Colorspace::Srgb,
            &Unstoppable,
        )
        .unwrap();
        let last = encoded.len() - 1;
        encoded[last] = 0x00;
        let (pixels, valid) = decode_all(&encoded, PixelLayout::Rgba8).unwrap();
        assert!(!valid);
        assert_eq!(pixels, source);
    }

    #[test]
    fn truncated_stream_is_eof() {
        let mut data = stream(3, 1, 3, &[0xfe, 1, 2, 3]);
        data.truncate(HEADER_LEN + 4);
        assert!(matches!(
            decode_all(&data, PixelLayout::Rgb8),
            Err(QoiError::UnexpectedEof)
        ));
    }

    #[test]
    fn cache_stays_in_sync_across_collisions() {
        // Every pixel lands in slot 9, revisited in varying order.
        let a = [10u8, 20, 30, 255];
        let b = [74u8, 20, 30, 255];
        let c = [10u8, 84, 30, 255];
        let order = [a, b, a, a, c, b, c, c, a, b, b, a];
        let source: Vec<u8> = order.iter().flatten().copied().collect();
        let encoded = encode_qoi(
            &source,
            order.len() as u32,
            1,
            PixelLayout::Rgba8,
            Colorspace::Srgb,
            &Unstoppable,
        )
        .unwrap();
        let (pixels, valid) = decode_all(&encoded, PixelLayout::Rgba8).unwrap();
        assert!(valid);
        assert_eq!(pixels, source);
    }

    #[test]
    fn huge_header_with_no_data_fails_cleanly() {
        let data = stream(u32::MAX, 1, 4, &[]);
        let result = decode_all(&data[..HEADER_LEN], PixelLayout::Rgba8);
        assert!(matches!(result, Err(QoiError::UnexpectedEof)));
    }
}
