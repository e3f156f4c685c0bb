//! QOI pixel-stream encoder.

use alloc::vec::Vec;
use enough::Stop;

use super::header::{QoiHeader, write_end_marker};
use super::op::Op;
use super::stream::ByteWriter;
use super::{END_MARKER, HEADER_LEN, MAX_RUN, PixelState, Rgba, hash, stop_interval};
use crate::error::QoiError;
use crate::pixel::{Colorspace, PixelLayout};

/// Encode interleaved RGB8/RGBA8 pixels to a complete QOI file.
///
/// Bytes past `width * height * bpp` are ignored.
pub(crate) fn encode_qoi(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    colorspace: Colorspace,
    stop: &dyn Stop,
) -> Result<Vec<u8>, QoiError> {
    let bpp = layout.bytes_per_pixel();
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(QoiError::DimensionsTooLarge { width, height })?;
    let expected = pixel_count
        .checked_mul(bpp)
        .ok_or(QoiError::DimensionsTooLarge { width, height })?;
    if pixels.len() < expected {
        return Err(QoiError::BufferTooSmall {
            needed: expected,
            actual: pixels.len(),
        });
    }

    // Worst case is one literal per pixel: tag + every channel
    let capacity = pixel_count
        .checked_mul(bpp + 1)
        .and_then(|n| n.checked_add(HEADER_LEN + END_MARKER.len()))
        .ok_or(QoiError::DimensionsTooLarge { width, height })?;
    let mut out = ByteWriter::with_capacity(capacity);

    let header = QoiHeader {
        width,
        height,
        channels: layout.channels() as u8,
        colorspace: colorspace.to_u8(),
    };
    header.write(&mut out);

    stop.check()?;

    let interval = stop_interval(width);
    let mut state = PixelState::new();
    for (i, px) in pixels[..expected].chunks_exact(bpp).enumerate() {
        if i % interval == 0 {
            stop.check()?;
        }
        state.encode_pixel(Rgba::from_channels(px), i + 1 == pixel_count, &mut out);
    }

    write_end_marker(&mut out);
    Ok(out.into_inner())
}

impl PixelState {
    /// Emit the op(s) for one pixel and advance the state.
    ///
    /// `is_last` forces a pending run out on the final pixel of the image.
    pub(crate) fn encode_pixel(&mut self, px: Rgba, is_last: bool, out: &mut ByteWriter) {
        if px == self.prev {
            self.run += 1;
            if self.run == MAX_RUN || is_last {
                Op::Run(self.run).write_to(out);
                self.run = 0;
            }
            return;
        }

        if self.run > 0 {
            Op::Run(self.run).write_to(out);
            self.run = 0;
        }

        let index = hash(px);
        if self.cached(index) == px {
            Op::Index(index as u8).write_to(out);
        } else {
            self.select_op(px).write_to(out);
            self.remember(px);
        }
        self.prev = px;
    }

    /// Smallest non-cache op for `px`, tried in priority order.
    fn select_op(&self, px: Rgba) -> Op {
        let prev = self.prev;
        if px.a != prev.a {
            return Op::Rgba(px);
        }

        // Deltas from widened values, no wraparound.
        let dr = i16::from(px.r) - i16::from(prev.r);
        let dg = i16::from(px.g) - i16::from(prev.g);
        let db = i16::from(px.b) - i16::from(prev.b);

        let diff_range = -2..=1;
        if diff_range.contains(&dr) && diff_range.contains(&dg) && diff_range.contains(&db) {
            return Op::Diff {
                dr: dr as i8,
                dg: dg as i8,
                db: db as i8,
            };
        }

        let dr_dg = dr - dg;
        let db_dg = db - dg;
        let luma_range = -8..=7;
        if (-32..=31).contains(&dg) && luma_range.contains(&dr_dg) && luma_range.contains(&db_dg)
        {
            return Op::Luma {
                dg: dg as i8,
                dr_dg: dr_dg as i8,
                db_dg: db_dg as i8,
            };
        }

        Op::Rgb {
            r: px.r,
            g: px.g,
            b: px.b,
        }
    }
}
