//! The six QOI operations and their wire encoding.
//!
//! Tag space, checked most specific first: `0xff` RGBA literal, `0xfe` RGB
//! literal, then the top two bits: `00` index, `01` diff, `10` luma, `11` run.

use super::stream::{ByteReader, ByteWriter};
use super::{MASK_2, OP_DIFF, OP_INDEX, OP_LUMA, OP_RGB, OP_RGBA, OP_RUN, Rgba};
use crate::error::QoiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    /// Cache slot, 0..64.
    Index(u8),
    /// Per-channel deltas against the previous pixel, each in -2..=1.
    Diff { dr: i8, dg: i8, db: i8 },
    /// Green delta in -32..=31, red and blue relative to it in -8..=7.
    Luma { dg: i8, dr_dg: i8, db_dg: i8 },
    /// Repeat the previous pixel, 1..=62 times.
    Run(u8),
    /// Literal color, alpha carried over from the previous pixel.
    Rgb { r: u8, g: u8, b: u8 },
    /// Literal color with alpha.
    Rgba(Rgba),
}

impl Op {
    pub fn write_to(self, out: &mut ByteWriter) {
        match self {
            Op::Index(index) => {
                debug_assert!(index < 64);
                out.write_u8(OP_INDEX | index);
            }
            Op::Diff { dr, dg, db } => {
                let dr = (dr + 2) as u8;
                let dg = (dg + 2) as u8;
                let db = (db + 2) as u8;
                out.write_u8(OP_DIFF | dr << 4 | dg << 2 | db);
            }
            Op::Luma { dg, dr_dg, db_dg } => {
                out.write_u8(OP_LUMA | (dg + 32) as u8);
                out.write_u8(((dr_dg + 8) as u8) << 4 | (db_dg + 8) as u8);
            }
            Op::Run(len) => {
                debug_assert!((1..=super::MAX_RUN).contains(&len));
                out.write_u8(OP_RUN | (len - 1));
            }
            Op::Rgb { r, g, b } => {
                out.write_u8(OP_RGB);
                out.write_all(&[r, g, b]);
            }
            Op::Rgba(px) => {
                out.write_u8(OP_RGBA);
                out.write_all(&px.to_array());
            }
        }
    }

    pub fn read_from(input: &mut ByteReader<'_>) -> Result<Self, QoiError> {
        let tag = input.read_u8()?;
        let op = match tag {
            OP_RGB => {
                let [r, g, b] = input.read_array::<3>()?;
                Op::Rgb { r, g, b }
            }
            OP_RGBA => {
                let [r, g, b, a] = input.read_array::<4>()?;
                Op::Rgba(Rgba::new(r, g, b, a))
            }
            _ => match tag & MASK_2 {
                OP_INDEX => Op::Index(tag & 0x3f),
                OP_DIFF => Op::Diff {
                    dr: ((tag >> 4) & 0x03) as i8 - 2,
                    dg: ((tag >> 2) & 0x03) as i8 - 2,
                    db: (tag & 0x03) as i8 - 2,
                },
                OP_LUMA => {
                    let second = input.read_u8()?;
                    Op::Luma {
                        dg: (tag & 0x3f) as i8 - 32,
                        dr_dg: (second >> 4) as i8 - 8,
                        db_dg: (second & 0x0f) as i8 - 8,
                    }
                }
                _ => Op::Run((tag & 0x3f) + 1),
            },
        };
        Ok(op)
    }

    /// Bytes this op occupies on the wire.
    #[cfg(test)]
    pub fn encoded_len(&self) -> usize {
        match self {
            Op::Index(_) | Op::Diff { .. } | Op::Run(_) => 1,
            Op::Luma { .. } => 2,
            Op::Rgb { .. } => 4,
            Op::Rgba(_) => 5,
        }
    }
}

/// Split an op stream (no header, no end marker) back into ops.
#[cfg(test)]
pub(crate) fn parse_ops(bytes: &[u8]) -> Result<alloc::vec::Vec<Op>, QoiError> {
    let mut input = ByteReader::new(bytes);
    let mut ops = alloc::vec::Vec::new();
    while input.remaining() > 0 {
        ops.push(Op::read_from(&mut input)?);
    }
    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes_of(op: Op) -> alloc::vec::Vec<u8> {
        let mut out = ByteWriter::default();
        op.write_to(&mut out);
        let bytes = out.into_inner();
        assert_eq!(bytes.len(), op.encoded_len());
        bytes
    }

    #[test]
    fn tag_bytes() {
        assert_eq!(bytes_of(Op::Index(9)), [0x09]);
        assert_eq!(bytes_of(Op::Run(1)), [0xc0]);
        assert_eq!(bytes_of(Op::Run(62)), [0xfd]);
        assert_eq!(bytes_of(Op::Diff { dr: -2, dg: 1, db: -2 }), [0b0100_0000 | 0b00_11_00]);
        assert_eq!(bytes_of(Op::Diff { dr: 0, dg: 0, db: 0 }), [0x6a]);
        assert_eq!(bytes_of(Op::Rgb { r: 1, g: 2, b: 3 }), [0xfe, 1, 2, 3]);
        assert_eq!(bytes_of(Op::Rgba(Rgba::new(1, 2, 3, 4))), [0xff, 1, 2, 3, 4]);
    }

    #[test]
    fn luma_layout() {
        // dg = 20 -> 0x80 | 52; dr - dg = -3 -> 5; db - dg = 7 -> 15
        let bytes = bytes_of(Op::Luma { dg: 20, dr_dg: -3, db_dg: 7 });
        assert_eq!(bytes, [0x80 | 52, 0x5f]);
    }

    #[test]
    fn literal_tags_win_over_run_prefix() {
        // 0xfe and 0xff both carry the run prefix 0b11
        let ops = parse_ops(&[0xfe, 9, 8, 7, 0xff, 1, 2, 3, 4, 0xfd]).unwrap();
        assert_eq!(
            ops,
            [
                Op::Rgb { r: 9, g: 8, b: 7 },
                Op::Rgba(Rgba::new(1, 2, 3, 4)),
                Op::Run(62),
            ]
        );
    }

    #[test]
    fn every_tag_byte_parses() {
        for tag in 0..=255u8 {
            let bytes = [tag, 0x88, 0, 0, 0];
            let op = Op::read_from(&mut ByteReader::new(&bytes)).unwrap();
            let written = bytes_of(op);
            assert_eq!(written, bytes[..written.len()], "tag {tag:#04x}");
        }
    }

    #[test]
    fn truncated_luma_is_eof() {
        assert!(matches!(
            Op::read_from(&mut ByteReader::new(&[0x80])),
            Err(QoiError::UnexpectedEof)
        ));
        assert!(matches!(
            Op::read_from(&mut ByteReader::new(&[0xff, 1, 2])),
            Err(QoiError::UnexpectedEof)
        ));
    }
}
