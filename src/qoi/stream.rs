//! Sequential byte cursor used by the header and pixel-stream codecs.
//!
//! Reads and writes happen strictly in order, one primitive at a time. There
//! is no seeking.

use alloc::vec::Vec;

use crate::error::QoiError;

/// Forward-only reader over an input slice.
#[derive(Debug)]
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, QoiError> {
        let byte = *self.data.get(self.pos).ok_or(QoiError::UnexpectedEof)?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_u32_be(&mut self) -> Result<u32, QoiError> {
        let bytes = self.read_array::<4>()?;
        Ok(u32::from_be_bytes(bytes))
    }

    pub fn read_char(&mut self) -> Result<char, QoiError> {
        self.read_u8().map(char::from)
    }

    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], QoiError> {
        let end = self.pos.checked_add(N).ok_or(QoiError::UnexpectedEof)?;
        let bytes = self.data.get(self.pos..end).ok_or(QoiError::UnexpectedEof)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.pos = end;
        Ok(out)
    }

    #[cfg(test)]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

/// Append-only writer into an owned buffer.
#[derive(Debug, Default)]
pub(crate) struct ByteWriter {
    out: Vec<u8>,
}

impl ByteWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn write_u8(&mut self, byte: u8) {
        self.out.push(byte);
    }

    pub fn write_u32_be(&mut self, value: u32) {
        self.out.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes the low byte of an ASCII character.
    pub fn write_char(&mut self, c: char) {
        debug_assert!(c.is_ascii());
        self.out.push(c as u8);
    }

    #[inline]
    pub fn write_all(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_words() {
        let data = [0x00, 0x00, 0x01, 0x02, 0xff, b'q'];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_u32_be().unwrap(), 0x0102);
        assert_eq!(r.read_u8().unwrap(), 0xff);
        assert_eq!(r.read_char().unwrap(), 'q');
        assert_eq!(r.position(), 6);
        assert_eq!(r.remaining(), 0);
        assert!(matches!(r.read_u8(), Err(QoiError::UnexpectedEof)));
    }

    #[test]
    fn short_word_does_not_advance() {
        let data = [1, 2, 3];
        let mut r = ByteReader::new(&data);
        assert!(matches!(r.read_u32_be(), Err(QoiError::UnexpectedEof)));
        assert_eq!(r.position(), 0);
        assert_eq!(r.read_u8().unwrap(), 1);
    }

    #[test]
    fn writer_appends_in_order() {
        let mut w = ByteWriter::with_capacity(8);
        w.write_char('o');
        w.write_u32_be(0xdead_beef);
        w.write_u8(7);
        w.write_all(&[8, 9]);
        assert_eq!(w.into_inner(), [b'o', 0xde, 0xad, 0xbe, 0xef, 7, 8, 9]);
    }
}
