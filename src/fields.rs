//! Field-level read/write primitives.
//!
//! Every multi-bit field in this crate (split sequence numbers, 16-bit
//! segment offsets, 8-bit range counts) is assembled from the byte-granular
//! cursors defined here. [`ByteReader`] and [`ByteWriter`] track a position
//! inside a borrowed slice and check bounds before every access, so a
//! truncated PDU surfaces as a structured error instead of an out-of-bounds
//! read.

use crate::error::{ParseContext, RlcBuildingError, RlcParsingError};

/// Bounds-checked read cursor over an immutable byte slice.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader positioned at the start of `data`.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left before the end of the region.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Reads one byte, advancing the cursor.
    pub fn read_u8(&mut self, context: ParseContext) -> Result<u8, RlcParsingError> {
        if self.remaining() < 1 {
            return Err(RlcParsingError::NotEnoughData {
                needed: self.pos + 1,
                got: self.data.len(),
                context,
            });
        }
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Reads a big-endian 16-bit field, advancing the cursor.
    pub fn read_u16_be(&mut self, context: ParseContext) -> Result<u16, RlcParsingError> {
        if self.remaining() < 2 {
            return Err(RlcParsingError::NotEnoughData {
                needed: self.pos + 2,
                got: self.data.len(),
                context,
            });
        }
        let value = u16::from_be_bytes([self.data[self.pos], self.data[self.pos + 1]]);
        self.pos += 2;
        Ok(value)
    }
}

/// Bounds-checked write cursor over a mutable byte slice.
#[derive(Debug)]
pub struct ByteWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> ByteWriter<'a> {
    /// Creates a writer positioned at the start of `buf`.
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Writes one byte, advancing the cursor.
    pub fn write_u8(&mut self, byte: u8) -> Result<(), RlcBuildingError> {
        if self.pos + 1 > self.buf.len() {
            return Err(RlcBuildingError::BufferTooSmall {
                needed: self.pos + 1,
                available: self.buf.len(),
            });
        }
        self.buf[self.pos] = byte;
        self.pos += 1;
        Ok(())
    }

    /// Writes a big-endian 16-bit field, advancing the cursor.
    pub fn write_u16_be(&mut self, value: u16) -> Result<(), RlcBuildingError> {
        if self.pos + 2 > self.buf.len() {
            return Err(RlcBuildingError::BufferTooSmall {
                needed: self.pos + 2,
                available: self.buf.len(),
            });
        }
        self.buf[self.pos..self.pos + 2].copy_from_slice(&value.to_be_bytes());
        self.pos += 2;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_walks_bytes_in_order() {
        let data = [0xAB, 0x12, 0x34];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u8(ParseContext::StatusFixedPart).unwrap(), 0xAB);
        assert_eq!(
            reader.read_u16_be(ParseContext::NackSegmentOffset).unwrap(),
            0x1234
        );
        assert_eq!(reader.position(), 3);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn reader_fails_past_end_without_advancing() {
        let data = [0x01];
        let mut reader = ByteReader::new(&data);
        let err = reader
            .read_u16_be(ParseContext::NackSegmentOffset)
            .unwrap_err();
        assert_eq!(
            err,
            RlcParsingError::NotEnoughData {
                needed: 2,
                got: 1,
                context: ParseContext::NackSegmentOffset,
            }
        );
        // Failed read leaves the cursor where it was.
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_u8(ParseContext::NackRange).unwrap(), 0x01);
    }

    #[test]
    fn reader_error_reports_absolute_need() {
        let data = [0x00, 0x00];
        let mut reader = ByteReader::new(&data);
        reader.read_u8(ParseContext::NackSn).unwrap();
        reader.read_u8(ParseContext::NackSn).unwrap();
        let err = reader.read_u8(ParseContext::NackRange).unwrap_err();
        assert_eq!(
            err,
            RlcParsingError::NotEnoughData {
                needed: 3,
                got: 2,
                context: ParseContext::NackRange,
            }
        );
    }

    #[test]
    fn writer_packs_bytes_in_order() {
        let mut buf = [0u8; 3];
        let mut writer = ByteWriter::new(&mut buf);
        writer.write_u8(0xAB).unwrap();
        writer.write_u16_be(0x1234).unwrap();
        assert_eq!(writer.position(), 3);
        assert_eq!(buf, [0xAB, 0x12, 0x34]);
    }

    #[test]
    fn writer_fails_past_end_without_writing() {
        let mut buf = [0u8; 1];
        let mut writer = ByteWriter::new(&mut buf);
        let err = writer.write_u16_be(0xFFFF).unwrap_err();
        assert_eq!(
            err,
            RlcBuildingError::BufferTooSmall {
                needed: 2,
                available: 1,
            }
        );
        assert_eq!(writer.position(), 0);
        assert_eq!(buf, [0x00]);
    }
}
