//! Little-endian byte access for ptg payloads.
//!
//! Decoding reads through [`LittleEndianInput`] so callers can hand the codec whatever record
//! reader they already hold (a plain slice, a `CONTINUE`-aware record stream, ...). Encoding
//! writes into a caller-owned buffer at a fixed offset and never grows it.

use crate::DecodePtgError;

/// Sequential little-endian reader positioned inside a formula token stream.
pub trait LittleEndianInput {
    /// Offset of the next unread byte, used for error reporting.
    fn position(&self) -> usize;

    fn read_u8(&mut self) -> Result<u8, DecodePtgError>;

    fn read_u16_le(&mut self) -> Result<u16, DecodePtgError>;
}

/// Slice-backed [`LittleEndianInput`].
#[derive(Debug, Clone)]
pub struct PtgCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> PtgCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Start reading at `offset` (e.g. after a record header).
    pub fn at(bytes: &'a [u8], offset: usize) -> Self {
        Self { bytes, pos: offset }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], DecodePtgError> {
        let remaining = self.remaining();
        let Some(chunk) = self
            .bytes
            .get(self.pos..)
            .and_then(|rest| rest.get(..N))
        else {
            return Err(DecodePtgError::UnexpectedEof {
                offset: self.pos,
                needed: N,
                remaining,
            });
        };
        let mut out = [0u8; N];
        out.copy_from_slice(chunk);
        self.pos += N;
        Ok(out)
    }
}

impl LittleEndianInput for PtgCursor<'_> {
    fn position(&self) -> usize {
        self.pos
    }

    fn read_u8(&mut self) -> Result<u8, DecodePtgError> {
        let [b] = self.take::<1>()?;
        Ok(b)
    }

    fn read_u16_le(&mut self) -> Result<u16, DecodePtgError> {
        Ok(u16::from_le_bytes(self.take::<2>()?))
    }
}

// Writers below assume the caller already checked `offset + width <= buf.len()`.

pub(crate) fn put_u8(buf: &mut [u8], offset: usize, value: u8) {
    buf[offset] = value;
}

pub(crate) fn put_u16_le(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cursor_reads_little_endian_words() {
        let mut cursor = PtgCursor::new(&[0x25, 0x34, 0x12, 0xFF]);
        assert_eq!(cursor.read_u8().unwrap(), 0x25);
        assert_eq!(cursor.read_u16_le().unwrap(), 0x1234);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn cursor_reports_short_reads_without_advancing() {
        let mut cursor = PtgCursor::at(&[0x00, 0x01, 0x02], 2);
        let err = cursor.read_u16_le().unwrap_err();
        assert_eq!(
            err,
            DecodePtgError::UnexpectedEof {
                offset: 2,
                needed: 2,
                remaining: 1,
            }
        );
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.read_u8().unwrap(), 0x02);
        assert!(cursor.is_empty());
    }

    #[test]
    fn cursor_past_end_reports_zero_remaining() {
        let mut cursor = PtgCursor::at(&[0x00], 5);
        assert_eq!(
            cursor.read_u8(),
            Err(DecodePtgError::UnexpectedEof {
                offset: 5,
                needed: 1,
                remaining: 0,
            })
        );
    }

    #[test]
    fn put_helpers_write_at_offset() {
        let mut buf = [0u8; 4];
        put_u8(&mut buf, 0, 0x45);
        put_u16_le(&mut buf, 1, 0xC002);
        assert_eq!(buf, [0x45, 0x02, 0xC0, 0x00]);
    }
}
