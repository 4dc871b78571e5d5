//! Positioned little-endian reader over a decompressed record
//!
//! `ByteCursor` borrows the buffer for the lifetime of one decode. Fixed-width
//! reads fail with [`Error::OutOfBounds`]; the guarded string read never fails
//! and instead rewinds and reports `None`, which is what lets the decoder probe
//! positions it is not sure about.

use byteorder::{ByteOrder, LittleEndian};
use tracing::trace;

use crate::error::{Error, Result};
use crate::layout::MAX_STRING_LEN;

/// Sequential reader with an explicit position
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the position and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Move to an absolute offset (clamped to the buffer end)
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.data.len());
    }

    /// Advance without reading. Offsets come from the layout table, so there is
    /// no bounds error here; a skip past the end just leaves nothing to read.
    pub fn skip(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.data.len());
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if available < n {
            return Err(Error::OutOfBounds {
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    /// 8-byte value built from two 32-bit halves, low word first
    pub fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.take(8)?;
        let low = LittleEndian::read_u32(&bytes[0..4]) as u64;
        let high = LittleEndian::read_u32(&bytes[4..8]) as u64;
        Ok(low + (high << 32))
    }

    /// Like `read_u64`, but the high word carries the sign
    pub fn read_i64(&mut self) -> Result<i64> {
        let bytes = self.take(8)?;
        let low = LittleEndian::read_u32(&bytes[0..4]) as i64;
        let high = LittleEndian::read_i32(&bytes[4..8]) as i64;
        Ok(low + high * (1i64 << 32))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.take(8)?))
    }

    /// Read a u64-length-prefixed UTF-8 string, or rewind and return `None`.
    ///
    /// The read is rejected when the prefix is missing, longer than
    /// [`MAX_STRING_LEN`], or runs past the end of the buffer. Invalid UTF-8 is
    /// replaced, not rejected.
    pub fn read_guarded_str(&mut self) -> Option<String> {
        let start = self.pos;
        match self.read_prefixed_str() {
            Ok(s) => Some(s),
            Err(e) => {
                trace!("guarded string at {start} rejected: {e}");
                self.pos = start;
                None
            }
        }
    }

    fn read_prefixed_str(&mut self) -> Result<String> {
        let offset = self.pos;
        let length = self.read_u64()?;
        if length > MAX_STRING_LEN {
            return Err(Error::GuardRejected { offset, length });
        }
        let bytes = self.take(length as usize)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Read a u64 character count followed by that many UTF-16LE code units
    pub fn read_utf16_str(&mut self) -> Result<String> {
        let offset = self.pos;
        let count = self.read_u64()?;
        let byte_len = count
            .checked_mul(2)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(Error::OutOfBounds {
                offset,
                needed: usize::MAX,
                available: self.remaining(),
            })?;
        let bytes = self.take(byte_len)?;
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(LittleEndian::read_u16)
            .collect();
        Ok(String::from_utf16_lossy(&units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixed(len: u64, body: &[u8]) -> Vec<u8> {
        let mut buf = len.to_le_bytes().to_vec();
        buf.extend_from_slice(body);
        buf
    }

    #[test]
    fn test_fixed_width_reads() {
        let mut data = Vec::new();
        data.extend_from_slice(&0xDEADBEEFu32.to_le_bytes());
        data.extend_from_slice(&(-5i32).to_le_bytes());
        data.extend_from_slice(&1.5f64.to_le_bytes());

        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_u32().unwrap(), 0xDEADBEEF);
        assert_eq!(cursor.read_i32().unwrap(), -5);
        assert_eq!(cursor.read_f64().unwrap(), 1.5);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_u64_halves_match_native() {
        let values = [
            0u64,
            1,
            u32::MAX as u64,
            1 << 32,
            (1 << 32) + 1,
            0x0123_4567_89AB_CDEF,
            u64::MAX,
        ];
        for v in values {
            let bytes = v.to_le_bytes();
            let mut cursor = ByteCursor::new(&bytes);
            assert_eq!(cursor.read_u64().unwrap(), v, "value {v:#x}");
            assert_eq!(cursor.position(), 8);
        }
    }

    #[test]
    fn test_i64_halves_match_native() {
        let values = [
            0i64,
            -1,
            u32::MAX as i64,
            1 << 32,
            -(1 << 32),
            i64::MIN,
            i64::MAX,
            -1234567890123,
        ];
        for v in values {
            let bytes = v.to_le_bytes();
            let mut cursor = ByteCursor::new(&bytes);
            assert_eq!(cursor.read_i64().unwrap(), v, "value {v}");
        }
    }

    #[test]
    fn test_short_reads_are_out_of_bounds() {
        let data = [1u8, 2, 3];
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            cursor.read_u32(),
            Err(Error::OutOfBounds { offset: 0, needed: 4, available: 3 })
        ));
        assert_eq!(cursor.position(), 0);

        let data = [0u8; 7];
        let mut cursor = ByteCursor::new(&data);
        assert!(cursor.read_u64().is_err());
        assert!(cursor.read_i64().is_err());
        assert!(cursor.read_f64().is_err());
    }

    #[test]
    fn test_guarded_str_reads_utf8() {
        let data = prefixed(5, b"Hello");
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_guarded_str().as_deref(), Some("Hello"));
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_guarded_str_accepts_limit() {
        let body = vec![b'a'; MAX_STRING_LEN as usize];
        let data = prefixed(MAX_STRING_LEN, &body);
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_guarded_str().map(|s| s.len()), Some(10_000));
    }

    #[test]
    fn test_guarded_str_rejects_and_rewinds() {
        for len in [MAX_STRING_LEN + 1, 1 << 32, u64::MAX] {
            let mut data = vec![0xAA; 3];
            data.extend(prefixed(len, b"tail"));
            let mut cursor = ByteCursor::new(&data);
            cursor.skip(3);
            assert_eq!(cursor.read_guarded_str(), None);
            assert_eq!(cursor.position(), 3);
        }
    }

    #[test]
    fn test_guarded_str_rewinds_on_truncation() {
        // Prefix claims more bytes than remain
        let data = prefixed(10, b"abc");
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_guarded_str(), None);
        assert_eq!(cursor.position(), 0);

        // Not even a full prefix
        let data = [3u8, 0, 0];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_guarded_str(), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_guarded_str_is_lossy() {
        let data = prefixed(3, &[b'A', 0xFF, b'B']);
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_guarded_str().as_deref(), Some("A\u{FFFD}B"));
    }

    #[test]
    fn test_utf16_str() {
        let text = "Mew ネコ";
        let units: Vec<u16> = text.encode_utf16().collect();
        let mut data = (units.len() as u64).to_le_bytes().to_vec();
        for u in &units {
            data.extend_from_slice(&u.to_le_bytes());
        }
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_utf16_str().unwrap(), text);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_utf16_str_truncated() {
        let mut data = 4u64.to_le_bytes().to_vec();
        data.extend_from_slice(&[b'a', 0, b'b', 0]);
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            cursor.read_utf16_str(),
            Err(Error::OutOfBounds { needed: 8, available: 4, .. })
        ));

        let data = u64::MAX.to_le_bytes();
        let mut cursor = ByteCursor::new(&data);
        assert!(cursor.read_utf16_str().is_err());
    }

    #[test]
    fn test_skip_and_seek() {
        let data = [0u8; 16];
        let mut cursor = ByteCursor::new(&data);
        cursor.skip(10);
        assert_eq!(cursor.remaining(), 6);
        cursor.skip(100);
        assert_eq!(cursor.position(), 16);
        assert!(cursor.read_u32().is_err());
        cursor.seek(4);
        assert_eq!(cursor.remaining(), 12);
    }
}
