use bytes::Bytes;
use tracing::{debug, trace};

use crate::decode;
use crate::error::Result;

/// Sequential cursor over an immutable byte buffer.
///
/// Every read decodes at the current offset and then advances it by the
/// number of bytes consumed. A read that would run past the end fails with
/// [`PipeError::OutOfBounds`](crate::PipeError::OutOfBounds) and leaves the
/// offset untouched, so the invariant `offset <= len` holds after every call.
///
/// ```text
///   bytes   ┌────┬────┬────┬────┬────┬────┬────┐
///           │ 01 │ 34 │ 12 │ 85 │ 00 │ .. │ .. │
///           └────┴────┴────┴────┴────┴────┴────┘
///             ▲    ▲         ▲         ▲
///   offset    0    1         3         5
///           read_byte  read_word  read_packed_be_word
/// ```
///
/// The buffer is held as [`Bytes`], so cloning it to start a second,
/// independent cursor is cheap and [`Pipe::read_block`] hands out views
/// without copying.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pipe {
    bytes: Bytes,
    offset: usize,
}

impl Pipe {
    /// Create a cursor at offset 0.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            offset: 0,
        }
    }

    /// Position of the next unread byte.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total buffer length, independent of the offset.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes left between the offset and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    /// The whole underlying buffer, including bytes already read.
    pub fn as_bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn into_inner(self) -> Bytes {
        self.bytes
    }

    /// Decode one value with `read`, then advance by `width`.
    ///
    /// `read` receives the full buffer and the current offset and must
    /// consume exactly `width` bytes on success.
    fn step<T>(
        &mut self,
        op: &'static str,
        width: usize,
        read: impl FnOnce(&Bytes, usize) -> Result<T>,
    ) -> Result<T> {
        match read(&self.bytes, self.offset) {
            Ok(value) => {
                trace!(op, offset = self.offset, width, "read");
                self.offset += width;
                Ok(value)
            }
            Err(err) => {
                debug!(op, offset = self.offset, len = self.bytes.len(), %err, "read rejected");
                Err(err)
            }
        }
    }

    /// Run a multi-step read; on failure rewind to where it started.
    pub(crate) fn atomically<T>(&mut self, read: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let start = self.offset;
        read(self).inspect_err(|_| self.offset = start)
    }

    /// # Errors
    ///
    /// [`PipeError::OutOfBounds`](crate::PipeError::OutOfBounds) at the end of the buffer.
    pub fn read_byte(&mut self) -> Result<u8> {
        self.step("read_byte", 1, |bytes, offset| decode::read_byte(bytes, offset))
    }

    /// Read a little-endian `u16`.
    ///
    /// # Errors
    ///
    /// [`PipeError::OutOfBounds`](crate::PipeError::OutOfBounds) if fewer than 2 bytes remain.
    pub fn read_word(&mut self) -> Result<u16> {
        self.step("read_word", 2, |bytes, offset| decode::read_word(bytes, offset))
    }

    /// Read a big-endian `u16`.
    ///
    /// # Errors
    ///
    /// [`PipeError::OutOfBounds`](crate::PipeError::OutOfBounds) if fewer than 2 bytes remain.
    pub fn read_be_word(&mut self) -> Result<u16> {
        self.step("read_be_word", 2, |bytes, offset| {
            decode::read_be_word(bytes, offset)
        })
    }

    /// Read a little-endian `u32`.
    ///
    /// # Errors
    ///
    /// [`PipeError::OutOfBounds`](crate::PipeError::OutOfBounds) if fewer than 4 bytes remain.
    pub fn read_dword(&mut self) -> Result<u32> {
        self.step("read_dword", 4, |bytes, offset| decode::read_dword(bytes, offset))
    }

    /// Read a big-endian `u32`.
    ///
    /// # Errors
    ///
    /// [`PipeError::OutOfBounds`](crate::PipeError::OutOfBounds) if fewer than 4 bytes remain.
    pub fn read_be_dword(&mut self) -> Result<u32> {
        self.step("read_be_dword", 4, |bytes, offset| {
            decode::read_be_dword(bytes, offset)
        })
    }

    /// Take the next `size` bytes as a zero-copy view of the buffer.
    ///
    /// # Errors
    ///
    /// [`PipeError::OutOfBounds`](crate::PipeError::OutOfBounds) if fewer than `size` bytes remain.
    pub fn read_block(&mut self, size: usize) -> Result<Bytes> {
        self.step("read_block", size, |bytes, offset| {
            decode::slice(bytes, offset, size)?;
            Ok(bytes.slice(offset..offset + size))
        })
    }

    /// Take everything from the offset to the end. Never fails in practice,
    /// since the offset cannot leave the buffer; the result may be empty.
    ///
    /// # Errors
    ///
    /// [`PipeError::OutOfBounds`](crate::PipeError::OutOfBounds) only if the offset invariant was broken.
    pub fn read_block_until_end(&mut self) -> Result<Bytes> {
        let width = self.remaining();
        self.step("read_block_until_end", width, |bytes, offset| {
            decode::slice_to_end(bytes, offset)?;
            Ok(bytes.slice(offset..))
        })
    }

    /// Advance past `size` bytes without decoding them.
    ///
    /// # Errors
    ///
    /// [`PipeError::OutOfBounds`](crate::PipeError::OutOfBounds) if fewer than `size` bytes remain.
    pub fn skip(&mut self, size: usize) -> Result<()> {
        self.step("skip", size, |bytes, offset| {
            decode::slice(bytes, offset, size).map(|_| ())
        })
    }
}

impl From<Vec<u8>> for Pipe {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<Bytes> for Pipe {
    fn from(bytes: Bytes) -> Self {
        Self::new(bytes)
    }
}

impl From<&'static [u8]> for Pipe {
    fn from(bytes: &'static [u8]) -> Self {
        Self::new(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PipeError;

    fn pipe(bytes: &[u8]) -> Pipe {
        Pipe::new(bytes.to_vec())
    }

    #[test]
    fn new_pipe_starts_at_zero() {
        let p = pipe(&[1, 2, 3]);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.len(), 3);
        assert_eq!(p.remaining(), 3);
        assert!(!p.is_at_end());
    }

    #[test]
    fn empty_pipe_is_at_end() {
        let p = Pipe::default();
        assert!(p.is_empty());
        assert!(p.is_at_end());
    }

    #[test]
    fn fixed_width_reads_advance() {
        let mut p = pipe(&[
            0xAA, // byte
            0x34, 0x12, // word
            0x12, 0x34, // be word
            0x78, 0x56, 0x34, 0x12, // dword
            0x12, 0x34, 0x56, 0x78, // be dword
        ]);
        assert_eq!(p.read_byte().unwrap(), 0xAA);
        assert_eq!(p.offset(), 1);
        assert_eq!(p.read_word().unwrap(), 0x1234);
        assert_eq!(p.offset(), 3);
        assert_eq!(p.read_be_word().unwrap(), 0x1234);
        assert_eq!(p.offset(), 5);
        assert_eq!(p.read_dword().unwrap(), 0x1234_5678);
        assert_eq!(p.offset(), 9);
        assert_eq!(p.read_be_dword().unwrap(), 0x1234_5678);
        assert!(p.is_at_end());
    }

    #[test]
    fn failed_read_leaves_offset() {
        let mut p = pipe(&[0x01, 0x02, 0x03]);
        p.read_byte().unwrap();
        let err = p.read_dword().unwrap_err();
        assert_eq!(
            err,
            PipeError::OutOfBounds {
                offset: 1,
                requested: 4,
                len: 3
            }
        );
        assert_eq!(p.offset(), 1);
        // The remaining two bytes are still readable.
        assert_eq!(p.read_word().unwrap(), 0x0302);
    }

    #[test]
    fn read_block_is_exact() {
        let mut p = pipe(b"headerbody");
        assert_eq!(&p.read_block(6).unwrap()[..], b"header");
        assert_eq!(p.offset(), 6);
        assert_eq!(&p.read_block(0).unwrap()[..], b"");
        assert_eq!(p.offset(), 6);
    }

    #[test]
    fn read_block_past_end() {
        let mut p = pipe(b"abc");
        p.skip(2).unwrap();
        assert!(matches!(
            p.read_block(2),
            Err(PipeError::OutOfBounds { offset: 2, .. })
        ));
        assert_eq!(p.offset(), 2);
    }

    #[test]
    fn read_block_until_end_drains() {
        let mut p = pipe(b"abcdef");
        p.skip(2).unwrap();
        let rest = p.read_block_until_end().unwrap();
        assert_eq!(&rest[..], b"cdef");
        assert_eq!(p.offset(), 6);

        // Draining again is fine and yields nothing.
        assert!(p.read_block_until_end().unwrap().is_empty());
        assert_eq!(p.offset(), 6);
    }

    #[test]
    fn skip_past_end_rejected() {
        let mut p = pipe(&[0; 4]);
        assert!(p.skip(5).is_err());
        assert_eq!(p.offset(), 0);
        p.skip(4).unwrap();
        assert!(p.is_at_end());
    }

    #[test]
    fn blocks_share_the_buffer() {
        let source = Bytes::from_static(b"shared");
        let mut p = Pipe::new(source.clone());
        let block = p.read_block(3).unwrap();
        assert_eq!(block, Bytes::from_static(b"sha"));
        assert_eq!(p.as_bytes(), &source);
        assert_eq!(p.into_inner(), source);
    }

    #[test]
    fn atomically_rewinds_on_error() {
        let mut p = pipe(&[0x01, 0x02]);
        let result = p.atomically(|p| {
            p.read_byte()?;
            p.read_word()
        });
        assert!(result.is_err());
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn from_conversions() {
        let from_vec = Pipe::from(vec![1, 2]);
        let from_static = Pipe::from(&b"\x01\x02"[..]);
        assert_eq!(from_vec, from_static);
    }
}
