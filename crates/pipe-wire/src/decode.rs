//! Stateless decoders over a borrowed byte buffer.
//!
//! Every function here is pure: it takes the buffer and an explicit offset
//! and never remembers anything. [`Pipe`](crate::Pipe) is built on top of
//! them and adds the cursor.
//!
//! ```text
//! buffer:  ┌────┬────┬────┬────┬────┬────┐
//!          │ 34 │ 12 │ 78 │ 56 │ 34 │ 12 │
//!          └────┴────┴────┴────┴────┴────┘
//! read_word(buf, 0)    = 0x1234
//! read_be_word(buf, 0) = 0x3412
//! read_dword(buf, 2)   = 0x1234_5678
//! ```

use crate::error::{PipeError, Result};

/// Interpret `bytes` as a little-endian unsigned integer.
///
/// An empty slice decodes to `0`. Only the low eight bytes fit in the
/// result; wider inputs keep the value modulo 2^64.
pub fn decode_le(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .rev()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte))
}

/// Interpret `bytes` as a big-endian unsigned integer.
///
/// Same width rules as [`decode_le`].
pub fn decode_be(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte))
}

/// Borrow `size` bytes of `buffer` starting at `offset`.
///
/// # Errors
///
/// [`PipeError::OutOfBounds`] if `offset + size` is past the end of the
/// buffer, or overflows `usize`.
pub fn slice(buffer: &[u8], offset: usize, size: usize) -> Result<&[u8]> {
    let out_of_bounds = || PipeError::OutOfBounds {
        offset,
        requested: size,
        len: buffer.len(),
    };
    let end = offset.checked_add(size).ok_or_else(out_of_bounds)?;
    buffer.get(offset..end).ok_or_else(out_of_bounds)
}

/// Borrow everything from `offset` to the end of `buffer`.
///
/// `offset == buffer.len()` is valid and yields an empty slice.
///
/// # Errors
///
/// [`PipeError::OutOfBounds`] if `offset` is past the end of the buffer.
/// The error carries `requested: 0`, since no byte count was asked for;
/// it is the start position itself that lies outside the buffer.
pub fn slice_to_end(buffer: &[u8], offset: usize) -> Result<&[u8]> {
    buffer.get(offset..).ok_or(PipeError::OutOfBounds {
        offset,
        requested: 0,
        len: buffer.len(),
    })
}

/// Copy `N` bytes at `offset` into a fixed-size array.
fn array<const N: usize>(buffer: &[u8], offset: usize) -> Result<[u8; N]> {
    let bytes = slice(buffer, offset, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    Ok(out)
}

/// Read the byte at `offset`.
///
/// # Errors
///
/// [`PipeError::OutOfBounds`] if `offset` is not inside the buffer.
pub fn read_byte(buffer: &[u8], offset: usize) -> Result<u8> {
    let [byte] = array::<1>(buffer, offset)?;
    Ok(byte)
}

/// Read a little-endian `u16` at `offset`.
///
/// # Errors
///
/// [`PipeError::OutOfBounds`] if fewer than 2 bytes remain at `offset`.
pub fn read_word(buffer: &[u8], offset: usize) -> Result<u16> {
    array(buffer, offset).map(u16::from_le_bytes)
}

/// Read a big-endian `u16` at `offset`.
///
/// # Errors
///
/// [`PipeError::OutOfBounds`] if fewer than 2 bytes remain at `offset`.
pub fn read_be_word(buffer: &[u8], offset: usize) -> Result<u16> {
    array(buffer, offset).map(u16::from_be_bytes)
}

/// Read a little-endian `u32` at `offset`.
///
/// # Errors
///
/// [`PipeError::OutOfBounds`] if fewer than 4 bytes remain at `offset`.
pub fn read_dword(buffer: &[u8], offset: usize) -> Result<u32> {
    array(buffer, offset).map(u32::from_le_bytes)
}

/// Read a big-endian `u32` at `offset`.
///
/// # Errors
///
/// [`PipeError::OutOfBounds`] if fewer than 4 bytes remain at `offset`.
pub fn read_be_dword(buffer: &[u8], offset: usize) -> Result<u32> {
    array(buffer, offset).map(u32::from_be_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUF: [u8; 6] = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12];

    #[test]
    fn decode_le_and_be_disagree_on_order() {
        assert_eq!(decode_le(&[0x34, 0x12]), 0x1234);
        assert_eq!(decode_be(&[0x34, 0x12]), 0x3412);
    }

    #[test]
    fn decode_empty_is_zero() {
        assert_eq!(decode_le(&[]), 0);
        assert_eq!(decode_be(&[]), 0);
    }

    #[test]
    fn decode_three_byte_width() {
        // Odd widths are fine; only the stateless helpers allow them.
        assert_eq!(decode_le(&[0x01, 0x02, 0x03]), 0x03_0201);
        assert_eq!(decode_be(&[0x01, 0x02, 0x03]), 0x01_0203);
    }

    #[test]
    fn decode_full_u64() {
        assert_eq!(decode_le(&[0xFF; 8]), u64::MAX);
        assert_eq!(
            decode_be(&[0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF]),
            0x0123_4567_89AB_CDEF
        );
    }

    #[test]
    fn fixed_width_helpers() {
        assert_eq!(read_byte(&BUF, 5).unwrap(), 0x12);
        assert_eq!(read_word(&BUF, 0).unwrap(), 0x1234);
        assert_eq!(read_be_word(&BUF, 0).unwrap(), 0x3412);
        assert_eq!(read_dword(&BUF, 2).unwrap(), 0x1234_5678);
        assert_eq!(read_be_dword(&BUF, 2).unwrap(), 0x7856_3412);
    }

    #[test]
    fn slice_exact_fit() {
        assert_eq!(slice(&BUF, 4, 2).unwrap(), &[0x34, 0x12]);
        assert_eq!(slice(&BUF, 6, 0).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn slice_past_end() {
        assert_eq!(
            slice(&BUF, 5, 2),
            Err(PipeError::OutOfBounds {
                offset: 5,
                requested: 2,
                len: 6
            })
        );
    }

    #[test]
    fn slice_overflowing_size() {
        let result = slice(&BUF, 1, usize::MAX);
        assert!(matches!(result, Err(PipeError::OutOfBounds { .. })));
    }

    #[test]
    fn slice_to_end_at_len_is_empty() {
        assert!(slice_to_end(&BUF, 6).unwrap().is_empty());
        assert_eq!(slice_to_end(&BUF, 4).unwrap(), &[0x34, 0x12]);
    }

    #[test]
    fn slice_to_end_past_len() {
        assert!(matches!(
            slice_to_end(&BUF, 7),
            Err(PipeError::OutOfBounds {
                offset: 7,
                requested: 0,
                len: 6
            })
        ));
    }

    #[test]
    fn word_helpers_reject_last_byte() {
        assert!(read_word(&BUF, 5).is_err());
        assert!(read_be_word(&BUF, 5).is_err());
        assert!(read_dword(&BUF, 3).is_err());
        assert!(read_byte(&[], 0).is_err());
    }
}
