//! Packed big-endian integers: a prefix-counted varint where the leading
//! bits of the first byte say how many bytes follow.
//!
//! # Packed word (1–2 bytes)
//!
//! | First byte | Bytes | Value                         | Range        |
//! |------------|-------|-------------------------------|--------------|
//! | `0xxxxxxx` | 1     | `first`                       | 0 – 0x7F     |
//! | `1xxxxxxx` | 2     | `(first & 0x7F) << 8 \| b1`   | 0 – 0x7FFF   |
//!
//! # Packed dword (1, 2, 4 or 5 bytes)
//!
//! | First byte | Bytes | Value                                      | Range            |
//! |------------|-------|--------------------------------------------|------------------|
//! | `0xxxxxxx` | 1     | `first`                                    | 0 – 0x7F         |
//! | `10xxxxxx` | 2     | `(first & 0x7F) << 8 \| b1`                | 0 – 0x3FFF       |
//! | `110xxxxx` | 4     | `((first & 0x3F) << 8 \| b1) << 16 \| be16` | 0 – 0x1FFF_FFFF  |
//! | `111xxxxx` | 5     | `be16 << 16 \| be16` (marker low bits unused) | 0 – 0xFFFF_FFFF |
//!
//! The masks are part of an external wire format and must not change.
//! The encoders here always pick the shortest form; the decoders also
//! accept longer-than-necessary encodings.

use crate::error::{PipeError, Result};
use crate::pipe::Pipe;

/// Largest value a packed word can carry.
pub const MAX_PACKED_WORD: u16 = 0x7FFF;

/// Maximum encoded size of a packed word.
pub const MAX_PACKED_WORD_LEN: usize = 2;

/// Maximum encoded size of a packed dword.
pub const MAX_PACKED_DWORD_LEN: usize = 5;

impl Pipe {
    /// Read a packed big-endian word (1 or 2 bytes).
    ///
    /// # Errors
    ///
    /// [`PipeError::OutOfBounds`] if the buffer ends inside the encoding.
    /// The offset is then left where the packed word started.
    pub fn read_packed_be_word(&mut self) -> Result<u16> {
        self.atomically(|pipe| {
            let first = pipe.read_byte()?;
            if first & 0x80 == 0 {
                return Ok(u16::from(first));
            }
            let second = pipe.read_byte()?;
            Ok((u16::from(first & 0x7F) << 8) | u16::from(second))
        })
    }

    /// Read a packed big-endian dword (1, 2, 4 or 5 bytes).
    ///
    /// # Errors
    ///
    /// [`PipeError::OutOfBounds`] if the buffer ends inside the encoding.
    /// The offset is then left where the packed dword started.
    pub fn read_packed_be_dword(&mut self) -> Result<u32> {
        self.atomically(|pipe| {
            let first = pipe.read_byte()?;
            let head = match first {
                0x00..=0x7F => return Ok(u32::from(first)),
                0x80..=0xBF => {
                    let second = pipe.read_byte()?;
                    return Ok((u32::from(first & 0x7F) << 8) | u32::from(second));
                }
                0xC0..=0xDF => (u32::from(first & 0x3F) << 8) | u32::from(pipe.read_byte()?),
                0xE0..=0xFF => u32::from(pipe.read_be_word()?),
            };
            let tail = pipe.read_be_word()?;
            Ok((head << 16) | u32::from(tail))
        })
    }
}

/// Encode `value` as a packed big-endian word into `buf`.
///
/// # Returns
///
/// The number of bytes written (1 or 2).
///
/// # Errors
///
/// [`PipeError::ValueTooLarge`] if `value > 0x7FFF`.
///
/// # Panics
///
/// Panics if `buf` is shorter than the encoding. A buffer of
/// [`MAX_PACKED_WORD_LEN`] bytes always fits.
pub fn encode_packed_be_word(value: u16, buf: &mut [u8]) -> Result<usize> {
    if value > MAX_PACKED_WORD {
        return Err(PipeError::ValueTooLarge {
            value: u64::from(value),
            max: u64::from(MAX_PACKED_WORD),
        });
    }
    let [hi, lo] = value.to_be_bytes();
    if value <= 0x7F {
        buf[0] = lo;
        Ok(1)
    } else {
        buf[..2].copy_from_slice(&[0x80 | hi, lo]);
        Ok(2)
    }
}

/// Encode `value` as a packed big-endian dword into `buf`, using the
/// shortest form that holds it.
///
/// # Returns
///
/// The number of bytes written (1, 2, 4 or 5).
///
/// # Panics
///
/// Panics if `buf` is shorter than the encoding. A buffer of
/// [`MAX_PACKED_DWORD_LEN`] bytes always fits.
pub fn encode_packed_be_dword(value: u32, buf: &mut [u8]) -> usize {
    let [b0, b1, b2, b3] = value.to_be_bytes();
    match value {
        0..=0x7F => {
            buf[0] = b3;
            1
        }
        0x80..=0x3FFF => {
            buf[..2].copy_from_slice(&[0x80 | b2, b3]);
            2
        }
        0x4000..=0x1FFF_FFFF => {
            buf[..4].copy_from_slice(&[0xC0 | b0, b1, b2, b3]);
            4
        }
        _ => {
            buf[..5].copy_from_slice(&[0xE0, b0, b1, b2, b3]);
            5
        }
    }
}

/// Encoded size of `value` as a packed word, or `None` if it does not fit.
pub fn packed_be_word_len(value: u16) -> Option<usize> {
    match value {
        0..=0x7F => Some(1),
        0x80..=MAX_PACKED_WORD => Some(2),
        _ => None,
    }
}

/// Encoded size of `value` as a packed dword.
pub fn packed_be_dword_len(value: u32) -> usize {
    match value {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1FFF_FFFF => 4,
        _ => 5,
    }
}
