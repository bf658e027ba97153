//! Shared fixtures for the integration suites and the criterion benches.

use pipe_wire::packed::{
    MAX_PACKED_DWORD_LEN, MAX_PACKED_WORD_LEN, encode_packed_be_dword, encode_packed_be_word,
};

/// Values sitting on either side of every packed-dword length boundary.
pub const DWORD_BOUNDARIES: [u32; 10] = [
    0,
    0x7F,
    0x80,
    0x3FFF,
    0x4000,
    0xFFFF,
    0x1_0000,
    0x1FFF_FFFF,
    0x2000_0000,
    u32::MAX,
];

/// Values sitting on either side of the packed-word length boundary.
pub const WORD_BOUNDARIES: [u16; 6] = [0, 1, 0x7F, 0x80, 0x100, 0x7FFF];

/// Concatenated packed-word encodings of `values`.
///
/// # Panics
///
/// Panics if a value is above `0x7FFF`.
pub fn packed_words(values: &[u16]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut buf = [0u8; MAX_PACKED_WORD_LEN];
    for &value in values {
        let len = encode_packed_be_word(value, &mut buf).expect("value fits a packed word");
        out.extend_from_slice(&buf[..len]);
    }
    out
}

/// Concatenated packed-dword encodings of `values`.
pub fn packed_dwords(values: &[u32]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut buf = [0u8; MAX_PACKED_DWORD_LEN];
    for &value in values {
        let len = encode_packed_be_dword(value, &mut buf);
        out.extend_from_slice(&buf[..len]);
    }
    out
}

/// A synthetic record stream of `count` records, each laid out as:
///
/// ```text
/// ┌──────────┬─────────────────┬───────────────┬──────────────────┐
/// │ tag (u8) │ id (packed u32) │ len (LE u16)  │ body [len bytes] │
/// └──────────┴─────────────────┴───────────────┴──────────────────┘
/// ```
///
/// Record `i` has tag `i % 256`, id `i * 4099` and a body of `i % 32`
/// bytes all equal to the tag. Mixes every read shape a real container
/// format would use.
pub fn record_stream(count: u32) -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..count {
        let tag = (i % 256) as u8;
        let body_len = (i % 32) as u16;
        out.push(tag);
        out.extend_from_slice(&packed_dwords(&[i.wrapping_mul(4099)]));
        out.extend_from_slice(&body_len.to_le_bytes());
        out.extend(std::iter::repeat_n(tag, usize::from(body_len)));
    }
    out
}
