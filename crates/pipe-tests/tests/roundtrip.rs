//! Encode→decode roundtrips for both packed schemes, and streams that mix
//! packed values with fixed-width fields.

use pipe_tests::{DWORD_BOUNDARIES, WORD_BOUNDARIES, packed_dwords, packed_words, record_stream};
use pipe_wire::Pipe;
use pipe_wire::packed::{packed_be_dword_len, packed_be_word_len};

#[test]
fn packed_words_roundtrip_as_a_stream() {
    let encoded = packed_words(&WORD_BOUNDARIES);
    let expected_len: usize = WORD_BOUNDARIES
        .iter()
        .map(|&v| packed_be_word_len(v).unwrap())
        .sum();
    assert_eq!(encoded.len(), expected_len);

    let mut p = Pipe::new(encoded);
    for &value in &WORD_BOUNDARIES {
        assert_eq!(p.read_packed_be_word().unwrap(), value);
    }
    assert!(p.is_at_end());
}

#[test]
fn packed_dwords_roundtrip_as_a_stream() {
    let encoded = packed_dwords(&DWORD_BOUNDARIES);
    let expected_len: usize = DWORD_BOUNDARIES.iter().map(|&v| packed_be_dword_len(v)).sum();
    assert_eq!(encoded.len(), expected_len);

    let mut p = Pipe::new(encoded);
    for &value in &DWORD_BOUNDARIES {
        let before = p.offset();
        assert_eq!(p.read_packed_be_dword().unwrap(), value);
        assert_eq!(p.offset() - before, packed_be_dword_len(value), "{value:#X}");
    }
    assert!(p.is_at_end());
}

#[test]
fn small_dwords_share_the_word_encoding() {
    // Below 0x4000 the dword form coincides with the word form.
    for value in [0u16, 0x7F, 0x80, 0x3FFF] {
        assert_eq!(packed_words(&[value]), packed_dwords(&[u32::from(value)]));
    }
}

#[test]
fn record_stream_decodes_fully() {
    let count = 500;
    let mut p = Pipe::new(record_stream(count));
    for i in 0..count {
        let tag = p.read_byte().unwrap();
        let id = p.read_packed_be_dword().unwrap();
        let len = p.read_word().unwrap();
        let body = p.read_block(usize::from(len)).unwrap();

        assert_eq!(u32::from(tag), i % 256);
        assert_eq!(id, i.wrapping_mul(4099));
        assert_eq!(u32::from(len), i % 32);
        assert!(body.iter().all(|&b| b == tag));
    }
    assert!(p.is_at_end());
}
