#![no_main]

use libfuzzer_sys::fuzz_target;
use pipe_wire::packed::{encode_packed_be_dword, encode_packed_be_word, MAX_PACKED_DWORD_LEN};
use pipe_wire::Pipe;

// Fuzz target: packed encode->decode roundtrip.
//
// Takes 4 bytes of fuzz input as a u32, encodes it as a packed dword (and,
// when it fits, as a packed word), decodes it back and asserts the value
// and the consumed length match.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let value = u32::from_le_bytes(data[..4].try_into().unwrap());

    let mut buf = [0u8; MAX_PACKED_DWORD_LEN];
    let len = encode_packed_be_dword(value, &mut buf);
    let mut pipe = Pipe::new(buf[..len].to_vec());
    assert_eq!(pipe.read_packed_be_dword().unwrap(), value);
    assert!(pipe.is_at_end());

    if let Ok(small) = u16::try_from(value) {
        let mut buf = [0u8; 2];
        match encode_packed_be_word(small, &mut buf) {
            Ok(len) => {
                let mut pipe = Pipe::new(buf[..len].to_vec());
                assert_eq!(pipe.read_packed_be_word().unwrap(), small);
                assert!(pipe.is_at_end());
            }
            Err(_) => assert!(small > 0x7FFF),
        }
    }
});
