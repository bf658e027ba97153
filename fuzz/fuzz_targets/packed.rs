#![no_main]

use libfuzzer_sys::fuzz_target;
use pipe_wire::Pipe;

// Fuzz target: packed word/dword decoding over arbitrary bytes.
//
// Alternates the two decoders until the buffer runs out and checks that
// every failure leaves the cursor where the packed value started.
fuzz_target!(|data: &[u8]| {
    let mut pipe = Pipe::new(data.to_vec());
    let mut dword = true;
    loop {
        let before = pipe.offset();
        let result = if dword {
            pipe.read_packed_be_dword().map(|_| ())
        } else {
            pipe.read_packed_be_word().map(|_| ())
        };
        if result.is_err() {
            assert_eq!(pipe.offset(), before);
            break;
        }
        assert!(pipe.offset() > before && pipe.offset() <= pipe.len());
        dword = !dword;
    }
});
