#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pipe_wire::Pipe;

#[derive(Arbitrary, Debug)]
enum Op {
    Byte,
    Word,
    BeWord,
    Dword,
    BeDword,
    PackedWord,
    PackedDword,
    Block(u16),
    Skip(u16),
    Rest,
}

#[derive(Arbitrary, Debug)]
struct Input {
    buffer: Vec<u8>,
    ops: Vec<Op>,
}

// Fuzz target: arbitrary operation sequences against an arbitrary buffer.
//
// Checks the cursor invariant after every step: the offset never leaves
// the buffer, successful fixed-width reads advance by their width, and
// failed reads do not move it.
fuzz_target!(|input: Input| {
    let mut pipe = Pipe::new(input.buffer);
    for op in input.ops {
        let before = pipe.offset();
        let (ok, width) = match op {
            Op::Byte => (pipe.read_byte().is_ok(), Some(1)),
            Op::Word => (pipe.read_word().is_ok(), Some(2)),
            Op::BeWord => (pipe.read_be_word().is_ok(), Some(2)),
            Op::Dword => (pipe.read_dword().is_ok(), Some(4)),
            Op::BeDword => (pipe.read_be_dword().is_ok(), Some(4)),
            Op::PackedWord => (pipe.read_packed_be_word().is_ok(), None),
            Op::PackedDword => (pipe.read_packed_be_dword().is_ok(), None),
            Op::Block(n) => (pipe.read_block(usize::from(n)).is_ok(), Some(usize::from(n))),
            Op::Skip(n) => (pipe.skip(usize::from(n)).is_ok(), Some(usize::from(n))),
            Op::Rest => {
                let rest = pipe.read_block_until_end().expect("rest never fails");
                assert_eq!(rest.len(), pipe.len() - before);
                (true, None)
            }
        };

        assert!(pipe.offset() <= pipe.len());
        if !ok {
            assert_eq!(pipe.offset(), before);
        } else if let Some(width) = width {
            assert_eq!(pipe.offset(), before + width);
        }
    }
});
