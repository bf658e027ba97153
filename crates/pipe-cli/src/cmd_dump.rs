/// Implementation of `pipe dump`.
///
/// Prints a hex dump of a file, or of the `--len` bytes starting at
/// `--offset`. The range is taken through a [`Pipe`], so asking for bytes
/// past the end of the file fails with the same out-of-bounds error a read
/// script would hit.
///
/// ```text
/// 00000000  42 43 50 00 01 00 00 00 81 2c be ef              BCP......,..
/// ```
use std::fs;

use anyhow::{Context, Result};
use pipe_wire::Pipe;

use crate::DumpArgs;
use crate::output::hex_dump;

/// Run the `pipe dump` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the requested range
/// does not lie inside it.
pub fn run(args: &DumpArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    let mut pipe = Pipe::new(bytes);

    pipe.skip(args.offset)
        .with_context(|| format!("offset {} is outside the file", args.offset))?;
    let start = pipe.offset();
    let range = match args.len {
        Some(len) => pipe
            .read_block(len)
            .with_context(|| format!("cannot dump {len} bytes at offset {start}"))?,
        None => pipe.read_block_until_end()?,
    };

    print!("{}", hex_dump(&range, start));
    Ok(())
}
