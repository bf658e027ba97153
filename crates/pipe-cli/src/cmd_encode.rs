/// Implementation of `pipe encode`.
///
/// Encodes each value with the chosen packed scheme and prints one line
/// per value:
///
/// ```text
/// 5 -> 05
/// 300 -> 812c
/// 65538 -> c0010002
/// ```
///
/// With `--output`, the encodings are concatenated and written to the file
/// instead, ready to be read back with `pipe read --ops packed-dword,...`.
use std::fs;

use anyhow::{Context, Result};
use clap::ValueEnum;
use pipe_wire::packed::{
    MAX_PACKED_DWORD_LEN, MAX_PACKED_WORD_LEN, encode_packed_be_dword, encode_packed_be_word,
};
use tracing::info;

use crate::EncodeArgs;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Scheme {
    /// Packed big-endian word, 1–2 bytes, values up to 0x7FFF.
    Word,
    /// Packed big-endian dword, 1–5 bytes, any `u32`.
    Dword,
}

/// Encode one value with `scheme`.
///
/// # Errors
///
/// Returns an error if the value does not fit the scheme.
pub fn encode(scheme: Scheme, value: u32) -> Result<Vec<u8>> {
    match scheme {
        Scheme::Word => {
            let value = u16::try_from(value)
                .with_context(|| format!("{value} does not fit a packed word"))?;
            let mut buf = [0u8; MAX_PACKED_WORD_LEN];
            let len = encode_packed_be_word(value, &mut buf)?;
            Ok(buf[..len].to_vec())
        }
        Scheme::Dword => {
            let mut buf = [0u8; MAX_PACKED_DWORD_LEN];
            let len = encode_packed_be_dword(value, &mut buf);
            Ok(buf[..len].to_vec())
        }
    }
}

/// Run the `pipe encode` command.
///
/// # Errors
///
/// Returns an error if a value does not fit the scheme or the output file
/// cannot be written.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let mut out = Vec::new();
    for &value in &args.values {
        let encoded = encode(args.scheme, value)?;
        if args.output.is_none() {
            println!("{value} -> {}", hex::encode(&encoded));
        }
        out.extend_from_slice(&encoded);
    }

    if let Some(path) = &args.output {
        fs::write(path, &out).with_context(|| format!("cannot write {}", path.display()))?;
        info!(path = %path.display(), len = out.len(), "wrote packed values");
        println!("wrote {} bytes to {}", out.len(), path.display());
    }

    Ok(())
}

/// Parse a decimal or `0x`-prefixed hexadecimal `u32`.
pub fn parse_u32(raw: &str) -> Result<u32, String> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => raw.parse(),
    };
    parsed.map_err(|e| format!("invalid value `{raw}`: {e}"))
}
