//! Read scripts: the ordered list of operations `pipe read` runs against a
//! file.
//!
//! A script comes either from the comma-separated `--ops` flag or from a
//! script file with one operation per line:
//!
//! ```text
//! # header
//! dword
//! packed-dword
//! block:16
//! skip:4
//! rest
//! ```
//!
//! Blank lines and everything after `#` are ignored.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use pipe_wire::Pipe;
use pipe_wire::bytes::Bytes;

/// One step of a read script. Each maps onto a single [`Pipe`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Byte,
    Word,
    BeWord,
    Dword,
    BeDword,
    PackedWord,
    PackedDword,
    Block(usize),
    Skip(usize),
    Rest,
}

/// The value an [`Op`] produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpValue {
    Int(u64),
    Bytes(Bytes),
    Skipped(usize),
}

impl Op {
    /// Run this operation against `pipe`.
    ///
    /// # Errors
    ///
    /// Propagates the pipe's out-of-bounds error unchanged.
    pub fn apply(self, pipe: &mut Pipe) -> pipe_wire::Result<OpValue> {
        let value = match self {
            Op::Byte => OpValue::Int(u64::from(pipe.read_byte()?)),
            Op::Word => OpValue::Int(u64::from(pipe.read_word()?)),
            Op::BeWord => OpValue::Int(u64::from(pipe.read_be_word()?)),
            Op::Dword => OpValue::Int(u64::from(pipe.read_dword()?)),
            Op::BeDword => OpValue::Int(u64::from(pipe.read_be_dword()?)),
            Op::PackedWord => OpValue::Int(u64::from(pipe.read_packed_be_word()?)),
            Op::PackedDword => OpValue::Int(u64::from(pipe.read_packed_be_dword()?)),
            Op::Block(size) => OpValue::Bytes(pipe.read_block(size)?),
            Op::Skip(size) => {
                pipe.skip(size)?;
                OpValue::Skipped(size)
            }
            Op::Rest => OpValue::Bytes(pipe.read_block_until_end()?),
        };
        Ok(value)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Byte => f.write_str("byte"),
            Op::Word => f.write_str("word"),
            Op::BeWord => f.write_str("be-word"),
            Op::Dword => f.write_str("dword"),
            Op::BeDword => f.write_str("be-dword"),
            Op::PackedWord => f.write_str("packed-word"),
            Op::PackedDword => f.write_str("packed-dword"),
            Op::Block(size) => write!(f, "block:{size}"),
            Op::Skip(size) => write!(f, "skip:{size}"),
            Op::Rest => f.write_str("rest"),
        }
    }
}

impl FromStr for Op {
    type Err = anyhow::Error;

    fn from_str(token: &str) -> Result<Self> {
        if let Some((name, size)) = token.split_once(':') {
            let size: usize = size
                .trim()
                .parse()
                .with_context(|| format!("invalid size in `{token}`"))?;
            return match name.trim() {
                "block" => Ok(Op::Block(size)),
                "skip" => Ok(Op::Skip(size)),
                other => bail!("operation `{other}` does not take a size"),
            };
        }

        let op = match token.trim() {
            "byte" | "u8" => Op::Byte,
            "word" | "u16" => Op::Word,
            "be-word" | "be16" => Op::BeWord,
            "dword" | "u32" => Op::Dword,
            "be-dword" | "be32" => Op::BeDword,
            "packed-word" => Op::PackedWord,
            "packed-dword" => Op::PackedDword,
            "rest" => Op::Rest,
            "block" | "skip" => bail!("`{token}` needs a size, e.g. `{token}:4`"),
            other => bail!("unknown operation `{other}`"),
        };
        Ok(op)
    }
}

/// An ordered list of operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Script {
    pub ops: Vec<Op>,
}

impl Script {
    /// Parse the comma-separated form used by `--ops`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first token that is not a valid op.
    pub fn from_list(list: &str) -> Result<Self> {
        let ops = list
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::parse::<Op>)
            .collect::<Result<Vec<Op>>>()?;
        Ok(Self { ops })
    }

    /// Parse a script file: one op per line, `#` starts a comment.
    ///
    /// # Errors
    ///
    /// Returns an error naming the line of the first invalid op.
    pub fn from_lines(text: &str) -> Result<Self> {
        let mut ops = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let op = line
                .parse::<Op>()
                .with_context(|| format!("script line {}", idx + 1))?;
            ops.push(op);
        }
        Ok(Self { ops })
    }
}
