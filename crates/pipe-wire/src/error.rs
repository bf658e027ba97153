/// Errors produced by the stateless decoders, the [`Pipe`](crate::Pipe)
/// cursor and the packed-integer encoders.
///
/// Reads can only ever fail with [`PipeError::OutOfBounds`]; every bit
/// pattern of a packed prefix byte is a valid encoding, so there is no
/// "malformed" variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipeError {
    /// A read would extend past the end of the buffer.
    ///
    /// `offset` is where the read started, `requested` is how many bytes it
    /// needed and `len` is the total buffer length. Reads to the end of the
    /// buffer report `requested: 0` when `offset` itself is past `len`.
    #[error("read of {requested} bytes at offset {offset} exceeds buffer length {len}")]
    OutOfBounds {
        offset: usize,
        requested: usize,
        len: usize,
    },

    /// A value does not fit the packed encoding it was asked to use.
    #[error("value {value:#X} does not fit the packed encoding (max {max:#X})")]
    ValueTooLarge { value: u64, max: u64 },
}

/// Shorthand for results carrying a [`PipeError`].
pub type Result<T> = std::result::Result<T, PipeError>;
