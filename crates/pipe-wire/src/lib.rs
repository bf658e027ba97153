#![warn(clippy::pedantic)]

pub mod decode;
pub mod error;
pub mod packed;
pub mod pipe;

pub use bytes;
pub use error::{PipeError, Result};
pub use pipe::Pipe;
