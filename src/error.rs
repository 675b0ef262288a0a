//! Error type for the huffpack codec.
//!
//! Every failure the codec can report is a property of the data it was handed. Nothing here is
//! transient, so callers should never retry with the same input.

use thiserror::Error;

/// Errors returned by [`compress`](crate::compress) and [`decompress`](crate::decompress).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The input does not begin with the huffpack signature.
    #[error("not a huffpack stream (bad signature)")]
    InvalidSignature,

    /// Header fields disagree with each other or with the payload, or the tree walk failed.
    #[error("corrupt stream: {0}")]
    CorruptStream(String),

    /// A code longer than the bitstream supports. Only reachable with pathological weights.
    #[error("huffman code of {len} bits exceeds the {max} bit limit")]
    CodeTooLong {
        /// Length of the offending code
        len: usize,
        /// Largest supported code length
        max: usize,
    },
}

impl CodecError {
    /// Shorthand used throughout the decoder.
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        CodecError::CorruptStream(reason.into())
    }
}

impl From<CodecError> for std::io::Error {
    fn from(e: CodecError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    }
}
