//! Rust static huffman codec.
//!
//! Version 0.1.0
//!
//! Compresses a byte slice with a single huffman code built from the frequencies of the whole
//! input, and restores it exactly. The compressed message is self describing: it carries the
//! symbol frequencies, so the decoder can rebuild the same tree and walk it bit by bit.
//!
//! ```
//! let packed = huffpack::compress(b"abracadabra").unwrap();
//! assert_eq!(huffpack::decompress(&packed).unwrap(), b"abracadabra");
//! ```
//!
//! Basic usage of the command line tool to compress a file is as follows:
//!
//! `$> huffpack -z test.txt`
//!
//! This will compress the file and create the file test.txt.hfm.
//! The original file will be deleted unless -k is given.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::compress;
pub use compression::decompress::decompress;
pub use error::CodecError;
