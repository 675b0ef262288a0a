//! The compression module manages both directions of the huffpack codec.
//!
//! Compression happens in the following steps:
//! - Frequency count: Count how often each of the 256 byte values occurs.
//! - Tree building: Merge the two lightest nodes until one root remains.
//! - Code table: Walk the tree to give each byte value its bit pattern.
//! - Header: Write the frequencies and the sizes the decoder needs to check the payload.
//! - Payload: Write the code for every input byte, in input order, then pad the last byte.
//!
//! The entire input is one message with one fixed code table. Nothing is adaptive and nothing is
//! split into blocks.
//!
//! Decompression follows the inverse of the compression process.
//! - Header: Read and cross-check the frequencies and sizes.
//! - Tree building: Rebuild the encoder's tree from the frequencies.
//! - Payload: Walk the tree one bit at a time, emitting a byte at each leaf, until the declared
//!   number of bytes has been produced.
//!

pub mod compress;
pub mod decompress;
pub mod header;
