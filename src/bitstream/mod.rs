//! The bitstream module forms the I/O subsystem of the huffpack codec.
//!
//! BitPacker builds the compressed message: the byte aligned header words followed by the huffman
//! codes, packed back to back most significant bit first, with zero padding only after the last
//! code. BitReader walks the same message in the same bit order.
//!
//! Both work entirely in memory. Reading files and writing the result somewhere is left to the
//! caller.
//!
pub mod bitpacker;
pub mod bitreader;
