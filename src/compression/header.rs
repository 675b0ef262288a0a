//! The huffpack message header.
//!
//! All fields are byte aligned and big endian, so the payload that follows always starts on a
//! byte boundary:
//!
//! ```text
//! magic               3 bytes  "HFM"
//! version             1 byte   '1'
//! symbol_count        u16      0..=256
//! entries             symbol_count x (symbol: u8, frequency: u64), ascending by symbol
//! max_code_length     u8
//! original_byte_count u64
//! payload_bit_count   u64
//! ```
//!
//! The header carries frequencies rather than code lengths. The decoder rebuilds the identical
//! tree from them.

use log::debug;

use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitreader::BitReader;
use crate::error::CodecError;

pub const SIGNATURE: [u8; 3] = *b"HFM";
pub const VERSION: u8 = b'1';

/// Header size in bytes without any frequency entries.
pub const FIXED_SIZE: usize = 3 + 1 + 2 + 1 + 8 + 8;
/// Size in bytes of one (symbol, frequency) entry.
pub const ENTRY_SIZE: usize = 1 + 8;

const TRUNCATED: &str = "header is truncated";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// (symbol, frequency) pairs, ascending by symbol
    pub entries: Vec<(u8, u64)>,
    pub max_code_len: u8,
    pub original_len: u64,
    pub payload_bits: u64,
}

impl Header {
    /// Header for a message with no symbols at all.
    pub fn empty() -> Self {
        Header {
            entries: vec![],
            max_code_len: 0,
            original_len: 0,
            payload_bits: 0,
        }
    }

    pub fn symbol_count(&self) -> usize {
        self.entries.len()
    }

    /// Bytes the payload occupies once padded.
    pub fn payload_bytes(&self) -> u64 {
        self.payload_bits / 8 + (self.payload_bits % 8 != 0) as u64
    }

    /// Size of the serialized header in bytes.
    pub fn size(&self) -> usize {
        FIXED_SIZE + ENTRY_SIZE * self.entries.len()
    }

    /// Put the header on the stream.
    pub fn write(&self, bw: &mut BitPacker) {
        SIGNATURE.iter().for_each(|&x| bw.out8(x));
        bw.out8(VERSION);
        bw.out16(self.entries.len() as u16);
        for &(sym, freq) in &self.entries {
            bw.out8(sym);
            bw.out64(freq);
        }
        bw.out8(self.max_code_len);
        bw.out64(self.original_len);
        bw.out64(self.payload_bits);
    }

    /// Read a header from the stream. Only the layout is checked here. Whether the values agree
    /// with each other is checked by the decoder once it has rebuilt the tree.
    pub fn read(br: &mut BitReader<'_>) -> Result<Header, CodecError> {
        match br.bytes(4) {
            Some(sig) if sig[..3] == SIGNATURE && sig[3] == VERSION => {}
            _ => return Err(CodecError::InvalidSignature),
        }

        let truncated = || CodecError::corrupt(TRUNCATED);

        let symbol_count = br.bint(16).ok_or_else(truncated)? as usize;
        if symbol_count > 256 {
            return Err(CodecError::corrupt(format!(
                "symbol count of {} exceeds 256",
                symbol_count
            )));
        }

        let mut entries = Vec::with_capacity(symbol_count);
        for _ in 0..symbol_count {
            let sym = br.byte().ok_or_else(truncated)?;
            let freq = br.bint(64).ok_or_else(truncated)?;
            entries.push((sym, freq));
        }

        let header = Header {
            entries,
            max_code_len: br.byte().ok_or_else(truncated)?,
            original_len: br.bint(64).ok_or_else(truncated)?,
            payload_bits: br.bint(64).ok_or_else(truncated)?,
        };
        debug!(
            "Header: {} symbols, max code length {}, {} bytes in {} payload bits.",
            header.symbol_count(),
            header.max_code_len,
            header.original_len,
            header.payload_bits
        );

        if header.entries.is_empty()
            && (header.max_code_len != 0 || header.original_len != 0 || header.payload_bits != 0)
        {
            return Err(CodecError::corrupt(
                "header declares no symbols but a non-empty message",
            ));
        }
        Ok(header)
    }
}

#[cfg(test)]
mod test {
    use super::{Header, FIXED_SIZE};
    use crate::bitstream::bitpacker::BitPacker;
    use crate::bitstream::bitreader::BitReader;
    use crate::error::CodecError;

    fn sample() -> Header {
        Header {
            entries: vec![(b'a', 3), (b'b', 1)],
            max_code_len: 1,
            original_len: 4,
            payload_bits: 4,
        }
    }

    fn packed(header: &Header) -> Vec<u8> {
        let mut bw = BitPacker::new(header.size());
        header.write(&mut bw);
        bw.flush();
        bw.output
    }

    #[test]
    fn layout_test() {
        let out = packed(&Header::empty());
        assert_eq!(out.len(), FIXED_SIZE);
        assert_eq!(&out[..6], b"HFM1\x00\x00");
        assert!(out[6..].iter().all(|&b| b == 0));

        let out = packed(&sample());
        assert_eq!(out.len(), sample().size());
        assert_eq!(&out[4..6], &[0, 2]);
        assert_eq!(&out[6..15], &[b'a', 0, 0, 0, 0, 0, 0, 0, 3]);
    }

    #[test]
    fn read_back_test() {
        let out = packed(&sample());
        let mut br = BitReader::new(&out);
        assert_eq!(Header::read(&mut br), Ok(sample()));
        assert_eq!(br.remaining(), 0);
    }

    #[test]
    fn bad_signature_test() {
        let mut out = packed(&sample());
        out[3] = b'2';
        assert_eq!(
            Header::read(&mut BitReader::new(&out)),
            Err(CodecError::InvalidSignature)
        );
        assert_eq!(
            Header::read(&mut BitReader::new(b"HF")),
            Err(CodecError::InvalidSignature)
        );
    }

    #[test]
    fn truncated_test() {
        let out = packed(&sample());
        for cut in 4..out.len() {
            assert!(matches!(
                Header::read(&mut BitReader::new(&out[..cut])),
                Err(CodecError::CorruptStream(_))
            ));
        }
    }

    #[test]
    fn oversized_symbol_count_test() {
        let mut out = packed(&Header::empty());
        out[4] = 0x01;
        out[5] = 0x01;
        assert!(matches!(
            Header::read(&mut BitReader::new(&out)),
            Err(CodecError::CorruptStream(_))
        ));
    }

    #[test]
    fn empty_with_payload_test() {
        let mut header = Header::empty();
        header.original_len = 3;
        let out = packed(&header);
        assert!(matches!(
            Header::read(&mut BitReader::new(&out)),
            Err(CodecError::CorruptStream(_))
        ));
    }
}
