use log::{debug, info, trace, warn};

use super::header::Header;
use crate::bitstream::bitpacker::BitPacker;
use crate::error::CodecError;
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::tree::HuffmanTree;
use crate::tools::freq_count::FrequencyTable;

/*
    The whole input is one message with one code table:
    frequency count -> tree -> code table -> header -> payload.

    The tree is only needed to produce the code table, so it is dropped before any bits are
    written. The payload size is known exactly from the table (sum of frequency * code length),
    which lets the header go out first.

    Nothing here falls back to storing the data raw. Input with 256 evenly spread byte values
    (random or already compressed data) grows by the size of the header, and that is reported,
    not prevented.
*/

/// Compress `data` into a self-describing huffpack message.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let freqs = FrequencyTable::from_bytes(data);
    info!(
        "Compressing {} bytes with {} distinct symbols.",
        data.len(),
        freqs.len()
    );

    let tree = match HuffmanTree::build(&freqs) {
        Some(tree) => tree,
        None => {
            // Empty input: the header alone is the whole message.
            let header = Header::empty();
            let mut bw = BitPacker::new(header.size());
            header.write(&mut bw);
            bw.flush();
            return Ok(bw.output);
        }
    };
    let table = CodeTable::generate(&tree)?;
    drop(tree);

    // Every counted symbol has a code, so only overflow can stop this.
    let payload_bits = table
        .payload_bits(&freqs)
        .ok_or_else(|| CodecError::corrupt("payload bit count overflows"))?;

    let header = Header {
        entries: freqs.iter().collect(),
        max_code_len: table.max_len(),
        original_len: data.len() as u64,
        payload_bits,
    };
    debug!(
        "Max code length is {}, payload is {} bits.",
        header.max_code_len, header.payload_bits
    );

    let mut bw = BitPacker::new(header.size() + header.payload_bytes() as usize);
    header.write(&mut bw);
    trace!("\r\x1b[43mPayload starts at {}.    \x1b[0m", bw.loc());

    let start = bw.bit_count();
    for &byte in data {
        match table.get(byte) {
            Some(code) => bw.out_bits(code.len, code.bits),
            None => {
                return Err(CodecError::corrupt(format!(
                    "byte {} has no code in the table",
                    byte
                )))
            }
        }
    }
    debug_assert_eq!(bw.bit_count() - start, payload_bits);
    bw.flush();

    let out = bw.output;
    if out.len() > data.len() {
        warn!(
            "Compressed output ({} bytes) is larger than the input ({} bytes).",
            out.len(),
            data.len()
        );
    }
    info!(
        "Compressed {} bytes to {} bytes ({} header, {} payload).",
        data.len(),
        out.len(),
        header.size(),
        header.payload_bytes()
    );
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::compress;
    use crate::compression::header::{Header, FIXED_SIZE};

    #[test]
    fn empty_test() {
        let out = compress(&[]).unwrap();
        assert_eq!(out.len(), FIXED_SIZE);
        assert_eq!(&out[..6], b"HFM1\x00\x00");
    }

    #[test]
    fn single_symbol_test() {
        let out = compress(b"aaaa").unwrap();
        let header = Header {
            entries: vec![(b'a', 4)],
            max_code_len: 1,
            original_len: 4,
            payload_bits: 4,
        };
        assert_eq!(out.len(), header.size() + 1);
        // 1111 plus padding
        assert_eq!(out[out.len() - 1], 0xf0);
        // max_code_length, original_byte_count, payload_bit_count
        let tail = &out[out.len() - 18..out.len() - 1];
        assert_eq!(tail[0], 1);
        assert_eq!(&tail[1..9], &4_u64.to_be_bytes());
        assert_eq!(&tail[9..17], &4_u64.to_be_bytes());
    }

    #[test]
    fn payload_test() {
        // a:2 b:1 -> b = 0, a = 1
        let out = compress(b"aba").unwrap();
        assert_eq!(out[out.len() - 1], 0b1010_0000);
    }

    #[test]
    fn deterministic_test() {
        let data = b"It was the best of times, it was the worst of times.";
        assert_eq!(compress(data).unwrap(), compress(data).unwrap());
    }

    #[test]
    fn growth_is_not_an_error_test() {
        let data = (0..=255).collect::<Vec<u8>>();
        let out = compress(&data).unwrap();
        assert!(out.len() > data.len());
    }
}
