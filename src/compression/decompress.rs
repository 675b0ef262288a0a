use log::{info, trace};

use super::header::Header;
use crate::bitstream::bitreader::BitReader;
use crate::error::CodecError;
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::tree::{HuffmanTree, NodeData};
use crate::tools::freq_count::FrequencyTable;

/// Decompress a huffpack message. Any inconsistency in the message is reported as an error;
/// partial output is never returned.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut br = BitReader::new(data);
    let header = Header::read(&mut br)?;

    if header.symbol_count() == 0 {
        if br.remaining() > 0 {
            return Err(CodecError::corrupt("data follows an empty message"));
        }
        info!("Found an empty message.");
        return Ok(Vec::new());
    }

    // Rebuild the tree the encoder used, then make sure the header agrees with it.
    let freqs = FrequencyTable::from_entries(&header.entries)?;
    if freqs.total() != header.original_len {
        return Err(CodecError::corrupt(format!(
            "frequencies add up to {} bytes but the header declares {}",
            freqs.total(),
            header.original_len
        )));
    }
    let tree = HuffmanTree::build(&freqs)
        .ok_or_else(|| CodecError::corrupt("no tree for a non-empty frequency table"))?;
    check_codes(&tree, &freqs, &header)?;

    // The payload must be exactly as long as the header says. Anything else is truncation or junk.
    let payload_len = br.remaining() / 8;
    if payload_len as u64 != header.payload_bytes() {
        return Err(CodecError::corrupt(format!(
            "payload is {} bytes, expected {}",
            payload_len,
            header.payload_bytes()
        )));
    }
    let payload_bits = header.payload_bits as usize;
    if !br.limit(payload_bits) {
        return Err(CodecError::corrupt("payload bit count overruns the message"));
    }
    trace!("\r\x1b[43mPayload starts at {}.    \x1b[0m", br.loc());

    // original_len <= payload_bits (every code is at least one bit), which the length check above
    // bounds by the size of the input, so this allocation is safe.
    let mut out = Vec::with_capacity(header.original_len as usize);
    let root = tree.root();

    // Stop by symbol count, never by running out of bits: the pad bits are not codes.
    while (out.len() as u64) < header.original_len {
        let mut node = root;
        loop {
            match &node.node_data {
                NodeData::Kids(left, right) => {
                    node = match br.bit() {
                        Some(0) => left.as_ref(),
                        Some(_) => right.as_ref(),
                        None => {
                            return Err(CodecError::corrupt(format!(
                                "ran out of payload bits after {} of {} bytes",
                                out.len(),
                                header.original_len
                            )))
                        }
                    };
                }
                NodeData::Leaf(sym) => {
                    out.push(*sym);
                    break;
                }
                NodeData::Placeholder => {
                    return Err(CodecError::corrupt(format!(
                        "invalid code at byte {}",
                        out.len()
                    )))
                }
            }
        }
    }

    if br.remaining() > 0 {
        return Err(CodecError::corrupt(format!(
            "{} payload bits left over after decoding",
            br.remaining()
        )));
    }
    check_padding(&mut br)?;

    info!(
        "Decompressed {} bytes to {} bytes.",
        data.len(),
        out.len()
    );
    Ok(out)
}

/// Regenerate the codes and compare them with what the header claims.
fn check_codes(
    tree: &HuffmanTree,
    freqs: &FrequencyTable,
    header: &Header,
) -> Result<(), CodecError> {
    let table = CodeTable::generate(tree).map_err(|e| CodecError::corrupt(e.to_string()))?;
    if table.max_len() != header.max_code_len {
        return Err(CodecError::corrupt(format!(
            "maximum code length is {} but the header declares {}",
            table.max_len(),
            header.max_code_len
        )));
    }
    match table.payload_bits(freqs) {
        Some(bits) if bits == header.payload_bits => Ok(()),
        Some(bits) => Err(CodecError::corrupt(format!(
            "codes need {} payload bits but the header declares {}",
            bits, header.payload_bits
        ))),
        None => Err(CodecError::corrupt("payload bit count overflows")),
    }
}

/// The bits after the last code, up to the byte boundary, must all be zero.
fn check_padding(br: &mut BitReader<'_>) -> Result<(), CodecError> {
    let pad = (8 - br.position() % 8) % 8;
    if !br.limit(pad) || br.bint(pad) != Some(0) {
        return Err(CodecError::corrupt("non-zero padding after the payload"));
    }
    Ok(())
}
