//! Generates the code table by walking the huffman tree breadth first.
//!
//! Each step down the tree appends one bit to the code carried along: 0 for the left child, 1 for
//! the right. The first bit of a code is therefore the decision made at the root, and it lands in
//! the most significant position of `bits`. BitPacker writes codes most significant bit first, so
//! the decoder sees the bits in exactly the order it needs to walk the same tree.

use log::trace;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::fmt::{self, Display, Formatter};

use super::tree::{HuffmanTree, Node, NodeData};
use crate::error::CodecError;
use crate::tools::freq_count::FrequencyTable;

/// Longest code the bitstream can carry. A right aligned code has to fit in a u64.
pub const MAX_CODE_LEN: usize = 64;

/// A huffman code: `len` bits, right aligned in `bits`.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Code {
    pub len: u8,
    pub bits: u64,
}

impl Code {
    /// True if this code is a bit prefix of (or equal to) `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.bits, width = self.len as usize)
    }
}

/// Byte value to code mapping. Read only once generated.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: FxHashMap<u8, Code>,
    /// Symbols in the order the breadth first walk reached them.
    order: Vec<u8>,
    max_len: u8,
}

impl CodeTable {
    /// Walk the tree and record a code for every leaf. Fails if the tree is deeper than
    /// MAX_CODE_LEN.
    pub fn generate(tree: &HuffmanTree) -> Result<CodeTable, CodecError> {
        if tree.depth() > MAX_CODE_LEN {
            return Err(CodecError::CodeTooLong {
                len: tree.depth(),
                max: MAX_CODE_LEN,
            });
        }

        let mut table = CodeTable {
            codes: FxHashMap::default(),
            order: Vec::new(),
            max_len: 0,
        };

        let mut queue: VecDeque<(&Node, u64, u8)> = VecDeque::new();
        queue.push_back((tree.root(), 0, 0));

        while let Some((node, bits, len)) = queue.pop_front() {
            match &node.node_data {
                NodeData::Kids(left, right) => {
                    queue.push_back((left.as_ref(), bits << 1, len + 1));
                    queue.push_back((right.as_ref(), bits << 1 | 1, len + 1));
                }
                NodeData::Leaf(sym) => {
                    table.codes.insert(*sym, Code { len, bits });
                    table.order.push(*sym);
                    table.max_len = table.max_len.max(len);
                }
                NodeData::Placeholder => {}
            }
        }
        trace!("\nCode table:\n{}", table);
        Ok(table)
    }

    pub fn get(&self, sym: u8) -> Option<Code> {
        self.codes.get(&sym).copied()
    }

    /// Longest code in the table.
    pub fn max_len(&self) -> u8 {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// (symbol, code) pairs in breadth first order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.order.iter().map(move |sym| (*sym, self.codes[sym]))
    }

    /// Sum of frequency * code length over every symbol, i.e. the exact payload size in bits.
    /// None on overflow, or if a counted symbol has no code.
    pub fn payload_bits(&self, freqs: &FrequencyTable) -> Option<u64> {
        freqs.iter().try_fold(0_u64, |acc, (sym, freq)| {
            let code = self.get(sym)?;
            acc.checked_add(freq.checked_mul(code.len as u64)?)
        })
    }
}

impl Display for CodeTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (sym, code) in self.iter() {
            writeln!(f, "  {:#04x}: ({:>2}) {}", sym, code.len, code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{Code, CodeTable};
    use crate::huffman_coding::tree::HuffmanTree;
    use crate::tools::freq_count::FrequencyTable;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn table_for(entries: &[(u8, u64)]) -> (FrequencyTable, CodeTable) {
        let freqs = FrequencyTable::from_entries(entries).unwrap();
        let tree = HuffmanTree::build(&freqs).unwrap();
        (freqs, CodeTable::generate(&tree).unwrap())
    }

    /// Cost of an optimal prefix code, worked out by repeatedly merging the two smallest weights
    /// of a sorted vec.
    fn reference_cost(weights: &[u64]) -> u64 {
        if weights.len() == 1 {
            return weights[0];
        }
        let mut w = weights.to_vec();
        let mut cost = 0;
        while w.len() > 1 {
            w.sort_unstable_by(|a, b| b.cmp(a));
            let a = w.pop().unwrap();
            let b = w.pop().unwrap();
            cost += a + b;
            w.push(a + b);
        }
        cost
    }

    #[test]
    fn textbook_test() {
        let (freqs, table) = table_for(&[
            (b'A', 5),
            (b'B', 9),
            (b'C', 12),
            (b'D', 13),
            (b'E', 16),
            (b'F', 45),
        ]);
        let lens = freqs
            .iter()
            .map(|(sym, _)| table.get(sym).unwrap().len)
            .collect::<Vec<_>>();
        assert_eq!(lens, vec![4, 4, 3, 3, 3, 1]);
        assert_eq!(table.max_len(), 4);
        assert_eq!(table.payload_bits(&freqs), Some(224));

        assert_eq!(table.get(b'F').unwrap().to_string(), "0");
        assert_eq!(table.get(b'C').unwrap().to_string(), "100");
        assert_eq!(table.get(b'D').unwrap().to_string(), "101");
        assert_eq!(table.get(b'A').unwrap().to_string(), "1100");
        assert_eq!(table.get(b'B').unwrap().to_string(), "1101");
        assert_eq!(table.get(b'E').unwrap().to_string(), "111");

        // Breadth first recording order
        let order = table.iter().map(|(sym, _)| sym).collect::<Vec<_>>();
        assert_eq!(order, b"FCDEAB".to_vec());
    }

    #[test]
    fn single_symbol_test() {
        let (freqs, table) = table_for(&[(b'a', 4)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'a'), Some(Code { len: 1, bits: 1 }));
        assert_eq!(table.payload_bits(&freqs), Some(4));
    }

    #[test]
    fn prefix_free_test() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut entries: Vec<(u8, u64)> = vec![];
            for sym in 0..=255_u8 {
                if rng.gen_bool(0.4) {
                    entries.push((sym, rng.gen_range(1..1000)));
                }
            }
            if entries.is_empty() {
                continue;
            }
            let (_, table) = table_for(&entries);
            let codes = table.iter().collect::<Vec<_>>();
            for (i, (_, a)) in codes.iter().enumerate() {
                for (j, (_, b)) in codes.iter().enumerate() {
                    if i != j {
                        assert!(!a.is_prefix_of(b), "{} is a prefix of {}", a, b);
                    }
                }
            }
        }
    }

    #[test]
    fn optimal_cost_test() {
        let mut rng = StdRng::seed_from_u64(11);
        for n in 1..=40_u8 {
            let entries = (0..n)
                .map(|sym| (sym, rng.gen_range(1..500)))
                .collect::<Vec<_>>();
            let (freqs, table) = table_for(&entries);
            let weights = entries.iter().map(|&(_, w)| w).collect::<Vec<_>>();
            assert_eq!(table.payload_bits(&freqs), Some(reference_cost(&weights)));
        }
    }

    #[test]
    fn fibonacci_depth_test() {
        // Fibonacci weights give the deepest possible tree: one new level per symbol.
        let mut fib = vec![1_u64, 1];
        while fib.len() < 30 {
            let next = fib[fib.len() - 1] + fib[fib.len() - 2];
            fib.push(next);
        }
        let entries = fib
            .iter()
            .enumerate()
            .map(|(i, &w)| (i as u8, w))
            .collect::<Vec<_>>();
        let (_, table) = table_for(&entries);
        assert_eq!(table.max_len(), 29);
    }
}
