//! The huffman_coding module turns a frequency table into codes.
//!
//! - priority_queue: min-heap with a stable tie-break, used to order nodes by weight.
//! - tree: merges the two lightest nodes until a single root remains.
//! - code_table: walks the tree and assigns each leaf its bit pattern and length.
//!
//! The code table is fixed for the whole message. The decoder does not receive the table; it
//! receives the frequencies and rebuilds the same tree with the same deterministic steps.
//!

pub mod code_table;
pub mod priority_queue;
pub mod tree;
