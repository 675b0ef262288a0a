//! Builds the huffman code tree from a frequency table.
//!
//! Classic merge: one leaf per symbol goes into the priority queue (ascending byte order), then
//! the two lightest nodes are repeatedly popped and joined under a new parent until one root is
//! left. The first node popped becomes the left child. Since the queue breaks weight ties by
//! insertion order, the encoder and the decoder always build the very same tree from the same
//! frequencies.

use log::trace;
use std::fmt::{self, Display, Formatter};

use super::priority_queue::PriorityQueue;
use crate::tools::freq_count::FrequencyTable;

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
    /// Zero weight partner for a lone symbol. It carries no symbol and no valid code ends here.
    Placeholder,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: u64,
    /// Height of the subtree under this node. Leaves are 0.
    pub depth: u8,
    pub node_data: NodeData,
}

impl Node {
    pub fn leaf(sym: u8, weight: u64) -> Node {
        Node {
            weight,
            depth: 0,
            node_data: NodeData::Leaf(sym),
        }
    }

    pub fn placeholder() -> Node {
        Node {
            weight: 0,
            depth: 0,
            node_data: NodeData::Placeholder,
        }
    }

    /// Join two nodes under a new parent. `left` should be the node popped first.
    pub fn merge(left: Node, right: Node) -> Node {
        Node {
            weight: left.weight + right.weight,
            depth: left.depth.max(right.depth).saturating_add(1),
            node_data: NodeData::Kids(Box::new(left), Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self.node_data, NodeData::Kids(..))
    }

    fn count(&self, leaves: &mut usize, internal: &mut usize) {
        match &self.node_data {
            NodeData::Kids(left, right) => {
                *internal += 1;
                left.count(leaves, internal);
                right.count(leaves, internal);
            }
            NodeData::Leaf(_) => *leaves += 1,
            NodeData::Placeholder => {}
        }
    }

    fn fmt_subtree(&self, f: &mut Formatter<'_>, indent: usize) -> fmt::Result {
        match &self.node_data {
            NodeData::Kids(left, right) => {
                writeln!(f, "{:indent$}* [{}]", "", self.weight, indent = indent)?;
                left.fmt_subtree(f, indent + 2)?;
                right.fmt_subtree(f, indent + 2)
            }
            NodeData::Leaf(sym) => {
                writeln!(f, "{:indent$}{:#04x} [{}]", "", sym, self.weight, indent = indent)
            }
            NodeData::Placeholder => writeln!(f, "{:indent$}- [0]", "", indent = indent),
        }
    }
}

/// A complete huffman code tree. Owns its nodes outright; there are no parent links.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for the given frequencies. Returns None when the table is empty, since
    /// there is nothing to code.
    pub fn build(freqs: &FrequencyTable) -> Option<HuffmanTree> {
        let mut pq = PriorityQueue::with_capacity(freqs.len() + 1);
        for (sym, freq) in freqs.iter() {
            pq.push(Node::leaf(sym, freq), freq);
        }

        // A single symbol still needs a 1 bit code, so give it a partner that is never used.
        if pq.len() == 1 {
            pq.push(Node::placeholder(), 0);
        }

        // ...then pare it down to one single node with child nodes.
        while pq.len() > 1 {
            let (_, left_child) = pq.pop()?;
            let (_, right_child) = pq.pop()?;
            let parent = Node::merge(left_child, right_child);
            let weight = parent.weight;
            pq.push(parent, weight);
        }

        let (_, root) = pq.pop()?;
        let tree = HuffmanTree { root };
        trace!("\nHuffman tree:\n{}", tree);
        Some(tree)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Longest root to leaf path, which is also the longest code the tree can produce.
    pub fn depth(&self) -> usize {
        self.root.depth as usize
    }

    /// Number of leaves holding a real symbol.
    pub fn leaf_count(&self) -> usize {
        let (mut leaves, mut internal) = (0, 0);
        self.root.count(&mut leaves, &mut internal);
        leaves
    }

    /// Number of nodes with two children.
    pub fn internal_count(&self) -> usize {
        let (mut leaves, mut internal) = (0, 0);
        self.root.count(&mut leaves, &mut internal);
        internal
    }
}

impl Display for HuffmanTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.root.fmt_subtree(f, 0)
    }
}
