//! Array backed binary min-heap used to order nodes while the huffman tree is assembled.
//!
//! Entries are keyed by (weight, insertion sequence). The lowest weight comes out first, and of
//! several equal weights the one pushed earliest wins. That fixed tie-break is what makes tree
//! construction, and therefore the whole compressed stream, reproducible.

#[derive(Debug, Clone)]
struct Entry<T> {
    weight: u64,
    seq: u64,
    item: T,
}

impl<T> Entry<T> {
    #[inline(always)]
    fn key(&self) -> (u64, u64) {
        (self.weight, self.seq)
    }
}

/// Min-priority queue with stable ordering among equal weights.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    elements: Vec<Entry<T>>,
    next_seq: u64,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(size: usize) -> Self {
        PriorityQueue {
            elements: Vec::with_capacity(size),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Weight of the entry pop() would return next.
    pub fn peek_weight(&self) -> Option<u64> {
        self.elements.first().map(|e| e.weight)
    }

    /// Add an item with the given weight.
    pub fn push(&mut self, item: T, weight: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.elements.push(Entry { weight, seq, item });
        self.sift_up(self.elements.len() - 1);
    }

    /// Remove and return the lowest weight item along with its weight.
    pub fn pop(&mut self) -> Option<(u64, T)> {
        if self.elements.is_empty() {
            return None;
        }
        let last = self.elements.len() - 1;
        self.elements.swap(0, last);
        let entry = self.elements.pop()?;
        self.sift_down(0);
        Some((entry.weight, entry.item))
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.elements[i].key() >= self.elements[parent].key() {
                break;
            }
            self.elements.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.elements.len();
        loop {
            let l = 2 * i + 1;
            let r = l + 1;
            let mut smallest = i;
            if l < n && self.elements[l].key() < self.elements[smallest].key() {
                smallest = l;
            }
            if r < n && self.elements[r].key() < self.elements[smallest].key() {
                smallest = r;
            }
            if smallest == i {
                break;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
