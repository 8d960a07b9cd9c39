use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Max-rank-first queue with deterministic tie-breaking.
///
/// Entries are ordered by `(rank, Reverse(sequence))`: the deepest entry pops
/// first and, among equal ranks, the one pushed earliest. The sequence number
/// is a counter owned by the queue, so the order never depends on how the
/// heap arranges equal keys.
#[derive(Debug)]
pub(crate) struct RankQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

#[derive(Debug)]
struct Entry<T> {
    rank: usize,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> RankQueue<T> {
    pub(crate) fn new() -> Self {
        RankQueue {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub(crate) fn push(&mut self, rank: usize, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { rank, seq, item });
    }

    /// Pops the highest-priority item together with its rank.
    pub(crate) fn pop(&mut self) -> Option<(usize, T)> {
        self.heap.pop().map(|entry| (entry.rank, entry.item))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
