//! `Combinations`: lazy lexicographic k-subsets of `0..n`.
//!
//! ```text
//! combinations(2, 4):  [0,1] [0,2] [0,3] [1,2] [1,3] [2,3]
//! ```
//!
//! The iterator owns a single index buffer and advances it in place, so it
//! costs `O(select)` memory regardless of how many subsets it yields.

use std::iter::FusedIterator;

/// Every strictly increasing sequence of `select` indices drawn from
/// `[0, from)`, in lexicographic order.
///
/// `select == 0` and `select > from` yield nothing.  Clone the iterator to
/// restart from the same position.
pub fn combinations(select: usize, from: usize) -> Combinations {
    Combinations::new(select, from)
}

#[derive(Clone, Debug)]
pub struct Combinations {
    select: usize,
    from:   usize,
    /// The next subset to yield; `None` once exhausted.
    next:   Option<Vec<usize>>,
}

impl Combinations {
    pub fn new(select: usize, from: usize) -> Self {
        let next = (select > 0 && select <= from).then(|| (0..select).collect());
        Self { select, from, next }
    }

    pub fn select(&self) -> usize {
        self.select
    }

    pub fn from(&self) -> usize {
        self.from
    }

    /// `C(from, select)`, the number of subsets a fresh iterator yields.
    /// Saturates at `u64::MAX`.
    pub fn count_total(&self) -> u64 {
        if self.select == 0 || self.select > self.from {
            return 0;
        }
        let k = self.select.min(self.from - self.select) as u128;
        let n = self.from as u128;
        let mut acc: u128 = 1;
        for i in 0..k {
            // Exact at every step: acc is C(n - k + i, i) before the update.
            acc = acc * (n - k + i + 1) / (i + 1);
            if acc > u64::MAX as u128 {
                return u64::MAX;
            }
        }
        acc as u64
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;

        // Rightmost index that can still move right.
        let k = self.select;
        let mut successor = current.clone();
        if let Some(i) = (0..k).rev().find(|&i| successor[i] < self.from - k + i) {
            successor[i] += 1;
            for j in i + 1..k {
                successor[j] = successor[j - 1] + 1;
            }
            self.next = Some(successor);
        }
        Some(current)
    }
}

impl FusedIterator for Combinations {}
