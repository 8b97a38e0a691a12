//! `Trie`: every legal ordering of a fixed set of action slots.
//!
//! # Pairing rule
//!
//! Slots come in pairs `(2i, 2i + 1)`: initiation then completion of job
//! `i`.  An odd slot may appear only after its even partner.  The tree holds
//! one root-to-leaf path per ordering that obeys the rule, so for `2k` slots
//! it has `(2k)! / 2^k` leaves (90 for three jobs, 2 520 for four).
//!
//! The tree depends only on the slot count, so a planner builds it once and
//! shares it, read-only, across every planning call.  Children are stored in
//! ascending key order, which makes every walk deterministic.

/// One slot placement; its children are the slots that may legally follow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrieNode {
    pub key:      usize,
    pub children: Vec<TrieNode>,
}

impl TrieNode {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Trie {
    slots:      usize,
    roots:      Vec<TrieNode>,
    node_count: usize,
}

impl Trie {
    /// Build the tree for slots `[0, slots)`.
    ///
    /// # Panics
    /// Panics if `slots > 64` (placed slots are tracked in a `u64` mask);
    /// the planner caps its configuration far below that.
    pub fn new(slots: usize) -> Self {
        assert!(slots <= 64, "trie supports at most 64 slots, got {slots}");
        let mut node_count = 0;
        let roots = build(slots, 0, &mut node_count);
        Self { slots, roots, node_count }
    }

    /// Children of the virtual root: the slots that may come first.
    pub fn roots(&self) -> &[TrieNode] {
        &self.roots
    }

    pub fn slot_count(&self) -> usize {
        self.slots
    }

    /// Total nodes in the tree (excluding the virtual root).
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Every root-to-leaf path, in walk order.
    pub fn leaf_paths(&self) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        let mut path = Vec::with_capacity(self.slots);
        collect_paths(&self.roots, &mut path, &mut out);
        out
    }
}

/// `true` if `slot` may be placed once the slots in `placed` are down.
#[inline]
fn may_follow(slot: usize, placed: u64) -> bool {
    slot % 2 == 0 || placed & (1u64 << (slot - 1)) != 0
}

fn build(slots: usize, placed: u64, node_count: &mut usize) -> Vec<TrieNode> {
    (0..slots)
        .filter(|&slot| placed & (1u64 << slot) == 0 && may_follow(slot, placed))
        .map(|slot| {
            *node_count += 1;
            TrieNode { key: slot, children: build(slots, placed | (1u64 << slot), node_count) }
        })
        .collect()
}

fn collect_paths(nodes: &[TrieNode], path: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    for node in nodes {
        path.push(node.key);
        if node.is_leaf() {
            out.push(path.clone());
        } else {
            collect_paths(&node.children, path, out);
        }
        path.pop();
    }
}
