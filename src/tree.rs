//! Binary search tree over sliding-window positions ("the index").
//!
//! This is the insert/find-match/delete engine for the LZSS dictionary
//! search. It is structured the same way as the `dad`/`lson`/`rson`
//! parallel arrays in `direct_ports::lzhuf::LZSS` (indices are the only
//! pointers, the whole tree lives in three `Vec`s sized to the window),
//! but keyed by a single root rather than 256 per-symbol roots, and
//! `UNUSED` is represented by an out-of-range sentinel instead of the
//! window position `0` (see DESIGN.md for why).

use crate::ring_buffer::RingBuffer;

/// Sentinel meaning "no child" or "no parent". Deliberately outside the
/// valid index domain `0..=window_size` so it can never collide with a
/// live window position or the root slot.
const NIL: usize = usize::MAX;

#[derive(Clone, Copy)]
struct Node {
    parent: usize,
    small_child: usize,
    large_child: usize,
}

impl Default for Node {
    fn default() -> Self {
        Node { parent: NIL, small_child: NIL, large_child: NIL }
    }
}

/// The index tree. `nodes` has `window_size + 1` slots: positions
/// `0..window_size` mirror the dictionary, and `root` (== `window_size`)
/// is the permanent sentinel root whose `large_child` is the real root of
/// the search tree.
pub struct Tree {
    nodes: Vec<Node>,
    root: usize,
}

impl Tree {
    pub fn create(window_size: usize) -> Self {
        Self {
            nodes: vec![Node::default(); window_size + 1],
            root: window_size,
        }
    }

    /// Establish the tree with a single real node at `root_child`.
    pub fn init_tree(&mut self, root_child: usize) {
        self.nodes[self.root] = Node { parent: NIL, small_child: NIL, large_child: root_child };
        self.nodes[root_child] = Node { parent: self.root, small_child: NIL, large_child: NIL };
    }

    /// Splice `new` into `old`'s slot under `old`'s parent; `new` must
    /// already be a descendant of `old`, or `NIL`.
    fn contract_node(&mut self, old: usize, new: usize) {
        let parent = self.nodes[old].parent;
        if new != NIL {
            self.nodes[new].parent = parent;
        }
        if self.nodes[parent].large_child == old {
            self.nodes[parent].large_child = new;
        } else {
            self.nodes[parent].small_child = new;
        }
        self.nodes[old] = Node::default();
    }

    /// `new` is not in the tree and takes `old`'s exact position, inheriting
    /// both children.
    fn replace_node(&mut self, old: usize, new: usize) {
        let parent = self.nodes[old].parent;
        if self.nodes[parent].large_child == old {
            self.nodes[parent].large_child = new;
        } else {
            self.nodes[parent].small_child = new;
        }
        self.nodes[new] = self.nodes[old];
        let small = self.nodes[new].small_child;
        if small != NIL {
            self.nodes[small].parent = new;
        }
        let large = self.nodes[new].large_child;
        if large != NIL {
            self.nodes[large].parent = new;
        }
        self.nodes[old] = Node::default();
    }

    /// Maximum of `n`'s left (small) subtree. Requires `n`'s small child to
    /// be live.
    fn find_next_node(&self, n: usize) -> usize {
        let mut p = self.nodes[n].small_child;
        debug_assert!(p != NIL);
        while self.nodes[p].large_child != NIL {
            p = self.nodes[p].large_child;
        }
        p
    }

    /// Remove the node for window position `n`, tolerating a position that
    /// was never inserted (its slot is still the zeroed default, so
    /// `parent == NIL` and this is a no-op). The driver relies on this to
    /// delete positions during the early advances of the main loop, before
    /// every window slot has had a chance to be inserted.
    pub fn delete_node(&mut self, n: usize) {
        if self.nodes[n].parent == NIL {
            return;
        }
        let small_child = self.nodes[n].small_child;
        let large_child = self.nodes[n].large_child;
        if large_child == NIL {
            self.contract_node(n, small_child);
        } else if small_child == NIL {
            self.contract_node(n, large_child);
        } else {
            let r = self.find_next_node(n);
            self.contract_node(r, self.nodes[r].small_child);
            self.replace_node(n, r);
        }
    }

    /// Insert window position `new` into the tree while simultaneously
    /// finding the best match for the `look_ahead`-byte run starting there.
    /// Returns `(match_len, match_pos)`. Position `0` is reserved for the
    /// end-of-stream marker and is never inserted or searched.
    pub fn add_node(&mut self, new: usize, dictionary: &RingBuffer<u8>, look_ahead: usize) -> (usize, usize) {
        if new == 0 {
            return (0, 0);
        }
        let mut match_len = 0usize;
        let mut match_pos = 0usize;
        let mut test_node = self.nodes[self.root].large_child;
        loop {
            let mut delta: i16 = 0;
            let mut i = 0usize;
            while i < look_ahead {
                delta = dictionary.get_abs(new + i) as i16 - dictionary.get_abs(test_node + i) as i16;
                if delta != 0 {
                    break;
                }
                i += 1;
            }
            if i >= match_len {
                match_len = i;
                match_pos = test_node;
            }
            if match_len >= look_ahead {
                // exact match across the whole look-ahead: bleed the older
                // duplicate out of the tree by taking its place.
                self.replace_node(test_node, new);
                return (match_len, match_pos);
            }
            let child = if delta >= 0 { self.nodes[test_node].large_child } else { self.nodes[test_node].small_child };
            if child == NIL {
                if delta >= 0 {
                    self.nodes[test_node].large_child = new;
                } else {
                    self.nodes[test_node].small_child = new;
                }
                self.nodes[new] = Node { parent: test_node, small_child: NIL, large_child: NIL };
                return (match_len, match_pos);
            }
            test_node = child;
        }
    }
}
