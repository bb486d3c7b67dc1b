//! Deterministic Huffman tree construction.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::freq::FrequencyTable;

/// Index of a node within the tree's arena.
pub type NodeId = usize;

/// A node in the Huffman tree.
///
/// `max_byte` on internal nodes is the largest byte value among the
/// node's descendant leaves; it carries the tie-break key up the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    /// A symbol leaf.
    Leaf {
        /// The byte value this leaf encodes.
        byte: u8,
        /// Occurrence count of that byte.
        weight: u32,
    },
    /// An internal node combining two subtrees.
    Internal {
        /// Summed weight of both children.
        weight: u32,
        /// Largest byte value among descendant leaves.
        max_byte: u8,
        /// Arena index of the left child (first extracted).
        left: NodeId,
        /// Arena index of the right child (second extracted).
        right: NodeId,
    },
}

impl HuffNode {
    /// Aggregate occurrence count of all leaves at or below this node.
    pub fn weight(&self) -> u32 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }
}

/// Arena-backed Huffman tree.
///
/// Nodes are appended during construction and never mutated afterwards.
/// `root` is `None` only when the frequency table was empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<HuffNode>,
    root: Option<NodeId>,
}

/// Heap handle for a pending subtree.
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    weight: u32,
    max_byte: u8,
    id: NodeId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.max_byte == other.max_byte
    }
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed weight ordering turns the max-heap into a min-heap;
        // among equal weights the larger representative byte pops first.
        // Subtrees in the heap always cover disjoint byte sets, so no two
        // live entries share both keys.
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| self.max_byte.cmp(&other.max_byte))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl HuffmanTree {
    /// Builds the tree for `freq`.
    ///
    /// Leaves are seeded in ascending byte-value order, then the two
    /// highest-priority subtrees are repeatedly combined, first extracted
    /// becoming the left child. The decoder rebuilds the tree from the
    /// persisted counts with this same procedure, so both sides agree on
    /// every leaf's bit path.
    pub fn build(freq: &FrequencyTable) -> Self {
        let leaf_count = freq.distinct() as usize;
        let mut nodes = Vec::with_capacity(leaf_count.saturating_mul(2));
        let mut heap = BinaryHeap::with_capacity(leaf_count);

        for (byte, weight) in freq.present() {
            let id = nodes.len();
            nodes.push(HuffNode::Leaf { byte, weight });
            heap.push(HeapEntry {
                weight,
                max_byte: byte,
                id,
            });
        }

        let mut root = None;
        while let Some(first) = heap.pop() {
            let Some(second) = heap.pop() else {
                root = Some(first.id);
                break;
            };
            let id = nodes.len();
            let weight = first.weight + second.weight;
            let max_byte = first.max_byte.max(second.max_byte);
            nodes.push(HuffNode::Internal {
                weight,
                max_byte,
                left: first.id,
                right: second.id,
            });
            heap.push(HeapEntry {
                weight,
                max_byte,
                id,
            });
        }

        HuffmanTree { nodes, root }
    }

    /// Arena index of the root, or `None` for an empty tree.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The node stored at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree's construction.
    pub fn node(&self, id: NodeId) -> &HuffNode {
        &self.nodes[id]
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn table(bytes: &[u8]) -> FrequencyTable {
        FrequencyTable::from_reader(&mut Cursor::new(bytes.to_vec())).unwrap()
    }

    #[test]
    fn empty_table_builds_no_tree() {
        let tree = HuffmanTree::build(&table(b""));
        assert!(tree.root().is_none());
        assert!(tree.is_empty());
    }

    #[test]
    fn single_symbol_root_is_a_leaf() {
        let tree = HuffmanTree::build(&table(b"xxxx"));
        let root = tree.root().unwrap();
        assert_eq!(
            tree.node(root),
            &HuffNode::Leaf {
                byte: b'x',
                weight: 4
            }
        );
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn lighter_subtree_becomes_left_child() {
        // b occurs once, a three times; b pops first and goes left.
        let tree = HuffmanTree::build(&table(b"aaab"));
        let root = tree.root().unwrap();
        match tree.node(root) {
            HuffNode::Internal {
                weight,
                max_byte,
                left,
                right,
            } => {
                assert_eq!(*weight, 4);
                assert_eq!(*max_byte, b'b');
                assert_eq!(
                    tree.node(*left),
                    &HuffNode::Leaf {
                        byte: b'b',
                        weight: 1
                    }
                );
                assert_eq!(
                    tree.node(*right),
                    &HuffNode::Leaf {
                        byte: b'a',
                        weight: 3
                    }
                );
            }
            other => panic!("expected internal root, got {other:?}"),
        }
    }

    #[test]
    fn equal_weights_extract_larger_byte_first() {
        let tree = HuffmanTree::build(&table(b"ab"));
        let root = tree.root().unwrap();
        match tree.node(root) {
            HuffNode::Internal { left, right, .. } => {
                assert_eq!(
                    tree.node(*left),
                    &HuffNode::Leaf {
                        byte: b'b',
                        weight: 1
                    }
                );
                assert_eq!(
                    tree.node(*right),
                    &HuffNode::Leaf {
                        byte: b'a',
                        weight: 1
                    }
                );
            }
            other => panic!("expected internal root, got {other:?}"),
        }
    }

    #[test]
    fn construction_is_deterministic() {
        let freq = table(b"the quick brown fox jumps over the lazy dog");
        let first = HuffmanTree::build(&freq);
        let second = HuffmanTree::build(&freq);
        assert_eq!(first, second);
    }

    #[test]
    fn root_weight_equals_total_count() {
        let freq = table(b"mississippi");
        let tree = HuffmanTree::build(&freq);
        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).weight(), freq.total());
    }
}
