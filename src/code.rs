//! Bit-path assignment for tree leaves.

use crate::freq::ALPHABET;
use crate::tree::{HuffNode, HuffmanTree, NodeId};

/// Per-byte code paths.
///
/// Each entry is the root-to-leaf path packed into a `u64` (first branch
/// in the most significant position) plus its length in bits. A length of
/// zero marks a byte that never occurred. With 32-bit weights the deepest
/// possible leaf sits well under 64 bits, so the packed form never
/// overflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [(u64, u32); ALPHABET],
}

impl CodeTable {
    /// Walks `tree` once, binding every leaf to its path. Left branches
    /// append 0, right branches append 1.
    pub fn build(tree: &HuffmanTree) -> Self {
        let mut codes = [(0u64, 0u32); ALPHABET];
        if let Some(root) = tree.root() {
            match tree.node(root) {
                // A lone leaf has no branch to walk; its code is the
                // single bit 0 by convention.
                HuffNode::Leaf { byte, .. } => codes[*byte as usize] = (0, 1),
                HuffNode::Internal { .. } => assign(tree, root, 0, 0, &mut codes),
            }
        }
        CodeTable { codes }
    }

    /// The code for `byte`, or `None` if it has no leaf in the tree.
    pub fn get(&self, byte: u8) -> Option<(u64, u32)> {
        let (code, len) = self.codes[byte as usize];
        (len > 0).then_some((code, len))
    }

    /// Whether no byte has a code (empty-input tree).
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(|&(_, len)| len == 0)
    }
}

fn assign(
    tree: &HuffmanTree,
    id: NodeId,
    code: u64,
    len: u32,
    codes: &mut [(u64, u32); ALPHABET],
) {
    match tree.node(id) {
        HuffNode::Leaf { byte, .. } => codes[*byte as usize] = (code, len),
        HuffNode::Internal { left, right, .. } => {
            assign(tree, *left, code << 1, len + 1, codes);
            assign(tree, *right, (code << 1) | 1, len + 1, codes);
        }
    }
}
