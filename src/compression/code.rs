
//! The bit sequence of a symbol in one particular tree.

use std::fmt;
use smallvec::SmallVec;
use super::tree::{HuffmanTree, NodeIndex, NodeKind};


/// The path from the root of a tree to the leaf of a symbol.
/// The first bit is the decision at the root.
/// A zero bit means left, a one bit means right.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Code {
    bits: SmallVec<[bool; 32]>,
}

impl Code {

    /// Walk from the leaf up to the root, remembering from which side
    /// each parent was reached, and then reverse that path.
    pub fn from_leaf(tree: &HuffmanTree, leaf: NodeIndex) -> Self {
        let mut bits = SmallVec::new();
        let mut current = leaf;

        while let Some(parent) = tree.node(current).parent {
            let is_right_child = match tree.node(parent).kind {
                NodeKind::Internal { right, .. } => right == Some(current),
                NodeKind::Leaf { .. } => false, // leaves are never parents
            };

            bits.push(is_right_child);
            current = parent;
        }

        bits.reverse();
        Code { bits }
    }

    /// Create a code from bits, root decision first.
    pub fn from_bits(bits: &[bool]) -> Self {
        Code { bits: SmallVec::from_slice(bits) }
    }

    /// Number of bits, which is the depth of the leaf.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Only an isolated root leaf would have an empty code,
    /// which the tree construction prevents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// All bits, root decision first.
    #[inline]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }
}

/// Prints zeroes and ones.
impl fmt::Display for Code {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            formatter.write_str(if bit { "1" } else { "0" })?;
        }

        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Code({})", self)
    }
}
