
//! Builds the Huffman tree for one coding step.
//! The tree is rebuilt from scratch for every symbol,
//! so the construction must be fully deterministic:
//! the encoder and the decoder must arrive at the very same tree.

use smallvec::SmallVec;
use crate::meta::{FrequencyTable, ALPHABET_SIZE};
use super::code::Code;


/// Position of a node inside the tree.
pub type NodeIndex = usize;

/// Nodes that still need to be combined, ordered by descending frequency.
type Sequence = SmallVec<[NodeIndex; ALPHABET_SIZE]>;


/// A single node of the tree.
/// Children and parents are referenced by their index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {

    /// For leaves, the remaining occurrences of the symbol.
    /// For internal nodes, the sum of both children.
    pub frequency: u64,

    /// `None` only for the root.
    pub parent: Option<NodeIndex>,

    /// Whether this is a leaf or has children.
    pub kind: NodeKind,
}

/// Distinguishes leaves from internal nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {

    /// A symbol that has occurrences left.
    Leaf { symbol: u8 },

    /// Reached with a zero bit for the left child and a one bit for the right child.
    /// Only the root of a tree with a single leaf has no right child.
    Internal { left: NodeIndex, right: Option<NodeIndex> },
}


/// A binary prefix tree over all symbols with a non-zero frequency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: Option<NodeIndex>,

    /// The leaf of each symbol, `None` for symbols that do not occur.
    leaves: [Option<NodeIndex>; ALPHABET_SIZE],

    live_leaves: usize,
}

impl HuffmanTree {

    /// Build the tree for the current frequencies.
    ///
    /// Leaves are sorted by descending frequency, where equal frequencies
    /// keep ascending symbol order. Then the last two nodes are repeatedly
    /// combined, the second to last becoming the left child.
    /// The combined node is inserted behind all nodes with an equal or higher frequency.
    ///
    /// A single leaf receives a synthesized parent, such that its code has one bit.
    /// A table without any occurrences produces an empty tree.
    /// The sum of all frequencies must fit into 64 bits,
    /// which `FrequencyTable::from_counts` ensures.
    pub fn build(frequencies: &FrequencyTable) -> Self {
        let live_leaves = frequencies.live_count();
        let mut nodes = Vec::with_capacity(2 * live_leaves);
        let mut leaves = [None; ALPHABET_SIZE];
        let mut sequence = Sequence::new();

        for (symbol, frequency) in frequencies.live_symbols() {
            let leaf = push_node(&mut nodes, frequency, NodeKind::Leaf { symbol });
            leaves[symbol as usize] = Some(leaf);
            insert_descending(&mut sequence, &nodes, leaf);
        }

        if let [single] = *sequence.as_slice() {
            let frequency = nodes[single].frequency;
            let parent = push_node(&mut nodes, frequency, NodeKind::Internal { left: single, right: None });
            nodes[single].parent = Some(parent);
            sequence[0] = parent;
        }

        while let [.., left, right] = *sequence.as_slice() {
            sequence.truncate(sequence.len() - 2);

            // never exceeds the total of the table
            let frequency = nodes[left].frequency.saturating_add(nodes[right].frequency);
            let parent = push_node(&mut nodes, frequency, NodeKind::Internal { left, right: Some(right) });

            nodes[left].parent = Some(parent);
            nodes[right].parent = Some(parent);
            insert_descending(&mut sequence, &nodes, parent);
        }

        HuffmanTree { root: sequence.pop(), nodes, leaves, live_leaves }
    }

    /// The node where decoding of each symbol starts.
    /// `None` if the tree was built from an empty table.
    #[inline]
    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Look up a node of this tree.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    /// The leaf of the symbol, or `None` if the symbol does not occur anymore.
    #[inline]
    pub fn leaf(&self, symbol: u8) -> Option<NodeIndex> {
        self.leaves[symbol as usize]
    }

    /// Number of symbols with a leaf in this tree.
    pub fn live_leaves(&self) -> usize {
        self.live_leaves
    }

    /// Number of nodes, including the root and all leaves.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Move from a node to one of its children.
    /// A zero bit selects the left child, a one bit selects the right child.
    /// Returns `None` for leaves and for the missing right child of a single-leaf tree.
    #[inline]
    pub fn child(&self, index: NodeIndex, bit: bool) -> Option<NodeIndex> {
        match self.nodes[index].kind {
            NodeKind::Internal { left, right } => if bit { right } else { Some(left) },
            NodeKind::Leaf { .. } => None,
        }
    }

    /// The symbol of a leaf, `None` for internal nodes.
    #[inline]
    pub fn symbol(&self, index: NodeIndex) -> Option<u8> {
        match self.nodes[index].kind {
            NodeKind::Leaf { symbol } => Some(symbol),
            NodeKind::Internal { .. } => None,
        }
    }

    /// The code of the symbol in this tree, or `None` if the symbol does not occur anymore.
    pub fn code_of(&self, symbol: u8) -> Option<Code> {
        self.leaf(symbol).map(|leaf| Code::from_leaf(self, leaf))
    }

    /// The frequency and code of each symbol in this tree, in ascending symbol order.
    pub fn code_table(&self) -> Vec<(u8, u64, Code)> {
        self.leaves.iter().enumerate()
            .filter_map(|(symbol, leaf)| leaf.map(|leaf| (symbol as u8, leaf)))
            .map(|(symbol, leaf)| (symbol, self.nodes[leaf].frequency, Code::from_leaf(self, leaf)))
            .collect()
    }
}


fn push_node(nodes: &mut Vec<Node>, frequency: u64, kind: NodeKind) -> NodeIndex {
    nodes.push(Node { frequency, parent: None, kind });
    nodes.len() - 1
}

/// Insert behind all nodes with an equal or higher frequency,
/// which keeps the sequence sorted and never reorders ties.
fn insert_descending(sequence: &mut Sequence, nodes: &[Node], index: NodeIndex) {
    let frequency = nodes[index].frequency;
    let position = sequence.partition_point(|&other| nodes[other].frequency >= frequency);
    sequence.insert(position, index);
}


#[cfg(test)]
mod test {
    use super::*;

    fn table(pairs: &[(u8, u64)]) -> FrequencyTable {
        let mut counts = [0; ALPHABET_SIZE];
        for &(symbol, frequency) in pairs { counts[symbol as usize] = frequency; }
        FrequencyTable::from_counts(counts).unwrap()
    }

    fn code(tree: &HuffmanTree, symbol: u8) -> String {
        tree.code_of(symbol).unwrap().to_string()
    }

    #[test]
    fn empty_table(){
        let tree = HuffmanTree::build(&FrequencyTable::new());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.live_leaves(), 0);
        assert_eq!(tree.node_count(), 0);
        assert!(tree.code_of(0).is_none());
    }

    #[test]
    fn single_leaf_has_one_bit(){
        let tree = HuffmanTree::build(&table(&[ (b'x', 5) ]));
        assert_eq!(tree.live_leaves(), 1);
        assert_eq!(tree.node_count(), 2);
        assert_eq!(code(&tree, b'x'), "0");

        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).frequency, 5);
        assert_eq!(tree.child(root, true), None);
        assert_eq!(tree.symbol(tree.child(root, false).unwrap()), Some(b'x'));
    }

    #[test]
    fn two_leaves(){
        // sorted: a(3) b(1), so a is the left child
        let tree = HuffmanTree::build(&table(&[ (b'a', 3), (b'b', 1) ]));
        assert_eq!(code(&tree, b'a'), "0");
        assert_eq!(code(&tree, b'b'), "1");
        assert_eq!(tree.node(tree.root().unwrap()).frequency, 4);
    }

    #[test]
    fn ties_keep_ascending_symbol_order(){
        // sorted: a b, the lower symbol first
        let tree = HuffmanTree::build(&table(&[ (b'b', 1), (b'a', 1) ]));
        assert_eq!(code(&tree, b'a'), "0");
        assert_eq!(code(&tree, b'b'), "1");

        // sorted: a b c d
        // c+d = 4 moves to the front: (c d) a b
        // a+b = 4 stays behind: (c d) (a b)
        let tree = HuffmanTree::build(&table(&[ (b'd', 2), (b'c', 2), (b'b', 2), (b'a', 2) ]));
        assert_eq!(code(&tree, b'c'), "00");
        assert_eq!(code(&tree, b'd'), "01");
        assert_eq!(code(&tree, b'a'), "10");
        assert_eq!(code(&tree, b'b'), "11");
    }

    #[test]
    fn combined_node_stays_behind_equal_frequencies(){
        // sorted: c(2) a(1) b(1)
        // combining a+b yields 2, which is placed behind c: c (a b)
        // so c is the left child of the root
        let tree = HuffmanTree::build(&table(&[ (b'a', 1), (b'b', 1), (b'c', 2) ]));
        assert_eq!(code(&tree, b'c'), "0");
        assert_eq!(code(&tree, b'a'), "10");
        assert_eq!(code(&tree, b'b'), "11");
    }

    #[test]
    fn combined_node_moves_before_smaller_frequencies(){
        // sorted: a(5) b(3) c(2) d(2)
        // c+d = 4 moves before b: a (c d) b
        // (c d)+b = 7 moves before a: ((c d) b) a
        let tree = HuffmanTree::build(&table(&[ (b'a', 5), (b'b', 3), (b'c', 2), (b'd', 2) ]));
        assert_eq!(code(&tree, b'a'), "1");
        assert_eq!(code(&tree, b'b'), "01");
        assert_eq!(code(&tree, b'c'), "000");
        assert_eq!(code(&tree, b'd'), "001");
        assert_eq!(tree.node(tree.root().unwrap()).frequency, 12);
    }

    #[test]
    fn parents_and_children_agree(){
        let frequencies = FrequencyTable::from_bytes(b"the quick brown fox jumps over the lazy dog");
        let tree = HuffmanTree::build(&frequencies);

        assert_eq!(tree.live_leaves(), frequencies.live_count());
        assert_eq!(tree.node_count(), 2 * tree.live_leaves() - 1);

        for index in 0 .. tree.node_count() {
            if let NodeKind::Internal { left, right: Some(right) } = tree.node(index).kind {
                assert_eq!(tree.node(left).parent, Some(index));
                assert_eq!(tree.node(right).parent, Some(index));
                assert_eq!(tree.node(index).frequency, tree.node(left).frequency + tree.node(right).frequency);
            }
        }
    }

    #[test]
    fn identical_tables_build_identical_trees(){
        let frequencies = FrequencyTable::from_bytes(b"abracadabra, mississippi");
        let first = HuffmanTree::build(&frequencies);
        let second = HuffmanTree::build(&frequencies.clone());

        assert_eq!(first, second);
        assert_eq!(first.code_table(), second.code_table());
    }

    #[test]
    fn codes_are_prefix_free(){
        let frequencies = FrequencyTable::from_bytes(b"abracadabra, mississippi, hello world");
        let codes: Vec<String> = HuffmanTree::build(&frequencies).code_table().into_iter()
            .map(|(_, _, code)| code.to_string()).collect();

        for (index, code) in codes.iter().enumerate() {
            for (other_index, other) in codes.iter().enumerate() {
                if index != other_index {
                    assert!(!other.starts_with(code.as_str()), "{} is a prefix of {}", code, other);
                }
            }
        }
    }

    #[test]
    fn full_alphabet(){
        let counts: Vec<u64> = (0 .. ALPHABET_SIZE as u64).map(|symbol| symbol % 7 + 1).collect();
        let mut array = [0; ALPHABET_SIZE];
        array.copy_from_slice(&counts);

        let tree = HuffmanTree::build(&FrequencyTable::from_counts(array).unwrap());
        assert_eq!(tree.live_leaves(), ALPHABET_SIZE);
        assert_eq!(tree.node_count(), 2 * ALPHABET_SIZE - 1);
        assert_eq!(tree.node(tree.root().unwrap()).frequency, counts.iter().sum::<u64>());
    }
}
