use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use log::{debug, trace};

use crate::tokenizer::{FreqTable, Symbol};

pub type CodeTable = HashMap<Symbol, String>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        match self {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }
}

pub type HuffmanTree = Node;

/// Heap entry. `seq` is the creation order of the node and breaks
/// frequency ties: the older node pops first.
#[derive(Eq, PartialEq)]
struct HeapNode {
    freq: u64,
    seq: usize,
    node: Box<Node>,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys: BinaryHeap is a max-heap
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shannon entropy of the table in bits per symbol.
pub fn entropy_from_freq(freq: &FreqTable) -> f64 {
    let total: u64 = freq.values().sum();
    if total == 0 {
        return 0.0;
    }
    let total_f = total as f64;

    let entropy: f64 = freq
        .values()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total_f;
            -p * p.log2()
        })
        .sum();

    debug!(
        "Calculated entropy: {:.4} bits/symbol (Total samples: {})",
        entropy, total
    );
    entropy
}

/// Mean code length in bits per symbol, weighted by frequency.
pub fn average_code_length(freq: &FreqTable, codes: &CodeTable) -> f64 {
    let total: u64 = freq.values().sum();
    if total == 0 {
        return 0.0;
    }
    let bits: u64 = freq
        .iter()
        .filter_map(|(symbol, &count)| codes.get(symbol).map(|c| count * c.len() as u64))
        .sum();
    bits as f64 / total as f64
}

/// Builds the merge tree, or `None` for an empty table.
///
/// Leaves enter the heap ordered by (frequency, symbol) and every node is
/// stamped with a creation sequence number. Each step pops the two
/// lowest (frequency, sequence) nodes; the first popped becomes the left
/// child. The result depends only on the table's contents, never on its
/// iteration order. Zero counts are skipped; merged counts saturate at
/// `u64::MAX`.
pub fn build_huffman_tree(frequencies: &FreqTable) -> Option<Box<HuffmanTree>> {
    debug!(
        "Building Huffman Tree from {} unique symbols",
        frequencies.len()
    );

    let mut freq_vec: Vec<_> = frequencies.iter().filter(|&(_, &f)| f > 0).collect();
    freq_vec.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));

    let mut heap = BinaryHeap::with_capacity(freq_vec.len());
    let mut seq = 0;

    for (symbol, &freq) in freq_vec {
        heap.push(HeapNode {
            freq,
            seq,
            node: Box::new(Node::Leaf {
                symbol: symbol.clone(),
                freq,
            }),
        });
        seq += 1;
    }
    debug!("Initial heap size: {}", heap.len());

    while heap.len() > 1 {
        let left = heap.pop()?;
        let right = heap.pop()?;

        let freq = left.freq.saturating_add(right.freq);
        let new_node = Node::Internal {
            freq,
            left: left.node,
            right: right.node,
        };
        heap.push(HeapNode {
            freq,
            seq,
            node: Box::new(new_node),
        });
        seq += 1;
    }

    debug!("Tree construction complete.");
    heap.pop().map(|n| n.node)
}

/// Assigns each leaf its root path, `0` for left and `1` for right.
///
/// A root that is itself a leaf gets the code `"0"`.
pub fn build_code_table(root: &Node) -> CodeTable {
    let mut table = CodeTable::new();
    let mut stack = vec![(root, String::new())];

    while let Some((node, prefix)) = stack.pop() {
        match node {
            Node::Leaf { symbol, freq } => {
                let code = if prefix.is_empty() && *freq > 0 {
                    "0".to_string()
                } else {
                    prefix
                };
                trace!("Assigning code to symbol {:?} : '{}'", symbol, code);
                table.insert(symbol.clone(), code);
            }
            Node::Internal { left, right, .. } => {
                stack.push((right, format!("{}1", prefix)));
                stack.push((left, format!("{}0", prefix)));
            }
        }
    }

    debug!("Code table built with {} entries.", table.len());
    table
}
