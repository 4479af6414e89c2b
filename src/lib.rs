//! Online construction of a generalized suffix tree over two
//! terminator-separated strings, using Ukkonen's algorithm.

#[macro_use]
extern crate lazy_static;
extern crate bit_vec;
extern crate smallvec;

use std::collections::HashMap;
use std::fmt;
use std::str;

use smallvec::SmallVec;

pub mod alphabet;
mod enumerate;
mod input;

pub use self::enumerate::{enumerate, write_description, VertexRecord};
pub use self::input::{InputError, TextPair};

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug)]
struct InternalNode {
    start: usize,
    end: usize,
    edges: HashMap<u8, NodeId>,

    suffix_link: Option<NodeId>,
}

/// A node owns the label of the edge leading into it, so no separate edge
/// type is needed. Leaves hold only their label start: their label runs to
/// the current end of the text and grows implicitly as characters are added.
#[derive(Debug)]
enum Node {
    Internal(InternalNode),
    Leaf(usize),
}

impl Node {
    fn new_internal(start: usize, end: usize) -> Node {
        Node::Internal(InternalNode {
            start,
            end,
            edges: HashMap::new(),

            suffix_link: None,
        })
    }

    fn new_leaf(start: usize) -> Node {
        Node::Leaf(start)
    }

    fn internal(&self) -> &InternalNode {
        if let Node::Internal(ref internal) = self {
            internal
        } else {
            panic!("Expected this node to be an internal node.")
        }
    }

    fn mut_internal(&mut self) -> &mut InternalNode {
        if let Node::Internal(ref mut internal) = self {
            internal
        } else {
            panic!("Expected this node to be an internal node.")
        }
    }
}

pub struct SuffixTree<'a> {
    text: &'a [u8],

    nodes: Vec<Node>,

    active_node: NodeId,
    // Offset into the text of the first character of the active edge; the
    // character itself identifies the edge among the active node's children.
    active_edge: usize,
    active_length: usize,

    remaining: usize,

    position: usize,
}

impl<'a> fmt::Debug for SuffixTree<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "SuffixTree{{")?;
        writeln!(f, "    active_node: {}", self.active_node)?;
        writeln!(f, "    active_edge: '{}'", self.text.get(self.active_edge).map(|&c| c as char).unwrap_or('-'))?;
        writeln!(f, "    active_length: {}\n", self.active_length)?;

        writeln!(f, "    remaining: {}", self.remaining)?;
        writeln!(f, "    step: {}\n", self.position)?;

        writeln!(f, "    nodes: [")?;
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                &Node::Internal(ref internal) => {
                    let text = str::from_utf8(&self.text[internal.start..internal.end])
                                .unwrap_or("<invalid_string>");

                    let edges: HashMap<_, _> = internal.edges.iter().map(|(k, v)| (*k as char, *v)).collect();

                    writeln!(f, "       InternalNode: {{")?;
                    writeln!(f, "          id: {}", i)?;
                    writeln!(f, "          text: {}", text)?;
                    writeln!(f, "          children: {:?}", edges)?;
                    writeln!(f, "          suffix_link: {:?}", internal.suffix_link)?;
                    writeln!(f, "       }}")?;
                },
                &Node::Leaf(start) => {
                    let text = str::from_utf8(&self.text[start..self.position])
                                .unwrap_or("<invalid_string>");

                    writeln!(f, "       LeafNode: {{")?;
                    writeln!(f, "          id: {}", i)?;
                    writeln!(f, "          text: {}", text)?;
                    writeln!(f, "       }}")?;
                }
            }
        }
        writeln!(f, "    ]")?;

        writeln!(f, "}}")
    }
}

impl<'a> SuffixTree<'a> {
    pub fn new(text: &'a [u8]) -> SuffixTree<'a> {
        let mut root = Node::new_internal(0, 0);
        // The root is its own suffix link, which gives suffix link chasing
        // a uniform base case.
        root.mut_internal().suffix_link = Some(ROOT);

        SuffixTree {
            text,

            nodes: vec![root],

            active_node: ROOT,
            active_edge: 0,
            active_length: 0,

            remaining: 0,

            position: 0,
        }
    }

    /// Builds the complete tree of `text` in one call.
    pub fn from_text(text: &'a [u8]) -> SuffixTree<'a> {
        let mut tree = SuffixTree::new(text);
        for _ in 0..text.len() {
            tree.step();
        }

        tree
    }

    pub fn vertex_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| match node {
            &&Node::Leaf(_) => true,
            _ => false,
        }).count()
    }

    fn get_node(&self, node: NodeId) -> &Node {
        &self.nodes[node]
    }

    fn get_mut_node(&mut self, node: NodeId) -> &mut Node {
        &mut self.nodes[node]
    }

    fn get_active_node(&self) -> &InternalNode {
        self.nodes[self.active_node].internal()
    }

    fn get_mut_active_node(&mut self) -> &mut InternalNode {
        self.nodes[self.active_node].mut_internal()
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn label_start(&self, node: NodeId) -> usize {
        match *self.get_node(node) {
            Node::Internal(InternalNode { start, .. }) => start,
            Node::Leaf(start) => start,
        }
    }

    /// Children of `node` in ascending first-character order. The map gives
    /// fast lookup during construction; every ordered walk sorts explicitly
    /// instead of relying on its iteration order.
    fn sorted_edges(&self, node: &InternalNode) -> SmallVec<[(u8, NodeId); 8]> {
        let mut edges: SmallVec<[(u8, NodeId); 8]> =
            node.edges.iter().map(|(&c, &child)| (c, child)).collect();
        edges.sort_unstable_by_key(|&(c, _)| c);

        edges
    }

    /// Consumes one character of the text, inserting every suffix that can no
    /// longer be extended implicitly.
    pub fn step(&mut self) {
        let letter = self.text[self.position];
        self.remaining += 1;

        let mut previously_created_node: Option<NodeId> = None;
        loop {
            if self.active_length == 0 {
                self.active_edge = self.position;
            }

            let first = self.text[self.active_edge];
            match self.get_active_node().edges.get(&first).cloned() {
                None => {
                    // No edge starts with the current character, so the
                    // suffix ends here: add a leaf to the active node.
                    let leaf = self.push_node(Node::new_leaf(self.position));
                    self.get_mut_active_node().edges.insert(first, leaf);

                    let node = self.active_node;
                    self.chain_suffix_link(&mut previously_created_node, node);
                }
                Some(next) => {
                    if self.walk_down(next) {
                        continue;
                    }

                    if self.text[self.label_start(next) + self.active_length] == letter {
                        // The suffix is already present on this edge.
                        // Advancing the active point extends all remaining
                        // suffixes implicitly, so this round ends without
                        // touching the tree.
                        self.active_length += 1;

                        let node = self.active_node;
                        self.chain_suffix_link(&mut previously_created_node, node);
                        break;
                    }

                    let split = self.split_active_edge(next, first);
                    self.chain_suffix_link(&mut previously_created_node, split);
                }
            }

            self.remaining -= 1;

            if self.active_node == ROOT && self.active_length > 0 {
                // The next suffix owed is one character shorter; at the root
                // that shows up as a shorter active edge instead of a suffix
                // link hop.
                self.active_length -= 1;
                self.active_edge = self.position + 1 - self.remaining;
            } else {
                self.active_node = self.get_active_node().suffix_link.unwrap_or(ROOT);
            }

            if self.remaining == 0 {
                break;
            }
        }

        self.position += 1;
    }

    /// Canonicalizes the active point: while it sits at or beyond the end of
    /// a closed active edge, descend into the child and re-aim at the next
    /// edge. Runs before any character comparison, so the active length
    /// always falls strictly inside the active edge. Leaf edges are
    /// unbounded and are never descended into.
    fn walk_down(&mut self, next: NodeId) -> bool {
        let length = match *self.get_node(next) {
            Node::Internal(InternalNode { start, end, .. }) => end - start,
            Node::Leaf(_) => return false,
        };

        if self.active_length < length {
            return false;
        }

        self.active_edge += length;
        self.active_length -= length;
        self.active_node = next;

        true
    }

    /// Splits the active edge at the active length. The existing child keeps
    /// the lower part of the label, the new internal node takes the upper
    /// part, and the current character becomes a fresh leaf under the split.
    fn split_active_edge(&mut self, next: NodeId, first: u8) -> NodeId {
        let length = self.active_length;
        let label_start = self.label_start(next);

        let split = self.push_node(Node::new_internal(label_start, label_start + length));
        let leaf = self.push_node(Node::new_leaf(self.position));

        match *self.get_mut_node(next) {
            Node::Internal(InternalNode { ref mut start, .. }) => *start += length,
            Node::Leaf(ref mut start) => *start += length,
        }

        let to_existing = self.text[label_start + length];
        let to_leaf = self.text[self.position];
        {
            let internal = self.get_mut_node(split).mut_internal();
            internal.edges.insert(to_existing, next);
            internal.edges.insert(to_leaf, leaf);
        }

        self.get_mut_active_node().edges.insert(first, split);

        split
    }

    /// Links the internal node recorded by the previous insertion of this
    /// round to `node`, then records `node` for the next one. Chains every
    /// node created while inserting the suffixes of one character.
    fn chain_suffix_link(&mut self, previously_created_node: &mut Option<NodeId>, node: NodeId) {
        if let Some(previous) = previously_created_node.take() {
            self.get_mut_node(previous).mut_internal().suffix_link = Some(node);
        }

        *previously_created_node = Some(node);
    }

    fn visualize_node(&self, node: NodeId) -> Vec<String> {
        match self.get_node(node) {
            &Node::Internal(ref internal) => {
                let edge_label = str::from_utf8(&self.text[internal.start..internal.end])
                    .unwrap_or("<invalid_string>");
                let text = format!("({}){}", node, edge_label);
                let edges = self.sorted_edges(internal);

                let mut lines = Vec::new();
                for (i, &(_, child)) in edges.iter().enumerate() {
                    for (j, line) in self.visualize_node(child).into_iter().enumerate() {
                        let prefix = if i == 0 && j == 0 {
                            text.to_owned()
                        } else {
                            " ".repeat(text.len())
                        };

                        let line = if i == 0 && j == 0 {
                            format!("{}┳{}", prefix, line)
                        } else if i < edges.len() - 1 && j == 0 {
                            format!("{}┣{}", prefix, line)
                        } else if j == 0 {
                            format!("{}┗{}", prefix, line)
                        } else if i < edges.len() - 1 {
                            format!("{}┃{}", prefix, line)
                        } else {
                            format!("{} {}", prefix, line)
                        };

                        lines.push(line);
                    }
                }

                lines
            },
            &Node::Leaf(start) => {
                let edge_label = str::from_utf8(&self.text[start..self.position])
                    .unwrap_or("<invalid_string>");
                vec![format!("({}){}", node, edge_label)]
            }
        }
    }

    pub fn visualize(&self) {
        let text = str::from_utf8(&self.text[..self.position]).unwrap_or("<invalid_string>");
        println!("'{}'", text);
        println!("active point is ({}, {:?}, {})",
            self.active_node,
            self.text.get(self.active_edge).map(|&c| c as char),
            self.active_length);
        println!("step is {}, remaining is {}", self.position, self.remaining);
        for line in self.visualize_node(ROOT) {
            println!("{}", line);
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if let &Node::Internal(InternalNode { suffix_link: Some(link), .. }) = node {
                if i != ROOT {
                    println!("Suffix link from {} to {}", i, link);
                }
            }
        }
    }
}
