use std::io::{self, Write};

use super::{Node, NodeId, SuffixTree, ROOT};

/// Description of one non-root vertex: the DFS index of its parent, which of
/// the two source strings the incoming label lives in (0 or 1), and the
/// half-open label interval in that string's own coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexRecord {
    pub parent: usize,
    pub word: u8,
    pub start: usize,
    pub end: usize,
}

/// Walks the finished tree depth-first, children in ascending order of their
/// first character, and returns the records of all non-root vertices in
/// visitation order. Vertex indices are assigned in the same order, with the
/// root taking index 0, so a record's position in the result is its vertex
/// index minus one.
///
/// `boundary` is the length of the first string within the tree's text.
pub fn enumerate(tree: &SuffixTree, boundary: usize) -> Vec<VertexRecord> {
    let mut records = Vec::with_capacity(tree.vertex_count().saturating_sub(1));

    // An explicit stack instead of recursion: a run of one repeated
    // character nests the tree as deep as the text is long.
    let mut stack: Vec<(NodeId, usize)> = vec![(ROOT, 0)];
    let mut next_index = 0;
    while let Some((node, parent)) = stack.pop() {
        let index = next_index;
        next_index += 1;

        if node != ROOT {
            records.push(record_for(tree, boundary, node, parent));
        }

        if let &Node::Internal(ref internal) = tree.get_node(node) {
            for &(_, child) in tree.sorted_edges(internal).iter().rev() {
                stack.push((child, index));
            }
        }
    }

    records
}

/// Prints the vertex count followed by one `p w lf rg` line per non-root
/// vertex in ascending index order.
pub fn write_description<W: Write>(tree: &SuffixTree, boundary: usize, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", tree.vertex_count())?;
    for record in enumerate(tree, boundary) {
        writeln!(out, "{} {} {} {}", record.parent, record.word, record.start, record.end)?;
    }

    Ok(())
}

fn record_for(tree: &SuffixTree, boundary: usize, node: NodeId, parent: usize) -> VertexRecord {
    let (start, end) = match tree.get_node(node) {
        &Node::Internal(ref internal) => (internal.start, internal.end),
        // A leaf label runs to the end of the text; report it clipped to the
        // end of the string it starts in. A leaf created inside the first
        // string keeps growing through the second, but everything past its
        // terminator is unreachable junk.
        &Node::Leaf(start) => {
            (start, if start < boundary { boundary } else { tree.text.len() })
        }
    };

    if start < boundary {
        // Internal labels never span the boundary: the first terminator is
        // unique, so no repeated substring contains it.
        debug_assert!(end <= boundary);
        VertexRecord { parent, word: 0, start, end }
    } else {
        VertexRecord { parent, word: 1, start: start - boundary, end: end - boundary }
    }
}
