extern crate generalized_suffix_tree;
extern crate indoc;

use indoc::indoc;

use generalized_suffix_tree::{enumerate, write_description, InputError, SuffixTree, TextPair, VertexRecord};

fn build(first: &str, second: &str) -> (TextPair, Vec<VertexRecord>) {
    let pair = TextPair::from_lines(first, second).unwrap();
    let records = {
        let tree = SuffixTree::from_text(pair.text());
        enumerate(&tree, pair.boundary())
    };

    (pair, records)
}

fn describe(first: &str, second: &str) -> String {
    let pair = TextPair::from_lines(first, second).unwrap();
    let tree = SuffixTree::from_text(pair.text());

    let mut out = Vec::new();
    write_description(&tree, pair.boundary(), &mut out).unwrap();

    String::from_utf8(out).unwrap()
}

/// Spells out the root-to-leaf string of every leaf, in vertex order.
fn leaf_strings(records: &[VertexRecord], first: &str, second: &str) -> Vec<String> {
    let count = records.len() + 1;

    let mut has_children = vec![false; count];
    for record in records {
        has_children[record.parent] = true;
    }

    let mut paths: Vec<String> = vec![String::new(); count];
    let mut leaves = Vec::new();
    for (i, record) in records.iter().enumerate() {
        let vertex = i + 1;
        let label = if record.word == 0 {
            &first[record.start..record.end]
        } else {
            &second[record.start..record.end]
        };

        let path = format!("{}{}", paths[record.parent], label);
        paths[vertex] = path;

        if !has_children[vertex] {
            leaves.push(paths[vertex].clone());
        }
    }

    leaves
}

fn all_suffixes(first: &str, second: &str) -> Vec<String> {
    let mut suffixes: Vec<String> = (0..first.len()).map(|i| first[i..].to_owned())
        .chain((0..second.len()).map(|i| second[i..].to_owned()))
        .collect();
    suffixes.sort();

    suffixes
}

#[test]
fn hand_verified_pair() {
    assert_eq!(describe("ab$", "ba#"), indoc! {"
        9
        0 1 2 3
        0 0 2 3
        0 0 0 1
        3 1 2 3
        3 0 1 3
        0 0 1 2
        6 0 2 3
        6 1 1 3
    "});
}

#[test]
fn terminators_only() {
    assert_eq!(describe("$", "#"), indoc! {"
        3
        0 1 0 1
        0 0 0 1
    "});
}

// The active point comes to rest exactly at the far end of the closed "ab"
// edge before the final 'e'; without the walk-down before comparing, the
// builder would split there and emit a zero-length edge (17 vertices).
#[test]
fn split_at_edge_end() {
    assert_eq!(describe("abcabdabe$", "a#"), indoc! {"
        16
        0 1 1 2
        0 0 9 10
        0 0 0 1
        3 1 1 2
        3 0 1 2
        5 0 2 10
        5 0 5 10
        5 0 8 10
        0 0 1 2
        9 0 2 10
        9 0 5 10
        9 0 8 10
        0 0 2 10
        0 0 5 10
        0 0 8 10
    "});
}

#[test]
fn repeated_characters() {
    assert_eq!(describe("aaaa$", "aaa#"), indoc! {"
        13
        0 1 3 4
        0 0 4 5
        0 0 0 1
        3 1 3 4
        3 0 4 5
        3 0 1 2
        6 1 3 4
        6 0 4 5
        6 0 2 3
        9 1 3 4
        9 0 4 5
        9 0 3 5
    "});
}

#[test]
fn alternating_characters() {
    assert_eq!(describe("abab$", "baba#"), indoc! {"
        17
        0 1 4 5
        0 0 4 5
        0 0 0 1
        3 1 4 5
        3 0 1 2
        5 0 4 5
        5 0 2 3
        7 1 4 5
        7 0 3 5
        0 0 1 2
        10 0 4 5
        10 0 2 3
        12 1 4 5
        12 0 3 4
        14 0 4 5
        14 1 3 5
    "});
}

#[test]
fn longer_pair() {
    assert_eq!(describe("mississippi$", "sipping#"), indoc! {"
        31
        0 1 7 8
        0 0 11 12
        0 1 6 8
        0 0 1 2
        4 0 11 12
        4 1 5 8
        4 0 8 11
        7 0 11 12
        7 1 5 8
        4 0 2 5
        10 0 8 12
        10 0 5 12
        0 0 0 12
        0 1 5 8
        0 0 8 9
        15 0 10 11
        16 0 11 12
        16 1 5 8
        15 0 9 11
        19 0 11 12
        19 1 5 8
        0 0 2 3
        22 0 4 5
        23 0 8 11
        24 0 11 12
        24 1 5 8
        23 0 5 12
        22 0 3 5
        28 0 8 12
        28 0 5 12
    "});
}

const PAIRS: &[(&str, &str)] = &[
    ("ab$", "ba#"),
    ("$", "#"),
    ("aaaa$", "aaa#"),
    ("abab$", "baba#"),
    ("abcabdabe$", "a#"),
    ("mississippi$", "sipping#"),
    ("banana$", "ananas#"),
    ("zzzzzzzzzz$", "zzz#"),
];

#[test]
fn one_leaf_per_suffix() {
    for &(first, second) in PAIRS {
        let pair = TextPair::from_lines(first, second).unwrap();
        let tree = SuffixTree::from_text(pair.text());

        assert_eq!(tree.leaf_count(), pair.first_len() + pair.second_len());
        assert_eq!(tree.vertex_count(), enumerate(&tree, pair.boundary()).len() + 1);
    }
}

#[test]
fn leaves_spell_exactly_the_suffixes() {
    for &(first, second) in PAIRS {
        let (_, records) = build(first, second);

        let mut leaves = leaf_strings(&records, first, second);
        leaves.sort();

        assert_eq!(leaves, all_suffixes(first, second));
    }
}

#[test]
fn tree_is_minimal() {
    for &(first, second) in PAIRS {
        let (_, records) = build(first, second);
        let count = records.len() + 1;

        let mut children = vec![0; count];
        for record in records.iter() {
            assert!(record.start < record.end);
            children[record.parent] += 1;
        }

        for (vertex, &arity) in children.iter().enumerate() {
            // No vertex has exactly one child: such a split would be
            // redundant, and the two terminators give the root at least two.
            assert!(arity != 1, "{}/{}: vertex {} has one child", first, second, vertex);
        }
    }
}

#[test]
fn siblings_ascend_by_first_character() {
    for &(first, second) in PAIRS {
        let (_, records) = build(first, second);

        let mut last_edge: Vec<Option<u8>> = vec![None; records.len() + 1];
        for record in records.iter() {
            let word = if record.word == 0 { first } else { second };
            let head = word.as_bytes()[record.start];

            if let Some(previous) = last_edge[record.parent] {
                assert!(previous < head);
            }
            last_edge[record.parent] = Some(head);
        }
    }
}

#[test]
fn enumeration_is_deterministic() {
    let pair = TextPair::from_lines("mississippi$", "sipping#").unwrap();
    let tree = SuffixTree::from_text(pair.text());

    assert_eq!(enumerate(&tree, pair.boundary()), enumerate(&tree, pair.boundary()));
}

#[test]
fn stepwise_construction_matches_from_text() {
    let pair = TextPair::from_lines("banana$", "ananas#").unwrap();

    let mut stepped = SuffixTree::new(pair.text());
    for _ in 0..pair.text().len() {
        stepped.step();
    }
    let built = SuffixTree::from_text(pair.text());

    assert_eq!(
        enumerate(&stepped, pair.boundary()),
        enumerate(&built, pair.boundary())
    );
}

#[test]
fn rejects_malformed_input() {
    assert_eq!(
        TextPair::from_lines("", "a#").unwrap_err(),
        InputError::Empty { word: 0 }
    );
    assert_eq!(
        TextPair::from_lines("ab$", "ab").unwrap_err(),
        InputError::BadTerminator { word: 1, expected: '#' }
    );
    assert_eq!(
        TextPair::from_lines("a#", "a#").unwrap_err(),
        InputError::BadTerminator { word: 0, expected: '$' }
    );
    assert_eq!(
        TextPair::from_lines("aB$", "a#").unwrap_err(),
        InputError::StrayCharacter { word: 0, character: 'B' }
    );
    // A terminator may not appear anywhere but the end.
    assert_eq!(
        TextPair::from_lines("a$a$", "a#").unwrap_err(),
        InputError::StrayCharacter { word: 0, character: '$' }
    );
}

#[test]
fn accepts_minimal_input() {
    let pair = TextPair::from_lines("$", "#").unwrap();

    assert_eq!(pair.text(), &b"$#"[..]);
    assert_eq!(pair.boundary(), 1);
    assert_eq!(pair.first_len(), 1);
    assert_eq!(pair.second_len(), 1);
}
