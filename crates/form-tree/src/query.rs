//! Read-only traversal helpers over a form tree
//!
//! All lookups visit elements depth-first in pre-order: a node before its
//! children, siblings left to right.

use std::fmt::Write;

use crate::element::{Element, ElementId};

/// Pre-order iterator over `(depth, element)` pairs
///
/// Root-level elements have depth 0.
pub struct Walk<'a> {
    stack: Vec<(usize, &'a Element)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Element);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, current) = self.stack.pop()?;

        // Push children in reverse order so they're popped in correct order
        for child in current.children().iter().rev() {
            self.stack.push((depth + 1, child));
        }

        Some((depth, current))
    }
}

/// Walk the whole tree in pre-order
pub fn walk(tree: &[Element]) -> Walk<'_> {
    Walk {
        stack: tree.iter().rev().map(|element| (0, element)).collect(),
    }
}

/// Find the first element with the given id
pub fn find_by_id<'a>(tree: &'a [Element], id: &ElementId) -> Option<&'a Element> {
    walk(tree)
        .map(|(_, element)| element)
        .find(|element| element.id == *id)
}

/// Check whether an element with the given id exists
pub fn contains_id(tree: &[Element], id: &ElementId) -> bool {
    find_by_id(tree, id).is_some()
}

/// All ids in pre-order
pub fn collect_ids(tree: &[Element]) -> Vec<ElementId> {
    walk(tree).map(|(_, element)| element.id.clone()).collect()
}

/// Depth of the element with the given id (root level = 0)
pub fn depth_of(tree: &[Element], id: &ElementId) -> Option<usize> {
    walk(tree)
        .find(|(_, element)| element.id == *id)
        .map(|(depth, _)| depth)
}

/// The container holding the element with the given id
///
/// Returns `None` for root-level elements and unknown ids.
pub fn parent_of<'a>(tree: &'a [Element], id: &ElementId) -> Option<&'a Element> {
    walk(tree)
        .map(|(_, element)| element)
        .find(|element| element.children().iter().any(|child| child.id == *id))
}

/// Summary statistics of a tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total number of elements at every depth
    pub elements: usize,
    /// Elements with a children sequence
    pub containers: usize,
    /// Elements without a children sequence
    pub leaves: usize,
    /// Deepest level reached (0 for a flat tree, 0 for an empty tree)
    pub max_depth: usize,
}

/// Compute summary statistics in a single pass
pub fn stats(tree: &[Element]) -> TreeStats {
    walk(tree).fold(TreeStats::default(), |mut stats, (depth, element)| {
        stats.elements += 1;
        if element.is_container() {
            stats.containers += 1;
        } else {
            stats.leaves += 1;
        }
        stats.max_depth = stats.max_depth.max(depth);
        stats
    })
}

/// Render the tree as an indented outline, one element per line
///
/// Each line reads `- <label> (<kind>) #<id>`, indented by two spaces per
/// level.
pub fn outline(tree: &[Element]) -> String {
    let mut out = String::new();
    for (depth, element) in walk(tree) {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = write!(
            out,
            "{:indent$}- {} ({}) #{}",
            "",
            element.label,
            element.kind,
            element.id,
            indent = depth * 2
        );
    }
    out
}
