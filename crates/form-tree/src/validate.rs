use anyhow::{bail, Result};
use derive_more::Display;
use log::warn;
use std::collections::HashSet;

use crate::element::{Element, ElementId};

/// A broken structural invariant
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Violation {
    /// The same id appears more than once
    #[display(fmt = "duplicate element id {}", _0)]
    DuplicateId(ElementId),

    /// An element has an empty id; `path` holds the sibling index at each level
    #[display(fmt = "element at {:?} has an empty id", path)]
    EmptyId { path: Vec<usize> },
}

/// Collect every invariant violation in the tree, in pre-order
///
/// Each duplicated id is reported once.
pub fn violations(tree: &[Element]) -> Vec<Violation> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut found = Vec::new();
    let mut path = Vec::new();
    check(tree, &mut path, &mut seen, &mut reported, &mut found);
    found
}

/// Fail with a description of the first violation, if any
///
/// The editing operations trust their input; call this where a tree enters
/// from outside, e.g. after deserializing a stored form.
pub fn ensure_valid(tree: &[Element]) -> Result<()> {
    let found = violations(tree);
    for violation in &found {
        warn!("invalid form tree: {}", violation);
    }
    match found.first() {
        Some(first) if found.len() > 1 => {
            bail!("{} (and {} more violations)", first, found.len() - 1)
        }
        Some(first) => bail!("{}", first),
        None => Ok(()),
    }
}

fn check(
    nodes: &[Element],
    path: &mut Vec<usize>,
    seen: &mut HashSet<ElementId>,
    reported: &mut HashSet<ElementId>,
    found: &mut Vec<Violation>,
) {
    for (index, node) in nodes.iter().enumerate() {
        path.push(index);
        if node.id.is_empty() {
            found.push(Violation::EmptyId { path: path.clone() });
        } else if !seen.insert(node.id.clone()) && reported.insert(node.id.clone()) {
            found.push(Violation::DuplicateId(node.id.clone()));
        }
        check(node.children(), path, seen, reported, found);
        path.pop();
    }
}
