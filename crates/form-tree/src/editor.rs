use log::{debug, trace};
use std::collections::HashSet;

use crate::element::{Element, ElementId, ElementPatch};
use crate::id::{fresh_id, IdGenerator};
use crate::options::EditorOptions;
use crate::query;

/// Where a dropped element should land
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Among the root-level elements; `None` appends
    Root { index: Option<usize> },

    /// At the end of a container's children
    Container {
        id: ElementId,
        /// Column the element was dropped on, for multi-column containers
        column: Option<usize>,
    },
}

impl DropTarget {
    /// Append at the end of the root level
    pub fn root() -> Self {
        DropTarget::Root { index: None }
    }

    /// Insert at a root-level position
    pub fn root_at(index: usize) -> Self {
        DropTarget::Root { index: Some(index) }
    }

    /// Append to a container
    pub fn container(id: impl Into<ElementId>) -> Self {
        DropTarget::Container {
            id: id.into(),
            column: None,
        }
    }

    /// Append to a column of a multi-column container
    pub fn column(id: impl Into<ElementId>, column: usize) -> Self {
        DropTarget::Container {
            id: id.into(),
            column: Some(column),
        }
    }
}

/// Editing operations over a form tree
///
/// The editor owns no tree. Every operation borrows the current tree and
/// returns a new one; the input is never modified. An operation that names
/// an id which does not exist returns an unchanged copy of the tree.
#[derive(Debug, Clone, Default)]
pub struct TreeEditor {
    options: EditorOptions,
}

impl TreeEditor {
    /// Create an editor with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor with the given options
    pub fn with_options(options: EditorOptions) -> Self {
        Self { options }
    }

    /// The options this editor was created with
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Insert an element among the root-level elements
    ///
    /// A missing or out-of-range index appends.
    pub fn insert_at_root(
        &self,
        tree: &[Element],
        element: Element,
        index: Option<usize>,
    ) -> Vec<Element> {
        let mut next = tree.to_vec();
        insert_root(&mut next, element, index);
        next
    }

    /// Append an element to the children of a container
    ///
    /// Column membership is derived from the child index at render time, so
    /// `column` does not change where the element is stored.
    pub fn insert_into_container(
        &self,
        tree: &[Element],
        container_id: &ElementId,
        element: Element,
        column: Option<usize>,
    ) -> Vec<Element> {
        let mut next = tree.to_vec();
        if !insert_child(&mut next, container_id, element, column) {
            debug!("insert skipped: no container with id {}", container_id);
        }
        next
    }

    /// Insert an element at a drop target
    pub fn insert(&self, tree: &[Element], target: &DropTarget, element: Element) -> Vec<Element> {
        match target {
            DropTarget::Root { index } => self.insert_at_root(tree, element, *index),
            DropTarget::Container { id, column } => {
                self.insert_into_container(tree, id, element, *column)
            }
        }
    }

    /// Apply a partial update to the element with the given id
    pub fn update_by_id(
        &self,
        tree: &[Element],
        id: &ElementId,
        patch: &ElementPatch,
    ) -> Vec<Element> {
        let mut next = tree.to_vec();
        match find_mut(&mut next, id) {
            Some(element) => {
                patch.apply(element);
                debug!("updated element {}", id);
            }
            None => debug!("update skipped: no element with id {}", id),
        }
        next
    }

    /// Remove the element with the given id, along with its subtree
    pub fn delete_by_id(&self, tree: &[Element], id: &ElementId) -> Vec<Element> {
        let mut next = tree.to_vec();
        if remove_in(&mut next, id) {
            debug!("deleted element {}", id);
        } else {
            debug!("delete skipped: no element with id {}", id);
        }
        next
    }

    /// Deep-clone the element with the given id and insert the clone right
    /// after it
    ///
    /// Every element of the clone gets a fresh id, distinct from every id in
    /// the tree and from every other id in the clone. Only the clone's own
    /// label receives the copy suffix.
    pub fn duplicate_by_id<G>(
        &self,
        tree: &[Element],
        id: &ElementId,
        generator: &mut G,
    ) -> Vec<Element>
    where
        G: IdGenerator + ?Sized,
    {
        let mut next = tree.to_vec();
        let mut taken: HashSet<ElementId> = query::walk(tree)
            .map(|(_, element)| element.id.clone())
            .collect();

        let mut make_copy = |original: &Element| {
            let mut copy = self.clone_with_fresh_ids(original, generator, &mut taken);
            copy.label.push_str(&self.options.copy_suffix);
            debug!("duplicated element {} as {}", original.id, copy.id);
            copy
        };

        if !duplicate_in(&mut next, id, &mut make_copy) {
            debug!("duplicate skipped: no element with id {}", id);
        }
        next
    }

    /// Move the element with the given id to a drop target
    ///
    /// A root index is interpreted against the tree after the element has
    /// been detached. Moving onto a missing container, a leaf, the element
    /// itself or one of its descendants is a no-op.
    pub fn move_element(
        &self,
        tree: &[Element],
        id: &ElementId,
        target: &DropTarget,
    ) -> Vec<Element> {
        let Some(element) = query::find_by_id(tree, id) else {
            debug!("move skipped: no element with id {}", id);
            return tree.to_vec();
        };

        if let DropTarget::Container { id: container_id, .. } = target {
            if query::contains_id(std::slice::from_ref(element), container_id) {
                debug!("move skipped: {} would land inside its own subtree", id);
                return tree.to_vec();
            }
            if !query::find_by_id(tree, container_id).is_some_and(Element::is_container) {
                debug!("move skipped: no container with id {}", container_id);
                return tree.to_vec();
            }
        }

        let moved = element.clone();
        let mut next = tree.to_vec();
        remove_in(&mut next, id);
        match target {
            DropTarget::Root { index } => insert_root(&mut next, moved, *index),
            DropTarget::Container { id: container_id, column } => {
                insert_child(&mut next, container_id, moved, *column);
            }
        }
        debug!("moved element {}", id);
        next
    }

    fn clone_with_fresh_ids<G>(
        &self,
        element: &Element,
        generator: &mut G,
        taken: &mut HashSet<ElementId>,
    ) -> Element
    where
        G: IdGenerator + ?Sized,
    {
        let id = fresh_id(generator, taken, self.options.max_id_attempts);
        let children = element.children.as_ref().map(|children| {
            children
                .iter()
                .map(|child| self.clone_with_fresh_ids(child, generator, taken))
                .collect()
        });

        Element {
            id,
            kind: element.kind.clone(),
            label: element.label.clone(),
            properties: element.properties.clone(),
            children,
            fields: element.fields.clone(),
        }
    }
}

/// Total number of elements at every depth
pub fn count_elements(tree: &[Element]) -> usize {
    tree.iter()
        .map(|element| 1 + count_elements(element.children()))
        .sum()
}

fn insert_root(nodes: &mut Vec<Element>, element: Element, index: Option<usize>) {
    match index {
        Some(index) if index <= nodes.len() => nodes.insert(index, element),
        _ => nodes.push(element),
    }
}

fn insert_child(
    nodes: &mut [Element],
    container_id: &ElementId,
    element: Element,
    column: Option<usize>,
) -> bool {
    let Some(container) = find_mut(nodes, container_id) else {
        return false;
    };
    let Some(children) = container.children.as_mut() else {
        trace!("element {} is a leaf", container_id);
        return false;
    };
    if let Some(column) = column {
        trace!("dropped into column {} of {}", column, container_id);
    }
    children.push(element);
    true
}

fn find_mut<'a>(nodes: &'a mut [Element], id: &ElementId) -> Option<&'a mut Element> {
    for node in nodes.iter_mut() {
        if node.id == *id {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_in(nodes: &mut Vec<Element>, id: &ElementId) -> bool {
    let before = nodes.len();
    nodes.retain(|node| node.id != *id);
    let mut removed = nodes.len() != before;

    for node in nodes.iter_mut() {
        if let Some(children) = node.children.as_mut() {
            removed |= remove_in(children, id);
        }
    }
    removed
}

fn duplicate_in<F>(nodes: &mut Vec<Element>, id: &ElementId, make_copy: &mut F) -> bool
where
    F: FnMut(&Element) -> Element,
{
    for index in 0..nodes.len() {
        if nodes[index].id == *id {
            let copy = make_copy(&nodes[index]);
            nodes.insert(index + 1, copy);
            return true;
        }
        if let Some(children) = nodes[index].children.as_mut() {
            if duplicate_in(children, id, make_copy) {
                return true;
            }
        }
    }
    false
}
